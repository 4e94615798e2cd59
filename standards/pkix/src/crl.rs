//! Certificate Revocation List.
//!
//! Like [`crate::cert::Certificate`], decode is pure: no date checks, no
//! signature confirmation. `crlExtensions` is interpreted only as far as
//! the AKI and CRL-number extensions chain verification needs
//! ([`CrlExtensions::authority_key_identifier`],
//! [`CrlExtensions::crl_number`]); everything else, and every per-entry
//! extension, is kept as raw OID/critical/value triples rather than
//! re-parsed.

use tasn1::oid::{CertExtId, CrlExtId, HashId, OidKind};
use tasn1::prelude::*;

use crate::algorithms::AlgorithmIdentifier;
use crate::cert::{decode_time, encode_time, CertTime};
use crate::error::{PkixError, PkixErrorKind};
use crate::extensions::{decode_authority_key_id, decode_optional_bool_default_false, AuthorityKeyIdentifier};
use crate::name::Name;

fn wrap(source: tasn1::error::DecodeError) -> PkixError {
    PkixError::new(PkixErrorKind::Crl { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

/// One raw `extnID, critical, extnValue` triple. `CrlExtensions` and each
/// revoked entry's extension list both use this shape; only a handful of
/// extensions ([`CrlExtId::Number`], [`CertExtId::AuthKey`]) get a typed
/// accessor, the rest are exposed only through [`CrlExtensions::raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtension {
    pub oid: Vec<u8>,
    pub critical: bool,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrlExtensions {
    pub items: Vec<RawExtension>,
}

impl CrlExtensions {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, Option<PkixErrorKind>), PkixError> {
        let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(rest, offset).map_err(wrap)?;

        let mut items = Vec::new();
        let mut seen: Vec<Vec<u8>> = Vec::new();
        let mut deferred: Option<PkixErrorKind> = None;

        while !content.is_empty() {
            let (ext_content, tail) =
                tasn1::primitives::sequence::decode_sequence(content, offset).map_err(wrap)?;
            let (oid, rest2) =
                tasn1::primitives::oid::decode(ext_content, offset, OidKind::Ignore).map_err(wrap)?;
            let (critical, rest3) = decode_optional_bool_default_false(rest2, offset).map_err(wrap)?;
            let (value, rest4) = tasn1::primitives::octetstring::decode(rest3, offset).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(rest4, offset).map_err(wrap)?;

            if seen.contains(&oid.bytes) {
                deferred.get_or_insert(PkixErrorKind::DuplicateOid);
            }
            seen.push(oid.bytes.clone());

            if critical
                && CrlExtId::from_oid_bytes(&oid.bytes).is_none()
                && CertExtId::from_oid_bytes(&oid.bytes) != Some(CertExtId::AuthKey)
            {
                deferred.get_or_insert(PkixErrorKind::CriticalExtensionUnknown { kind: OidKind::CrlExtType });
            }

            items.push(RawExtension { oid: oid.bytes, critical, value: value.to_vec() });
            content = tail;
        }

        Ok((Self { items }, deferred))
    }

    pub fn raw(&self, oid: &[u8]) -> Option<&[u8]> {
        self.items.iter().find(|e| e.oid == oid).map(|e| e.value.as_slice())
    }

    /// The CRL's `authorityKeyIdentifier` extension, used to accelerate
    /// issuer lookup the same way [`crate::cert::TbsCertificate`] does.
    pub fn authority_key_identifier(&self) -> Option<AuthorityKeyIdentifier> {
        let raw = self.raw(CertExtId::AuthKey.oid_bytes())?;
        decode_authority_key_id(raw, 0).ok()
    }

    /// `cRLNumber ::= INTEGER`, present on every CRL this crate expects to
    /// chain delta CRLs against.
    pub fn crl_number(&self) -> Option<Vec<u8>> {
        let raw = self.raw(CrlExtId::Number.oid_bytes())?;
        let (content, rest) = tasn1::primitives::read_tlv(raw, 0, Tag::INTEGER, false).ok()?;
        tasn1::primitives::sequence::assert_exhausted(rest, 0).ok()?;
        Some(content.to_vec())
    }
}

/// One entry of `revokedCertificates`. `crlEntryExtensions` is kept as raw
/// triples only, parsed past rather than individually interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedCertificate {
    pub user_certificate: Vec<u8>,
    pub revocation_date: CertTime,
    pub crl_entry_extensions: Vec<RawExtension>,
}

fn decode_entry_extensions(input: &[u8], offset: usize) -> Result<(Vec<RawExtension>, &[u8]), PkixError> {
    if input.is_empty() {
        return Ok((Vec::new(), input));
    }
    let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
    let mut items = Vec::new();
    while !content.is_empty() {
        let (ext_content, tail) = tasn1::primitives::sequence::decode_sequence(content, offset).map_err(wrap)?;
        let (oid, rest2) = tasn1::primitives::oid::decode(ext_content, offset, OidKind::Ignore).map_err(wrap)?;
        let (critical, rest3) = decode_optional_bool_default_false(rest2, offset).map_err(wrap)?;
        let (value, rest4) = tasn1::primitives::octetstring::decode(rest3, offset).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(rest4, offset).map_err(wrap)?;
        items.push(RawExtension { oid: oid.bytes, critical, value: value.to_vec() });
        content = tail;
    }
    Ok((items, rest))
}

impl RevokedCertificate {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (serial_content, cur) =
            tasn1::primitives::read_tlv(content, offset, Tag::INTEGER, false).map_err(wrap)?;
        let (revocation_date, cur) = decode_time(cur, offset).map_err(wrap)?;
        let (crl_entry_extensions, cur) = decode_entry_extensions(cur, offset)?;
        tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
        Ok((
            Self { user_certificate: serial_content.to_vec(), revocation_date, crl_entry_extensions },
            rest,
        ))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::write_header(Tag::INTEGER, false, self.user_certificate.len(), &mut content);
        content.extend_from_slice(&self.user_certificate);
        encode_time(&self.revocation_date, &mut content);
        if !self.crl_entry_extensions.is_empty() {
            let mut ext_content = Vec::new();
            for ext in &self.crl_entry_extensions {
                ext_content.extend_from_slice(&encode_raw_extension(ext));
            }
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, ext_content.len(), &mut content);
            content.extend_from_slice(&ext_content);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

fn encode_raw_extension(ext: &RawExtension) -> Vec<u8> {
    let mut content = Vec::new();
    tasn1::primitives::oid::encode(&ext.oid, &mut content);
    if ext.critical {
        tasn1::primitives::boolean::encode(true, &mut content);
    }
    tasn1::primitives::octetstring::encode(&ext.value, &mut content);
    let mut out = Vec::new();
    tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
    out.extend_from_slice(&content);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertList {
    pub version: u8,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub issuer_raw: Vec<u8>,
    pub this_update: CertTime,
    pub next_update: Option<CertTime>,
    pub revoked_certificates: Vec<RevokedCertificate>,
    pub crl_extensions: CrlExtensions,
}

impl TbsCertList {
    pub fn authority_key_identifier(&self) -> Option<AuthorityKeyIdentifier> {
        self.crl_extensions.authority_key_identifier()
    }

    pub fn crl_number(&self) -> Option<Vec<u8>> {
        self.crl_extensions.crl_number()
    }

    pub fn find_entry(&self, serial: &[u8]) -> Option<&RevokedCertificate> {
        self.revoked_certificates.iter().find(|e| e.user_certificate == serial)
    }
}

fn decode_version(input: &[u8], offset: usize) -> Result<(u8, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag == Tag::INTEGER && !id.constructed {
            let (v, rest) = tasn1::primitives::integer::decode_u32(input, offset).map_err(wrap)?;
            if v != 1 {
                return Err(wrap(parse_error("CRL version, if present, must be v2 (value 1)")));
            }
            return Ok((1, rest));
        }
    }
    Ok((0, input))
}

fn decode_optional_next_update(input: &[u8], offset: usize) -> Result<(Option<CertTime>, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag == Tag::UTC_TIME || id.tag == Tag::GENERALIZED_TIME {
            let (t, rest) = decode_time(input, offset).map_err(wrap)?;
            return Ok((Some(t), rest));
        }
    }
    Ok((None, input))
}

fn decode_optional_revoked_list(
    input: &[u8],
    offset: usize,
) -> Result<(Vec<RevokedCertificate>, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag == Tag::SEQUENCE && id.constructed {
            let (mut content, rest) =
                tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
            let mut entries = Vec::new();
            while !content.is_empty() {
                let (entry, tail) = RevokedCertificate::decode(content, offset)?;
                entries.push(entry);
                content = tail;
            }
            return Ok((entries, rest));
        }
    }
    Ok((Vec::new(), input))
}

fn decode_optional_crl_extensions(
    input: &[u8],
    offset: usize,
    version: u8,
) -> Result<(CrlExtensions, Option<PkixErrorKind>, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
            if version != 1 {
                return Err(wrap(parse_error("crlExtensions present on a v1 CRL")));
            }
            let (content, rest) =
                tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (extensions, deferred) = CrlExtensions::decode(content, offset)?;
            return Ok((extensions, deferred, rest));
        }
    }
    Ok((CrlExtensions::default(), None, input))
}

/// `CertificateList ::= SEQUENCE { tbsCertList, signatureAlgorithm,
/// signatureValue BIT STRING }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateList {
    pub tbs: TbsCertList,
    pub tbs_raw: Vec<u8>,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
    raw: Vec<u8>,
    deferred: Option<PkixErrorKind>,
}

impl CertificateList {
    pub fn decode(input: &[u8]) -> Result<Self, PkixError> {
        let (content, outer_rest) = tasn1::primitives::sequence::decode_sequence(input, 0).map_err(wrap)?;

        let tbs_start = content;
        let (tbs_content, after_tbs) =
            tasn1::primitives::sequence::decode_sequence(content, 0).map_err(wrap)?;
        let tbs_raw = tbs_start[..tbs_start.len() - after_tbs.len()].to_vec();

        let (version, cur) = decode_version(tbs_content, 0)?;
        let (signature, cur) = AlgorithmIdentifier::decode(cur, 0)?;

        let issuer_start = cur;
        let (issuer, cur) = Name::decode(cur, 0)?;
        let issuer_raw = issuer_start[..issuer_start.len() - cur.len()].to_vec();

        let (this_update, cur) = decode_time(cur, 0).map_err(wrap)?;
        let (next_update, cur) = decode_optional_next_update(cur, 0)?;
        let (revoked_certificates, cur) = decode_optional_revoked_list(cur, 0)?;
        let (crl_extensions, mut deferred, cur) = decode_optional_crl_extensions(cur, 0, version)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;

        let tbs = TbsCertList {
            version,
            signature,
            issuer,
            issuer_raw,
            this_update,
            next_update,
            revoked_certificates,
            crl_extensions,
        };

        let (signature_algorithm, cur) = AlgorithmIdentifier::decode(after_tbs, 0)?;
        let (signature, cur) = tasn1::primitives::bitstring::decode(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(outer_rest, 0).map_err(wrap)?;

        if tbs.signature.algorithm != signature_algorithm.algorithm {
            return Err(PkixError::new(PkixErrorKind::SigOidMismatch));
        }
        if signature_algorithm.sig_id().is_none() {
            deferred.get_or_insert(PkixErrorKind::AlgoId);
        }

        Ok(Self { tbs, tbs_raw, signature_algorithm, signature, raw: input.to_vec(), deferred })
    }

    /// Surfaces any unknown-critical-extension, duplicate-OID, or
    /// unrecognised-signature-algorithm failure deferred during `decode`.
    pub fn finish(&self) -> Result<(), PkixError> {
        match &self.deferred {
            Some(kind) => Err(PkixError::new(kind.clone())),
            None => Ok(()),
        }
    }

    pub fn der(&self) -> &[u8] {
        &self.raw
    }

    pub fn issuer_name_hash(&self, alg: HashId, digest: &dyn Digest) -> Vec<u8> {
        digest.hash(alg, &self.tbs.issuer_raw)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&self.tbs_raw);
        content.extend_from_slice(&self.signature_algorithm.encode());
        tasn1::primitives::bitstring::encode(&self.signature, &mut content);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasn1::oid::{CertNameId, SigId};

    fn simple_name(cn: &str) -> Name {
        crate::name::Name(vec![crate::name::RelativeDistinguishedName(vec![
            crate::name::AttributeTypeAndValue {
                oid: CertNameId::CommonName.oid_bytes().to_vec(),
                known: Some(CertNameId::CommonName),
                tag: Tag::UTF8_STRING,
                value: cn.as_bytes().to_vec(),
            },
        ])])
    }

    fn utc(year: u16, mon: u8, day: u8) -> CertTime {
        CertTime { fields: DateFields { year, mon, day, hour: 0, min: 0, sec: 0 }, kind: crate::cert::TimeKind::Utc }
    }

    fn sample_der(with_v2_and_crl_number: bool, revoked: &[(&[u8], CertTime)]) -> Vec<u8> {
        let issuer = simple_name("example.com").encode();
        let sig_alg = AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa).encode();

        let mut tbs_content = Vec::new();
        if with_v2_and_crl_number {
            tasn1::primitives::integer::encode_u32(1, &mut tbs_content);
        }
        tbs_content.extend_from_slice(&sig_alg);
        tbs_content.extend_from_slice(&issuer);
        tasn1::primitives::time::encode_utc_time(&utc(2024, 1, 1).fields, &mut tbs_content);
        tasn1::primitives::time::encode_utc_time(&utc(2024, 2, 1).fields, &mut tbs_content);

        if !revoked.is_empty() {
            let mut list_content = Vec::new();
            for (serial, date) in revoked {
                let mut entry_content = Vec::new();
                tasn1::primitives::write_header(Tag::INTEGER, false, serial.len(), &mut entry_content);
                entry_content.extend_from_slice(serial);
                tasn1::primitives::time::encode_utc_time(&date.fields, &mut entry_content);
                let mut entry = Vec::new();
                tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, entry_content.len(), &mut entry);
                entry.extend_from_slice(&entry_content);
                list_content.extend_from_slice(&entry);
            }
            let mut list = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, list_content.len(), &mut list);
            list.extend_from_slice(&list_content);
            tbs_content.extend_from_slice(&list);
        }

        if with_v2_and_crl_number {
            let mut crl_number_value = Vec::new();
            tasn1::primitives::integer::encode_u32(7, &mut crl_number_value);
            let mut ext_entry_content = Vec::new();
            tasn1::primitives::oid::encode(CrlExtId::Number.oid_bytes(), &mut ext_entry_content);
            tasn1::primitives::octetstring::encode(&crl_number_value, &mut ext_entry_content);
            let mut ext_entry = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, ext_entry_content.len(), &mut ext_entry);
            ext_entry.extend_from_slice(&ext_entry_content);
            let mut ext_seq = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, ext_entry.len(), &mut ext_seq);
            ext_seq.extend_from_slice(&ext_entry);

            let mut wrapped = Vec::new();
            tasn1::primitives::write_header(Tag::context(0), true, ext_seq.len(), &mut wrapped);
            wrapped.extend_from_slice(&ext_seq);
            tbs_content.extend_from_slice(&wrapped);
        }

        let mut tbs = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, tbs_content.len(), &mut tbs);
        tbs.extend_from_slice(&tbs_content);

        let mut content = Vec::new();
        content.extend_from_slice(&tbs);
        content.extend_from_slice(&sig_alg);
        tasn1::primitives::bitstring::encode(&BitString::exact(vec![0xAA, 0xBB]), &mut content);

        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    #[test]
    fn decodes_v1_crl_with_no_revocations() {
        let der = sample_der(false, &[]);
        let crl = CertificateList::decode(&der).unwrap();
        assert_eq!(crl.tbs.version, 0);
        assert!(crl.tbs.revoked_certificates.is_empty());
        assert!(crl.finish().is_ok());
    }

    #[test]
    fn decodes_v2_crl_with_crl_number_and_entries() {
        let entries = [(&[0x01][..], utc(2024, 1, 15)), (&[0x02][..], utc(2024, 1, 20))];
        let der = sample_der(true, &entries);
        let crl = CertificateList::decode(&der).unwrap();
        assert_eq!(crl.tbs.version, 1);
        assert_eq!(crl.tbs.revoked_certificates.len(), 2);
        assert!(crl.tbs.crl_number().is_some());
        assert!(crl.tbs.find_entry(&[0x02]).is_some());
        assert!(crl.tbs.find_entry(&[0x99]).is_none());
    }

    #[test]
    fn round_trips_through_encode() {
        let entries = [(&[0x01][..], utc(2024, 1, 15))];
        let der = sample_der(true, &entries);
        let crl = CertificateList::decode(&der).unwrap();
        assert_eq!(crl.encode(), der);
    }

    #[test]
    fn crl_extensions_on_v1_crl_is_rejected() {
        // A v1 CRL (no version field) cannot carry crlExtensions; the
        // sample builder only emits them alongside a v2 version field, so
        // this exercises the decoder's own guard by hand-assembling one.
        let issuer = simple_name("example.com").encode();
        let sig_alg = AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa).encode();
        let mut tbs_content = Vec::new();
        tbs_content.extend_from_slice(&sig_alg);
        tbs_content.extend_from_slice(&issuer);
        tasn1::primitives::time::encode_utc_time(&utc(2024, 1, 1).fields, &mut tbs_content);
        tasn1::primitives::time::encode_utc_time(&utc(2024, 2, 1).fields, &mut tbs_content);
        let mut wrapped = Vec::new();
        tasn1::primitives::write_header(Tag::context(0), true, 2, &mut wrapped);
        wrapped.extend_from_slice(&[0x30, 0x00]);
        tbs_content.extend_from_slice(&wrapped);
        let mut tbs = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, tbs_content.len(), &mut tbs);
        tbs.extend_from_slice(&tbs_content);
        let mut content = Vec::new();
        content.extend_from_slice(&tbs);
        content.extend_from_slice(&sig_alg);
        tasn1::primitives::bitstring::encode(&BitString::exact(vec![0xAA]), &mut content);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        assert!(CertificateList::decode(&out).is_err());
    }
}
