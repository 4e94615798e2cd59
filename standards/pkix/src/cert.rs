//! X.509 `Certificate`.
//!
//! Decode is pure: no hashing, no signature verification, no wall-clock
//! reads. Anything that needs a collaborator (name-hash fingerprints for
//! self-signed detection, date checks against `now`, signature
//! confirmation) is a separate method the caller invokes explicitly with
//! its own `Digest`/`SignaturePrimitive`/clock, after `decode` succeeds.
//! Unknown-critical-extension and duplicate-extension-OID failures are
//! deferred rather than aborting `decode`; call [`Certificate::finish`]
//! once the rest of the certificate has been inspected to surface them.

use tasn1::oid::{CertExtId, HashId};
use tasn1::prelude::*;

use crate::algorithms::AlgorithmIdentifier;
use crate::error::{PkixError, PkixErrorKind};
use crate::extensions::{
    AuthorityKeyIdentifier, BasicConstraints, Extensions, ExtensionValue, GeneralName, KeyUsage,
};
use crate::name::Name;

fn wrap(source: tasn1::error::DecodeError) -> PkixError {
    PkixError::new(PkixErrorKind::Cert { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKind {
    Utc,
    Generalized,
}

/// A `Time` CHOICE value, kept with which wire form produced it so a
/// re-encode is byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertTime {
    pub fields: DateFields,
    pub kind: TimeKind,
}

/// Decodes a `Time` CHOICE (`UTCTime | GeneralizedTime`), shared by
/// `Validity` here and by `TBSCertList`'s `thisUpdate`/`nextUpdate` and
/// revoked-entry `revocationDate` in `crl.rs`.
pub(crate) fn decode_time(
    input: &[u8],
    offset: usize,
) -> Result<(CertTime, &[u8]), tasn1::error::DecodeError> {
    let (id, _) = Identifier::read(input).ok_or(tasn1::error::DecodeError::new(
        tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
    ))?;
    if id.tag == Tag::UTC_TIME {
        let (fields, rest) = tasn1::primitives::time::decode_utc_time(input, offset)?;
        Ok((CertTime { fields, kind: TimeKind::Utc }, rest))
    } else if id.tag == Tag::GENERALIZED_TIME {
        let (fields, rest) = tasn1::primitives::time::decode_generalized_time(input, offset)?;
        Ok((CertTime { fields, kind: TimeKind::Generalized }, rest))
    } else {
        Err(parse_error("Time must be UTCTime or GeneralizedTime"))
    }
}

pub(crate) fn encode_time(t: &CertTime, out: &mut Vec<u8>) {
    match t.kind {
        TimeKind::Utc => tasn1::primitives::time::encode_utc_time(&t.fields, out),
        TimeKind::Generalized => tasn1::primitives::time::encode_generalized_time(&t.fields, out),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
    pub not_before: CertTime,
    pub not_after: CertTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (algorithm, content_rest) = AlgorithmIdentifier::decode(content, offset)?;
        let (public_key, content_rest) =
            tasn1::primitives::bitstring::decode(content_rest, offset).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(content_rest, offset).map_err(wrap)?;
        Ok((Self { algorithm, public_key }, rest))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&self.algorithm.encode());
        tasn1::primitives::bitstring::encode(&self.public_key, &mut content);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertificate {
    pub version: u8,
    pub serial_number: Vec<u8>,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub issuer_raw: Vec<u8>,
    pub validity: Validity,
    pub subject: Name,
    pub subject_raw: Vec<u8>,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub issuer_unique_id: Option<BitString>,
    pub subject_unique_id: Option<BitString>,
    pub extensions: Extensions,
}

impl TbsCertificate {
    pub fn basic_constraints(&self) -> Option<&BasicConstraints> {
        match self.extensions.get(CertExtId::BasicCa).map(|e| &e.value) {
            Some(ExtensionValue::BasicConstraints(b)) => Some(b),
            _ => None,
        }
    }

    pub fn key_usage(&self) -> Option<KeyUsage> {
        match self.extensions.get(CertExtId::KeyUsage).map(|e| &e.value) {
            Some(ExtensionValue::KeyUsage(ku)) => Some(*ku),
            _ => None,
        }
    }

    pub fn subject_alt_names(&self) -> Option<&[GeneralName]> {
        match self.extensions.get(CertExtId::AltNames).map(|e| &e.value) {
            Some(ExtensionValue::SubjectAltName(names)) => Some(names),
            _ => None,
        }
    }

    pub fn authority_key_identifier(&self) -> Option<&AuthorityKeyIdentifier> {
        match self.extensions.get(CertExtId::AuthKey).map(|e| &e.value) {
            Some(ExtensionValue::AuthorityKeyIdentifier(aki)) => Some(aki),
            _ => None,
        }
    }

    pub fn subject_key_identifier(&self) -> Option<&[u8]> {
        match self.extensions.get(CertExtId::SubjKey).map(|e| &e.value) {
            Some(ExtensionValue::SubjectKeyIdentifier(ski)) => Some(ski),
            _ => None,
        }
    }

    pub fn is_ca(&self) -> bool {
        self.basic_constraints().map(|b| b.ca).unwrap_or(false)
    }
}

fn decode_version(input: &[u8], offset: usize) -> Result<(u8, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
            let (content, rest) =
                tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (v, inner_rest) = tasn1::primitives::integer::decode_u32(content, offset).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(inner_rest, offset).map_err(wrap)?;
            if v > 2 {
                return Err(wrap(parse_error("certificate version must be 0, 1, or 2")));
            }
            return Ok((v as u8, rest));
        }
    }
    Ok((0, input))
}

fn decode_optional_tagged_bitstring(
    input: &[u8],
    offset: usize,
    ctx: u32,
) -> Result<(Option<BitString>, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == ctx && !id.constructed {
            let (content, rest) =
                tasn1::primitives::read_tlv(input, offset, id.tag, false).map_err(wrap)?;
            let bits = tasn1::primitives::bitstring::decode_content(content).map_err(wrap)?;
            return Ok((Some(bits), rest));
        }
    }
    Ok((None, input))
}

fn decode_optional_extensions(
    input: &[u8],
    offset: usize,
    version: u8,
) -> Result<(Extensions, Option<PkixErrorKind>, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 3 && id.constructed {
            if version != 2 {
                return Err(PkixError::new(PkixErrorKind::ExtensionsRequireV3));
            }
            let (content, rest) =
                tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (extensions, deferred) = Extensions::decode(content, offset).map_err(wrap)?;
            return Ok((extensions, deferred, rest));
        }
    }
    Ok((Extensions::default(), None, input))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub tbs: TbsCertificate,
    pub tbs_raw: Vec<u8>,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
    raw: Vec<u8>,
    deferred: Option<PkixErrorKind>,
}

impl Certificate {
    pub fn decode(input: &[u8]) -> Result<Self, PkixError> {
        let (content, outer_rest) = tasn1::primitives::sequence::decode_sequence(input, 0).map_err(wrap)?;

        let tbs_start = content;
        let (tbs_content, after_tbs) =
            tasn1::primitives::sequence::decode_sequence(content, 0).map_err(wrap)?;
        let tbs_raw = tbs_start[..tbs_start.len() - after_tbs.len()].to_vec();

        let (version, cur) = decode_version(tbs_content, 0)?;
        let (serial_content, cur) =
            tasn1::primitives::read_tlv(cur, 0, Tag::INTEGER, false).map_err(wrap)?;
        let serial_number = serial_content.to_vec();

        let (signature, cur) = AlgorithmIdentifier::decode(cur, 0)?;

        let issuer_start = cur;
        let (issuer, cur) = Name::decode(cur, 0)?;
        let issuer_raw = issuer_start[..issuer_start.len() - cur.len()].to_vec();

        let (not_before, cur) = decode_time(cur, 0).map_err(wrap)?;
        let (not_after, cur) = decode_time(cur, 0).map_err(wrap)?;
        let validity = Validity { not_before, not_after };

        let subject_start = cur;
        let (subject, cur) = Name::decode(cur, 0)?;
        let subject_raw = subject_start[..subject_start.len() - cur.len()].to_vec();

        let (subject_public_key_info, cur) = SubjectPublicKeyInfo::decode(cur, 0)?;

        let (issuer_unique_id, cur) = decode_optional_tagged_bitstring(cur, 0, 1)?;
        let (subject_unique_id, cur) = decode_optional_tagged_bitstring(cur, 0, 2)?;

        let (extensions, deferred, cur) = decode_optional_extensions(cur, 0, version)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;

        let tbs = TbsCertificate {
            version,
            serial_number,
            signature,
            issuer,
            issuer_raw,
            validity,
            subject,
            subject_raw,
            subject_public_key_info,
            issuer_unique_id,
            subject_unique_id,
            extensions,
        };

        let (signature_algorithm, cur) = AlgorithmIdentifier::decode(after_tbs, 0)?;
        let (signature, cur) = tasn1::primitives::bitstring::decode(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(outer_rest, 0).map_err(wrap)?;

        if tbs.signature.algorithm != signature_algorithm.algorithm {
            return Err(PkixError::new(PkixErrorKind::SigOidMismatch));
        }

        Ok(Self {
            tbs,
            tbs_raw,
            signature_algorithm,
            signature,
            raw: input.to_vec(),
            deferred,
        })
    }

    /// Surfaces any unknown-critical-extension or duplicate-OID failure
    /// deferred during `decode`.
    pub fn finish(&self) -> Result<(), PkixError> {
        match &self.deferred {
            Some(kind) => Err(PkixError::new(kind.clone())),
            None => Ok(()),
        }
    }

    pub fn der(&self) -> &[u8] {
        &self.raw
    }

    pub fn fingerprint(&self, alg: HashId, digest: &dyn Digest) -> Vec<u8> {
        digest.hash(alg, &self.raw)
    }

    /// Hashes the encoded `Name` (including its outer `SEQUENCE` header)
    /// for issuer/subject comparisons. The source this crate was ported
    /// from hashes the buffer verbatim this way rather than any
    /// canonicalised form; that choice is kept (design notes open
    /// question: name-hash scope).
    pub fn issuer_name_hash(&self, alg: HashId, digest: &dyn Digest) -> Vec<u8> {
        digest.hash(alg, &self.tbs.issuer_raw)
    }

    pub fn subject_name_hash(&self, alg: HashId, digest: &dyn Digest) -> Vec<u8> {
        digest.hash(alg, &self.tbs.subject_raw)
    }

    pub fn is_self_signed(&self, alg: HashId, digest: &dyn Digest) -> bool {
        self.tbs.issuer_raw == self.tbs.subject_raw
            || self.issuer_name_hash(alg, digest) == self.subject_name_hash(alg, digest)
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
        CertTime {
            fields: DateFields { year, mon, day, hour: 0, min: 0, sec: 0 },
            kind: TimeKind::Utc,
        }
    }

    fn sample_der(subject_cn: &str, issuer_cn: &str, critical_unknown_ext: bool) -> Vec<u8> {
        let issuer = simple_name(issuer_cn).encode();
        let subject = simple_name(subject_cn).encode();

        let mut validity = Vec::new();
        tasn1::primitives::time::encode_utc_time(&utc(2020, 1, 1).fields, &mut validity);
        tasn1::primitives::time::encode_utc_time(&utc(2030, 1, 1).fields, &mut validity);

        let mut spki_content = Vec::new();
        spki_content.extend_from_slice(&AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa).encode());
        tasn1::primitives::bitstring::encode(&BitString::exact(vec![0x00, 0x01, 0x02]), &mut spki_content);
        let mut spki = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, spki_content.len(), &mut spki);
        spki.extend_from_slice(&spki_content);

        let sig_alg = AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa).encode();

        let mut tbs_content = Vec::new();
        // version [0] EXPLICIT v3
        let mut ver_inner = Vec::new();
        tasn1::primitives::integer::encode_u32(2, &mut ver_inner);
        tasn1::primitives::write_header(Tag::context(0), true, ver_inner.len(), &mut tbs_content);
        tbs_content.extend_from_slice(&ver_inner);
        tasn1::primitives::integer::encode_u32(7, &mut tbs_content);
        tbs_content.extend_from_slice(&sig_alg);
        tbs_content.extend_from_slice(&issuer);
        tbs_content.extend_from_slice(&validity);
        tbs_content.extend_from_slice(&subject);
        tbs_content.extend_from_slice(&spki);

        if critical_unknown_ext {
            let mut ext_seq_content = Vec::new();
            let mut ext_entry_content = Vec::new();
            tasn1::primitives::oid::encode(&[0x2B, 0x06, 0x01, 0x04, 0x01, 0x99, 0x99], &mut ext_entry_content);
            tasn1::primitives::boolean::encode(true, &mut ext_entry_content);
            tasn1::primitives::octetstring::encode(b"whatever", &mut ext_entry_content);
            let mut ext_entry = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, ext_entry_content.len(), &mut ext_entry);
            ext_entry.extend_from_slice(&ext_entry_content);
            ext_seq_content.extend_from_slice(&ext_entry);
            let mut ext_seq = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, ext_seq_content.len(), &mut ext_seq);
            ext_seq.extend_from_slice(&ext_seq_content);

            tasn1::primitives::write_header(Tag::context(3), true, ext_seq.len(), &mut tbs_content);
            tbs_content.extend_from_slice(&ext_seq);
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
    fn decodes_a_v3_self_signed_certificate() {
        let der = sample_der("example.com", "example.com", false);
        let cert = Certificate::decode(&der).unwrap();
        assert_eq!(cert.tbs.version, 2);
        assert!(cert.finish().is_ok());
        assert_eq!(cert.tbs.issuer, cert.tbs.subject);
    }

    #[test]
    fn deferred_error_surfaces_from_finish_not_decode() {
        let der = sample_der("example.com", "example.com", true);
        let cert = Certificate::decode(&der).unwrap();
        assert!(cert.finish().is_err());
    }

    #[test]
    fn name_hash_is_stable_on_identical_raw_names() {
        struct Sha256Stub;
        impl Digest for Sha256Stub {
            fn hash(&self, _alg: HashId, data: &[u8]) -> Vec<u8> {
                data.to_vec()
            }
        }
        let der = sample_der("example.com", "example.com", false);
        let cert = Certificate::decode(&der).unwrap();
        assert!(cert.is_self_signed(HashId::Sha256, &Sha256Stub));
    }
}
