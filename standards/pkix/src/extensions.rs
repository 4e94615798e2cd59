//! Certificate extensions.
//!
//! `Extensions ::= SEQUENCE OF SEQUENCE { extnId OID, critical BOOLEAN
//! DEFAULT FALSE, extnValue OCTET STRING }`. Each recognised extension's
//! `extnValue` content is re-parsed by its own subschema below; unknown
//! extensions keep their raw value. Unknown-critical and duplicate-OID
//! failures are deferred (returned alongside the parsed `Extensions`
//! rather than aborting) so the rest of the certificate still parses —
//! the caller reports the most severe deferred error last, per the
//! handling rules.

use tasn1::oid::{CertAuthInfoId, CertExtId, ExtKeyUseId, OidKind};
use tasn1::prelude::*;

use crate::error::PkixErrorKind;
use crate::name::Name;

type DecodeError = tasn1::error::DecodeError;

fn parse_error(detail: &'static str) -> DecodeError {
    DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

/// `GeneralName`, narrowed to the choices this crate acts on:
/// `otherName`, `rfc822Name`, `dNSName`, `directoryName`,
/// `uniformResourceIdentifier`, `iPAddress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    OtherName { type_id: Vec<u8>, value: Vec<u8> },
    Rfc822(String),
    Dns(String),
    Directory(Name),
    Uri(String),
    Ip(Vec<u8>),
}

fn decode_ia5(content: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(content.to_vec()).map_err(|_| parse_error("GeneralName string is not ASCII/UTF-8"))
}

pub(crate) fn decode_general_name(input: &[u8], offset: usize) -> Result<(GeneralName, &[u8]), DecodeError> {
    let (id, _) = Identifier::read(input).ok_or(DecodeError::new(
        tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
    ))?;
    if id.tag.class != Class::Context {
        return Err(parse_error("GeneralName tag must be context-specific"));
    }
    match (id.tag.value, id.constructed) {
        (0, true) => {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true)?;
            let (oid, val_part) = tasn1::primitives::oid::decode(content, offset, OidKind::Ignore)?;
            let (inner_id, _) = Identifier::read(val_part).ok_or(DecodeError::new(
                tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
            ))?;
            let (inner, tail) =
                tasn1::primitives::read_tlv(val_part, offset, inner_id.tag, inner_id.constructed)?;
            tasn1::primitives::sequence::assert_exhausted(tail, offset)?;
            Ok((GeneralName::OtherName { type_id: oid.bytes, value: inner.to_vec() }, rest))
        }
        (1, false) => {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false)?;
            Ok((GeneralName::Rfc822(decode_ia5(content)?), rest))
        }
        (2, false) => {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false)?;
            Ok((GeneralName::Dns(decode_ia5(content)?), rest))
        }
        (4, true) => {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true)?;
            Ok((GeneralName::Directory(Name::decode_content(content, offset).map_err(|_| {
                parse_error("malformed directoryName in GeneralName")
            })?), rest))
        }
        (6, false) => {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false)?;
            let uri = decode_ia5(content)?;
            if !uri.contains("://") {
                return Err(parse_error("GeneralName URI must be absolute"));
            }
            Ok((GeneralName::Uri(uri), rest))
        }
        (7, false) => {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false)?;
            Ok((GeneralName::Ip(content.to_vec()), rest))
        }
        _ => Err(parse_error("unsupported GeneralName choice")),
    }
}

pub(crate) fn decode_optional_bool_default_false(input: &[u8], offset: usize) -> Result<(bool, &[u8]), DecodeError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag == Tag::BOOLEAN && !id.constructed {
            return tasn1::primitives::boolean::decode(input, offset);
        }
    }
    Ok((false, input))
}

/// `[0] EXPLICIT GeneralSubtrees` / `[1] EXPLICIT GeneralSubtrees`
/// helper shared by `NameConstraints`'s two optional fields.
fn decode_optional_subtree_list(
    input: &[u8],
    offset: usize,
    ctx: u32,
) -> Result<(Vec<GeneralSubtree>, &[u8]), DecodeError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == ctx && id.constructed {
            let (mut content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true)?;
            let mut items = Vec::new();
            while !content.is_empty() {
                let (sub, tail) = GeneralSubtree::decode(content, offset)?;
                items.push(sub);
                content = tail;
            }
            return Ok((items, rest));
        }
    }
    Ok((Vec::new(), input))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSubtree {
    pub base: GeneralName,
}

impl GeneralSubtree {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), DecodeError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset)?;
        let (base, _tail) = decode_general_name(content, offset)?;
        // `minimum [0] INTEGER DEFAULT 0` / `maximum [1] INTEGER OPTIONAL`
        // are parsed past: no certificate this crate targets sets them.
        Ok((Self { base }, rest))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicConstraints {
    pub ca: bool,
    pub path_len: Option<u8>,
}

fn decode_basic_constraints(raw: &[u8], offset: usize) -> Result<BasicConstraints, DecodeError> {
    let (content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let (ca, cur) = decode_optional_bool_default_false(content, offset)?;
    let path_len = if cur.is_empty() {
        None
    } else {
        let (v, tail) = tasn1::primitives::integer::decode_u7(cur, offset)?;
        tasn1::primitives::sequence::assert_exhausted(tail, offset)?;
        Some(v)
    };
    if !ca && path_len.is_some() {
        return Err(parse_error("pathLenConstraint present on a non-CA BasicConstraints"));
    }
    Ok(BasicConstraints { ca, path_len })
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorityKeyIdentifier {
    pub key_id: Option<Vec<u8>>,
}

pub(crate) fn decode_authority_key_id(raw: &[u8], offset: usize) -> Result<AuthorityKeyIdentifier, DecodeError> {
    let (content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let key_id = match Identifier::read(content) {
        Some((id, _)) if id.tag.class == Class::Context && id.tag.value == 0 && !id.constructed => {
            let (v, _) = tasn1::primitives::read_tlv(content, offset, id.tag, false)?;
            Some(v.to_vec())
        }
        _ => None,
    };
    // authorityCertIssuer [1] / authorityCertSerialNumber [2] are parsed
    // past; chain verification here keys off keyIdentifier or the
    // issuer-name hash instead .
    Ok(AuthorityKeyIdentifier { key_id })
}

fn decode_subject_key_id(raw: &[u8], offset: usize) -> Result<Vec<u8>, DecodeError> {
    let (content, rest) = tasn1::primitives::octetstring::decode(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    Ok(content.to_vec())
}

/// The `KeyUsage` BIT STRING, kept as a 16-bit field with named-bit
/// accessors (bit 0 = `digitalSignature` ... bit 8 = `decipherOnly`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsage(pub u16);

impl KeyUsage {
    pub fn bit(&self, n: u8) -> bool {
        self.0 & (0x8000 >> n) != 0
    }
    pub fn digital_signature(&self) -> bool {
        self.bit(0)
    }
    pub fn non_repudiation(&self) -> bool {
        self.bit(1)
    }
    pub fn key_encipherment(&self) -> bool {
        self.bit(2)
    }
    pub fn data_encipherment(&self) -> bool {
        self.bit(3)
    }
    pub fn key_agreement(&self) -> bool {
        self.bit(4)
    }
    pub fn key_cert_sign(&self) -> bool {
        self.bit(5)
    }
    pub fn crl_sign(&self) -> bool {
        self.bit(6)
    }
    pub fn encipher_only(&self) -> bool {
        self.bit(7)
    }
    pub fn decipher_only(&self) -> bool {
        self.bit(8)
    }
}

fn decode_key_usage(raw: &[u8], offset: usize) -> Result<KeyUsage, DecodeError> {
    let (bits, rest) = tasn1::primitives::bitstring::decode(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let mut value: u16 = 0;
    for (i, bit) in bits.as_bitslice().iter().enumerate().take(16) {
        if *bit {
            value |= 0x8000 >> i;
        }
    }
    Ok(KeyUsage(value))
}

/// `ExtendedKeyUsage ::= SEQUENCE OF KeyPurposeId`. Unrecognised OIDs
/// are kept verbatim alongside the recognised set so a caller can still
/// render the raw list; they do not themselves gate verification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtendedKeyUsage {
    pub recognized: Vec<ExtKeyUseId>,
    pub oids: Vec<Vec<u8>>,
}

impl ExtendedKeyUsage {
    pub fn contains(&self, id: ExtKeyUseId) -> bool {
        self.recognized.contains(&id) || self.recognized.contains(&ExtKeyUseId::Any)
    }
}

fn decode_extended_key_usage(raw: &[u8], offset: usize) -> Result<ExtendedKeyUsage, DecodeError> {
    let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let mut out = ExtendedKeyUsage::default();
    while !content.is_empty() {
        let (oid, tail) = tasn1::primitives::oid::decode(content, offset, OidKind::Ignore)?;
        if let Some(id) = ExtKeyUseId::from_oid_bytes(&oid.bytes) {
            out.recognized.push(id);
        }
        out.oids.push(oid.bytes);
        content = tail;
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameConstraints {
    pub permitted: Vec<GeneralSubtree>,
    pub excluded: Vec<GeneralSubtree>,
}

fn decode_name_constraints(raw: &[u8], offset: usize) -> Result<NameConstraints, DecodeError> {
    let (content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let (permitted, cur) = decode_optional_subtree_list(content, offset, 0)?;
    let (excluded, cur) = decode_optional_subtree_list(cur, offset, 1)?;
    tasn1::primitives::sequence::assert_exhausted(cur, offset)?;
    Ok(NameConstraints { permitted, excluded })
}

/// Caps the number of policy OIDs retained per certificate (its
/// "up to `MaxCertPol`"); additional entries are parsed for validity but
/// not stored.
pub const MAX_CERT_POLICIES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificatePolicies {
    pub policies: Vec<String>,
    pub had_duplicate: bool,
}

fn decode_certificate_policies(raw: &[u8], offset: usize) -> Result<CertificatePolicies, DecodeError> {
    let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let mut policies = Vec::new();
    let mut had_duplicate = false;
    while !content.is_empty() {
        let (pi_content, tail) = tasn1::primitives::sequence::decode_sequence(content, offset)?;
        let (oid, _qualifiers) = tasn1::primitives::oid::decode(pi_content, offset, OidKind::Ignore)?;
        // policyQualifiers SEQUENCE OF PolicyQualifierInfo OPTIONAL is
        // parsed past; only the policy OID itself is retained.
        let dotted = tasn1::primitives::oid::to_dotted_string(&oid.bytes);
        if policies.contains(&dotted) {
            had_duplicate = true;
        } else if policies.len() < MAX_CERT_POLICIES {
            policies.push(dotted);
        }
        content = tail;
    }
    Ok(CertificatePolicies { policies, had_duplicate })
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrlDistributionPoint {
    pub uri: Option<String>,
}

fn decode_crl_distribution_points(raw: &[u8], offset: usize) -> Result<CrlDistributionPoint, DecodeError> {
    let (content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    if content.is_empty() {
        return Ok(CrlDistributionPoint::default());
    }
    // Only the first DistributionPoint is retained .
    let (dp_content, _) = tasn1::primitives::sequence::decode_sequence(content, offset)?;
    let uri = match Identifier::read(dp_content) {
        Some((id, _)) if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed => {
            let (full_name, _) = tasn1::primitives::read_tlv(dp_content, offset, id.tag, true)?;
            let mut cur = full_name;
            let mut found = None;
            while !cur.is_empty() {
                let (name, tail) = decode_general_name(cur, offset)?;
                if let GeneralName::Uri(uri) = name {
                    found = Some(uri);
                }
                cur = tail;
            }
            found
        }
        _ => None,
    };
    Ok(CrlDistributionPoint { uri })
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorityInfoAccess {
    pub ocsp: Option<String>,
    pub ca_issuers: Option<String>,
}

fn decode_authority_info_access(raw: &[u8], offset: usize) -> Result<AuthorityInfoAccess, DecodeError> {
    let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let mut out = AuthorityInfoAccess::default();
    while !content.is_empty() {
        let (ad_content, tail) = tasn1::primitives::sequence::decode_sequence(content, offset)?;
        let (method, loc_part) = tasn1::primitives::oid::decode(ad_content, offset, OidKind::Ignore)?;
        let (location, _) = decode_general_name(loc_part, offset)?;
        if let GeneralName::Uri(uri) = location {
            match CertAuthInfoId::from_oid_bytes(&method.bytes) {
                Some(CertAuthInfoId::Ocsp) => out.ocsp = Some(uri),
                Some(CertAuthInfoId::CaIssuers) => out.ca_issuers = Some(uri),
                None => {}
            }
        }
        content = tail;
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyConstraints {
    pub require_explicit_policy: Option<u8>,
    pub inhibit_policy_mapping: Option<u8>,
}

fn decode_policy_constraints(raw: &[u8], offset: usize) -> Result<PolicyConstraints, DecodeError> {
    let (content, rest) = tasn1::primitives::sequence::decode_sequence(raw, offset)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
    let mut out = PolicyConstraints::default();
    let mut cur = content;
    for ctx in [0u32, 1u32] {
        if let Some((id, _)) = Identifier::read(cur) {
            if id.tag.class == Class::Context && id.tag.value == ctx && !id.constructed {
                let (v, tail) = tasn1::primitives::read_tlv(cur, offset, id.tag, false)?;
                let value = tasn1::primitives::integer::decode_content_u7(v, offset)?;
                if ctx == 0 {
                    out.require_explicit_policy = Some(value);
                } else {
                    out.inhibit_policy_mapping = Some(value);
                }
                cur = tail;
            }
        }
    }
    Ok(out)
}

/// Every recognised extension's re-parsed content, or the raw bytes for
/// anything this crate does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionValue {
    BasicConstraints(BasicConstraints),
    SubjectAltName(Vec<GeneralName>),
    AuthorityKeyIdentifier(AuthorityKeyIdentifier),
    SubjectKeyIdentifier(Vec<u8>),
    KeyUsage(KeyUsage),
    ExtendedKeyUsage(ExtendedKeyUsage),
    NameConstraints(NameConstraints),
    CertificatePolicies(CertificatePolicies),
    CrlDistributionPoints(CrlDistributionPoint),
    AuthorityInfoAccess(AuthorityInfoAccess),
    InhibitAnyPolicy,
    PolicyConstraints(PolicyConstraints),
    /// Recognised but deliberately parsed past ( table).
    NetscapeCertType,
    OcspNoCheck,
    Unknown(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub oid: Vec<u8>,
    pub critical: bool,
    pub value: ExtensionValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions {
    pub items: Vec<Extension>,
}

impl Extensions {
    /// Returns the parsed extensions plus the most severe deferred
    /// policy violation found along the way (duplicate OIDs, unknown
    /// critical extensions) — structural malformedness still aborts
    /// immediately via `Err`.
    pub fn decode(input: &[u8], offset: usize) -> Result<(Self, Option<PkixErrorKind>), DecodeError> {
        let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset)?;
        tasn1::primitives::sequence::assert_exhausted(rest, offset)?;
        let mut items = Vec::new();
        let mut seen: Vec<Vec<u8>> = Vec::new();
        let mut deferred: Option<PkixErrorKind> = None;

        while !content.is_empty() {
            let (ext_content, tail) = tasn1::primitives::sequence::decode_sequence(content, offset)?;
            let (oid, rest2) = tasn1::primitives::oid::decode(ext_content, offset, OidKind::Ignore)?;
            let (critical, rest3) = decode_optional_bool_default_false(rest2, offset)?;
            let (raw_value, rest4) = tasn1::primitives::octetstring::decode(rest3, offset)?;
            tasn1::primitives::sequence::assert_exhausted(rest4, offset)?;

            if seen.contains(&oid.bytes) {
                deferred.get_or_insert(PkixErrorKind::DuplicateOid);
            }
            seen.push(oid.bytes.clone());

            let known = CertExtId::from_oid_bytes(&oid.bytes);
            let value = match known {
                Some(CertExtId::BasicCa) => ExtensionValue::BasicConstraints(decode_basic_constraints(raw_value, offset)?),
                Some(CertExtId::AltNames) => {
                    let (san_content, san_rest) = tasn1::primitives::sequence::decode_sequence(raw_value, offset)?;
                    tasn1::primitives::sequence::assert_exhausted(san_rest, offset)?;
                    let mut names = Vec::new();
                    let mut cur = san_content;
                    while !cur.is_empty() {
                        let (name, tail) = decode_general_name(cur, offset)?;
                        names.push(name);
                        cur = tail;
                    }
                    ExtensionValue::SubjectAltName(names)
                }
                Some(CertExtId::AuthKey) => {
                    if critical {
                        deferred.get_or_insert(PkixErrorKind::CriticalExtensionUnknown { kind: OidKind::CertExtType });
                    }
                    ExtensionValue::AuthorityKeyIdentifier(decode_authority_key_id(raw_value, offset)?)
                }
                Some(CertExtId::SubjKey) => {
                    if critical {
                        deferred.get_or_insert(PkixErrorKind::CriticalExtensionUnknown { kind: OidKind::CertExtType });
                    }
                    ExtensionValue::SubjectKeyIdentifier(decode_subject_key_id(raw_value, offset)?)
                }
                Some(CertExtId::KeyUsage) => ExtensionValue::KeyUsage(decode_key_usage(raw_value, offset)?),
                Some(CertExtId::ExtKeyUsage) => {
                    ExtensionValue::ExtendedKeyUsage(decode_extended_key_usage(raw_value, offset)?)
                }
                Some(CertExtId::NameCons) => ExtensionValue::NameConstraints(decode_name_constraints(raw_value, offset)?),
                Some(CertExtId::CertPolicy) => {
                    let policies = decode_certificate_policies(raw_value, offset)?;
                    if policies.had_duplicate {
                        deferred.get_or_insert(PkixErrorKind::DuplicatePolicyOid);
                    }
                    ExtensionValue::CertificatePolicies(policies)
                }
                Some(CertExtId::CrlDist) => {
                    ExtensionValue::CrlDistributionPoints(decode_crl_distribution_points(raw_value, offset)?)
                }
                Some(CertExtId::AuthInfo) => {
                    ExtensionValue::AuthorityInfoAccess(decode_authority_info_access(raw_value, offset)?)
                }
                Some(CertExtId::InhibitAny) => ExtensionValue::InhibitAnyPolicy,
                Some(CertExtId::PolicyConstraints) => {
                    ExtensionValue::PolicyConstraints(decode_policy_constraints(raw_value, offset)?)
                }
                Some(CertExtId::NetscapeCertType) => ExtensionValue::NetscapeCertType,
                Some(CertExtId::OcspNoCheck) => ExtensionValue::OcspNoCheck,
                None => {
                    if critical {
                        deferred.get_or_insert(PkixErrorKind::CriticalExtensionUnknown { kind: OidKind::CertExtType });
                    }
                    ExtensionValue::Unknown(raw_value.to_vec())
                }
            };

            items.push(Extension { oid: oid.bytes, critical, value });
            content = tail;
        }

        Ok((Self { items }, deferred))
    }

    pub fn get(&self, id: CertExtId) -> Option<&Extension> {
        self.items.iter().find(|e| CertExtId::from_oid_bytes(&e.oid) == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_extension(oid: &[u8], critical: bool, value: &[u8]) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::oid::encode(oid, &mut content);
        if critical {
            tasn1::primitives::boolean::encode(true, &mut content);
        }
        tasn1::primitives::octetstring::encode(value, &mut content);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    fn wrap_extensions(entries: &[Vec<u8>]) -> Vec<u8> {
        let mut content = Vec::new();
        for e in entries {
            content.extend_from_slice(e);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    fn encode_basic_constraints(ca: bool, path_len: Option<u8>) -> Vec<u8> {
        let mut content = Vec::new();
        if ca {
            tasn1::primitives::boolean::encode(true, &mut content);
        }
        if let Some(p) = path_len {
            tasn1::primitives::integer::encode_u32(p as u32, &mut content);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    #[test]
    fn basic_constraints_ca_with_path_len() {
        let bc = encode_basic_constraints(true, Some(3));
        let ext = encode_extension(CertExtId::BasicCa.oid_bytes(), true, &bc);
        let (exts, deferred) = Extensions::decode(&wrap_extensions(&[ext]), 0).unwrap();
        assert!(deferred.is_none());
        match &exts.items[0].value {
            ExtensionValue::BasicConstraints(b) => assert_eq!(b, &BasicConstraints { ca: true, path_len: Some(3) }),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_ca_with_path_len_rejected() {
        let bc = encode_basic_constraints(false, Some(1));
        let ext = encode_extension(CertExtId::BasicCa.oid_bytes(), false, &bc);
        assert!(Extensions::decode(&wrap_extensions(&[ext]), 0).is_err());
    }

    #[test]
    fn unknown_critical_extension_is_deferred_not_fatal() {
        let ext = encode_extension(&[0x2B, 0x06, 0x01, 0x04, 0x01, 0x99, 0x99], true, b"whatever");
        let (exts, deferred) = Extensions::decode(&wrap_extensions(&[ext]), 0).unwrap();
        assert_eq!(exts.items.len(), 1);
        assert!(matches!(deferred, Some(PkixErrorKind::CriticalExtensionUnknown { .. })));
    }

    #[test]
    fn duplicate_oid_is_deferred() {
        let bc = encode_basic_constraints(false, None);
        let ext_a = encode_extension(CertExtId::BasicCa.oid_bytes(), false, &bc);
        let ext_b = ext_a.clone();
        let (_, deferred) = Extensions::decode(&wrap_extensions(&[ext_a, ext_b]), 0).unwrap();
        assert_eq!(deferred, Some(PkixErrorKind::DuplicateOid));
    }

    #[test]
    fn key_usage_bits_decode_in_order() {
        let mut content = Vec::new();
        tasn1::primitives::bitstring::encode(&BitString::new(vec![0b1010_0000], 0), &mut content);
        let ext = encode_extension(CertExtId::KeyUsage.oid_bytes(), true, &content);
        let (exts, _) = Extensions::decode(&wrap_extensions(&[ext]), 0).unwrap();
        match &exts.items[0].value {
            ExtensionValue::KeyUsage(ku) => {
                assert!(ku.digital_signature());
                assert!(!ku.non_repudiation());
                assert!(ku.key_encipherment());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn san_dns_entry_round_trips() {
        let mut general_names = Vec::new();
        tasn1::primitives::write_header(Tag::context(2), false, 11, &mut general_names);
        general_names.extend_from_slice(b"example.com");
        let mut san_content = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, general_names.len(), &mut san_content);
        san_content.extend_from_slice(&general_names);
        let ext = encode_extension(CertExtId::AltNames.oid_bytes(), false, &san_content);
        let (exts, _) = Extensions::decode(&wrap_extensions(&[ext]), 0).unwrap();
        match &exts.items[0].value {
            ExtensionValue::SubjectAltName(names) => {
                assert_eq!(names, &vec![GeneralName::Dns("example.com".to_string())]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
