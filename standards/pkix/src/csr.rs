//! PKCS#10 Certification Signing Request (RFC 2986).
//!
//! `CertificationRequestInfo ::= SEQUENCE { version INTEGER(0), subject
//! Name, subjectPKInfo SubjectPublicKeyInfo, [0] IMPLICIT attributes SET
//! OF Attribute }`. Recognised attributes are `challengePassword`,
//! `serialNumber`, and `extensionRequest` (whose value is an `Extensions`
//! sequence re-parsed by [`crate::extensions::Extensions`]); unrecognised
//! attributes are kept with their raw OID and DER value.

use tasn1::oid::{CsrAttrId, OidKind};
use tasn1::prelude::*;

use crate::algorithms::AlgorithmIdentifier;
use crate::cert::SubjectPublicKeyInfo;
use crate::error::{PkixError, PkixErrorKind};
use crate::extensions::Extensions;
use crate::name::Name;

fn wrap(source: tasn1::error::DecodeError) -> PkixError {
    PkixError::new(PkixErrorKind::Csr { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

/// A `DirectoryString`-typed attribute value (`challengePassword`), kept
/// with its wire tag so a re-encode matches the original string type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengePassword {
    pub tag: Tag,
    pub value: Vec<u8>,
}

/// One `Attribute`'s recognised interpretation, or the raw bytes of its
/// first `AttributeValue` if this crate does not know the attribute OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    ChallengePassword(ChallengePassword),
    SerialNumber(Vec<u8>),
    ExtensionRequest(Extensions),
    Unknown(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub oid: Vec<u8>,
    pub value: AttributeValue,
}

fn decode_directory_string_value(input: &[u8], offset: usize) -> Result<(Tag, Vec<u8>, &[u8]), PkixError> {
    let (id, _) = Identifier::read(input).ok_or(wrap(tasn1::error::DecodeError::new(
        tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
    )))?;
    if id.constructed || id.tag.class != Class::Universal {
        return Err(wrap(parse_error("unsupported attribute string tag")));
    }
    if !matches!(id.tag.value, 12 | 19 | 22) {
        // UTF8String / PrintableString / IA5String
        return Err(wrap(parse_error("challengePassword must be PRINTABLE/UTF8/IA5")));
    }
    let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false).map_err(wrap)?;
    Ok((id.tag, content.to_vec(), rest))
}

impl Attribute {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (oid, values_part) = tasn1::primitives::oid::decode(content, offset, OidKind::Ignore).map_err(wrap)?;
        let (values_content, values_rest) =
            tasn1::primitives::sequence::decode_set(values_part, offset).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(values_rest, offset).map_err(wrap)?;

        let value = match CsrAttrId::from_oid_bytes(&oid.bytes) {
            Some(CsrAttrId::ChallengePassword) => {
                let (tag, value, tail) = decode_directory_string_value(values_content, offset)?;
                tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
                AttributeValue::ChallengePassword(ChallengePassword { tag, value })
            }
            Some(CsrAttrId::ExtensionRequest) => {
                let (ext_content, tail) =
                    tasn1::primitives::sequence::decode_sequence(values_content, offset).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
                let (extensions, deferred) = Extensions::decode(ext_content, offset).map_err(wrap)?;
                if let Some(kind) = deferred {
                    return Err(PkixError::new(kind));
                }
                AttributeValue::ExtensionRequest(extensions)
            }
            None => AttributeValue::Unknown(values_content.to_vec()),
        };
        Ok((Self { oid: oid.bytes, value }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut value_bytes = Vec::new();
        match &self.value {
            AttributeValue::ChallengePassword(cp) => {
                tasn1::primitives::write_header(cp.tag, false, cp.value.len(), &mut value_bytes);
                value_bytes.extend_from_slice(&cp.value);
            }
            AttributeValue::SerialNumber(bytes) => {
                tasn1::primitives::octetstring::encode(bytes, &mut value_bytes);
            }
            AttributeValue::ExtensionRequest(_) => {
                unreachable!("ExtensionRequest is only ever decoded, not re-encoded by this crate")
            }
            AttributeValue::Unknown(raw) => value_bytes.extend_from_slice(raw),
        }
        let mut values_set = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SET, value_bytes.len(), &mut values_set);
        values_set.extend_from_slice(&value_bytes);

        let mut content = Vec::new();
        tasn1::primitives::oid::encode(&self.oid, &mut content);
        content.extend_from_slice(&values_set);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationRequestInfo {
    pub version: u8,
    pub subject: Name,
    pub subject_pk_info: SubjectPublicKeyInfo,
    pub attributes: Vec<Attribute>,
}

fn decode_attributes(input: &[u8], offset: usize) -> Result<(Vec<Attribute>, &[u8]), PkixError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
            let (mut content, rest) =
                tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let mut attrs = Vec::new();
            while !content.is_empty() {
                let (attr, tail) = Attribute::decode(content, offset)?;
                attrs.push(attr);
                content = tail;
            }
            return Ok((attrs, rest));
        }
    }
    Ok((Vec::new(), input))
}

impl CertificationRequestInfo {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (version, cur) = tasn1::primitives::integer::decode_u32(content, offset).map_err(wrap)?;
        if version != 0 {
            return Err(wrap(parse_error("CertificationRequestInfo version must be 0")));
        }
        let (subject, cur) = Name::decode(cur, offset)?;
        let (subject_pk_info, cur) = SubjectPublicKeyInfo::decode(cur, offset)?;
        let (attributes, cur) = decode_attributes(cur, offset)?;
        tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
        Ok((Self { version: version as u8, subject, subject_pk_info, attributes }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_u32(self.version as u32, &mut content);
        content.extend_from_slice(&self.subject.encode());
        content.extend_from_slice(&self.subject_pk_info.encode());
        if !self.attributes.is_empty() {
            let mut attrs_content = Vec::new();
            for attr in &self.attributes {
                attrs_content.extend_from_slice(&attr.encode());
            }
            tasn1::primitives::write_header(Tag::context(0), true, attrs_content.len(), &mut content);
            content.extend_from_slice(&attrs_content);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

/// `CertificationRequest ::= SEQUENCE { certificationRequestInfo,
/// signatureAlgorithm AlgorithmIdentifier, signature BIT STRING }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationRequest {
    pub info: CertificationRequestInfo,
    pub info_raw: Vec<u8>,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
}

impl CertificationRequest {
    pub fn decode(input: &[u8]) -> Result<Self, PkixError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;

        let info_start = content;
        let (info, cur) = CertificationRequestInfo::decode(content, 0)?;
        let info_raw = info_start[..info_start.len() - cur.len()].to_vec();

        let (signature_algorithm, cur) = AlgorithmIdentifier::decode(cur, 0)?;
        let (signature, cur) = tasn1::primitives::bitstring::decode(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;

        Ok(Self { info, info_raw, signature_algorithm, signature })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&self.info_raw);
        content.extend_from_slice(&self.signature_algorithm.encode());
        tasn1::primitives::bitstring::encode(&self.signature, &mut content);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// The extensions carried by an `extensionRequest` attribute, if any.
    pub fn requested_extensions(&self) -> Option<&Extensions> {
        self.info.attributes.iter().find_map(|a| match &a.value {
            AttributeValue::ExtensionRequest(exts) => Some(exts),
            _ => None,
        })
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

    fn sample_spki() -> SubjectPublicKeyInfo {
        SubjectPublicKeyInfo {
            algorithm: AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa),
            public_key: BitString::exact(vec![0x00, 0x01, 0x02]),
        }
    }

    #[test]
    fn csr_without_attributes_round_trips() {
        let info = CertificationRequestInfo {
            version: 0,
            subject: simple_name("example.com"),
            subject_pk_info: sample_spki(),
            attributes: Vec::new(),
        };
        let der = info.encode();
        let (decoded, rest) = CertificationRequestInfo::decode(&der, 0).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decoded, info);
    }

    #[test]
    fn csr_with_challenge_password_round_trips() {
        let info = CertificationRequestInfo {
            version: 0,
            subject: simple_name("example.com"),
            subject_pk_info: sample_spki(),
            attributes: vec![Attribute {
                oid: CsrAttrId::ChallengePassword.oid_bytes().to_vec(),
                value: AttributeValue::ChallengePassword(ChallengePassword {
                    tag: Tag::UTF8_STRING,
                    value: b"s3cr3t".to_vec(),
                }),
            }],
        };
        let der = info.encode();
        let (decoded, _) = CertificationRequestInfo::decode(&der, 0).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn full_request_round_trips_with_signature() {
        let info = CertificationRequestInfo {
            version: 0,
            subject: simple_name("example.com"),
            subject_pk_info: sample_spki(),
            attributes: Vec::new(),
        };
        let info_raw = info.encode();
        let req = CertificationRequest {
            info,
            info_raw,
            signature_algorithm: AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa),
            signature: BitString::exact(vec![0xAA; 8]),
        };
        let der = req.encode();
        let decoded = CertificationRequest::decode(&der).unwrap();
        assert_eq!(decoded, req);
    }

    #[test]
    fn non_zero_version_rejected() {
        let mut info = CertificationRequestInfo {
            version: 0,
            subject: simple_name("example.com"),
            subject_pk_info: sample_spki(),
            attributes: Vec::new(),
        };
        info.version = 1;
        // Build the DER with version 1 directly, since the struct itself
        // cannot express an out-of-range version through `encode`.
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_u32(1, &mut content);
        content.extend_from_slice(&info.subject.encode());
        content.extend_from_slice(&info.subject_pk_info.encode());
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        assert!(CertificationRequestInfo::decode(&out, 0).is_err());
    }
}
