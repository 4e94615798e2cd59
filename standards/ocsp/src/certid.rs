//! `CertID`: the hash-based identifier a
//! request asks about and a response answers for.
//!
//! `CertID ::= SEQUENCE { hashAlgorithm AlgorithmIdentifier,
//! issuerNameHash OCTET STRING, issuerKeyHash OCTET STRING, serialNumber
//! CertificateSerialNumber }`. Matching a response's single to its
//! request is a plain byte comparison of all four fields
//! ([`CertId::matches`]) — this crate never recomputes the hashes
//! itself (that needs [`tasn1::collab::Digest`] and the certificate
//! this CertID names, neither of which is in scope here).

use tasn1::prelude::*;

use tasn1_pkix::algorithms::AlgorithmIdentifier;
use tasn1_pkix::PkixError;

use crate::error::{OcspError, OcspErrorKind};

fn wrap(source: tasn1::error::DecodeError) -> OcspError {
    OcspError::new(OcspErrorKind::Request { source })
}

/// `AlgorithmIdentifier::decode` returns `tasn1_pkix::PkixError`, a
/// different error type than this crate's own; `hashAlgorithm` is
/// always a plain OID+optional-NULL pair here, so the only failure mode
/// worth preserving is the structural detail.
fn wrap_pkix(_err: PkixError) -> OcspError {
    OcspError::new(OcspErrorKind::Request {
        source: tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse {
            offset: 0,
            detail: "CertID.hashAlgorithm invalid",
        }),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertId {
    pub hash_algorithm: AlgorithmIdentifier,
    pub issuer_name_hash: Vec<u8>,
    pub issuer_key_hash: Vec<u8>,
    pub serial_number: Vec<u8>,
}

impl CertId {
    pub fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (hash_algorithm, cur) = AlgorithmIdentifier::decode(content, offset).map_err(wrap_pkix)?;
        let (issuer_name_hash, cur) = tasn1::primitives::octetstring::decode(cur, offset).map_err(wrap)?;
        let (issuer_key_hash, cur) = tasn1::primitives::octetstring::decode(cur, offset).map_err(wrap)?;
        let (serial_content, cur) = tasn1::primitives::read_tlv(cur, offset, Tag::INTEGER, false).map_err(wrap)?;
        Ok((
            Self {
                hash_algorithm,
                issuer_name_hash: issuer_name_hash.to_vec(),
                issuer_key_hash: issuer_key_hash.to_vec(),
                serial_number: serial_content.to_vec(),
            },
            cur,
        ))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&self.hash_algorithm.encode());
        tasn1::primitives::octetstring::encode(&self.issuer_name_hash, &mut content);
        tasn1::primitives::octetstring::encode(&self.issuer_key_hash, &mut content);
        tasn1::primitives::write_header(Tag::INTEGER, false, self.serial_number.len(), &mut content);
        content.extend_from_slice(&self.serial_number);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// `true` iff this CertID names the same certificate as `other`
    /// ("the first matches the request's (issuerHash,
    /// issuerKeyHash, serial)").
    pub fn matches(&self, other: &CertId) -> bool {
        self.hash_algorithm == other.hash_algorithm
            && self.issuer_name_hash == other.issuer_name_hash
            && self.issuer_key_hash == other.issuer_key_hash
            && self.serial_number == other.serial_number
    }
}

/// One raw `extnID, critical, extnValue` triple, the same shape
/// [`tasn1_pkix::crl::RawExtension`] uses — kept as a local type because
/// OCSP's request/response extensions (nonce, archive cutoff, ...)
/// don't share X.509's `CertExtId` critical-extension policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtension {
    pub oid: Vec<u8>,
    pub critical: bool,
    pub value: Vec<u8>,
}

fn decode_optional_bool_default_false(input: &[u8], offset: usize) -> Result<(bool, &[u8]), OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag == Tag::BOOLEAN && !id.constructed {
            return tasn1::primitives::boolean::decode(input, offset).map_err(wrap);
        }
    }
    Ok((false, input))
}

pub fn decode_extensions(input: &[u8], offset: usize) -> Result<Vec<RawExtension>, OcspError> {
    let (mut content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
    tasn1::primitives::sequence::assert_exhausted(rest, offset).map_err(wrap)?;
    let mut items = Vec::new();
    while !content.is_empty() {
        let (ext_content, tail) = tasn1::primitives::sequence::decode_sequence(content, offset).map_err(wrap)?;
        let (oid, rest2) =
            tasn1::primitives::oid::decode(ext_content, offset, tasn1::oid::OidKind::Ignore).map_err(wrap)?;
        let (critical, rest3) = decode_optional_bool_default_false(rest2, offset)?;
        let (value, rest4) = tasn1::primitives::octetstring::decode(rest3, offset).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(rest4, offset).map_err(wrap)?;
        items.push(RawExtension { oid: oid.bytes, critical, value: value.to_vec() });
        content = tail;
    }
    Ok(items)
}

pub fn encode_extensions(items: &[RawExtension]) -> Vec<u8> {
    let mut content = Vec::new();
    for ext in items {
        let mut ext_content = Vec::new();
        tasn1::primitives::oid::encode(&ext.oid, &mut ext_content);
        if ext.critical {
            tasn1::primitives::boolean::encode(true, &mut ext_content);
        }
        tasn1::primitives::octetstring::encode(&ext.value, &mut ext_content);
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, ext_content.len(), &mut content);
        content.extend_from_slice(&ext_content);
    }
    let mut out = Vec::new();
    tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
    out.extend_from_slice(&content);
    out
}

pub fn find_extension<'a>(items: &'a [RawExtension], oid: &[u8]) -> Option<&'a RawExtension> {
    items.iter().find(|e| e.oid == oid)
}
