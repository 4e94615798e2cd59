//! Elliptic-curve keys  and explicit domain parameters
//! (, SEC 1 `SpecifiedECDomain`).
//!
//! `ECPrivateKey`'s two trailing fields are `[0] parameters OPTIONAL`
//! and `[1] publicKey BIT STRING OPTIONAL`, both EXPLICIT context tags —
//! a shape the fixed `ItemDesc` CHOICE/OPTIONAL machinery handles for a
//! single alternative, but peeking the identifier octet directly reads
//! more plainly for "these two fields may each be present or absent,
//! independently of one another."

use tasn1::mpint::Mpi;
use tasn1::oid::CurveId;
use tasn1::prelude::*;
use tasn1::tag::{Class, Identifier};

use crate::error::{KeyError, KeyErrorKind};

/// Curve parameters as carried by `ECPrivateKey.parameters` or an
/// X.509 `SubjectPublicKeyInfo.algorithm.parameters` for `id-ecPublicKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcParameters {
    Named(CurveId),
    Specified(SpecifiedEcDomain),
}

/// SEC 1 `SpecifiedECDomain ::= SEQUENCE { version INTEGER(1),
/// fieldID SEQUENCE { fieldType OID, parameters INTEGER }, curve
/// SEQUENCE { a OCTET STRING, b OCTET STRING, seed BIT STRING OPTIONAL },
/// base OCTET STRING, order INTEGER, cofactor INTEGER OPTIONAL }`.
///
/// Only the prime field is supported, matching "prime-field
/// OID" reading; binary (characteristic-two) fields are not represented
/// here because no current cipher suite this crate targets uses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifiedEcDomain {
    pub prime: Mpi,
    pub a: Vec<u8>,
    pub b: Vec<u8>,
    pub base_point: Vec<u8>,
    pub order: Mpi,
    pub cofactor: Option<Mpi>,
}

const PRIME_FIELD_OID: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x01, 0x01];

impl SpecifiedEcDomain {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let wrap = |source| KeyError::new(KeyErrorKind::Ec { source });
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(trailing(rest.len())));
        }
        let (version, cur) = tasn1::primitives::integer::decode_u32(content, 0).map_err(wrap)?;
        if version != 1 {
            return Err(KeyError::new(KeyErrorKind::UnsupportedVersion { version }));
        }
        let (field_id_content, cur) =
            tasn1::primitives::sequence::decode_sequence(cur, 0).map_err(wrap)?;
        let (field_oid, field_rest) =
            tasn1::primitives::oid::decode(field_id_content, 0, tasn1::oid::OidKind::Ignore)
                .map_err(wrap)?;
        if field_oid.bytes != PRIME_FIELD_OID {
            return Err(KeyError::new(KeyErrorKind::CurveOid));
        }
        let (_field_params, field_rest) =
            tasn1::primitives::integer::decode_unsigned(field_rest, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(field_rest, 0).map_err(wrap)?;

        let (curve_content, cur) = tasn1::primitives::sequence::decode_sequence(cur, 0).map_err(wrap)?;
        let (a, curve_rest) = tasn1::primitives::octetstring::decode(curve_content, 0).map_err(wrap)?;
        let (b, curve_rest) = tasn1::primitives::octetstring::decode(curve_rest, 0).map_err(wrap)?;
        let _ = curve_rest; // optional `seed BIT STRING` is parsed past, not retained.

        let (base_point, cur) = tasn1::primitives::octetstring::decode(cur, 0).map_err(wrap)?;
        let (order, cur) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
        let cofactor = if cur.is_empty() {
            None
        } else {
            let (value, cur) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
            Some(value)
        };

        Ok(Self {
            prime: Mpi::from_unsigned_be_bytes(&field_oid_prime(field_id_content)?),
            a: a.to_vec(),
            b: b.to_vec(),
            base_point: base_point.to_vec(),
            order,
            cofactor,
        })
    }
}

/// The field parameters INTEGER inside `fieldID` is the prime itself
/// for a prime field; re-read it here rather than threading it back out
/// of the loop above.
fn field_oid_prime(field_id_content: &[u8]) -> Result<Vec<u8>, KeyError> {
    let wrap = |source| KeyError::new(KeyErrorKind::Ec { source });
    let (_oid, rest) =
        tasn1::primitives::oid::decode(field_id_content, 0, tasn1::oid::OidKind::Ignore).map_err(wrap)?;
    let (prime, _) = tasn1::primitives::integer::decode_unsigned(rest, 0).map_err(wrap)?;
    Ok(prime.to_unsigned_be_bytes())
}

fn trailing(extra: usize) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::TrailingData { extra })
}

/// `ECPrivateKey ::= SEQUENCE { version INTEGER(1), privateKey OCTET
/// STRING, [0] parameters OPTIONAL, [1] publicKey BIT STRING OPTIONAL }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPrivateKey {
    pub private_key: Vec<u8>,
    pub parameters: Option<EcParameters>,
    /// Uncompressed X9.62 point `04 || X || Y`.
    pub public_key: Option<Vec<u8>>,
}

impl EcPrivateKey {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let wrap = |source| KeyError::new(KeyErrorKind::Ec { source });
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(trailing(rest.len())));
        }
        let (version, cur) = tasn1::primitives::integer::decode_u32(content, 0).map_err(wrap)?;
        if version != 1 {
            return Err(KeyError::new(KeyErrorKind::UnsupportedVersion { version }));
        }
        let (private_key, mut cur) = tasn1::primitives::octetstring::decode(cur, 0).map_err(wrap)?;
        let private_key = private_key.to_vec();

        let mut parameters = None;
        if let Some((id, _)) = Identifier::read(cur) {
            if id.tag.class == Class::Context && id.tag.value == 0 {
                let (inner, next) =
                    tasn1::primitives::read_tlv(cur, 0, Tag::context(0), true).map_err(wrap)?;
                parameters = Some(decode_ec_parameters(inner)?);
                cur = next;
            }
        }

        let mut public_key = None;
        if let Some((id, _)) = Identifier::read(cur) {
            if id.tag.class == Class::Context && id.tag.value == 1 {
                let (inner, next) =
                    tasn1::primitives::read_tlv(cur, 0, Tag::context(1), true).map_err(wrap)?;
                let (bits, bit_rest) = tasn1::primitives::bitstring::decode(inner, 0).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(bit_rest, 0).map_err(wrap)?;
                if bits.unused != 0 {
                    return Err(wrap(tasn1::error::DecodeError::new(
                        tasn1::error::DecodeErrorKind::BitString {
                            detail: "EC publicKey BIT STRING must have no unused bits",
                        },
                    )));
                }
                if bits.bytes.first() != Some(&0x04) {
                    return Err(KeyError::new(KeyErrorKind::CompressedPointUnsupported));
                }
                public_key = Some(bits.bytes);
                cur = next;
            }
        }
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;

        Ok(Self { private_key, parameters, public_key })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_u32(1, &mut content);
        tasn1::primitives::octetstring::encode(&self.private_key, &mut content);
        if let Some(params) = &self.parameters {
            let inner = encode_ec_parameters(params);
            tasn1::primitives::write_header(Tag::context(0), true, inner.len(), &mut content);
            content.extend_from_slice(&inner);
        }
        if let Some(point) = &self.public_key {
            let mut bits = Vec::new();
            tasn1::primitives::bitstring::encode(&BitString::exact(point.clone()), &mut bits);
            tasn1::primitives::write_header(Tag::context(1), true, bits.len(), &mut content);
            content.extend_from_slice(&bits);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

fn decode_ec_parameters(content: &[u8]) -> Result<EcParameters, KeyError> {
    if let Some((id, _)) = Identifier::read(content) {
        if id.tag == Tag::OBJECT_IDENTIFIER && !id.constructed {
            let (oid, rest) =
                tasn1::primitives::oid::decode(content, 0, tasn1::oid::OidKind::Ignore)
                    .map_err(|source| KeyError::new(KeyErrorKind::Ec { source }))?;
            tasn1::primitives::sequence::assert_exhausted(rest, 0)
                .map_err(|source| KeyError::new(KeyErrorKind::Ec { source }))?;
            let curve = CurveId::from_oid_bytes(&oid.bytes).ok_or(KeyError::new(KeyErrorKind::CurveOid))?;
            return Ok(EcParameters::Named(curve));
        }
    }
    Ok(EcParameters::Specified(SpecifiedEcDomain::decode(content)?))
}

fn encode_ec_parameters(params: &EcParameters) -> Vec<u8> {
    match params {
        EcParameters::Named(curve) => {
            let mut out = Vec::new();
            tasn1::primitives::oid::encode(curve.oid_bytes(), &mut out);
            out
        }
        EcParameters::Specified(_) => {
            unimplemented!("encoding explicit SpecifiedECDomain parameters is not needed by this crate's callers")
        }
    }
}

/// An X.509/SPKI-wrapped EC public key: `algorithm.parameters` carries
/// the named curve OID, `subjectPublicKey` the uncompressed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    pub curve: CurveId,
    /// Uncompressed X9.62 point `04 || X || Y`.
    pub point: Vec<u8>,
}

impl EcPublicKey {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let wrap = |source| KeyError::new(KeyErrorKind::Ec { source });
        let (outer, rest) = tasn1::primitives::sequence::decode_sequence(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(trailing(rest.len())));
        }
        let (alg_content, cur) = tasn1::primitives::sequence::decode_sequence(outer, 0).map_err(wrap)?;
        let (alg_oid, alg_rest) =
            tasn1::primitives::oid::decode(alg_content, 0, tasn1::oid::OidKind::KeyType).map_err(wrap)?;
        if tasn1::oid::KeyId::from_oid_bytes(&alg_oid.bytes) != Some(tasn1::oid::KeyId::Ecdsa) {
            return Err(KeyError::new(KeyErrorKind::AlgoId));
        }
        let (curve_oid, alg_rest) =
            tasn1::primitives::oid::decode(alg_rest, 0, tasn1::oid::OidKind::Ignore).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(alg_rest, 0).map_err(wrap)?;
        let curve = CurveId::from_oid_bytes(&curve_oid.bytes).ok_or(KeyError::new(KeyErrorKind::CurveOid))?;

        let (bits, cur) = tasn1::primitives::bitstring::decode(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
        if bits.unused != 0 {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::BitString {
                    detail: "EC subjectPublicKey BIT STRING must have no unused bits",
                },
            )));
        }
        if bits.bytes.first() != Some(&0x04) {
            return Err(KeyError::new(KeyErrorKind::CompressedPointUnsupported));
        }
        Ok(Self { curve, point: bits.bytes })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut alg_content = Vec::new();
        tasn1::primitives::oid::encode(tasn1::oid::KeyId::Ecdsa.oid_bytes(), &mut alg_content);
        tasn1::primitives::oid::encode(self.curve.oid_bytes(), &mut alg_content);
        let mut alg = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, alg_content.len(), &mut alg);
        alg.extend_from_slice(&alg_content);

        let mut bits = Vec::new();
        tasn1::primitives::bitstring::encode(&BitString::exact(self.point.clone()), &mut bits);

        let mut content = Vec::new();
        content.extend_from_slice(&alg);
        content.extend_from_slice(&bits);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_with_named_curve_and_public_point_round_trips() {
        let key = EcPrivateKey {
            private_key: vec![0x11; 32],
            parameters: Some(EcParameters::Named(CurveId::P256)),
            public_key: Some({
                let mut p = vec![0x04];
                p.extend(vec![0x22; 32]);
                p.extend(vec![0x33; 32]);
                p
            }),
        };
        let der = key.encode();
        assert_eq!(EcPrivateKey::decode(&der).unwrap(), key);
    }

    #[test]
    fn private_key_without_optional_fields_round_trips() {
        let key = EcPrivateKey {
            private_key: vec![0xAA; 32],
            parameters: None,
            public_key: None,
        };
        let der = key.encode();
        assert_eq!(EcPrivateKey::decode(&der).unwrap(), key);
    }

    #[test]
    fn compressed_point_is_rejected() {
        let mut key = EcPrivateKey {
            private_key: vec![0x11; 32],
            parameters: None,
            public_key: Some({
                let mut p = vec![0x02];
                p.extend(vec![0x22; 32]);
                p
            }),
        };
        let der = key.encode();
        key.public_key = None;
        assert!(matches!(
            EcPrivateKey::decode(&der),
            Err(KeyError { kind: KeyErrorKind::CompressedPointUnsupported })
        ));
    }

    #[test]
    fn public_key_round_trips() {
        let key = EcPublicKey {
            curve: CurveId::P384,
            point: {
                let mut p = vec![0x04];
                p.extend(vec![0x01; 48]);
                p.extend(vec![0x02; 48]);
                p
            },
        };
        let der = key.encode();
        assert_eq!(EcPublicKey::decode(&der).unwrap(), key);
    }
}
