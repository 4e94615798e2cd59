//! Ed25519 / Ed448 / X25519 / X448 keys (, RFC 8410).
//!
//! The private form is `CurvePrivateKey ::= OCTET STRING` — itself the
//! body of a PKCS#8 `PrivateKeyInfo.privateKey` OCTET STRING, so callers
//! decode the PKCS#8 wrapper first (`crate::pkcs8`) and hand this module
//! the inner OCTET STRING's own DER encoding. The public form is a bare
//! SPKI wrapper whose `subjectPublicKey` BIT STRING holds the raw
//! 32- or 57-byte encoding with no further structure.

use tasn1::oid::KeyId;
use tasn1::prelude::*;

use crate::error::{KeyError, KeyErrorKind};

/// Which of the four RFC 8410 curves a key belongs to, and the raw
/// encoded length each expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdwardsCurve {
    Ed25519,
    X25519,
    Ed448,
    X448,
}

impl EdwardsCurve {
    pub fn key_id(self) -> KeyId {
        match self {
            EdwardsCurve::Ed25519 => KeyId::Ed25519,
            EdwardsCurve::X25519 => KeyId::X25519,
            EdwardsCurve::Ed448 => KeyId::Ed448,
            EdwardsCurve::X448 => KeyId::X448,
        }
    }

    pub fn raw_len(self) -> usize {
        match self {
            EdwardsCurve::Ed25519 | EdwardsCurve::X25519 => 32,
            EdwardsCurve::Ed448 | EdwardsCurve::X448 => 57,
        }
    }

    pub fn from_key_id(id: KeyId) -> Option<Self> {
        Some(match id {
            KeyId::Ed25519 => EdwardsCurve::Ed25519,
            KeyId::X25519 => EdwardsCurve::X25519,
            KeyId::Ed448 => EdwardsCurve::Ed448,
            KeyId::X448 => EdwardsCurve::X448,
            _ => return None,
        })
    }
}

/// `CurvePrivateKey ::= OCTET STRING`, the raw scalar/seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePrivateKey {
    pub curve: EdwardsCurve,
    pub bytes: Vec<u8>,
}

impl CurvePrivateKey {
    /// `der` is the PKCS#8 `PrivateKeyInfo.privateKey` OCTET STRING's own
    /// content, re-parsed as `CurvePrivateKey ::= OCTET STRING`.
    pub fn decode(curve: EdwardsCurve, der: &[u8]) -> Result<Self, KeyError> {
        let wrap = |source| KeyError::new(KeyErrorKind::Edwards { source });
        let (content, rest) = tasn1::primitives::octetstring::decode(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::TrailingData { extra: rest.len() },
            )));
        }
        if content.len() != curve.raw_len() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::Parse {
                    offset: 0,
                    detail: "CurvePrivateKey length does not match the expected curve size",
                },
            )));
        }
        Ok(Self { curve, bytes: content.to_vec() })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        tasn1::primitives::octetstring::encode(&self.bytes, &mut out);
        out
    }
}

/// The bare SPKI-wrapped public key: `algorithm` fixes the curve OID
/// with no parameters (RFC 8410 forbids an algorithm-identifier
/// parameters field here), `subjectPublicKey` is the raw encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePublicKey {
    pub curve: EdwardsCurve,
    pub bytes: Vec<u8>,
}

impl CurvePublicKey {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let wrap = |source| KeyError::new(KeyErrorKind::Edwards { source });
        let (outer, rest) = tasn1::primitives::sequence::decode_sequence(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::TrailingData { extra: rest.len() },
            )));
        }
        let (alg_content, cur) = tasn1::primitives::sequence::decode_sequence(outer, 0).map_err(wrap)?;
        let (alg_oid, alg_rest) =
            tasn1::primitives::oid::decode(alg_content, 0, tasn1::oid::OidKind::KeyType).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(alg_rest, 0).map_err(wrap)?;
        let curve = KeyId::from_oid_bytes(&alg_oid.bytes)
            .and_then(EdwardsCurve::from_key_id)
            .ok_or(KeyError::new(KeyErrorKind::AlgoId))?;

        let (bits, cur) = tasn1::primitives::bitstring::decode(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
        if bits.unused != 0 {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::BitString {
                    detail: "subjectPublicKey BIT STRING must have no unused bits",
                },
            )));
        }
        if bits.bytes.len() != curve.raw_len() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::Parse {
                    offset: 0,
                    detail: "public key length does not match the expected curve size",
                },
            )));
        }
        Ok(Self { curve, bytes: bits.bytes })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut alg = Vec::new();
        let mut alg_content = Vec::new();
        tasn1::primitives::oid::encode(self.curve.key_id().oid_bytes(), &mut alg_content);
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, alg_content.len(), &mut alg);
        alg.extend_from_slice(&alg_content);

        let mut bits = Vec::new();
        tasn1::primitives::bitstring::encode(&BitString::exact(self.bytes.clone()), &mut bits);

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
    fn ed25519_private_key_round_trips() {
        let key = CurvePrivateKey { curve: EdwardsCurve::Ed25519, bytes: vec![0x7A; 32] };
        let der = key.encode();
        assert_eq!(CurvePrivateKey::decode(EdwardsCurve::Ed25519, &der).unwrap(), key);
    }

    #[test]
    fn x448_private_key_round_trips() {
        let key = CurvePrivateKey { curve: EdwardsCurve::X448, bytes: vec![0x11; 57] };
        let der = key.encode();
        assert_eq!(CurvePrivateKey::decode(EdwardsCurve::X448, &der).unwrap(), key);
    }

    #[test]
    fn wrong_length_rejected() {
        let mut der = Vec::new();
        tasn1::primitives::octetstring::encode(&[0u8; 31], &mut der);
        assert!(CurvePrivateKey::decode(EdwardsCurve::Ed25519, &der).is_err());
    }

    #[test]
    fn public_key_round_trips() {
        let key = CurvePublicKey { curve: EdwardsCurve::Ed448, bytes: vec![0x99; 57] };
        let der = key.encode();
        assert_eq!(CurvePublicKey::decode(&der).unwrap(), key);
    }
}
