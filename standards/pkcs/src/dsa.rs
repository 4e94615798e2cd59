//! DSA and Diffie-Hellman parameters and keys .
//!
//! `DSAParameters ::= SEQUENCE { p, q, g }`; the key itself (public `y`
//! or private `x`) is a bare INTEGER wrapped either directly or inside a
//! `SubjectPublicKeyInfo` / PKCS#8 `PrivateKeyInfo`. The DH variant
//! shares the `p, g, q`-bearing parameter shape but permits an optional
//! `privateValueLength` and is distinguished from the PKCS#3 bare form
//! by whether the top-level sequence carries a leading version INTEGER.

use tasn1::mpint::Mpi;
use tasn1::prelude::*;
use tasn1::template::{decode_items, encode_items, fresh_slots, ItemDesc, Optionality, Payload, SlotKind};

use crate::error::{KeyError, KeyErrorKind};

/// `Dss-Parms ::= SEQUENCE { p INTEGER, q INTEGER, g INTEGER }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParameters {
    pub p: Mpi,
    pub q: Mpi,
    pub g: Mpi,
}

const PARAMS: &[ItemDesc] = &[
    ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
];

fn params_kinds() -> Vec<SlotKind> {
    vec![SlotKind::Structure, SlotKind::MpUnsigned, SlotKind::MpUnsigned, SlotKind::MpUnsigned]
}

impl DsaParameters {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let kinds = params_kinds();
        let mut slots = fresh_slots(&kinds);
        decode_items(PARAMS, &mut slots, der, true)
            .map_err(|source| KeyError::new(KeyErrorKind::Dsa { source }))?;
        Ok(Self {
            p: slots[1].as_mpi().expect("Mp slot").clone(),
            q: slots[2].as_mpi().expect("Mp slot").clone(),
            g: slots[3].as_mpi().expect("Mp slot").clone(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let kinds = params_kinds();
        let mut slots = fresh_slots(&kinds);
        slots[1].set(Payload::Mp(self.p.clone()));
        slots[2].set(Payload::Mp(self.q.clone()));
        slots[3].set(Payload::Mp(self.g.clone()));
        encode_items(PARAMS, &mut slots).expect("fixed schema with populated slots cannot fail")
    }
}

/// A bare `DSAPublicKey ::= INTEGER` (the PKCS#8/SPKI wrapper carries
/// the [`DsaParameters`] alongside it; this type is just the `y` value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPublicKey(pub Mpi);

impl DsaPublicKey {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let (mpi, rest) = tasn1::primitives::integer::decode_unsigned(der, 0)
            .map_err(|source| KeyError::new(KeyErrorKind::Dsa { source }))?;
        if !rest.is_empty() {
            return Err(KeyError::new(KeyErrorKind::Dsa {
                source: tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::TrailingData {
                    extra: rest.len(),
                }),
            }));
        }
        Ok(Self(mpi))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        tasn1::primitives::integer::encode_unsigned(&self.0, &mut out);
        out
    }
}

/// A bare `DSAPrivateKey ::= INTEGER` (the `x` value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPrivateKey(pub Mpi);

impl DsaPrivateKey {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let (mpi, rest) = tasn1::primitives::integer::decode_unsigned(der, 0)
            .map_err(|source| KeyError::new(KeyErrorKind::Dsa { source }))?;
        if !rest.is_empty() {
            return Err(KeyError::new(KeyErrorKind::Dsa {
                source: tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::TrailingData {
                    extra: rest.len(),
                }),
            }));
        }
        Ok(Self(mpi))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        tasn1::primitives::integer::encode_unsigned(&self.0, &mut out);
        out
    }
}

/// `DHParameter ::= SEQUENCE { prime INTEGER, base INTEGER,
/// privateValueLength INTEGER OPTIONAL }` (PKCS#3), extended by an
/// optional trailing subgroup factor `q` as some X9.42 profiles add it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhParameters {
    pub p: Mpi,
    pub g: Mpi,
    pub private_value_length: Option<u32>,
    pub q: Option<Mpi>,
}

impl DhParameters {
    /// Hand-decoded (rather than template-driven) because the trailing
    /// fields are a variable-length optional tail the fixed `ItemDesc`
    /// array isn't a natural fit for: each optional INTEGER is peeked at
    /// directly, the same way the RDN and extension decoders in
    /// `tasn1-pkix` read one item at a time.
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let wrap = |source| KeyError::new(KeyErrorKind::Dsa { source });
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::TrailingData { extra: rest.len() },
            )));
        }
        let (p, cur) = tasn1::primitives::integer::decode_unsigned(content, 0).map_err(wrap)?;
        let (g, cur) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
        let mut private_value_length = None;
        let mut q = None;
        let mut cur = cur;
        if !cur.is_empty() {
            let (value, next) = tasn1::primitives::integer::decode_u32(cur, 0).map_err(wrap)?;
            private_value_length = Some(value);
            cur = next;
        }
        if !cur.is_empty() {
            let (value, next) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
            q = Some(value);
            cur = next;
        }
        if !cur.is_empty() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::TrailingData { extra: cur.len() },
            )));
        }
        Ok(Self { p, g, private_value_length, q })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_unsigned(&self.p, &mut content);
        tasn1::primitives::integer::encode_unsigned(&self.g, &mut content);
        if let Some(len) = self.private_value_length {
            tasn1::primitives::integer::encode_u32(len, &mut content);
        }
        if let Some(q) = &self.q {
            tasn1::primitives::integer::encode_unsigned(q, &mut content);
        }
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
    fn params_round_trip() {
        let params = DsaParameters {
            p: Mpi::from_unsigned_be_bytes(&[0x81, 0x00]),
            q: Mpi::from_unsigned_be_bytes(&[0x23]),
            g: Mpi::from_unsigned_be_bytes(&[0x02]),
        };
        let der = params.encode();
        assert_eq!(DsaParameters::decode(&der).unwrap(), params);
    }

    #[test]
    fn dh_params_without_optional_tail_round_trip() {
        let params = DhParameters {
            p: Mpi::from_unsigned_be_bytes(&[0x81, 0x00]),
            g: Mpi::from_unsigned_be_bytes(&[0x02]),
            private_value_length: None,
            q: None,
        };
        let der = params.encode();
        assert_eq!(DhParameters::decode(&der).unwrap(), params);
    }

    #[test]
    fn dh_params_with_optional_tail_round_trip() {
        let params = DhParameters {
            p: Mpi::from_unsigned_be_bytes(&[0x81, 0x00]),
            g: Mpi::from_unsigned_be_bytes(&[0x02]),
            private_value_length: Some(160),
            q: Some(Mpi::from_unsigned_be_bytes(&[0x23])),
        };
        let der = params.encode();
        assert_eq!(DhParameters::decode(&der).unwrap(), params);
    }

    #[test]
    fn dsa_public_key_round_trip() {
        let key = DsaPublicKey(Mpi::from_unsigned_be_bytes(&[0x85]));
        let der = key.encode();
        assert_eq!(DsaPublicKey::decode(&der).unwrap(), key);
    }
}
