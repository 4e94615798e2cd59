//! RSA public and private keys .
//!
//! Two input shapes are accepted for the public key: bare PKCS#1
//! `RSAPublicKey` and X.509 `SubjectPublicKeyInfo` wrapping it. Decode
//! tries the inner (bare) form first and retries the outer form on
//! structural failure.

use tasn1::mpint::Mpi;
use tasn1::oid::{KeyId, OidKind};
use tasn1::prelude::*;
use tasn1::template::{decode_items, encode_items, fresh_slots, ItemDesc, Optionality, Payload, SlotKind};

use crate::error::{KeyError, KeyErrorKind};

/// `RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub modulus: Mpi,
    pub public_exponent: Mpi,
}

const BARE_PUBLIC: &[ItemDesc] = &[
    ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
];

fn bare_kinds() -> Vec<SlotKind> {
    vec![SlotKind::Structure, SlotKind::MpUnsigned, SlotKind::MpUnsigned]
}

/// `SubjectPublicKeyInfo ::= SEQUENCE { algorithm AlgorithmIdentifier,
/// subjectPublicKey BIT STRING }`, with `algorithm` fixed to
/// `{ rsaEncryption, NULL }` and the BIT STRING wrapping a bare
/// `RSAPublicKey`.
const WRAPPED_PUBLIC: &[ItemDesc] = &[
    ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
    ItemDesc::new(1, Tag::SEQUENCE, true, Optionality::Mandatory),
    ItemDesc::new(2, Tag::OBJECT_IDENTIFIER, false, Optionality::Mandatory),
    ItemDesc::new(2, Tag::NULL, false, Optionality::Mandatory),
    ItemDesc::new(1, Tag::BIT_STRING, false, Optionality::Mandatory),
];

fn wrapped_kinds() -> Vec<SlotKind> {
    vec![
        SlotKind::Structure,
        SlotKind::Structure,
        SlotKind::Oid(OidKind::KeyType),
        SlotKind::Null,
        SlotKind::BitString,
    ]
}

impl RsaPublicKey {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let kinds = bare_kinds();
        let mut slots = fresh_slots(&kinds);
        if let Ok(consumed) = decode_items(BARE_PUBLIC, &mut slots, der, true) {
            if consumed == der.len() {
                return Ok(Self {
                    modulus: slots[1].as_mpi().expect("MpUnsigned slot").clone(),
                    public_exponent: slots[2].as_mpi().expect("MpUnsigned slot").clone(),
                });
            }
        }

        let kinds = wrapped_kinds();
        let mut slots = fresh_slots(&kinds);
        decode_items(WRAPPED_PUBLIC, &mut slots, der, true).map_err(|source| {
            KeyError::new(KeyErrorKind::Rsa { source })
        })?;
        let oid = slots[2].as_oid().expect("Oid slot");
        if KeyId::from_oid_bytes(&oid.bytes) != Some(KeyId::Rsa) {
            return Err(KeyError::new(KeyErrorKind::AlgoId));
        }
        let inner = slots[4].as_bitstring().expect("BitString slot");
        if inner.unused != 0 {
            return Err(KeyError::new(KeyErrorKind::Rsa {
                source: tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::BitString {
                    detail: "SubjectPublicKey BIT STRING must have no unused bits",
                }),
            }));
        }
        Self::decode(&inner.bytes)
    }

    /// Encodes the bare PKCS#1 form (no SPKI wrapper).
    pub fn encode_bare(&self) -> Vec<u8> {
        let kinds = bare_kinds();
        let mut slots = fresh_slots(&kinds);
        slots[1].set(Payload::Mp(self.modulus.clone()));
        slots[2].set(Payload::Mp(self.public_exponent.clone()));
        encode_items(BARE_PUBLIC, &mut slots).expect("fixed schema with populated slots cannot fail")
    }

    /// Encodes the X.509 `SubjectPublicKeyInfo` wrapped form.
    pub fn encode_wrapped(&self) -> Vec<u8> {
        let bare = self.encode_bare();
        let kinds = wrapped_kinds();
        let mut slots = fresh_slots(&kinds);
        slots[2].set(Payload::Oid(tasn1::primitives::oid::Oid {
            bytes: KeyId::Rsa.oid_bytes().to_vec(),
            sum: tasn1::oid::byte_sum(KeyId::Rsa.oid_bytes()),
        }));
        slots[4].set(Payload::BitString(BitString::exact(bare)));
        encode_items(WRAPPED_PUBLIC, &mut slots).expect("fixed schema with populated slots cannot fail")
    }
}

/// `RSAPrivateKey ::= SEQUENCE { version INTEGER(0|1), modulus n,
/// publicExponent e, privateExponent d, prime1 p, prime2 q,
/// exponent1 dP, exponent2 dQ, coefficient qInv }`.
///
/// Version 1's extra `otherPrimeInfos` (multi-prime RSA) is not
/// supported: the schema below is exactly nine fixed items, so a
/// version-1 key carrying extra primes fails with trailing data rather
/// than being silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub version: u32,
    pub n: Mpi,
    pub e: Mpi,
    pub d: Mpi,
    pub p: Mpi,
    pub q: Mpi,
    pub dp: Mpi,
    pub dq: Mpi,
    pub qinv: Mpi,
}

const PRIVATE: &[ItemDesc] = &[
    ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // version
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // n
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // e
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // d
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // p
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // q
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // dP
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // dQ
    ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory), // qInv
];

fn private_kinds() -> Vec<SlotKind> {
    vec![
        SlotKind::Structure,
        SlotKind::U32,
        SlotKind::MpUnsigned,
        SlotKind::MpUnsigned,
        SlotKind::MpSigned,
        SlotKind::MpUnsigned,
        SlotKind::MpUnsigned,
        SlotKind::MpSigned,
        SlotKind::MpSigned,
        SlotKind::MpSigned,
    ]
}

impl RsaPrivateKey {
    /// Accepts either bare PKCS#1 DER, or a PKCS#8 `PrivateKeyInfo`
    /// wrapping it (the caller is expected to have already unwrapped
    /// PKCS#8 via [`crate::pkcs8::PrivateKeyInfo`] in the latter case;
    /// this constructor only ever sees the inner bare form).
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let kinds = private_kinds();
        let mut slots = fresh_slots(&kinds);
        decode_items(PRIVATE, &mut slots, der, true).map_err(|source| {
            KeyError::new(KeyErrorKind::Rsa { source })
        })?;
        let version = slots[1].as_u32().expect("U32 slot");
        if version > 1 {
            return Err(KeyError::new(KeyErrorKind::UnsupportedVersion { version }));
        }
        Ok(Self {
            version,
            n: slots[2].as_mpi().expect("Mp slot").clone(),
            e: slots[3].as_mpi().expect("Mp slot").clone(),
            d: slots[4].as_mpi().expect("Mp slot").clone(),
            p: slots[5].as_mpi().expect("Mp slot").clone(),
            q: slots[6].as_mpi().expect("Mp slot").clone(),
            dp: slots[7].as_mpi().expect("Mp slot").clone(),
            dq: slots[8].as_mpi().expect("Mp slot").clone(),
            qinv: slots[9].as_mpi().expect("Mp slot").clone(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let kinds = private_kinds();
        let mut slots = fresh_slots(&kinds);
        slots[1].set(Payload::U32(self.version));
        slots[2].set(Payload::Mp(self.n.clone()));
        slots[3].set(Payload::Mp(self.e.clone()));
        slots[4].set(Payload::Mp(self.d.clone()));
        slots[5].set(Payload::Mp(self.p.clone()));
        slots[6].set(Payload::Mp(self.q.clone()));
        slots[7].set(Payload::Mp(self.dp.clone()));
        slots[8].set(Payload::Mp(self.dq.clone()));
        slots[9].set(Payload::Mp(self.qinv.clone()));
        encode_items(PRIVATE, &mut slots).expect("fixed schema with populated slots cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_public() -> RsaPublicKey {
        RsaPublicKey {
            modulus: Mpi::from_unsigned_be_bytes(&[0xB2, 0xD0, 0x4F, 0xC3, 0x69, 0xA1]),
            public_exponent: Mpi::from_unsigned_be_bytes(&[0x01, 0x01]),
        }
    }

    #[test]
    fn bare_public_key_round_trip() {
        let key = sample_public();
        let der = key.encode_bare();
        let decoded = RsaPublicKey::decode(&der).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn wrapped_public_key_round_trip() {
        let key = sample_public();
        let der = key.encode_wrapped();
        let decoded = RsaPublicKey::decode(&der).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn small_rsa_public_key_round_trip() {
        let der = [
            0x30, 0x0D, 0x02, 0x07, 0x00, 0xB2, 0xD0, 0x4F, 0xC3, 0x69, 0xA1, 0x02, 0x02, 0x01, 0x01,
        ];
        let key = RsaPublicKey::decode(&der).unwrap();
        assert_eq!(key.modulus.to_unsigned_be_bytes(), vec![0xB2, 0xD0, 0x4F, 0xC3, 0x69, 0xA1]);
        assert_eq!(key.public_exponent.to_unsigned_be_bytes(), vec![0x01, 0x01]);
        assert_eq!(key.encode_bare(), der);
    }

    #[test]
    fn private_key_round_trip() {
        let key = RsaPrivateKey {
            version: 0,
            n: Mpi::from_unsigned_be_bytes(&[0x81, 0x00]),
            e: Mpi::from_unsigned_be_bytes(&[0x01, 0x00, 0x01]),
            d: Mpi::from_signed_be_bytes(&[0x55]).unwrap(),
            p: Mpi::from_unsigned_be_bytes(&[0x0B]),
            q: Mpi::from_unsigned_be_bytes(&[0x0D]),
            dp: Mpi::from_signed_be_bytes(&[0x03]).unwrap(),
            dq: Mpi::from_signed_be_bytes(&[0x05]).unwrap(),
            qinv: Mpi::from_signed_be_bytes(&[0x07]).unwrap(),
        };
        let der = key.encode();
        assert_eq!(RsaPrivateKey::decode(&der).unwrap(), key);
    }

    #[test]
    fn private_key_version_two_rejected() {
        // version = 2 is structurally an INTEGER the schema accepts, but
        // the builder must reject it as an unsupported version.
        let mut key_bytes = RsaPrivateKey {
            version: 0,
            n: Mpi::from_unsigned_be_bytes(&[1]),
            e: Mpi::from_unsigned_be_bytes(&[1]),
            d: Mpi::from_signed_be_bytes(&[1]).unwrap(),
            p: Mpi::from_unsigned_be_bytes(&[1]),
            q: Mpi::from_unsigned_be_bytes(&[1]),
            dp: Mpi::from_signed_be_bytes(&[1]).unwrap(),
            dq: Mpi::from_signed_be_bytes(&[1]).unwrap(),
            qinv: Mpi::from_signed_be_bytes(&[1]).unwrap(),
        }
        .encode();
        // Patch the version byte (offset 4, content of the first INTEGER).
        key_bytes[4] = 2;
        assert!(matches!(
            RsaPrivateKey::decode(&key_bytes),
            Err(KeyError { kind: KeyErrorKind::UnsupportedVersion { version: 2 } })
        ));
    }
}
