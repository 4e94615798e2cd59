//! PKCS#8 `PrivateKeyInfo` .
//!
//! `PrivateKeyInfo ::= SEQUENCE { version INTEGER(0),
//! privateKeyAlgorithm AlgorithmIdentifier, privateKey OCTET STRING }`.
//! The algorithm identifier's `parameters` field is interpreted
//! according to the algorithm OID: RSA requires a NULL, Ed25519/Ed448/
//! X25519/X448 forbid any parameters field at all, ECDSA expects a named
//! curve OID. The `privateKey` OCTET STRING body is returned to the
//! caller for schema-specific re-parsing (`tasn1_pkcs::rsa`,
//! `tasn1_pkcs::ec`, `tasn1_pkcs::edwards`, `tasn1_pkcs::dsa`).

use tasn1::oid::{CurveId, KeyId, OidKind};
use tasn1::prelude::*;

use crate::error::{KeyError, KeyErrorKind};

/// The algorithm identifier's `parameters` field, narrowed to the shapes
/// this crate's supported key algorithms actually use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    /// RSA, DSA (params carried separately as `Dss-Parms`), DH.
    Null,
    /// ECDSA: a named-curve OID (explicit `SpecifiedECDomain` params are
    /// not produced by any encoder in this crate and are rejected on
    /// decode, matching the common PKCS#8 profile).
    EcNamedCurve(CurveId),
    /// Ed25519/Ed448/X25519/X448: RFC 8410 forbids a parameters field.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    pub version: u32,
    pub algorithm: KeyId,
    pub parameters: AlgorithmParameters,
    pub private_key: Vec<u8>,
}

fn wrap(source: tasn1::error::DecodeError) -> KeyError {
    KeyError::new(KeyErrorKind::Pkcs8 { source })
}

impl PrivateKeyInfo {
    pub fn decode(der: &[u8]) -> Result<Self, KeyError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(der, 0).map_err(wrap)?;
        if !rest.is_empty() {
            return Err(wrap(tasn1::error::DecodeError::new(
                tasn1::error::DecodeErrorKind::TrailingData { extra: rest.len() },
            )));
        }
        let (version, cur) = tasn1::primitives::integer::decode_u32(content, 0).map_err(wrap)?;
        if version != 0 {
            return Err(KeyError::new(KeyErrorKind::UnsupportedVersion { version }));
        }

        let (alg_content, cur) = tasn1::primitives::sequence::decode_sequence(cur, 0).map_err(wrap)?;
        let (alg_oid, alg_rest) =
            tasn1::primitives::oid::decode(alg_content, 0, OidKind::KeyType).map_err(wrap)?;
        let algorithm = KeyId::from_oid_bytes(&alg_oid.bytes).ok_or(KeyError::new(KeyErrorKind::AlgoId))?;

        let parameters = match algorithm {
            KeyId::Rsa | KeyId::Dsa | KeyId::Dh => {
                let ((), rest) = tasn1::primitives::null::decode(alg_rest, 0).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
                AlgorithmParameters::Null
            }
            KeyId::Ed25519 | KeyId::X25519 | KeyId::Ed448 | KeyId::X448 => {
                tasn1::primitives::sequence::assert_exhausted(alg_rest, 0).map_err(wrap)?;
                AlgorithmParameters::Absent
            }
            KeyId::Ecdsa => {
                let (curve_oid, rest) =
                    tasn1::primitives::oid::decode(alg_rest, 0, OidKind::Ignore).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
                let curve = CurveId::from_oid_bytes(&curve_oid.bytes)
                    .ok_or(KeyError::new(KeyErrorKind::CurveOid))?;
                AlgorithmParameters::EcNamedCurve(curve)
            }
        };

        let (private_key, cur) = tasn1::primitives::octetstring::decode(cur, 0).map_err(wrap)?;
        // `[0] attributes` and `[1] publicKey` (RFC 5958 `OneAsymmetricKey`
        // extensions) are not produced by this crate's encoder and are
        // parsed past rather than rejected, the way optional trailers are
        // tolerated elsewhere in this codec.
        let _ = cur;

        Ok(Self { version: 0, algorithm, parameters, private_key: private_key.to_vec() })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut alg_content = Vec::new();
        tasn1::primitives::oid::encode(self.algorithm.oid_bytes(), &mut alg_content);
        match &self.parameters {
            AlgorithmParameters::Null => tasn1::primitives::null::encode(&mut alg_content),
            AlgorithmParameters::EcNamedCurve(curve) => {
                tasn1::primitives::oid::encode(curve.oid_bytes(), &mut alg_content)
            }
            AlgorithmParameters::Absent => {}
        }
        let mut alg = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, alg_content.len(), &mut alg);
        alg.extend_from_slice(&alg_content);

        let mut content = Vec::new();
        tasn1::primitives::integer::encode_u32(0, &mut content);
        content.extend_from_slice(&alg);
        tasn1::primitives::octetstring::encode(&self.private_key, &mut content);

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
    fn rsa_wrapper_round_trips() {
        let info = PrivateKeyInfo {
            version: 0,
            algorithm: KeyId::Rsa,
            parameters: AlgorithmParameters::Null,
            private_key: vec![0x30, 0x00],
        };
        let der = info.encode();
        assert_eq!(PrivateKeyInfo::decode(&der).unwrap(), info);
    }

    #[test]
    fn ed25519_wrapper_round_trips_with_no_parameters() {
        let info = PrivateKeyInfo {
            version: 0,
            algorithm: KeyId::Ed25519,
            parameters: AlgorithmParameters::Absent,
            private_key: vec![0x04, 0x20],
        };
        let der = info.encode();
        assert_eq!(PrivateKeyInfo::decode(&der).unwrap(), info);
    }

    #[test]
    fn ecdsa_wrapper_carries_named_curve() {
        let info = PrivateKeyInfo {
            version: 0,
            algorithm: KeyId::Ecdsa,
            parameters: AlgorithmParameters::EcNamedCurve(CurveId::P256),
            private_key: vec![0x04, 0x20],
        };
        let der = info.encode();
        assert_eq!(PrivateKeyInfo::decode(&der).unwrap(), info);
    }
}
