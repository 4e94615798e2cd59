//! `AlgorithmIdentifier`, shared by `tbsCertificate`,
//! `CertificationRequestInfo`, `TBSCertList`, and the OCSP schemas.
//!
//! `AlgorithmIdentifier ::= SEQUENCE { algorithm OBJECT IDENTIFIER,
//! parameters ANY DEFINED BY algorithm OPTIONAL }`. This crate's
//! supported algorithms only ever carry a NULL, an absent, or an
//! EC named-curve OID parameter, so `parameters` is kept as the raw
//! encoded bytes rather than modelled as a dynamic `ANY`; callers that
//! care (the key schemas in `tasn1-pkcs`) re-interpret it themselves.

use tasn1::oid::{OidKind, SigId};
use tasn1::prelude::*;

use crate::error::{PkixError, PkixErrorKind};

fn wrap(source: tasn1::error::DecodeError) -> PkixError {
    PkixError::new(PkixErrorKind::Cert { source })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: Vec<u8>,
    /// The raw bytes following the OID inside the `SEQUENCE`, or `None`
    /// if nothing followed it (RFC 8410 EdDSA signatures).
    pub parameters: Option<Vec<u8>>,
}

impl AlgorithmIdentifier {
    pub fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) =
            tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (oid, params) =
            tasn1::primitives::oid::decode(content, offset, OidKind::Ignore).map_err(wrap)?;
        let parameters = if params.is_empty() { None } else { Some(params.to_vec()) };
        Ok((Self { algorithm: oid.bytes, parameters }, rest))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::oid::encode(&self.algorithm, &mut content);
        if let Some(params) = &self.parameters {
            content.extend_from_slice(params);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// A signature-algorithm identifier with an explicit NULL parameter
    /// (RSA and DSA signature OIDs conventionally carry one).
    pub fn with_null_params(sig: SigId) -> Self {
        let mut params = Vec::new();
        tasn1::primitives::null::encode(&mut params);
        Self { algorithm: sig.oid_bytes().to_vec(), parameters: Some(params) }
    }

    /// A signature-algorithm identifier with no parameters field at all
    /// (Ed25519/Ed448, ECDSA signature OIDs per RFC 5480).
    pub fn without_params(sig: SigId) -> Self {
        Self { algorithm: sig.oid_bytes().to_vec(), parameters: None }
    }

    pub fn sig_id(&self) -> Option<SigId> {
        SigId::from_oid_bytes(&self.algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_with_rsa_round_trips_with_null_params() {
        let alg = AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa);
        let der = alg.encode();
        let (decoded, rest) = AlgorithmIdentifier::decode(&der, 0).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decoded, alg);
        assert_eq!(decoded.sig_id(), Some(SigId::Sha256WithRsa));
    }

    #[test]
    fn ed25519_round_trips_without_params() {
        let alg = AlgorithmIdentifier::without_params(SigId::Ed25519);
        let der = alg.encode();
        let (decoded, _) = AlgorithmIdentifier::decode(&der, 0).unwrap();
        assert_eq!(decoded, alg);
        assert_eq!(decoded.parameters, None);
    }
}
