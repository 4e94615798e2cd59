//! The `id-pkix-ocsp-nonce` extension (RFC 8954), shared by requests
//! and responses. The extension value is itself a DER `OCTET STRING`
//! wrapping the nonce bytes, so building and reading it is a double
//! OCTET-STRING operation rather than a single one.

use crate::certid::RawExtension;
use tasn1::oid::OcspType;

pub fn extension(nonce: &[u8]) -> RawExtension {
    let mut value = Vec::new();
    tasn1::primitives::octetstring::encode(nonce, &mut value);
    RawExtension { oid: OcspType::Nonce.oid_bytes().to_vec(), critical: false, value }
}

pub fn extract(extensions: &[RawExtension]) -> Option<Vec<u8>> {
    let raw = crate::certid::find_extension(extensions, OcspType::Nonce.oid_bytes())?;
    let (content, rest) = tasn1::primitives::octetstring::decode(&raw.value, 0).ok()?;
    if !rest.is_empty() {
        return None;
    }
    Some(content.to_vec())
}

/// Nonce-optionality policy. `Lax` (the default) tolerates a response
/// that omits a nonce the request sent; `Strict` requires an echo. A
/// nonce mismatch is always fatal regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoncePolicy {
    Strict,
    Lax,
}

impl Default for NoncePolicy {
    fn default() -> Self {
        NoncePolicy::Lax
    }
}

/// Compares a request's nonce against a response's, per `policy`: a
/// strict policy requires the response to echo a nonce, a lax policy
/// allows the response to omit one. Either way a mismatched nonce is
/// always rejected.
pub fn check(policy: NoncePolicy, request_nonce: Option<&[u8]>, response_nonce: Option<&[u8]>) -> bool {
    match (request_nonce, response_nonce) {
        (Some(req), Some(resp)) => req == resp,
        (Some(_), None) => policy == NoncePolicy::Lax,
        (None, _) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_round_trips() {
        let nonce = vec![0xAA, 0xBB, 0xCC];
        let ext = extension(&nonce);
        assert_eq!(extract(&[ext]), Some(nonce));
    }

    #[test]
    fn lax_policy_tolerates_missing_response_nonce() {
        assert!(check(NoncePolicy::Lax, Some(&[1, 2, 3]), None));
    }

    #[test]
    fn strict_policy_rejects_missing_response_nonce() {
        assert!(!check(NoncePolicy::Strict, Some(&[1, 2, 3]), None));
    }

    #[test]
    fn mismatched_nonce_always_fails() {
        assert!(!check(NoncePolicy::Lax, Some(&[1]), Some(&[2])));
        assert!(!check(NoncePolicy::Strict, Some(&[1]), Some(&[2])));
    }
}
