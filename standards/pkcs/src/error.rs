//! Errors for the key schemas ( "Cryptographic" kinds: `RsaKey`,
//! `DsaKey`, `EccKey`, `CurveOid`, `AlgoId`).

use snafu::Snafu;
use tasn1::error::DecodeError;

#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum KeyErrorKind {
    #[snafu(display("RSA key structure invalid: {source}"))]
    Rsa { source: DecodeError },
    #[snafu(display("DSA/DH key structure invalid: {source}"))]
    Dsa { source: DecodeError },
    #[snafu(display("EC key structure invalid: {source}"))]
    Ec { source: DecodeError },
    #[snafu(display("EdDSA/X25519/X448 key structure invalid: {source}"))]
    Edwards { source: DecodeError },
    #[snafu(display("PKCS#8 wrapper invalid: {source}"))]
    Pkcs8 { source: DecodeError },
    #[snafu(display("PBES/PKCS#7 encrypted body invalid: {source}"))]
    Pbe { source: DecodeError },
    #[snafu(display("unrecognised named curve OID"))]
    CurveOid,
    #[snafu(display("unrecognised key algorithm OID"))]
    AlgoId,
    #[snafu(display("RSA private key version {version} unsupported (only 0 and 1 are)"))]
    UnsupportedVersion { version: u32 },
    #[snafu(display("multi-prime RSA keys (version 1 extra primes) are not supported"))]
    MultiPrimeUnsupported,
    #[snafu(display("ECDSA public key point is compressed; only the uncompressed X9.62 form is supported"))]
    CompressedPointUnsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyError {
    pub kind: KeyErrorKind,
}

impl KeyError {
    pub fn new(kind: KeyErrorKind) -> Self {
        Self { kind }
    }
}

impl From<KeyErrorKind> for KeyError {
    fn from(kind: KeyErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<DecodeError> for KeyError {
    fn from(source: DecodeError) -> Self {
        Self::new(KeyErrorKind::Rsa { source })
    }
}

impl core::fmt::Display for KeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for KeyError {}
