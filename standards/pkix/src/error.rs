//! Errors for certificate, name, extension, CSR, CRL, and chain
//! verification handling.

use snafu::Snafu;
use tasn1::error::DecodeError;
use tasn1::oid::OidKind;

#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum PkixErrorKind {
    #[snafu(display("certificate structure invalid: {source}"))]
    Cert { source: DecodeError },
    #[snafu(display("certification request structure invalid: {source}"))]
    Csr { source: DecodeError },
    #[snafu(display("CRL structure invalid: {source}"))]
    Crl { source: DecodeError },
    #[snafu(display("name structure invalid: {source}"))]
    Name { source: DecodeError },
    #[snafu(display("extension structure invalid: {source}"))]
    Extension { source: DecodeError },

    #[snafu(display("unrecognised algorithm OID"))]
    AlgoId,
    #[snafu(display("inner and outer signature algorithm OIDs do not match"))]
    SigOidMismatch,
    #[snafu(display("extensions field present on a version-1/2 certificate"))]
    ExtensionsRequireV3,

    #[snafu(display("unrecognised critical extension (kind {kind:?})"))]
    CriticalExtensionUnknown { kind: OidKind },
    #[snafu(display("extension OID appears more than once"))]
    DuplicateOid,
    #[snafu(display("duplicate certificate policy OID"))]
    DuplicatePolicyOid,

    #[snafu(display("certificate/CRL is not yet valid (notBefore in the future)"))]
    BeforeDate,
    #[snafu(display("certificate/CRL has expired (notAfter in the past)"))]
    AfterDate,

    #[snafu(display("subordinate name is not permitted by the issuer's name constraints"))]
    NameInvalid,
    #[snafu(display("certificate path length constraint violated"))]
    PathLengthInvalid,
    #[snafu(display("issuer key usage does not permit this operation"))]
    KeyUsage,
    #[snafu(display("certificate does not carry a required extended key usage"))]
    ExtKeyUsage,

    #[snafu(display("no signer found for this certificate/CRL"))]
    NoSigner,
    #[snafu(display("signature verification failed"))]
    SignatureConfirm,

    #[snafu(display("no signer found for this CRL"))]
    CrlNoSigner,
    #[snafu(display("CRL signature verification failed"))]
    CrlSignatureError,
    #[snafu(display("CRL nextUpdate is in the past"))]
    CrlExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkixError {
    pub kind: PkixErrorKind,
}

impl PkixError {
    pub fn new(kind: PkixErrorKind) -> Self {
        Self { kind }
    }
}

impl From<PkixErrorKind> for PkixError {
    fn from(kind: PkixErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<DecodeError> for PkixError {
    fn from(source: DecodeError) -> Self {
        Self::new(PkixErrorKind::Cert { source })
    }
}

impl core::fmt::Display for PkixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for PkixError {}
