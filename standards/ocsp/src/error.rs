//! Errors for the OCSP request/response schemas ( "OCSP/CRL" kinds:
//! `OcspConfirm`, `OcspBadResponder`).

use snafu::Snafu;
use tasn1::error::DecodeError;

#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum OcspErrorKind {
    #[snafu(display("OCSP request structure invalid: {source}"))]
    Request { source: DecodeError },
    #[snafu(display("OCSP response structure invalid: {source}"))]
    Response { source: DecodeError },
    #[snafu(display("unrecognised algorithm OID"))]
    AlgoId,
    #[snafu(display("responseBytes.responseType is not id-pkix-ocsp-basic"))]
    UnsupportedResponseType,
    #[snafu(display("an OCSPResponse with a successful status must carry responseBytes"))]
    MissingResponseBytes,
    #[snafu(display("BasicOCSPResponse.tbsResponseData.responses has no entries"))]
    EmptyResponseList,
    #[snafu(display("response nonce does not match the request nonce"))]
    NonceMismatch,
    #[snafu(display("OCSP signature verification failed"))]
    OcspConfirm,
    #[snafu(display("OCSP responder is not authorized to speak for this CA"))]
    OcspBadResponder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcspError {
    pub kind: OcspErrorKind,
}

impl OcspError {
    pub fn new(kind: OcspErrorKind) -> Self {
        Self { kind }
    }
}

impl From<OcspErrorKind> for OcspError {
    fn from(kind: OcspErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<DecodeError> for OcspError {
    fn from(source: DecodeError) -> Self {
        Self::new(OcspErrorKind::Response { source })
    }
}

impl core::fmt::Display for OcspError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for OcspError {}
