//! OCSP request/response schemas (RFC 6960) built on `tasn1`'s
//! primitive codec and `tasn1-pkix`'s `AlgorithmIdentifier`/`Name`.
//!
//! This crate decodes and encodes the wire structures only. Hashing a
//! certificate into a `CertID`, confirming a response's signature, and
//! deciding whether a responder is authorized to speak for a given CA
//! all live in `tasn1_pkix::verify` and the caller's own digest/signer
//! implementations of `tasn1::collab`.

pub mod certid;
pub mod error;
pub mod nonce;
pub mod request;
pub mod response;

pub use certid::CertId;
pub use error::{OcspError, OcspErrorKind};
pub use nonce::NoncePolicy;
pub use request::{OcspRequest, Request, TbsRequest};
pub use response::{BasicOcspResponse, CertStatus, OcspResponse, ResponderId, ResponseData, ResponseStatus, SingleResponse};
