//! Error types for the primitive codec (C1) and template engine (C2).
//!
//! Structural/domain errors abort the current call
//! immediately; date and critical-extension errors are deferred by the
//! schema layer, which stores them on the decoded object and checks them
//! after the full walk completes (see `tasn1-pkix::cert::Certificate::finish`).

mod decode;
mod encode;

pub use decode::{DecodeError, DecodeErrorKind};
pub use encode::{EncodeError, EncodeErrorKind};

/// Resumption signal from the async signature-verification pipeline
/// ( "Async resumption"). Not an error: callers re-enter at the
/// same phase once the underlying primitive is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending;
