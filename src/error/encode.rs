use snafu::Snafu;

/// Every encode-time failure the primitive codec and template engine can
/// report ( "Control" kinds include `LengthOnly`, which is not a
/// failure but the encoder reporting the required size for a null output
/// buffer — modeled here as `EncodeError::length_only`, a distinguished
/// `Ok`-adjacent variant callers match on explicitly).
#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum EncodeErrorKind {
    /// The caller-supplied output buffer was too small.
    #[snafu(display("output buffer too small: need {needed}, have {have}"))]
    Buffer { needed: usize, have: usize },

    /// A slot had no value and no buffer to draw one from.
    #[snafu(display("missing value for item at depth {depth}"))]
    MissingValue { depth: u8 },

    /// A `BIT STRING` slot's `unused` count was out of range.
    #[snafu(display("unused-bits count {unused} out of range 0..=7"))]
    BitStringUnused { unused: u8 },

    /// The template engine reached an impossible state while sizing or
    /// emitting an item.
    #[snafu(display("template engine in an unexpected state: {detail}"))]
    BadState { detail: &'static str },

    /// A collaborator (signer, hash, cipher) reported a failure that
    /// aborted the encode.
    #[snafu(display("cryptographic collaborator failed: {detail}"))]
    Crypto { detail: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
}

impl EncodeError {
    pub fn new(kind: EncodeErrorKind) -> Self {
        Self { kind }
    }
}

impl From<EncodeErrorKind> for EncodeError {
    fn from(kind: EncodeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
