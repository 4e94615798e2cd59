use crate::tag::Tag;
use snafu::Snafu;

/// Every decode-time failure the primitive codec and template engine can
/// report ( "Structural" and "Domain" kinds).
#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeErrorKind {
    /// Malformed structure: bad tag, bad nesting, bad choice.
    #[snafu(display("parse error at offset {offset}: {detail}"))]
    Parse { offset: usize, detail: &'static str },

    /// The cursor ran past the end of the input.
    #[snafu(display("buffer underrun: need {needed} more byte(s) at offset {offset}"))]
    Buffer { offset: usize, needed: usize },

    /// A length or padding value that must be zero was not.
    #[snafu(display("expected zero-length or zero-pad at offset {offset}"))]
    Expect0 { offset: usize },

    /// `BIT STRING` unused-bits rule violated.
    #[snafu(display("invalid BIT STRING encoding: {detail}"))]
    BitString { detail: &'static str },

    /// OBJECT IDENTIFIER content was structurally invalid.
    #[snafu(display("invalid OBJECT IDENTIFIER encoding"))]
    ObjectId,

    /// An OID was well-formed but not recognised for the expected kind.
    #[snafu(display("unrecognised OID for kind {kind:?}"))]
    OidUnknown { kind: crate::oid::OidKind },

    /// An item's data slot held a type the engine does not know how to
    /// decode into (an impossible state, not an input error).
    #[snafu(display("template engine in an unexpected state: {detail}"))]
    BadState { detail: &'static str },

    /// Failed to materialise a multi-precision integer from its bytes.
    #[snafu(display("could not initialise a big integer from {len} byte(s)"))]
    MpInit { len: usize },

    /// A value that must be a non-negative integer had its sign bit set.
    #[snafu(display("expected a non-negative INTEGER"))]
    NegativeInteger,

    /// A tag did not match what the schema required.
    #[snafu(display("expected tag {expected:?}, found {actual:?} at offset {offset}"))]
    MismatchedTag {
        expected: Tag,
        actual: Tag,
        offset: usize,
    },

    /// `CONSTRUCTED`/primitive bit did not match the schema.
    #[snafu(display("expected constructed={expected}, found constructed={actual}"))]
    MismatchedConstructed { expected: bool, actual: bool },

    /// Declared length overruns the enclosing buffer or item.
    #[snafu(display("length {declared} at offset {offset} exceeds enclosing buffer"))]
    LengthOverrun { offset: usize, declared: usize },

    /// A UTCTime/GeneralizedTime string was the wrong length, had an
    /// invalid calendar field, or an unsupported timezone suffix.
    #[snafu(display("invalid time string: {detail}"))]
    InvalidDate { detail: &'static str },

    /// A CHOICE group had no matching member, or more than one member
    /// attempted to match.
    #[snafu(display("no matching CHOICE alternative for group {group}"))]
    NoMatchingChoice { group: u8 },

    /// A required item was absent.
    #[snafu(display("required item at depth {depth} was absent"))]
    MissingRequired { depth: u8 },

    /// Trailing bytes remained after a `complete` decode walk finished.
    #[snafu(display("{extra} trailing byte(s) after decode"))]
    TrailingData { extra: usize },
}

/// The top-level decode error: a kind plus the byte offset it occurred
/// at, mirroring the established `DecodeError { kind, codec, backtrace }`
/// split of a thin wrapper around codec-specific leaf kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self { kind }
    }
}

impl From<DecodeErrorKind> for DecodeError {
    fn from(kind: DecodeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
