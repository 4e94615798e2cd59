//! Static item descriptors and the dynamic per-call data slots they
//! pair with. A schema is a `const` array of [`ItemDesc`] in preorder
//! (parent before its children); the engine in [`super::decode`] and
//! [`super::encode`] walks it once per call against a freshly-allocated
//! [`Slot`] array of the same length.

use crate::mpint::Mpi;
use crate::oid::OidKind;
use crate::primitives::bitstring::BitString;
use crate::primitives::oid::Oid;
use crate::primitives::time::DateFields;
use crate::tag::Tag;

/// Whether an item is required, optional with no grouping, or one
/// alternative of a numbered CHOICE group: mandatory, optional with no
/// choice grouping, or a member of a numbered choice group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optionality {
    Mandatory,
    Optional,
    Choice(u8),
}

/// One node of a schema tree.
#[derive(Debug, Clone, Copy)]
pub struct ItemDesc {
    pub depth: u8,
    pub tag: Tag,
    pub constructed: bool,
    pub header_only: bool,
    pub optional: Optionality,
}

impl ItemDesc {
    /// A plain item: not header-only.
    pub const fn new(depth: u8, tag: Tag, constructed: bool, optional: Optionality) -> Self {
        Self {
            depth,
            tag,
            constructed,
            header_only: false,
            optional,
        }
    }

    /// Marks a constructed item header-only: the engine only emits the
    /// header, and the caller supplies the body. Such an item has no
    /// schema children at `depth + 1` — its content is a caller-supplied
    /// or caller-filled buffer instead.
    pub const fn header_only(mut self) -> Self {
        self.header_only = true;
        self
    }
}

/// Tells the engine how to interpret one item's content: the schema
/// author sets this per slot before calling the decoder, the same way a
/// caller selects which field of a tagged union to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Bookkeeping only: a constructed item whose value is its
    /// children, not a payload of its own (every non-header-only
    /// SEQUENCE/SET).
    Structure,
    Boolean,
    /// Always exactly empty content (AlgorithmIdentifier `parameters
    /// NULL`, most commonly).
    Null,
    U32,
    MpUnsigned,
    MpSigned,
    /// Raw bytes: OCTET STRING value, or a header-only item's content.
    Bytes,
    BitString,
    Oid(OidKind),
    Time,
    /// Content that must equal a fixed expected value on decode, and is
    /// written back verbatim on encode.
    ExpectedBytes(&'static [u8]),
    /// Pre-rendered DER the engine copies in without adding a header of
    /// its own ("replace-buffer").
    Replace,
}

/// What a slot currently holds, set by the decoder or by the caller
/// building encode input.
#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    Bool(bool),
    U32(u32),
    Mp(Mpi),
    Bytes(Vec<u8>),
    BitString(BitString),
    Oid(Oid),
    Time(DateFields),
}

/// The dynamic counterpart to one [`ItemDesc`]: decode output, or
/// encode input, for one schema node.
#[derive(Debug, Clone)]
pub struct Slot {
    pub kind: SlotKind,
    /// The tag actually observed on decode (may differ from the schema
    /// tag's class/number only in that implicit tags are stored as
    /// observed; the engine already enforced a match before storing).
    pub tag: Option<Tag>,
    pub offset: usize,
    pub length: usize,
    /// Set when the item was skipped (absent optional/choice member on
    /// decode) or when the caller marks an optional field absent before
    /// encoding.
    pub no_out: bool,
    pub payload: Payload,
}

impl Slot {
    pub const fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            tag: None,
            offset: 0,
            length: 0,
            no_out: false,
            payload: Payload::Empty,
        }
    }

    /// An item the caller has decided is absent before encoding.
    pub const fn absent(kind: SlotKind) -> Self {
        let mut slot = Self::new(kind);
        slot.no_out = true;
        slot
    }

    pub fn present(&self) -> bool {
        !self.no_out && !matches!(self.payload, Payload::Empty)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self.payload {
            Payload::U32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_mpi(&self) -> Option<&Mpi> {
        match &self.payload {
            Payload::Mp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bitstring(&self) -> Option<&BitString> {
        match &self.payload {
            Payload::BitString(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match &self.payload {
            Payload::Oid(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&DateFields> {
        match &self.payload {
            Payload::Time(v) => Some(v),
            _ => None,
        }
    }

    /// Sets the encode input for a primitive leaf; the `kind` must agree
    /// with `payload`'s shape or the emit pass fails with `BadState`.
    pub fn set(&mut self, payload: Payload) {
        self.payload = payload;
    }
}

/// Builds a freshly-cleared slot array matching `kinds`, one per
/// [`ItemDesc`] in the template. Scoped to the lifetime of a single
/// encode or decode call; every call gets its own scratch array.
pub fn fresh_slots(kinds: &[SlotKind]) -> Vec<Slot> {
    kinds.iter().copied().map(Slot::new).collect()
}
