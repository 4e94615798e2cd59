//! `tasn1` — a template-driven ASN.1 BER/DER codec engine.
//!
//! The crate root holds the pieces every `standards/*` schema crate
//! builds on: the primitive codec (tag/length framing plus the
//! universal types, [`primitives`]), the template engine that drives
//! both encode and decode from one schema array ([`template`]), the OID
//! registry ([`oid`]), BER-to-DER canonicalisation ([`ber_to_der`]), and
//! the `Mpi` big-integer newtype ([`mpint`]). Primitive cryptography,
//! PEM armoring, and the curve parameter registry are out of scope —
//! see [`collab`] for the trait boundaries a caller must supply instead.

pub mod ber_to_der;
pub mod collab;
pub mod error;
pub mod length;
pub mod mpint;
pub mod oid;
pub mod primitives;
pub mod tag;
pub mod template;

/// Re-exports the names most schema crates reach for, the way the
/// teacher's own `prelude` module gathers its core types.
pub mod prelude {
    pub use crate::collab::{
        Cipher, CipherDirection, Digest, Rng, SignaturePrimitive, SignatureOutcome, Signer,
        SignerStore, VerifyKey,
    };
    pub use crate::error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, Pending};
    pub use crate::mpint::Mpi;
    pub use crate::oid::OidKind;
    pub use crate::primitives::bitstring::BitString;
    pub use crate::primitives::oid::Oid;
    pub use crate::primitives::time::{DateFields, Direction};
    pub use crate::tag::{Class, Identifier, Tag};
    pub use crate::template::{
        decode_items, emit_items, encode_items, fresh_slots, ItemDesc, Optionality, Payload, Slot,
        SlotKind, Template,
    };
}
