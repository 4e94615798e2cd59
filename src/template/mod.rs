//! C2 — the template engine: a schema is a `const` array of [`ItemDesc`]
//! describing an ASN.1 tree in preorder; [`decode::decode_items`] walks
//! it against a DER buffer, [`emit::encode_items`] walks it the other
//! way. Every `standards/*` schema crate is built entirely out of
//! `&'static [ItemDesc]` constants plus calls into this module — it
//! never hand-rolls tag/length framing itself.

pub mod decode;
pub mod emit;
pub mod item;
pub mod size;

pub use decode::decode_items;
pub use emit::{emit_items, encode_items};
pub use item::{fresh_slots, ItemDesc, Optionality, Payload, Slot, SlotKind};

/// A schema: a `'static` preorder array of item descriptors, the only
/// form schemas take in every `standards/*` crate.
pub type Template = &'static [ItemDesc];
