//! The size pass: computes how many bytes each
//! item's content will need, filling `slot.length` so [`super::emit`]
//! does not have to recompute it, and so a caller can pre-allocate the
//! exact output buffer.
//!
//! The spec walks the flat descriptor array in reverse (`n-1 -> 0`) and
//! accumulates a running total. This is a recursive, depth-first
//! realization of the same computation: each constructed item's content
//! size is the sum of its children's sizes, computed bottom-up, which a
//! post-order recursion expresses more directly in Rust than the
//! reverse-index walk the original flat array needs.

use super::item::{ItemDesc, Payload, Slot, SlotKind};
use crate::error::{EncodeError, EncodeErrorKind};
use crate::tag::Tag;

/// Computes the total encoded size (header + content, recursively) for
/// the whole template, filling each slot's `length` with its own
/// content size along the way.
pub fn size_items(template: &[ItemDesc], slots: &mut [Slot]) -> Result<usize, EncodeError> {
    let (total, next) = size_level(template, 0, 0, slots)?;
    debug_assert_eq!(next, template.len());
    Ok(total)
}

fn size_level(
    template: &[ItemDesc],
    start: usize,
    depth: u8,
    slots: &mut [Slot],
) -> Result<(usize, usize), EncodeError> {
    let mut i = start;
    let mut total = 0usize;

    while i < template.len() && template[i].depth == depth {
        let idx = i;
        let item = template[idx];

        if slots[idx].no_out {
            i = idx + 1;
            if item.constructed && !item.header_only {
                i = skip_subtree(template, i, depth + 1);
            }
            continue;
        }

        let content_len = if item.constructed {
            if item.header_only {
                let len = match &slots[idx].payload {
                    Payload::Bytes(b) => b.len(),
                    _ => {
                        return Err(EncodeError::new(EncodeErrorKind::MissingValue { depth }))
                    }
                };
                i = idx + 1;
                len
            } else {
                let (child_total, next_i) = size_level(template, idx + 1, depth + 1, slots)?;
                i = next_i;
                child_total
            }
        } else {
            let len = primitive_size(&item, &slots[idx])?;
            i = idx + 1;
            len
        };

        slots[idx].length = content_len;
        total += crate::primitives::header_size(item.tag, content_len) + content_len;
    }

    Ok((total, i))
}

/// Skips every descendant of a `no_out` subtree (everything at `depth`
/// or deeper, until the next sibling of the skipped item's parent).
fn skip_subtree(template: &[ItemDesc], start: usize, depth: u8) -> usize {
    let mut i = start;
    while i < template.len() && template[i].depth >= depth {
        i += 1;
    }
    i
}

fn primitive_size(item: &ItemDesc, slot: &Slot) -> Result<usize, EncodeError> {
    let missing = || EncodeError::new(EncodeErrorKind::MissingValue { depth: item.depth });
    Ok(match slot.kind {
        SlotKind::Structure => {
            return Err(EncodeError::new(EncodeErrorKind::BadState {
                detail: "Structure slot used on a primitive item",
            }))
        }
        SlotKind::Boolean => 1,
        SlotKind::Null => 0,
        SlotKind::U32 => {
            let value = slot.as_u32().ok_or_else(missing)?;
            if value == 0 {
                1
            } else {
                let bytes = value.to_be_bytes();
                let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap();
                let body = &bytes[first_nonzero..];
                body.len() + usize::from(body[0] & 0x80 != 0)
            }
        }
        SlotKind::MpUnsigned => {
            let mpi = slot.as_mpi().ok_or_else(missing)?;
            let body = mpi.to_unsigned_be_bytes();
            if body.is_empty() {
                1
            } else {
                body.len() + usize::from(mpi.needs_sign_pad())
            }
        }
        SlotKind::MpSigned => {
            let mpi = slot.as_mpi().ok_or_else(missing)?;
            let body = mpi.to_signed_be_bytes();
            body.len().max(1)
        }
        SlotKind::Bytes | SlotKind::Replace => slot.as_bytes().ok_or_else(missing)?.len(),
        SlotKind::ExpectedBytes(expected) => expected.len(),
        SlotKind::BitString => slot.as_bitstring().ok_or_else(missing)?.bytes.len() + 1,
        SlotKind::Oid(_) => slot.as_oid().ok_or_else(missing)?.bytes.len(),
        SlotKind::Time => match item.tag {
            Tag::UTC_TIME => 13,
            Tag::GENERALIZED_TIME => 15,
            _ => {
                return Err(EncodeError::new(EncodeErrorKind::BadState {
                    detail: "Time slot on an item whose tag is neither UTCTime nor GeneralizedTime",
                }))
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::item::{fresh_slots, Optionality};

    const SCHEMA: &[ItemDesc] = &[
        ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
        ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
        ItemDesc::new(1, Tag::OCTET_STRING, false, Optionality::Optional),
    ];

    #[test]
    fn sizes_a_simple_sequence() {
        let kinds = vec![SlotKind::Structure, SlotKind::U32, SlotKind::Bytes];
        let mut slots = fresh_slots(&kinds);
        slots[1].set(Payload::U32(5));
        slots[2].no_out = true;
        let total = size_items(SCHEMA, &mut slots).unwrap();
        // SEQUENCE header (2) + INTEGER (02 01 05 = 3 bytes)
        assert_eq!(total, 2 + 3);
        assert_eq!(slots[0].length, 3);
        assert_eq!(slots[1].length, 1);
    }
}
