//! The emit pass: writes header and content
//! bytes for every item, given the lengths [`super::size::size_items`]
//! already computed.

use super::item::{ItemDesc, Payload, Slot, SlotKind};
use crate::error::{EncodeError, EncodeErrorKind};
use crate::primitives::{bitstring, boolean, integer, oid, sequence};
use crate::tag::Tag;

/// Runs the size pass then the emit pass, returning the finished DER
/// buffer. This is the usual entry point; call [`super::size::size_items`]
/// and [`emit_items`] separately only when the caller needs the total
/// size ahead of allocating the buffer itself.
pub fn encode_items(template: &[ItemDesc], slots: &mut [Slot]) -> Result<Vec<u8>, EncodeError> {
    let total = super::size::size_items(template, slots)?;
    let mut out = Vec::with_capacity(total);
    emit_items(template, slots, &mut out)?;
    Ok(out)
}

/// Writes every item in `template` to `out`, using each slot's
/// already-computed `length`. Panics (via `debug_assert`) if
/// `size_items` was not run first on the same slots — that is a caller
/// bug, not an encode-time failure.
pub fn emit_items(template: &[ItemDesc], slots: &[Slot], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    emit_level(template, 0, 0, slots, out)?;
    Ok(())
}

fn emit_level(
    template: &[ItemDesc],
    start: usize,
    depth: u8,
    slots: &[Slot],
    out: &mut Vec<u8>,
) -> Result<usize, EncodeError> {
    let mut i = start;
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

        if item.constructed {
            sequence::encode_header(item.tag, slots[idx].length, out);
            if item.header_only {
                match &slots[idx].payload {
                    Payload::Bytes(body) => out.extend_from_slice(body),
                    _ => {
                        return Err(EncodeError::new(EncodeErrorKind::MissingValue { depth }))
                    }
                }
                i = idx + 1;
            } else {
                i = emit_level(template, idx + 1, depth + 1, slots, out)?;
            }
        } else {
            emit_primitive(&item, &slots[idx], out)?;
            i = idx + 1;
        }
    }
    Ok(i)
}

fn skip_subtree(template: &[ItemDesc], start: usize, depth: u8) -> usize {
    let mut i = start;
    while i < template.len() && template[i].depth >= depth {
        i += 1;
    }
    i
}

fn emit_primitive(item: &ItemDesc, slot: &Slot, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let missing = || EncodeError::new(EncodeErrorKind::MissingValue { depth: item.depth });
    match slot.kind {
        SlotKind::Structure => {
            return Err(EncodeError::new(EncodeErrorKind::BadState {
                detail: "Structure slot used on a primitive item",
            }))
        }
        SlotKind::Boolean => {
            let value = slot.as_bool().ok_or_else(missing)?;
            boolean::encode(value, out);
        }
        SlotKind::Null => crate::primitives::null::encode(out),
        SlotKind::U32 => integer::encode_u32(slot.as_u32().ok_or_else(missing)?, out),
        SlotKind::MpUnsigned => integer::encode_unsigned(slot.as_mpi().ok_or_else(missing)?, out),
        SlotKind::MpSigned => integer::encode_signed(slot.as_mpi().ok_or_else(missing)?, out),
        SlotKind::Bytes | SlotKind::Replace => {
            let body = slot.as_bytes().ok_or_else(missing)?;
            if matches!(slot.kind, SlotKind::Replace) {
                out.extend_from_slice(body);
            } else {
                crate::primitives::octetstring::encode(body, out);
            }
        }
        SlotKind::ExpectedBytes(expected) => {
            crate::primitives::write_header(item.tag, false, expected.len(), out);
            out.extend_from_slice(expected);
        }
        SlotKind::BitString => bitstring::encode(slot.as_bitstring().ok_or_else(missing)?, out),
        SlotKind::Oid(_) => oid::encode(&slot.as_oid().ok_or_else(missing)?.bytes, out),
        SlotKind::Time => {
            let fields = slot.as_time().ok_or_else(missing)?;
            match item.tag {
                Tag::UTC_TIME => crate::primitives::time::encode_utc_time(fields, out),
                Tag::GENERALIZED_TIME => crate::primitives::time::encode_generalized_time(fields, out),
                _ => {
                    return Err(EncodeError::new(EncodeErrorKind::BadState {
                        detail: "Time slot on an item whose tag is neither UTCTime nor GeneralizedTime",
                    }))
                }
            }
        }
    }
    Ok(())
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
    fn encodes_and_round_trips_through_decode() {
        let kinds = vec![SlotKind::Structure, SlotKind::U32, SlotKind::Bytes];
        let mut slots = fresh_slots(&kinds);
        slots[1].set(Payload::U32(300));
        slots[2].set(Payload::Bytes(b"hi".to_vec()));
        let der = encode_items(SCHEMA, &mut slots).unwrap();

        let mut decoded = fresh_slots(&kinds);
        let consumed = super::super::decode::decode_items(SCHEMA, &mut decoded, &der, true).unwrap();
        assert_eq!(consumed, der.len());
        assert_eq!(decoded[1].as_u32(), Some(300));
        assert_eq!(decoded[2].as_bytes(), Some(&b"hi"[..]));
    }

    #[test]
    fn optional_absent_is_skipped_on_encode() {
        let kinds = vec![SlotKind::Structure, SlotKind::U32, SlotKind::Bytes];
        let mut slots = fresh_slots(&kinds);
        slots[1].set(Payload::U32(1));
        slots[2].no_out = true;
        let der = encode_items(SCHEMA, &mut slots).unwrap();
        assert_eq!(der, vec![0x30, 0x03, 0x02, 0x01, 0x01]);
    }
}
