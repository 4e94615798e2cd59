//! The decode walk: a depth-tracked traversal of
//! a schema's [`ItemDesc`] array against an input buffer, filling one
//! [`Slot`] per descriptor.

use super::item::{ItemDesc, Optionality, Payload, Slot, SlotKind};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::{Identifier, Tag};

/// Walks `template` against `input`, filling `slots` (already sized and
/// `kind`-tagged by the caller via [`super::item::fresh_slots`]).
///
/// When `complete` is set, every byte of `input` must be consumed by the
/// top-level items (invariant: "after the full walk, if complete is
/// set, every depth must be exhausted").
pub fn decode_items(
    template: &[ItemDesc],
    slots: &mut [Slot],
    input: &[u8],
    complete: bool,
) -> Result<usize, DecodeError> {
    assert_eq!(template.len(), slots.len(), "template/slots length mismatch");
    let (_, remaining) = decode_level(template, 0, 0, input, 0, slots, complete)?;
    Ok(input.len() - remaining.len())
}

/// Processes one run of sibling descriptors at `depth`, starting at
/// template index `start`, against `content` (already sliced to the
/// enclosing item's declared length, or the whole input at depth 0).
/// Returns the index of the first descriptor not belonging to this
/// level (depth less than `depth`, or `template.len()`) and whatever of
/// `content` was left unconsumed.
fn decode_level<'a>(
    template: &[ItemDesc],
    start: usize,
    depth: u8,
    content: &'a [u8],
    base_offset: usize,
    slots: &mut [Slot],
    strict: bool,
) -> Result<(usize, &'a [u8]), DecodeError> {
    let mut i = start;
    let mut cur = content;
    let mut offset = base_offset;
    let mut choice_group: Option<u8> = None;
    let mut choice_matched = false;

    while i < template.len() && template[i].depth == depth {
        let item = template[i];
        let this_group = match item.optional {
            Optionality::Choice(g) => Some(g),
            _ => None,
        };

        if this_group != choice_group {
            if let Some(g) = choice_group {
                if !choice_matched {
                    return Err(DecodeError::new(DecodeErrorKind::NoMatchingChoice { group: g }));
                }
            }
            choice_group = this_group;
            choice_matched = false;
        }

        if this_group.is_some() && choice_matched {
            // Another member of this group already matched; this one
            // cannot also be present ( step 9, "fast-forward past
            // sibling choices with the same number").
            slots[i].no_out = true;
            i += 1;
            continue;
        }

        let peek = Identifier::read(cur);
        let tag_matches = matches!(peek, Some((id, _)) if id.tag == item.tag);

        if !tag_matches {
            if matches!(item.optional, Optionality::Mandatory) {
                return Err(DecodeError::new(DecodeErrorKind::MissingRequired { depth }));
            }
            slots[i].no_out = true;
            i += 1;
            continue;
        }

        let (id, after_id) = peek.expect("tag_matches implies peek is Some");
        if id.constructed != item.constructed {
            return Err(DecodeError::new(DecodeErrorKind::MismatchedConstructed {
                expected: item.constructed,
                actual: id.constructed,
            }));
        }
        let id_len = cur.len() - after_id.len();
        let (len, after_len) = crate::length::read_length(after_id, offset + id_len)?;
        let crate::length::Length::Definite(content_len) = len else {
            return Err(DecodeError::new(DecodeErrorKind::Parse {
                offset,
                detail: "indefinite length reached the template engine; run ber_to_der first",
            }));
        };
        if after_len.len() < content_len {
            return Err(DecodeError::new(DecodeErrorKind::LengthOverrun {
                offset,
                declared: content_len,
            }));
        }
        let header_len = cur.len() - after_len.len();
        let item_content = &after_len[..content_len];
        let item_rest = &after_len[content_len..];

        slots[i].tag = Some(id.tag);
        slots[i].offset = offset + header_len;
        slots[i].length = content_len;
        if this_group.is_some() {
            choice_matched = true;
        }

        if item.constructed {
            if item.header_only {
                slots[i].payload = Payload::Bytes(item_content.to_vec());
                i += 1;
            } else {
                // `item_content` is already sliced to this item's declared
                // length, so its children must consume all of it — a
                // trailing byte here is malformed DER, not an outer-level
                // completeness question (that's what `strict` governs at
                // the top-level call).
                let (next_i, _) = decode_level(
                    template,
                    i + 1,
                    depth + 1,
                    item_content,
                    offset + header_len,
                    slots,
                    true,
                )?;
                i = next_i;
            }
        } else {
            decode_primitive(&mut slots[i], item_content, offset + header_len)?;
            i += 1;
        }

        offset += header_len + content_len;
        cur = item_rest;
    }

    if let Some(g) = choice_group {
        if !choice_matched {
            return Err(DecodeError::new(DecodeErrorKind::NoMatchingChoice { group: g }));
        }
    }
    if strict && !cur.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::TrailingData { extra: cur.len() }));
    }
    Ok((i, cur))
}

fn decode_primitive(slot: &mut Slot, content: &[u8], offset: usize) -> Result<(), DecodeError> {
    use crate::primitives::{bitstring, boolean, integer, oid, time};

    slot.payload = match slot.kind {
        SlotKind::Structure => {
            return Err(DecodeError::new(DecodeErrorKind::BadState {
                detail: "Structure slot used on a primitive item",
            }))
        }
        SlotKind::Boolean => Payload::Bool(boolean::decode_content(content, offset)?),
        SlotKind::Null => {
            if !content.is_empty() {
                return Err(DecodeError::new(DecodeErrorKind::Expect0 { offset }));
            }
            Payload::Bytes(Vec::new())
        }
        SlotKind::U32 => Payload::U32(integer::decode_content_u32(content, offset)?),
        SlotKind::MpUnsigned => Payload::Mp(integer::decode_content_unsigned(content, offset)?),
        SlotKind::MpSigned => Payload::Mp(integer::decode_content_signed(content, offset)?),
        SlotKind::Bytes | SlotKind::Replace => Payload::Bytes(content.to_vec()),
        SlotKind::BitString => Payload::BitString(bitstring::decode_content(content)?),
        SlotKind::Oid(kind) => Payload::Oid(oid::decode_content(content, offset, kind)?),
        SlotKind::Time => {
            let fields = match slot.tag {
                Some(t) if t == Tag::UTC_TIME => time::decode_utc_time_content(content, offset)?,
                Some(t) if t == Tag::GENERALIZED_TIME => {
                    time::decode_generalized_time_content(content, offset)?
                }
                _ => {
                    return Err(DecodeError::new(DecodeErrorKind::BadState {
                        detail: "Time slot matched a tag that is neither UTCTime nor GeneralizedTime",
                    }))
                }
            };
            Payload::Time(fields)
        }
        SlotKind::ExpectedBytes(expected) => {
            if content != expected {
                return Err(DecodeError::new(DecodeErrorKind::Parse {
                    offset,
                    detail: "content did not match the schema's expected fixed bytes",
                }));
            }
            Payload::Bytes(content.to_vec())
        }
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Class;

    // A minimal schema: SEQUENCE { version INTEGER, name OCTET STRING OPTIONAL }
    const SCHEMA: &[ItemDesc] = &[
        ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
        ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
        ItemDesc::new(1, Tag::OCTET_STRING, false, Optionality::Optional),
    ];

    fn kinds() -> Vec<SlotKind> {
        vec![SlotKind::Structure, SlotKind::U32, SlotKind::Bytes]
    }

    #[test]
    fn decodes_mandatory_and_present_optional() {
        let der = [0x30, 0x07, 0x02, 0x01, 0x05, 0x04, 0x02, b'h', b'i'];
        let kinds = kinds();
        let mut slots = super::super::item::fresh_slots(&kinds);
        let consumed = decode_items(SCHEMA, &mut slots, &der, true).unwrap();
        assert_eq!(consumed, der.len());
        assert_eq!(slots[1].as_u32(), Some(5));
        assert_eq!(slots[2].as_bytes(), Some(&b"hi"[..]));
    }

    #[test]
    fn decodes_with_optional_absent() {
        let der = [0x30, 0x03, 0x02, 0x01, 0x07];
        let kinds = kinds();
        let mut slots = super::super::item::fresh_slots(&kinds);
        decode_items(SCHEMA, &mut slots, &der, true).unwrap();
        assert_eq!(slots[1].as_u32(), Some(7));
        assert!(!slots[2].present());
    }

    #[test]
    fn missing_mandatory_fails() {
        let der = [0x30, 0x02, 0x04, 0x00];
        let kinds = kinds();
        let mut slots = super::super::item::fresh_slots(&kinds);
        assert!(decode_items(SCHEMA, &mut slots, &der, true).is_err());
    }

    #[test]
    fn trailing_data_fails_when_complete() {
        let der = [0x30, 0x03, 0x02, 0x01, 0x07, 0xff];
        let kinds = kinds();
        let mut slots = super::super::item::fresh_slots(&kinds);
        assert!(decode_items(SCHEMA, &mut slots, &der, true).is_err());
    }

    // A CHOICE between two context tags.
    const CHOICE_SCHEMA: &[ItemDesc] = &[
        ItemDesc::new(0, Tag::context(0), false, Optionality::Choice(2)),
        ItemDesc::new(0, Tag::context(1), false, Optionality::Choice(2)),
    ];

    #[test]
    fn choice_picks_the_matching_alternative() {
        let der = [0x81, 0x01, 0x09];
        let kinds = vec![SlotKind::Bytes, SlotKind::Bytes];
        let mut slots = super::super::item::fresh_slots(&kinds);
        decode_items(CHOICE_SCHEMA, &mut slots, &der, true).unwrap();
        assert!(!slots[0].present());
        assert_eq!(slots[1].as_bytes(), Some(&[0x09][..]));
    }

    #[test]
    fn choice_with_no_match_fails() {
        let der = [0x02, 0x01, 0x09];
        let kinds = vec![SlotKind::Bytes, SlotKind::Bytes];
        let mut slots = super::super::item::fresh_slots(&kinds);
        assert!(decode_items(CHOICE_SCHEMA, &mut slots, &der, true).is_err());
    }

    #[test]
    fn context_class_is_distinguished_from_universal() {
        assert_eq!(Tag::context(0).class, Class::Context);
    }

    // SEQUENCE { a INTEGER, b INTEGER } — both mandatory, no CHOICE/OPTIONAL
    // involved, so a trailing byte inside the outer SEQUENCE's declared
    // length can only mean the content doesn't match its own header.
    const TWO_INT_SCHEMA: &[ItemDesc] = &[
        ItemDesc::new(0, Tag::SEQUENCE, true, Optionality::Mandatory),
        ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
        ItemDesc::new(1, Tag::INTEGER, false, Optionality::Mandatory),
    ];

    #[test]
    fn rejects_extra_byte_inside_nested_sequence_even_when_not_complete() {
        // outer SEQUENCE declares 7 bytes of content: two INTEGERs (5
        // bytes) plus one stray trailing byte inside that span.
        let der = [0x30, 0x07, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02, 0xff];
        let kinds = vec![SlotKind::Structure, SlotKind::U32, SlotKind::U32];
        let mut slots = super::super::item::fresh_slots(&kinds);
        // `complete = false` at the top level must not paper over the
        // inner SEQUENCE failing to fully account for its own length.
        assert!(decode_items(TWO_INT_SCHEMA, &mut slots, &der, false).is_err());
    }
}
