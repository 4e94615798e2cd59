//! BER-to-DER canonicalisation ( "BER to DER"): rewrites indefinite
//! lengths to definite ones, recursively, so the template engine's
//! decode pass — which only ever reads definite lengths — can run on
//! input that arrived in looser BER form.
//!
//! This pass is purely structural. It does not canonicalise primitive
//! content (e.g. a non-minimal INTEGER or a BOOLEAN encoded as a
//! non-0xff truthy byte); that is the job of the primitive decoders in
//! [`crate::primitives`], which reject such things outright rather than
//! fix them up.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::Identifier;

/// Converts one top-level TLV from BER to DER, returning the canonical
/// bytes and whatever followed it in `input`.
pub fn convert(input: &[u8], offset: usize) -> Result<(Vec<u8>, &[u8]), DecodeError> {
    convert_value(input, offset)
}

fn convert_value(input: &[u8], offset: usize) -> Result<(Vec<u8>, &[u8]), DecodeError> {
    let (id, after_id) = Identifier::read(input).ok_or(DecodeError::new(DecodeErrorKind::Buffer {
        offset,
        needed: 1,
    }))?;
    let id_len = input.len() - after_id.len();
    let (len, after_len) = crate::length::read_length(after_id, offset + id_len)?;
    let len_len = after_id.len() - after_len.len();

    let content_offset = offset + id_len + len_len;
    let (content, rest) = match len {
        crate::length::Length::Definite(n) => {
            if after_len.len() < n {
                return Err(DecodeError::new(DecodeErrorKind::LengthOverrun {
                    offset: content_offset,
                    declared: n,
                }));
            }
            (&after_len[..n], &after_len[n..])
        }
        crate::length::Length::Indefinite => {
            if !id.constructed {
                return Err(DecodeError::new(DecodeErrorKind::Parse {
                    offset: content_offset,
                    detail: "indefinite length on a primitive value",
                }));
            }
            return convert_indefinite_constructed(id, after_len, content_offset, offset);
        }
    };

    let new_content = if id.constructed {
        convert_children(content, content_offset)?
    } else {
        content.to_vec()
    };

    let mut out = Vec::new();
    id.write(&mut out);
    crate::length::write_length(new_content.len(), &mut out);
    out.extend_from_slice(&new_content);
    Ok((out, rest))
}

/// Reads nested TLVs out of `content` until it is exhausted, converting
/// each one, and concatenates the results. Used for already-definite
/// constructed values.
fn convert_children(mut content: &[u8], mut offset: usize) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    while !content.is_empty() {
        let (child, rest) = convert_value(content, offset)?;
        offset += content.len() - rest.len();
        out.extend_from_slice(&child);
        content = rest;
    }
    Ok(out)
}

/// Reads nested TLVs until the `00 00` end-of-contents marker, converting
/// each child, then re-emits the whole thing as one definite-length TLV.
fn convert_indefinite_constructed<'a>(
    id: Identifier,
    mut cursor: &'a [u8],
    mut offset: usize,
    tlv_offset: usize,
) -> Result<(Vec<u8>, &'a [u8]), DecodeError> {
    let mut content = Vec::new();
    loop {
        if cursor.len() >= 2 && cursor[0] == 0x00 && cursor[1] == 0x00 {
            cursor = &cursor[2..];
            break;
        }
        if cursor.is_empty() {
            return Err(DecodeError::new(DecodeErrorKind::Parse {
                offset,
                detail: "indefinite-length value missing end-of-contents marker",
            }));
        }
        let (child, rest) = convert_value(cursor, offset)?;
        offset += cursor.len() - rest.len();
        content.extend_from_slice(&child);
        cursor = rest;
    }
    let mut out = Vec::new();
    id.write(&mut out);
    crate::length::write_length(content.len(), &mut out);
    out.extend_from_slice(&content);
    let _ = tlv_offset;
    Ok((out, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indefinite_sequence_with_one_integer() {
        let ber = [0x30, 0x80, 0x02, 0x01, 0x01, 0x00, 0x00];
        let (der, rest) = convert(&ber, 0).unwrap();
        assert_eq!(der, vec![0x30, 0x03, 0x02, 0x01, 0x01]);
        assert!(rest.is_empty());
    }

    #[test]
    fn already_definite_is_passed_through_unchanged() {
        let der_in = [0x30, 0x03, 0x02, 0x01, 0x2a];
        let (der, rest) = convert(&der_in, 0).unwrap();
        assert_eq!(der, der_in);
        assert!(rest.is_empty());
    }

    #[test]
    fn nested_indefinite_sequences() {
        // SEQUENCE (indef) { SEQUENCE (indef) { INTEGER 1 } }
        let ber = [
            0x30, 0x80, 0x30, 0x80, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];
        let (der, rest) = convert(&ber, 0).unwrap();
        assert_eq!(der, vec![0x30, 0x05, 0x30, 0x03, 0x02, 0x01, 0x01]);
        assert!(rest.is_empty());
    }

    #[test]
    fn missing_eoc_is_an_error() {
        let ber = [0x30, 0x80, 0x02, 0x01, 0x01];
        assert!(convert(&ber, 0).is_err());
    }

    #[test]
    fn indefinite_primitive_is_rejected() {
        let ber = [0x02, 0x80, 0x01, 0x00, 0x00];
        assert!(convert(&ber, 0).is_err());
    }
}
