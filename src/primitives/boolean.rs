//! `BOOLEAN`. DER requires the canonical `0xFF`/`0x00`
//! encoding; BER's "any non-zero byte is TRUE" laxity is only tolerated
//! by `ber_to_der`, never by this decoder.

use crate::error::{DecodeError, DecodeErrorKind};

pub fn encode(value: bool, out: &mut Vec<u8>) {
    super::write_header(crate::tag::Tag::BOOLEAN, false, 1, out);
    out.push(if value { 0xFF } else { 0x00 });
}

/// Interprets already-framed BOOLEAN content (the template engine reads
/// the header generically before it knows an item's type).
pub fn decode_content(content: &[u8], offset: usize) -> Result<bool, DecodeError> {
    if content.len() != 1 {
        return Err(DecodeError::new(DecodeErrorKind::Parse {
            offset,
            detail: "BOOLEAN content must be exactly one byte",
        }));
    }
    match content[0] {
        0x00 => Ok(false),
        0xff => Ok(true),
        _ => Err(DecodeError::new(DecodeErrorKind::Parse {
            offset,
            detail: "non-canonical BOOLEAN encoding",
        })),
    }
}

pub fn decode(input: &[u8], offset: usize) -> Result<(bool, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, crate::tag::Tag::BOOLEAN, false)?;
    Ok((decode_content(content, offset)?, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        for value in [true, false] {
            let mut out = Vec::new();
            encode(value, &mut out);
            let (decoded, rest) = decode(&out, 0).unwrap();
            assert_eq!(decoded, value);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn rejects_non_canonical() {
        assert!(decode(&[0x01, 0x01, 0x01], 0).is_err());
    }
}
