//! `INTEGER`. Implements the data model: the
//! content is never empty; a leading `0x00` is only legal when the
//! following byte has its high bit set (it was a required sign pad), and
//! a leading byte with the high bit set is only legal when the caller
//! asked for a signed-or-positive reading.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::mpint::Mpi;
use crate::tag::Tag;

/// Strips a required leading zero and validates the encoding rule, returning
/// the minimal content a positive value would need.
pub(crate) fn validate_and_strip<'a>(content: &'a [u8], offset: usize) -> Result<&'a [u8], DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::Parse {
            offset,
            detail: "INTEGER content must not be empty",
        }));
    }
    if content[0] == 0x00 {
        if content.len() == 1 {
            return Ok(content);
        }
        if content[1] & 0x80 == 0 {
            return Err(DecodeError::new(DecodeErrorKind::Parse {
                offset,
                detail: "leading zero not required (value < 0x80)",
            }));
        }
    }
    Ok(content)
}

/// Interprets already-framed INTEGER content as a signed `Mpi` (the
/// template engine reads the header generically before it knows an
/// item's declared payload shape).
pub fn decode_content_signed(content: &[u8], offset: usize) -> Result<Mpi, DecodeError> {
    let content = validate_and_strip(content, offset)?;
    Mpi::from_signed_be_bytes(content)
}

/// Interprets already-framed INTEGER content as a non-negative `Mpi`.
pub fn decode_content_unsigned(content: &[u8], offset: usize) -> Result<Mpi, DecodeError> {
    let content = validate_and_strip(content, offset)?;
    let body = if content[0] == 0x00 && content.len() > 1 {
        &content[1..]
    } else {
        content
    };
    if body[0] & 0x80 != 0 {
        return Err(DecodeError::new(DecodeErrorKind::NegativeInteger));
    }
    Ok(Mpi::from_unsigned_be_bytes(body))
}

/// Interprets already-framed INTEGER content as a fixed-width unsigned
/// value, failing if it overflows 32 bits.
pub fn decode_content_u32(content: &[u8], offset: usize) -> Result<u32, DecodeError> {
    let content = validate_and_strip(content, offset)?;
    let body = if content[0] == 0x00 && content.len() > 1 {
        &content[1..]
    } else {
        content
    };
    if body[0] & 0x80 != 0 {
        return Err(DecodeError::new(DecodeErrorKind::NegativeInteger));
    }
    if body.len() > 4 {
        return Err(DecodeError::new(DecodeErrorKind::Parse {
            offset,
            detail: "INTEGER does not fit in 32 bits",
        }));
    }
    let mut value: u32 = 0;
    for &b in body {
        value = (value << 8) | b as u32;
    }
    Ok(value)
}

/// Interprets already-framed INTEGER content as at most 7 bits of
/// magnitude (used by BasicConstraints `pathLen`).
pub fn decode_content_u7(content: &[u8], offset: usize) -> Result<u8, DecodeError> {
    let value = decode_content_u32(content, offset)?;
    if value > 0x7f {
        return Err(DecodeError::new(DecodeErrorKind::Parse {
            offset,
            detail: "INTEGER does not fit in 7 bits",
        }));
    }
    Ok(value as u8)
}

/// Decodes an INTEGER as an `Mpi`, preserving sign (the "signed MP-int"
/// reading of).
pub fn decode_signed(input: &[u8], offset: usize) -> Result<(Mpi, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::INTEGER, false)?;
    Ok((decode_content_signed(content, offset)?, rest))
}

/// Decodes an INTEGER that must be non-negative (serial numbers, RSA
/// moduli, ...). Fails `NegativeInteger` if the top bit is set without a
/// required sign pad stripped first.
pub fn decode_unsigned(input: &[u8], offset: usize) -> Result<(Mpi, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::INTEGER, false)?;
    Ok((decode_content_unsigned(content, offset)?, rest))
}

/// Decodes a small non-negative INTEGER into a fixed-width unsigned
/// value (the "7-bit unsigned" and "fixed-width unsigned" readings of
///), failing if the value overflows `W` bytes.
pub fn decode_u32(input: &[u8], offset: usize) -> Result<(u32, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::INTEGER, false)?;
    Ok((decode_content_u32(content, offset)?, rest))
}

/// Decodes an INTEGER expected to hold at most 7 bits of magnitude (used
/// by BasicConstraints `pathLen`, a single content byte `< 0x80`).
pub fn decode_u7(input: &[u8], offset: usize) -> Result<(u8, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::INTEGER, false)?;
    Ok((decode_content_u7(content, offset)?, rest))
}

fn write_content(body: &[u8], needs_pad: bool, out: &mut Vec<u8>) {
    let content_len = body.len() + usize::from(needs_pad);
    super::write_header(Tag::INTEGER, false, content_len, out);
    if needs_pad {
        out.push(0x00);
    }
    out.extend_from_slice(body);
}

/// Encodes a non-negative `Mpi`, inserting the sign-pad byte if the top
/// bit of the magnitude is set. The
/// canonical encoding of zero is `02 01 00` (testable property, boundary
/// behaviours).
pub fn encode_unsigned(value: &Mpi, out: &mut Vec<u8>) {
    let body = value.to_unsigned_be_bytes();
    if body.is_empty() {
        write_content(&[0x00], false, out);
        return;
    }
    write_content(&body, value.needs_sign_pad(), out);
}

/// Encodes a signed `Mpi` in minimal two's-complement form.
pub fn encode_signed(value: &Mpi, out: &mut Vec<u8>) {
    let body = value.to_signed_be_bytes();
    if body.is_empty() {
        write_content(&[0x00], false, out);
    } else {
        write_content(&body, false, out);
    }
}

pub fn encode_u32(value: u32, out: &mut Vec<u8>) {
    if value == 0 {
        write_content(&[0x00], false, out);
        return;
    }
    let bytes = value.to_be_bytes();
    let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap();
    let body = &bytes[first_nonzero..];
    write_content(body, body[0] & 0x80 != 0, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        let mut out = Vec::new();
        encode_u32(0, &mut out);
        assert_eq!(out, vec![0x02, 0x01, 0x00]);
        let (value, rest) = decode_u32(&out, 0).unwrap();
        assert_eq!(value, 0);
        assert!(rest.is_empty());
    }

    #[test]
    fn leading_zero_rule_rejects_unneeded_pad() {
        // 02 02 00 05 -- zero not required, 0x05 < 0x80.
        assert!(decode_u32(&[0x02, 0x02, 0x00, 0x05], 0).is_err());
    }

    #[test]
    fn leading_zero_rule_accepts_needed_pad() {
        let (value, _) = decode_u32(&[0x02, 0x02, 0x00, 0x85], 0).unwrap();
        assert_eq!(value, 0x85);
    }

    #[test]
    fn unsigned_read_of_negative_fails() {
        assert!(decode_u32(&[0x02, 0x01, 0x85], 0).is_err());
    }

    #[test]
    fn signed_roundtrip_negative() {
        let (mpi, _) = decode_signed(&[0x02, 0x01, 0xFF], 0).unwrap();
        assert!(mpi.is_negative());
        assert_eq!(mpi.as_bigint(), &num_bigint::BigInt::from(-1));
    }
}
