//! `BIT STRING`. Invariant 4: the unused-bits count is
//! `0..=7`, and any bits it masks off in the final content octet must be
//! zero.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::Tag;
use bitvec::prelude::*;

/// A decoded or about-to-be-encoded BIT STRING: the raw value bytes plus
/// how many trailing bits of the last byte are unused padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    pub bytes: Vec<u8>,
    pub unused: u8,
}

impl BitString {
    pub fn new(bytes: Vec<u8>, unused: u8) -> Self {
        Self { bytes, unused }
    }

    /// A BIT STRING with no unused bits, the common case for X9.62
    /// public-key encodings and signature values.
    pub fn exact(bytes: Vec<u8>) -> Self {
        Self { bytes, unused: 0 }
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        let bits = self.bytes.view_bits::<Msb0>();
        let len = bits.len() - self.unused as usize;
        &bits[..len]
    }
}

/// Interprets already-framed BIT STRING content (the template engine
/// reads the header generically before it knows an item's type).
pub fn decode_content(content: &[u8]) -> Result<BitString, DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::BitString {
            detail: "content must hold at least the unused-bits byte",
        }));
    }
    let unused = content[0];
    if unused > 7 {
        return Err(DecodeError::new(DecodeErrorKind::BitString {
            detail: "unused-bits byte out of range 0..=7",
        }));
    }
    let value = &content[1..];
    if unused > 0 {
        let last = *value.last().ok_or(DecodeError::new(DecodeErrorKind::BitString {
            detail: "non-zero unused-bits count with empty value",
        }))?;
        let mask = (1u8 << unused) - 1;
        if last & mask != 0 {
            return Err(DecodeError::new(DecodeErrorKind::BitString {
                detail: "padding bits masked by unused-bits count are not zero",
            }));
        }
    }
    Ok(BitString::new(value.to_vec(), unused))
}

pub fn decode(input: &[u8], offset: usize) -> Result<(BitString, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::BIT_STRING, false)?;
    Ok((decode_content(content)?, rest))
}

pub fn encode(value: &BitString, out: &mut Vec<u8>) {
    super::write_header(Tag::BIT_STRING, false, value.bytes.len() + 1, out);
    out.push(value.unused);
    out.extend_from_slice(&value.bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unused_out_of_range() {
        assert!(decode(&[0x03, 0x02, 0x08, 0x00], 0).is_err());
    }

    #[test]
    fn accepts_zeroed_padding() {
        let (bits, _) = decode(&[0x03, 0x02, 0x03, 0xF8], 0).unwrap();
        assert_eq!(bits.unused, 3);
        assert_eq!(bits.bytes, vec![0xF8]);
    }

    #[test]
    fn rejects_nonzero_padding() {
        assert!(decode(&[0x03, 0x02, 0x03, 0xFF], 0).is_err());
    }

    #[test]
    fn roundtrip_preserves_unused() {
        let value = BitString::new(vec![0xF8], 3);
        let mut out = Vec::new();
        encode(&value, &mut out);
        let (decoded, _) = decode(&out, 0).unwrap();
        assert_eq!(decoded, value);
    }
}
