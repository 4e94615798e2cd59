//! `NULL`: always exactly `05 00`.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::Tag;

pub fn decode(input: &[u8], offset: usize) -> Result<((), &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::NULL, false)?;
    if !content.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::Expect0 { offset }));
    }
    Ok(((), rest))
}

pub fn encode(out: &mut Vec<u8>) {
    super::write_header(Tag::NULL, false, 0, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut out = Vec::new();
        encode(&mut out);
        assert_eq!(out, vec![0x05, 0x00]);
        let (_, rest) = decode(&out, 0).unwrap();
        assert!(rest.is_empty());
    }

    #[test]
    fn rejects_nonzero_length() {
        assert!(decode(&[0x05, 0x01, 0x00], 0).is_err());
    }
}
