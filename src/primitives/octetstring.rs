//! `OCTET STRING`: header plus raw, uninterpreted bytes.

use crate::error::DecodeError;
use crate::tag::Tag;

pub fn decode(input: &[u8], offset: usize) -> Result<(&[u8], &[u8]), DecodeError> {
    super::read_tlv(input, offset, Tag::OCTET_STRING, false)
}

pub fn encode(value: &[u8], out: &mut Vec<u8>) {
    super::write_header(Tag::OCTET_STRING, false, value.len(), out);
    out.extend_from_slice(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut out = Vec::new();
        encode(b"hello", &mut out);
        let (content, rest) = decode(&out, 0).unwrap();
        assert_eq!(content, b"hello");
        assert!(rest.is_empty());
    }
}
