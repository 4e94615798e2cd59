//! `SEQUENCE` / `SET` headers: tag `0x30`/`0x31`,
//! always `CONSTRUCTED`.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::Tag;

/// Reads a SEQUENCE header and returns its content slice plus what
/// follows. In `strict` mode the caller is expected to consume every
/// byte of the returned content (checked by the template engine's
/// `complete` flag, not here).
pub fn decode_sequence(input: &[u8], offset: usize) -> Result<(&[u8], &[u8]), DecodeError> {
    super::read_tlv(input, offset, Tag::SEQUENCE, true)
}

pub fn decode_set(input: &[u8], offset: usize) -> Result<(&[u8], &[u8]), DecodeError> {
    super::read_tlv(input, offset, Tag::SET, true)
}

pub fn encode_header(tag: Tag, content_len: usize, out: &mut Vec<u8>) {
    super::write_header(tag, true, content_len, out);
}

/// Checked variant used when `strict` length mode requires the content
/// to exactly fill the declared length ( "optional strict-length
/// mode").
pub fn assert_exhausted(remaining: &[u8], offset: usize) -> Result<(), DecodeError> {
    if !remaining.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::TrailingData {
            extra: remaining.len(),
        }));
    }
    let _ = offset;
    Ok(())
}
