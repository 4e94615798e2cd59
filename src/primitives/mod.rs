//! C1 — the primitive codec: tag/length framing plus the universal types
//! used throughout X.509.

pub mod bitstring;
pub mod boolean;
pub mod integer;
pub mod null;
pub mod octetstring;
pub mod oid;
pub mod sequence;
pub mod time;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tag::{Identifier, Tag};

/// Reads one TLV's identifier and length, checking the tag/constructed
/// bit against what the caller expects, and returns the content slice
/// plus what follows it.
///
/// This is the primitive the template engine's decode pass builds on:
/// every schema item bottoms out in one call to this.
pub fn read_tlv<'a>(
    input: &'a [u8],
    offset: usize,
    expected: Tag,
    expected_constructed: bool,
) -> Result<(&'a [u8], &'a [u8]), DecodeError> {
    let (id, rest) = Identifier::read(input).ok_or(DecodeError::new(DecodeErrorKind::Buffer {
        offset,
        needed: 1,
    }))?;
    if id.tag != expected {
        return Err(DecodeError::new(DecodeErrorKind::MismatchedTag {
            expected,
            actual: id.tag,
            offset,
        }));
    }
    if id.constructed != expected_constructed {
        return Err(DecodeError::new(DecodeErrorKind::MismatchedConstructed {
            expected: expected_constructed,
            actual: id.constructed,
        }));
    }
    let header_len = input.len() - rest.len();
    let (len, rest) = crate::length::read_length(rest, offset + header_len)?;
    let crate::length::Length::Definite(len) = len else {
        return Err(DecodeError::new(DecodeErrorKind::Parse {
            offset,
            detail: "indefinite length outside ber_to_der conversion",
        }));
    };
    if rest.len() < len {
        return Err(DecodeError::new(DecodeErrorKind::LengthOverrun {
            offset,
            declared: len,
        }));
    }
    Ok((&rest[..len], &rest[len..]))
}

/// Writes a definite-length header (identifier octet(s) + length) for a
/// value of `content_len` bytes.
pub fn write_header(tag: Tag, constructed: bool, content_len: usize, out: &mut Vec<u8>) {
    Identifier {
        tag,
        constructed,
    }
    .write(out);
    crate::length::write_length(content_len, out);
}

/// Size in bytes of the header `write_header` would produce.
pub fn header_size(tag: Tag, content_len: usize) -> usize {
    tag.byte_len() + crate::length::length_size(content_len)
}
