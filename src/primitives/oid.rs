//! `OBJECT IDENTIFIER`. Structural decode plus the numeric
//! byte-sum identity used by the C3 registry.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::oid::OidKind;
use crate::tag::Tag;

/// The content bytes of a decoded OID plus its byte-sum identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oid {
    pub bytes: Vec<u8>,
    pub sum: u32,
}

/// Verifies each subidentifier's continuation bit is well-formed (no
/// subidentifier ends with a leading `0x80` padding byte) and that the
/// content is non-empty, per X.690
fn validate_structure(content: &[u8], offset: usize) -> Result<(), DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::ObjectId));
    }
    let mut i = 0;
    while i < content.len() {
        if content[i] == 0x80 {
            return Err(DecodeError::new(DecodeErrorKind::Parse {
                offset,
                detail: "OID subidentifier has a non-minimal leading byte",
            }));
        }
        let start = i;
        while content[i] & 0x80 != 0 {
            i += 1;
            if i >= content.len() {
                return Err(DecodeError::new(DecodeErrorKind::ObjectId));
            }
        }
        i += 1;
        debug_assert!(i > start);
    }
    Ok(())
}

/// Interprets already-framed OID content, and if `expected_kind` is not
/// `Ignore`, verifies the bytes are a registered member of that kind.
pub fn decode_content(content: &[u8], offset: usize, expected_kind: OidKind) -> Result<Oid, DecodeError> {
    validate_structure(content, offset)?;
    let sum = crate::oid::byte_sum(content);
    crate::oid::lookup(expected_kind, sum, content)?;
    Ok(Oid {
        bytes: content.to_vec(),
        sum,
    })
}

/// Decodes an OID, and if `expected_kind` is not `Ignore`, verifies the
/// bytes are a registered member of that kind.
pub fn decode(
    input: &[u8],
    offset: usize,
    expected_kind: OidKind,
) -> Result<(Oid, &[u8]), DecodeError> {
    let (content, rest) = super::read_tlv(input, offset, Tag::OBJECT_IDENTIFIER, false)?;
    Ok((decode_content(content, offset, expected_kind)?, rest))
}

/// Encodes an OID from its already-canonical content bytes (as returned
/// by the registry for a given `(kind, id)`).
pub fn encode(content: &[u8], out: &mut Vec<u8>) {
    super::write_header(Tag::OBJECT_IDENTIFIER, false, content.len(), out);
    out.extend_from_slice(content);
}

/// Parses the conventional dotted-decimal string form into subidentifier
/// values, for the human-readable policy-OID helper ( "Optional
/// helpers").
pub fn to_dotted_string(content: &[u8]) -> String {
    let mut arcs = Vec::new();
    let mut value: u64 = 0;
    for &b in content {
        value = (value << 7) | (b & 0x7f) as u64;
        if b & 0x80 == 0 {
            arcs.push(value);
            value = 0;
        }
    }
    let mut out = String::new();
    if let Some(&first) = arcs.first() {
        let (root, second) = if first < 40 {
            (0, first)
        } else if first < 80 {
            (1, first - 40)
        } else {
            (2, first - 80)
        };
        out.push_str(&root.to_string());
        out.push('.');
        out.push_str(&second.to_string());
        for arc in &arcs[1..] {
            out.push('.');
            out.push_str(&arc.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_empty_content() {
        assert!(decode(&[0x06, 0x00], 0, OidKind::Ignore).is_err());
    }

    #[test]
    fn dotted_string_sha1() {
        // 1.3.14.3.2.26
        let bytes = [0x2B, 0x0E, 0x03, 0x02, 0x1A];
        assert_eq!(to_dotted_string(&bytes), "1.3.14.3.2.26");
    }

    #[test]
    fn decode_with_ignore_accepts_unknown() {
        let mut encoded = Vec::new();
        encode(&[0x01, 0x02, 0x03], &mut encoded);
        assert!(decode(&encoded, 0, OidKind::Ignore).is_ok());
    }
}
