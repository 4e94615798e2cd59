//! `Name`: `SEQUENCE OF SET OF
//! AttributeTypeAndValue`. The attribute value's tag is a CHOICE over
//! `{PrintableString, UTF8String, IA5String, T61String,
//! UniversalString, BMPString}`; unknown attribute types are skipped on
//! the typed side but their raw OID is kept so the printable form can
//! still show something.

use tasn1::oid::{CertNameId, OidKind};
use tasn1::prelude::*;

use crate::error::{PkixError, PkixErrorKind};

fn wrap(source: tasn1::error::DecodeError) -> PkixError {
    PkixError::new(PkixErrorKind::Name { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

/// One `(type, value)` pair of an RDN. `tag` is kept so a decoded name
/// re-encodes with the same string type it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub oid: Vec<u8>,
    pub known: Option<CertNameId>,
    pub tag: Tag,
    pub value: Vec<u8>,
}

impl AttributeTypeAndValue {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) =
            tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (oid, value_part) =
            tasn1::primitives::oid::decode(content, offset, OidKind::Ignore).map_err(wrap)?;
        let (tag, value, value_rest) = decode_directory_string(value_part, offset)?;
        tasn1::primitives::sequence::assert_exhausted(value_rest, offset).map_err(wrap)?;
        let known = CertNameId::from_oid_bytes(&oid.bytes);
        Ok((Self { oid: oid.bytes, known, tag, value }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        tasn1::primitives::oid::encode(&self.oid, &mut content);
        tasn1::primitives::write_header(self.tag, false, self.value.len(), &mut content);
        content.extend_from_slice(&self.value);
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

fn directory_string_tag_allowed(tag: Tag) -> bool {
    tag.class == Class::Universal
        && matches!(tag.value, 12 | 19 | 20 | 22 | 28 | 30) // UTF8/Printable/T61/IA5/Universal/BMP
}

fn decode_directory_string(
    input: &[u8],
    offset: usize,
) -> Result<(Tag, Vec<u8>, &[u8]), PkixError> {
    let (id, _) = Identifier::read(input).ok_or(wrap(tasn1::error::DecodeError::new(
        tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
    )))?;
    if !directory_string_tag_allowed(id.tag) || id.constructed {
        return Err(wrap(parse_error("unsupported directory string tag")));
    }
    let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false).map_err(wrap)?;
    Ok((id.tag, content.to_vec(), rest))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelativeDistinguishedName(pub Vec<AttributeTypeAndValue>);

impl RelativeDistinguishedName {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (mut content, rest) =
            tasn1::primitives::sequence::decode_set(input, offset).map_err(wrap)?;
        let mut attrs = Vec::new();
        while !content.is_empty() {
            let (atv, tail) = AttributeTypeAndValue::decode(content, offset)?;
            attrs.push(atv);
            content = tail;
        }
        Ok((Self(attrs), rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        for atv in &self.0 {
            content.extend_from_slice(&atv.encode());
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SET, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

/// `Name ::= SEQUENCE OF RelativeDistinguishedName`, aka a Distinguished
/// Name in RFC 5280's terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name(pub Vec<RelativeDistinguishedName>);

impl Name {
    pub fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), PkixError> {
        let (content, rest) =
            tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        Ok((Self::decode_content(content, offset)?, rest))
    }

    /// Parses a `Name`'s RDN sequence from already-unwrapped content, for
    /// callers that reached it through an implicitly tagged wrapper
    /// (`GeneralName::directoryName [4]`).
    pub(crate) fn decode_content(mut content: &[u8], offset: usize) -> Result<Self, PkixError> {
        let mut rdns = Vec::new();
        while !content.is_empty() {
            let (rdn, tail) = RelativeDistinguishedName::decode(content, offset)?;
            rdns.push(rdn);
            content = tail;
        }
        Ok(Self(rdns))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        for rdn in &self.0 {
            content.extend_from_slice(&rdn.encode());
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// A length-bounded, ASCII-leaning printable form (`/CN=.../OU=...`),
    /// truncating rather than overflowing. Unknown
    /// attribute types render with their dotted OID instead of a label.
    pub fn to_string(&self, max: usize) -> String {
        let mut out = String::new();
        for rdn in &self.0 {
            for atv in &rdn.0 {
                let label = atv.known.map(short_label).map(str::to_owned).unwrap_or_else(|| {
                    tasn1::primitives::oid::to_dotted_string(&atv.oid)
                });
                let mut piece = String::from("/");
                piece.push_str(&label);
                piece.push('=');
                piece.push_str(&String::from_utf8_lossy(&atv.value));

                if out.len() + piece.len() > max {
                    let remaining = max.saturating_sub(out.len());
                    let cut = floor_char_boundary(&piece, remaining);
                    out.push_str(&piece[..cut]);
                    return out;
                }
                out.push_str(&piece);
            }
        }
        out
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let index = index.min(s.len());
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn short_label(id: CertNameId) -> &'static str {
    match id {
        CertNameId::CommonName => "CN",
        CertNameId::Surname => "SN",
        CertNameId::Country => "C",
        CertNameId::Locality => "L",
        CertNameId::State => "ST",
        CertNameId::Organization => "O",
        CertNameId::OrganizationalUnit => "OU",
        CertNameId::SerialNumber => "serialNumber",
        CertNameId::BusinessCategory => "businessCategory",
        CertNameId::Email => "emailAddress",
        CertNameId::UserId => "UID",
        CertNameId::DomainComponent => "DC",
        CertNameId::JurisdictionCountry => "jurisdictionC",
        CertNameId::JurisdictionState => "jurisdictionST",
        CertNameId::Title => "title",
        CertNameId::GivenName => "GN",
        CertNameId::Initials => "initials",
        CertNameId::DnQualifier => "dnQualifier",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cn(value: &str) -> Name {
        Name(vec![RelativeDistinguishedName(vec![AttributeTypeAndValue {
            oid: CertNameId::CommonName.oid_bytes().to_vec(),
            known: Some(CertNameId::CommonName),
            tag: Tag::UTF8_STRING,
            value: value.as_bytes().to_vec(),
        }])])
    }

    #[test]
    fn single_rdn_round_trips() {
        let name = cn("example.com");
        let der = name.encode();
        let (decoded, rest) = Name::decode(&der, 0).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decoded, name);
    }

    #[test]
    fn printable_form_uses_short_labels() {
        let name = cn("example.com");
        assert_eq!(name.to_string(256), "/CN=example.com");
    }

    #[test]
    fn printable_form_truncates_without_overflow() {
        let name = cn("example.com");
        let truncated = name.to_string(5);
        assert!(truncated.len() <= 5);
        assert_eq!(truncated, "/CN=e");
    }

    #[test]
    fn multi_valued_rdn_round_trips() {
        let mut name = cn("example.com");
        name.0[0].0.push(AttributeTypeAndValue {
            oid: CertNameId::Organization.oid_bytes().to_vec(),
            known: Some(CertNameId::Organization),
            tag: Tag::PRINTABLE_STRING,
            value: b"Example Org".to_vec(),
        });
        let der = name.encode();
        let (decoded, _) = Name::decode(&der, 0).unwrap();
        assert_eq!(decoded, name);
    }
}
