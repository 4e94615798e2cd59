//! `OCSPRequest`.
//!
//! ```text
//! OCSPRequest     ::= SEQUENCE { tbsRequest TBSRequest, optionalSignature [0] EXPLICIT Signature OPTIONAL }
//! TBSRequest      ::= SEQUENCE { version [0] EXPLICIT Version DEFAULT v1,
//!                                requestorName [1] EXPLICIT GeneralName OPTIONAL,
//!                                requestList SEQUENCE OF Request,
//!                                requestExtensions [2] EXPLICIT Extensions OPTIONAL }
//! Request         ::= SEQUENCE { reqCert CertID, singleRequestExtensions [0] EXPLICIT Extensions OPTIONAL }
//! ```
//!
//! `requestorName` and `optionalSignature` see little real use (a
//! request-signing responder is not something this library's callers
//! build); `requestorName` is skipped over rather than rejected so a
//! request that happens to carry one still decodes, and
//! `optionalSignature` is kept only as its raw DER.

use tasn1::prelude::*;

use crate::certid::{decode_extensions, encode_extensions, CertId, RawExtension};
use crate::error::{OcspError, OcspErrorKind};

fn wrap(source: tasn1::error::DecodeError) -> OcspError {
    OcspError::new(OcspErrorKind::Request { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub cert_id: CertId,
    pub single_request_extensions: Vec<RawExtension>,
}

impl Request {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (cert_id, cur) = CertId::decode(content, offset)?;
        let (single_request_extensions, cur) = decode_optional_explicit_extensions(cur, offset, 0)?;
        tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
        Ok((Self { cert_id, single_request_extensions }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = self.cert_id.encode();
        if !self.single_request_extensions.is_empty() {
            content.extend_from_slice(&encode_optional_explicit_extensions(&self.single_request_extensions, 0));
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

fn decode_optional_explicit_extensions(
    input: &[u8],
    offset: usize,
    ctx: u32,
) -> Result<(Vec<RawExtension>, &[u8]), OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == ctx && id.constructed {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let extensions = decode_extensions(content, offset)?;
            return Ok((extensions, rest));
        }
    }
    Ok((Vec::new(), input))
}

fn encode_optional_explicit_extensions(items: &[RawExtension], ctx: u32) -> Vec<u8> {
    let inner = encode_extensions(items);
    let mut out = Vec::new();
    tasn1::primitives::write_header(Tag::context(ctx), true, inner.len(), &mut out);
    out.extend_from_slice(&inner);
    out
}

fn decode_version(input: &[u8], offset: usize) -> Result<(u8, &[u8]), OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (version, tail) = tasn1::primitives::integer::decode_u32(content, offset).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
            if version != 0 {
                return Err(wrap(parse_error("OCSP request version must be v1 (0)")));
            }
            return Ok((0, rest));
        }
    }
    Ok((0, input))
}

/// `requestorName [1] EXPLICIT GeneralName OPTIONAL` — present on some
/// deployments' requests but never produced or inspected by this
/// crate's callers; skipped over structurally rather than decoded.
fn skip_optional_requestor_name(input: &[u8], offset: usize) -> Result<&[u8], OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 1 {
            let (_, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, id.constructed).map_err(wrap)?;
            return Ok(rest);
        }
    }
    Ok(input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsRequest {
    pub version: u8,
    pub request_list: Vec<Request>,
    pub request_extensions: Vec<RawExtension>,
}

impl TbsRequest {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (version, cur) = decode_version(content, offset)?;
        let cur = skip_optional_requestor_name(cur, offset)?;
        let (mut list_content, cur) = tasn1::primitives::sequence::decode_sequence(cur, offset).map_err(wrap)?;
        let mut request_list = Vec::new();
        while !list_content.is_empty() {
            let (req, tail) = Request::decode(list_content, offset)?;
            request_list.push(req);
            list_content = tail;
        }
        let (request_extensions, cur) = decode_optional_explicit_extensions(cur, offset, 2)?;
        tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
        Ok((Self { version, request_list, request_extensions }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        if self.version != 0 {
            let mut version_content = Vec::new();
            tasn1::primitives::integer::encode_u32(self.version as u32, &mut version_content);
            tasn1::primitives::write_header(Tag::context(0), true, version_content.len(), &mut content);
            content.extend_from_slice(&version_content);
        }
        let mut list_content = Vec::new();
        for req in &self.request_list {
            list_content.extend_from_slice(&req.encode());
        }
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, list_content.len(), &mut content);
        content.extend_from_slice(&list_content);
        if !self.request_extensions.is_empty() {
            content.extend_from_slice(&encode_optional_explicit_extensions(&self.request_extensions, 2));
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// The nonce carried in `requestExtensions`, if any: the optional
    /// nonce extension carries an OCTET STRING whose body is itself an
    /// OCTET STRING of random bytes.
    pub fn nonce(&self) -> Option<Vec<u8>> {
        crate::nonce::extract(&self.request_extensions)
    }
}

/// `OCSPRequest ::= SEQUENCE { tbsRequest, optionalSignature [0]
/// EXPLICIT Signature OPTIONAL }`. No caller of this crate signs
/// requests, so `optionalSignature` is kept only as raw bytes rather
/// than decoded into `AlgorithmIdentifier`/`BitString`/`certs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcspRequest {
    pub tbs: TbsRequest,
    pub optional_signature: Option<Vec<u8>>,
}

impl OcspRequest {
    pub fn decode(input: &[u8]) -> Result<Self, OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, 0).map_err(wrap)?;
        let (tbs, cur) = TbsRequest::decode(content, 0)?;
        let optional_signature = if let Some((id, _)) = Identifier::read(cur) {
            if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
                let (sig_content, tail) = tasn1::primitives::read_tlv(cur, 0, id.tag, true).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(tail, 0).map_err(wrap)?;
                Some(sig_content.to_vec())
            } else {
                None
            }
        } else {
            None
        };
        tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
        Ok(Self { tbs, optional_signature })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = self.tbs.encode();
        if let Some(sig) = &self.optional_signature {
            tasn1::primitives::write_header(Tag::context(0), true, sig.len(), &mut content);
            content.extend_from_slice(sig);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// Builds a single-request OCSP request with an optional nonce.
    pub fn single(cert_id: CertId, nonce: Option<&[u8]>) -> Self {
        let request_extensions = match nonce {
            Some(n) => vec![crate::nonce::extension(n)],
            None => Vec::new(),
        };
        Self {
            tbs: TbsRequest {
                version: 0,
                request_list: vec![Request { cert_id, single_request_extensions: Vec::new() }],
                request_extensions,
            },
            optional_signature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasn1_pkix::algorithms::AlgorithmIdentifier;
    use tasn1::oid::SigId;

    fn sample_cert_id() -> CertId {
        CertId {
            hash_algorithm: AlgorithmIdentifier::with_null_params(SigId::Sha1WithRsa),
            issuer_name_hash: vec![0xAA; 20],
            issuer_key_hash: vec![0xBB; 20],
            serial_number: vec![0x01],
        }
    }

    #[test]
    fn request_without_nonce_round_trips() {
        let req = OcspRequest::single(sample_cert_id(), None);
        let der = req.encode();
        let decoded = OcspRequest::decode(&der).unwrap();
        assert_eq!(decoded, req);
        assert!(decoded.tbs.nonce().is_none());
    }

    #[test]
    fn request_with_nonce_round_trips() {
        let nonce = vec![0xC0; 16];
        let req = OcspRequest::single(sample_cert_id(), Some(&nonce));
        let der = req.encode();
        let decoded = OcspRequest::decode(&der).unwrap();
        assert_eq!(decoded.tbs.nonce(), Some(nonce));
    }

    #[test]
    fn single_request_has_one_entry() {
        let req = OcspRequest::single(sample_cert_id(), None);
        assert_eq!(req.tbs.request_list.len(), 1);
        assert!(req.tbs.request_list[0].cert_id.matches(&sample_cert_id()));
    }
}
