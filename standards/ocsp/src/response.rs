//! `OCSPResponse` / `BasicOCSPResponse`.
//!
//! Decode is pure, the same way [`tasn1_pkix::cert::Certificate`] and
//! [`tasn1_pkix::crl::CertificateList`] are: no hashing, no signature
//! confirmation, no wall-clock reads. Matching a single response to a
//! request ([`BasicOcspResponse::find`]), nonce comparison
//! ([`crate::nonce::check`]), and responder authorization
//! ([`tasn1_pkix::verify::ocsp_responder_is_authorized`]) are all
//! separate steps the caller drives explicitly after `decode` succeeds.

use tasn1::prelude::*;
use tasn1_pkix::algorithms::AlgorithmIdentifier;
use tasn1_pkix::name::Name;

use crate::certid::{decode_extensions, encode_extensions, CertId, RawExtension};
use crate::error::{OcspError, OcspErrorKind};

fn wrap(source: tasn1::error::DecodeError) -> OcspError {
    OcspError::new(OcspErrorKind::Response { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

fn wrap_pkix(_err: tasn1_pkix::PkixError) -> OcspError {
    OcspError::new(OcspErrorKind::Response { source: parse_error("embedded PKIX structure invalid") })
}

/// `OCSPResponseStatus ::= ENUMERATED`. Value `4` is reserved and never
/// assigned by RFC 6960; an unrecognised value is structurally
/// malformed rather than a new status this crate silently tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Successful,
    MalformedRequest,
    InternalError,
    TryLater,
    SigRequired,
    Unauthorized,
}

impl ResponseStatus {
    fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => ResponseStatus::Successful,
            1 => ResponseStatus::MalformedRequest,
            2 => ResponseStatus::InternalError,
            3 => ResponseStatus::TryLater,
            5 => ResponseStatus::SigRequired,
            6 => ResponseStatus::Unauthorized,
            _ => return None,
        })
    }

    fn to_u32(self) -> u32 {
        match self {
            ResponseStatus::Successful => 0,
            ResponseStatus::MalformedRequest => 1,
            ResponseStatus::InternalError => 2,
            ResponseStatus::TryLater => 3,
            ResponseStatus::SigRequired => 5,
            ResponseStatus::Unauthorized => 6,
        }
    }

    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (content, rest) = tasn1::primitives::read_tlv(input, offset, Tag::ENUMERATED, false).map_err(wrap)?;
        let v = tasn1::primitives::integer::decode_content_u32(content, offset).map_err(wrap)?;
        let status = Self::from_u32(v).ok_or(wrap(parse_error("unrecognised OCSPResponseStatus value")))?;
        Ok((status, rest))
    }

    fn encode(self, out: &mut Vec<u8>) {
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_u32(self.to_u32(), &mut content);
        tasn1::primitives::write_header(Tag::ENUMERATED, false, content.len(), out);
        out.extend_from_slice(&content);
    }
}

/// `ResponderID ::= CHOICE { byName [1] Name, byKey [2] KeyHash }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderId {
    ByName(Name),
    ByKey(Vec<u8>),
}

impl ResponderId {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (id, _) = Identifier::read(input).ok_or(wrap(tasn1::error::DecodeError::new(
            tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
        )))?;
        if id.tag.class != Class::Context {
            return Err(wrap(parse_error("ResponderID must be [1] byName or [2] byKey")));
        }
        match id.tag.value {
            1 => {
                let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
                let (name, tail) = Name::decode(content, offset).map_err(wrap_pkix)?;
                tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
                Ok((ResponderId::ByName(name), rest))
            }
            2 => {
                let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
                let (hash, tail) = tasn1::primitives::octetstring::decode(content, offset).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
                Ok((ResponderId::ByKey(hash.to_vec()), rest))
            }
            _ => Err(wrap(parse_error("ResponderID must be [1] byName or [2] byKey"))),
        }
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            ResponderId::ByName(name) => {
                let inner = name.encode();
                let mut out = Vec::new();
                tasn1::primitives::write_header(Tag::context(1), true, inner.len(), &mut out);
                out.extend_from_slice(&inner);
                out
            }
            ResponderId::ByKey(hash) => {
                let mut inner = Vec::new();
                tasn1::primitives::octetstring::encode(hash, &mut inner);
                let mut out = Vec::new();
                tasn1::primitives::write_header(Tag::context(2), true, inner.len(), &mut out);
                out.extend_from_slice(&inner);
                out
            }
        }
    }
}

/// `CertStatus ::= CHOICE { good [0] NULL, revoked [1] RevokedInfo,
/// unknown [2] UnknownInfo }`. All three arms are IMPLICIT, so `good`
/// and `unknown` are a primitive zero-length `[n]` rather than a
/// wrapped `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertStatus {
    Good,
    Revoked { revocation_time: DateFields, revocation_reason: Option<u8> },
    Unknown,
}

impl CertStatus {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (id, _) = Identifier::read(input).ok_or(wrap(tasn1::error::DecodeError::new(
            tasn1::error::DecodeErrorKind::Buffer { offset, needed: 1 },
        )))?;
        if id.tag.class != Class::Context {
            return Err(wrap(parse_error("CertStatus must be [0] good, [1] revoked, or [2] unknown")));
        }
        match id.tag.value {
            0 => {
                let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false).map_err(wrap)?;
                if !content.is_empty() {
                    return Err(wrap(parse_error("CertStatus good must be empty")));
                }
                Ok((CertStatus::Good, rest))
            }
            2 => {
                let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, false).map_err(wrap)?;
                if !content.is_empty() {
                    return Err(wrap(parse_error("CertStatus unknown must be empty")));
                }
                Ok((CertStatus::Unknown, rest))
            }
            1 => {
                let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
                let (revocation_time, cur) =
                    tasn1::primitives::time::decode_generalized_time(content, offset).map_err(wrap)?;
                let (revocation_reason, cur) = if let Some((inner_id, _)) = Identifier::read(cur) {
                    if inner_id.tag.class == Class::Context && inner_id.tag.value == 0 && inner_id.constructed {
                        let (reason_content, tail) =
                            tasn1::primitives::read_tlv(cur, offset, inner_id.tag, true).map_err(wrap)?;
                        let (reason, reason_rest) =
                            tasn1::primitives::read_tlv(reason_content, offset, Tag::ENUMERATED, false)
                                .map_err(wrap)?;
                        tasn1::primitives::sequence::assert_exhausted(reason_rest, offset).map_err(wrap)?;
                        let v = tasn1::primitives::integer::decode_content_u32(reason, offset).map_err(wrap)?;
                        (Some(v as u8), tail)
                    } else {
                        (None, cur)
                    }
                } else {
                    (None, cur)
                };
                tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
                Ok((CertStatus::Revoked { revocation_time, revocation_reason }, rest))
            }
            _ => Err(wrap(parse_error("CertStatus must be [0] good, [1] revoked, or [2] unknown"))),
        }
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            CertStatus::Good => {
                let mut out = Vec::new();
                tasn1::primitives::write_header(Tag::context(0), false, 0, &mut out);
                out
            }
            CertStatus::Unknown => {
                let mut out = Vec::new();
                tasn1::primitives::write_header(Tag::context(2), false, 0, &mut out);
                out
            }
            CertStatus::Revoked { revocation_time, revocation_reason } => {
                let mut content = Vec::new();
                tasn1::primitives::time::encode_generalized_time(revocation_time, &mut content);
                if let Some(reason) = revocation_reason {
                    let mut reason_content = Vec::new();
                    tasn1::primitives::integer::encode_u32(*reason as u32, &mut reason_content);
                    let mut reason_bytes = Vec::new();
                    tasn1::primitives::write_header(Tag::ENUMERATED, false, reason_content.len(), &mut reason_bytes);
                    reason_bytes.extend_from_slice(&reason_content);
                    tasn1::primitives::write_header(Tag::context(0), true, reason_bytes.len(), &mut content);
                    content.extend_from_slice(&reason_bytes);
                }
                let mut out = Vec::new();
                tasn1::primitives::write_header(Tag::context(1), true, content.len(), &mut out);
                out.extend_from_slice(&content);
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleResponse {
    pub cert_id: CertId,
    pub cert_status: CertStatus,
    pub this_update: DateFields,
    pub next_update: Option<DateFields>,
    pub single_extensions: Vec<RawExtension>,
}

fn decode_optional_explicit_time(input: &[u8], offset: usize, ctx: u32) -> Result<(Option<DateFields>, &[u8]), OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == ctx && id.constructed {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (t, tail) = tasn1::primitives::time::decode_generalized_time(content, offset).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
            return Ok((Some(t), rest));
        }
    }
    Ok((None, input))
}

fn decode_optional_explicit_extensions_ctx(
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

fn encode_explicit_extensions_ctx(items: &[RawExtension], ctx: u32) -> Vec<u8> {
    let inner = encode_extensions(items);
    let mut out = Vec::new();
    tasn1::primitives::write_header(Tag::context(ctx), true, inner.len(), &mut out);
    out.extend_from_slice(&inner);
    out
}

impl SingleResponse {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (cert_id, cur) = CertId::decode(content, offset)?;
        let (cert_status, cur) = CertStatus::decode(cur, offset)?;
        let (this_update, cur) = tasn1::primitives::time::decode_generalized_time(cur, offset).map_err(wrap)?;
        let (next_update, cur) = decode_optional_explicit_time(cur, offset, 0)?;
        let (single_extensions, cur) = decode_optional_explicit_extensions_ctx(cur, offset, 1)?;
        tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
        Ok((Self { cert_id, cert_status, this_update, next_update, single_extensions }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = self.cert_id.encode();
        content.extend_from_slice(&self.cert_status.encode());
        tasn1::primitives::time::encode_generalized_time(&self.this_update, &mut content);
        if let Some(next_update) = &self.next_update {
            let mut inner = Vec::new();
            tasn1::primitives::time::encode_generalized_time(next_update, &mut inner);
            tasn1::primitives::write_header(Tag::context(0), true, inner.len(), &mut content);
            content.extend_from_slice(&inner);
        }
        if !self.single_extensions.is_empty() {
            content.extend_from_slice(&encode_explicit_extensions_ctx(&self.single_extensions, 1));
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseData {
    pub version: u8,
    pub responder_id: ResponderId,
    pub produced_at: DateFields,
    pub responses: Vec<SingleResponse>,
    pub response_extensions: Vec<RawExtension>,
}

fn decode_version(input: &[u8], offset: usize) -> Result<(u8, &[u8]), OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (version, tail) = tasn1::primitives::integer::decode_u32(content, offset).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(tail, offset).map_err(wrap)?;
            if version != 0 {
                return Err(wrap(parse_error("ResponseData version must be v1 (0)")));
            }
            return Ok((0, rest));
        }
    }
    Ok((0, input))
}

impl ResponseData {
    fn decode(input: &[u8], offset: usize) -> Result<(Self, &[u8]), OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, offset).map_err(wrap)?;
        let (version, cur) = decode_version(content, offset)?;
        let (responder_id, cur) = ResponderId::decode(cur, offset)?;
        let (produced_at, cur) = tasn1::primitives::time::decode_generalized_time(cur, offset).map_err(wrap)?;
        let (mut list_content, cur) = tasn1::primitives::sequence::decode_sequence(cur, offset).map_err(wrap)?;
        let mut responses = Vec::new();
        while !list_content.is_empty() {
            let (single, tail) = SingleResponse::decode(list_content, offset)?;
            responses.push(single);
            list_content = tail;
        }
        if responses.is_empty() {
            return Err(OcspError::new(OcspErrorKind::EmptyResponseList));
        }
        let (response_extensions, cur) = decode_optional_explicit_extensions_ctx(cur, offset, 1)?;
        tasn1::primitives::sequence::assert_exhausted(cur, offset).map_err(wrap)?;
        Ok((Self { version, responder_id, produced_at, responses, response_extensions }, rest))
    }

    fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        if self.version != 0 {
            let mut version_content = Vec::new();
            tasn1::primitives::integer::encode_u32(self.version as u32, &mut version_content);
            tasn1::primitives::write_header(Tag::context(0), true, version_content.len(), &mut content);
            content.extend_from_slice(&version_content);
        }
        content.extend_from_slice(&self.responder_id.encode());
        tasn1::primitives::time::encode_generalized_time(&self.produced_at, &mut content);
        let mut list_content = Vec::new();
        for single in &self.responses {
            list_content.extend_from_slice(&single.encode());
        }
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, list_content.len(), &mut content);
        content.extend_from_slice(&list_content);
        if !self.response_extensions.is_empty() {
            content.extend_from_slice(&encode_explicit_extensions_ctx(&self.response_extensions, 1));
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    pub fn nonce(&self) -> Option<Vec<u8>> {
        crate::nonce::extract(&self.response_extensions)
    }
}

/// `BasicOCSPResponse ::= SEQUENCE { tbsResponseData, signatureAlgorithm,
/// signature BIT STRING, certs [0] EXPLICIT SEQUENCE OF Certificate
/// OPTIONAL }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicOcspResponse {
    pub tbs_response_data: ResponseData,
    pub tbs_raw: Vec<u8>,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
    pub certs: Vec<tasn1_pkix::cert::Certificate>,
}

fn decode_optional_certs(input: &[u8], offset: usize) -> Result<(Vec<tasn1_pkix::cert::Certificate>, &[u8]), OcspError> {
    if let Some((id, _)) = Identifier::read(input) {
        if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
            let (content, rest) = tasn1::primitives::read_tlv(input, offset, id.tag, true).map_err(wrap)?;
            let (mut list_content, list_rest) =
                tasn1::primitives::sequence::decode_sequence(content, offset).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(list_rest, offset).map_err(wrap)?;
            let mut certs = Vec::new();
            while !list_content.is_empty() {
                let start = list_content;
                let (_, after) = tasn1::primitives::sequence::decode_sequence(list_content, offset).map_err(wrap)?;
                let cert_der = &start[..start.len() - after.len()];
                certs.push(tasn1_pkix::cert::Certificate::decode(cert_der).map_err(wrap_pkix)?);
                list_content = after;
            }
            return Ok((certs, rest));
        }
    }
    Ok((Vec::new(), input))
}

impl BasicOcspResponse {
    pub fn decode(input: &[u8]) -> Result<Self, OcspError> {
        let (content, outer_rest) = tasn1::primitives::sequence::decode_sequence(input, 0).map_err(wrap)?;

        let tbs_start = content;
        let (tbs_response_data, after_tbs) = ResponseData::decode(content, 0)?;
        let tbs_raw = tbs_start[..tbs_start.len() - after_tbs.len()].to_vec();

        let (signature_algorithm, cur) = AlgorithmIdentifier::decode(after_tbs, 0).map_err(wrap_pkix)?;
        let (signature, cur) = tasn1::primitives::bitstring::decode(cur, 0).map_err(wrap)?;
        let (certs, cur) = decode_optional_certs(cur, 0)?;
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(outer_rest, 0).map_err(wrap)?;

        Ok(Self { tbs_response_data, tbs_raw, signature_algorithm, signature, certs })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&self.tbs_raw);
        content.extend_from_slice(&self.signature_algorithm.encode());
        tasn1::primitives::bitstring::encode(&self.signature, &mut content);
        if !self.certs.is_empty() {
            let mut list_content = Vec::new();
            for cert in &self.certs {
                list_content.extend_from_slice(&cert.encode());
            }
            let mut list = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, list_content.len(), &mut list);
            list.extend_from_slice(&list_content);
            tasn1::primitives::write_header(Tag::context(0), true, list.len(), &mut content);
            content.extend_from_slice(&list);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// Matches a response's single response to a request's `CertID`
    /// ("the first matches the request's (issuerHash,
    /// issuerKeyHash, serial)").
    pub fn find(&self, cert_id: &CertId) -> Option<&SingleResponse> {
        self.tbs_response_data.responses.iter().find(|s| s.cert_id.matches(cert_id))
    }

    /// The embedded responder certificate this response carries, if
    /// any ( "OCSP response aggregates ... an optional embedded
    /// responder certificate" — `certs` is a `SEQUENCE OF`, but every
    /// responder this crate has seen embeds at most one).
    pub fn responder_certificate(&self) -> Option<&tasn1_pkix::cert::Certificate> {
        self.certs.first()
    }
}

/// `OCSPResponse ::= SEQUENCE { responseStatus, responseBytes [0]
/// EXPLICIT ResponseBytes OPTIONAL }`. Only `id-pkix-ocsp-basic` is a
/// recognised `responseType` ("Response type must be
/// id-pkix-ocsp-basic").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcspResponse {
    pub response_status: ResponseStatus,
    pub basic: Option<BasicOcspResponse>,
}

impl OcspResponse {
    pub fn decode(input: &[u8]) -> Result<Self, OcspError> {
        let (content, rest) = tasn1::primitives::sequence::decode_sequence(input, 0).map_err(wrap)?;
        let (response_status, cur) = ResponseStatus::decode(content, 0)?;

        let (basic, cur) = if let Some((id, _)) = Identifier::read(cur) {
            if id.tag.class == Class::Context && id.tag.value == 0 && id.constructed {
                let (bytes_content, bytes_rest) = tasn1::primitives::read_tlv(cur, 0, id.tag, true).map_err(wrap)?;
                let (inner, after) = tasn1::primitives::sequence::decode_sequence(bytes_content, 0).map_err(wrap)?;
                let (response_type, after) =
                    tasn1::primitives::oid::decode(inner, 0, tasn1::oid::OidKind::OcspType).map_err(wrap)?;
                let (response, after) = tasn1::primitives::octetstring::decode(after, 0).map_err(wrap)?;
                tasn1::primitives::sequence::assert_exhausted(after, 0).map_err(wrap)?;
                if tasn1::oid::OcspType::from_oid_bytes(&response_type.bytes) != Some(tasn1::oid::OcspType::Basic) {
                    return Err(OcspError::new(OcspErrorKind::UnsupportedResponseType));
                }
                (Some(BasicOcspResponse::decode(response)?), bytes_rest)
            } else {
                (None, cur)
            }
        } else {
            (None, cur)
        };
        tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
        tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;

        if response_status == ResponseStatus::Successful && basic.is_none() {
            return Err(OcspError::new(OcspErrorKind::MissingResponseBytes));
        }

        Ok(Self { response_status, basic })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut content = Vec::new();
        self.response_status.encode(&mut content);
        if let Some(basic) = &self.basic {
            let basic_der = basic.encode();
            let mut inner = Vec::new();
            tasn1::primitives::oid::encode(tasn1::oid::OcspType::Basic.oid_bytes(), &mut inner);
            tasn1::primitives::octetstring::encode(&basic_der, &mut inner);
            let mut bytes_seq = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, inner.len(), &mut bytes_seq);
            bytes_seq.extend_from_slice(&inner);
            tasn1::primitives::write_header(Tag::context(0), true, bytes_seq.len(), &mut content);
            content.extend_from_slice(&bytes_seq);
        }
        let mut out = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasn1::oid::SigId;
    use tasn1_pkix::name::{AttributeTypeAndValue, RelativeDistinguishedName};

    fn sample_cert_id() -> CertId {
        CertId {
            hash_algorithm: AlgorithmIdentifier::with_null_params(SigId::Sha1WithRsa),
            issuer_name_hash: vec![0xAA; 20],
            issuer_key_hash: vec![0xBB; 20],
            serial_number: vec![0x01],
        }
    }

    fn date(year: u16, mon: u8, day: u8) -> DateFields {
        DateFields { year, mon, day, hour: 0, min: 0, sec: 0 }
    }

    fn sample_responder_id() -> ResponderId {
        ResponderId::ByKey(vec![0xCC; 20])
    }

    fn sample_single(status: CertStatus) -> SingleResponse {
        SingleResponse {
            cert_id: sample_cert_id(),
            cert_status: status,
            this_update: date(2024, 1, 1),
            next_update: Some(date(2024, 2, 1)),
            single_extensions: Vec::new(),
        }
    }

    fn sample_basic(responses: Vec<SingleResponse>) -> BasicOcspResponse {
        let tbs_response_data = ResponseData {
            version: 0,
            responder_id: sample_responder_id(),
            produced_at: date(2024, 1, 1),
            responses,
            response_extensions: Vec::new(),
        };
        let tbs_raw = tbs_response_data.encode();
        BasicOcspResponse {
            tbs_response_data,
            tbs_raw,
            signature_algorithm: AlgorithmIdentifier::with_null_params(SigId::Sha256WithRsa),
            signature: BitString::exact(vec![0x01, 0x02, 0x03]),
            certs: Vec::new(),
        }
    }

    #[test]
    fn good_status_round_trips() {
        let basic = sample_basic(vec![sample_single(CertStatus::Good)]);
        let der = basic.encode();
        let decoded = BasicOcspResponse::decode(&der).unwrap();
        assert_eq!(decoded, basic);
        assert_eq!(decoded.find(&sample_cert_id()).unwrap().cert_status, CertStatus::Good);
    }

    #[test]
    fn revoked_status_with_reason_round_trips() {
        let status = CertStatus::Revoked { revocation_time: date(2023, 6, 1), revocation_reason: Some(1) };
        let basic = sample_basic(vec![sample_single(status.clone())]);
        let der = basic.encode();
        let decoded = BasicOcspResponse::decode(&der).unwrap();
        assert_eq!(decoded.find(&sample_cert_id()).unwrap().cert_status, status);
    }

    #[test]
    fn empty_response_list_is_rejected() {
        // Hand-construct an empty `responses SEQUENCE OF` directly, since
        // `ResponseData`'s own constructor has no way to express one
        // (`decode` rejects it before `Self` can be built).
        let responder = sample_responder_id().encode();
        let mut content = Vec::new();
        content.extend_from_slice(&responder);
        tasn1::primitives::time::encode_generalized_time(&date(2024, 1, 1), &mut content);
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, 0, &mut content);
        let mut tbs_raw = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut tbs_raw);
        tbs_raw.extend_from_slice(&content);
        assert!(ResponseData::decode(&tbs_raw, 0).is_err());
    }

    #[test]
    fn full_outer_response_round_trips() {
        let basic = sample_basic(vec![sample_single(CertStatus::Good)]);
        let resp = OcspResponse { response_status: ResponseStatus::Successful, basic: Some(basic) };
        let der = resp.encode();
        let decoded = OcspResponse::decode(&der).unwrap();
        assert_eq!(decoded, resp);
    }

    #[test]
    fn non_successful_status_without_response_bytes_round_trips() {
        let resp = OcspResponse { response_status: ResponseStatus::TryLater, basic: None };
        let der = resp.encode();
        let decoded = OcspResponse::decode(&der).unwrap();
        assert_eq!(decoded, resp);
    }

    #[test]
    fn successful_status_requires_response_bytes() {
        let der = {
            let mut content = Vec::new();
            ResponseStatus::Successful.encode(&mut content);
            let mut out = Vec::new();
            tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
            out.extend_from_slice(&content);
            out
        };
        assert!(OcspResponse::decode(&der).is_err());
    }

    #[test]
    fn nonce_found_on_response_data() {
        let tbs = ResponseData {
            version: 0,
            responder_id: sample_responder_id(),
            produced_at: date(2024, 1, 1),
            responses: vec![sample_single(CertStatus::Good)],
            response_extensions: vec![crate::nonce::extension(&[0xDE, 0xAD])],
        };
        let der = tbs.encode();
        let (decoded, _) = ResponseData::decode(&der, 0).unwrap();
        assert_eq!(decoded.nonce(), Some(vec![0xDE, 0xAD]));
    }

    #[test]
    fn responder_id_by_name_round_trips() {
        let name = Name(vec![RelativeDistinguishedName(vec![AttributeTypeAndValue {
            oid: tasn1::oid::CertNameId::CommonName.oid_bytes().to_vec(),
            known: Some(tasn1::oid::CertNameId::CommonName),
            tag: Tag::UTF8_STRING,
            value: b"responder.example".to_vec(),
        }])]);
        let basic = sample_basic(vec![sample_single(CertStatus::Good)]);
        let mut basic = basic;
        basic.tbs_response_data.responder_id = ResponderId::ByName(name.clone());
        basic.tbs_raw = basic.tbs_response_data.encode();
        let der = basic.encode();
        let decoded = BasicOcspResponse::decode(&der).unwrap();
        assert_eq!(decoded.tbs_response_data.responder_id, ResponderId::ByName(name));
    }
}
