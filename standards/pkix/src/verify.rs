//! Chain and signature verification.
//!
//! Every schema in [`crate::cert`] and [`crate::crl`] decodes purely:
//! no hashing, no wall-clock reads, no collaborator calls. This module
//! is where those collaborators ([`Digest`], [`SignaturePrimitive`],
//! [`SignerStore`]) actually get invoked, and where the policy
//! decisions (path length, name constraints, validity dates, critical
//! extensions, CRL key usage, OCSP responder identity) live.

use core::task::Poll;

use chrono::{DateTime, Duration, Utc};
use tasn1::mpint::Mpi;
use tasn1::oid::{CurveId, ExtKeyUseId, HashId, KeyId, OidKind, SigId};
use tasn1::prelude::*;

use crate::cert::{Certificate, CertTime, SubjectPublicKeyInfo, Validity};
use crate::error::{PkixError, PkixErrorKind};
use crate::extensions::{BasicConstraints, ExtendedKeyUsage, GeneralName, KeyUsage, NameConstraints};

fn wrap(source: tasn1::error::DecodeError) -> PkixError {
    PkixError::new(PkixErrorKind::Cert { source })
}

fn parse_error(detail: &'static str) -> tasn1::error::DecodeError {
    tasn1::error::DecodeError::new(tasn1::error::DecodeErrorKind::Parse { offset: 0, detail })
}

/// Which walk this verification is part of. OCSP gets an extra issuer
/// fallback (subject-name + public-key equality) that certificate and
/// CRL chain-building never use .
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    Standard,
    Ocsp,
    NoVerify,
}

// --- KEY phase: SubjectPublicKeyInfo -> VerifyKey -------------------

/// Interprets a `SubjectPublicKeyInfo` into the collaborator's typed
/// [`VerifyKey`] ( phase KEY, "parse pubKey into a typed key
/// object"). Curve parameters are restricted to the named curves C3
/// registers; `ECParameters::Specified` custom curves are not a
/// verifiable key here.
pub fn verify_key_from_spki(spki: &SubjectPublicKeyInfo) -> Result<VerifyKey, PkixError> {
    let key_id = KeyId::from_oid_bytes(&spki.algorithm.algorithm).ok_or(PkixError::new(PkixErrorKind::AlgoId))?;
    match key_id {
        KeyId::Rsa => {
            if spki.public_key.unused != 0 {
                return Err(wrap(parse_error("RSA subjectPublicKey BIT STRING must have no unused bits")));
            }
            let (content, rest) =
                tasn1::primitives::sequence::decode_sequence(&spki.public_key.bytes, 0).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
            let (modulus, cur) = tasn1::primitives::integer::decode_unsigned(content, 0).map_err(wrap)?;
            let (exponent, cur) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
            Ok(VerifyKey::Rsa {
                modulus: modulus.to_unsigned_be_bytes(),
                exponent: exponent.to_unsigned_be_bytes(),
            })
        }
        KeyId::Dsa => {
            let params = spki.algorithm.parameters.as_deref().ok_or(PkixError::new(PkixErrorKind::AlgoId))?;
            let (content, rest) = tasn1::primitives::sequence::decode_sequence(params, 0).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
            let (p, cur) = tasn1::primitives::integer::decode_unsigned(content, 0).map_err(wrap)?;
            let (q, cur) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
            let (g, cur) = tasn1::primitives::integer::decode_unsigned(cur, 0).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(cur, 0).map_err(wrap)?;
            if spki.public_key.unused != 0 {
                return Err(wrap(parse_error("DSA subjectPublicKey BIT STRING must have no unused bits")));
            }
            let (y, rest) = tasn1::primitives::integer::decode_unsigned(&spki.public_key.bytes, 0).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
            Ok(VerifyKey::Dsa {
                p: p.to_unsigned_be_bytes(),
                q: q.to_unsigned_be_bytes(),
                g: g.to_unsigned_be_bytes(),
                y: y.to_unsigned_be_bytes(),
            })
        }
        KeyId::Ecdsa => {
            let params = spki.algorithm.parameters.as_deref().ok_or(PkixError::new(PkixErrorKind::AlgoId))?;
            let (oid, rest) = tasn1::primitives::oid::decode(params, 0, OidKind::CurveType).map_err(wrap)?;
            tasn1::primitives::sequence::assert_exhausted(rest, 0).map_err(wrap)?;
            let curve = CurveId::from_oid_bytes(&oid.bytes).ok_or(PkixError::new(PkixErrorKind::AlgoId))?;
            if spki.public_key.unused != 0 {
                return Err(wrap(parse_error("EC subjectPublicKey BIT STRING must have no unused bits")));
            }
            Ok(VerifyKey::Ec { curve, point: spki.public_key.bytes.clone() })
        }
        KeyId::Ed25519 => Ok(VerifyKey::Ed25519 { public: spki.public_key.bytes.clone() }),
        KeyId::Ed448 => Ok(VerifyKey::Ed448 { public: spki.public_key.bytes.clone() }),
        KeyId::Dh | KeyId::X25519 | KeyId::X448 => Err(PkixError::new(PkixErrorKind::AlgoId)),
    }
}

// --- DO phase helpers: PKCS #1 v1.5 DigestInfo, DSA/ECDSA normalization --

/// `DigestInfo ::= SEQUENCE { digestAlgorithm AlgorithmIdentifier,
/// digest OCTET STRING }`, the value an RSA signature's recovered block
/// is compared against ( phase DO).
fn digest_info(hash: HashId, digest: &[u8]) -> Vec<u8> {
    let mut alg_content = Vec::new();
    tasn1::primitives::oid::encode(hash.oid_bytes(), &mut alg_content);
    tasn1::primitives::null::encode(&mut alg_content);
    let mut alg = Vec::new();
    tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, alg_content.len(), &mut alg);
    alg.extend_from_slice(&alg_content);

    let mut content = Vec::new();
    content.extend_from_slice(&alg);
    tasn1::primitives::octetstring::encode(digest, &mut content);

    let mut out = Vec::new();
    tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
    out.extend_from_slice(&content);
    out
}

/// Strips a PKCS #1 v1.5 `00 01 FF..FF 00` padding block, returning the `DigestInfo` DER that
/// followed it.
fn strip_pkcs1v15_padding(block: &[u8]) -> Option<&[u8]> {
    if block.len() < 11 || block[0] != 0x00 || block[1] != 0x01 {
        return None;
    }
    let mut i = 2;
    while i < block.len() && block[i] == 0xFF {
        i += 1;
    }
    if i - 2 < 8 || i >= block.len() || block[i] != 0x00 {
        return None;
    }
    Some(&block[i + 1..])
}

/// `true` if `sig` already parses as `SEQUENCE { INTEGER, INTEGER }`
/// with nothing left over.
fn is_der_two_integer_sequence(sig: &[u8]) -> bool {
    let Ok((content, rest)) = tasn1::primitives::sequence::decode_sequence(sig, 0) else {
        return false;
    };
    if !rest.is_empty() {
        return false;
    }
    let Ok((_, tail)) = tasn1::primitives::integer::decode_signed(content, 0) else {
        return false;
    };
    let Ok((_, tail2)) = tasn1::primitives::integer::decode_signed(tail, 0) else {
        return false;
    };
    tail2.is_empty()
}

/// Re-encodes a raw `r || s` concatenation (equal-length halves) as a
/// DER `SEQUENCE { INTEGER r, INTEGER s }`.
fn raw_concat_to_der_sequence(sig: &[u8]) -> Vec<u8> {
    if sig.len() % 2 != 0 {
        return sig.to_vec();
    }
    let half = sig.len() / 2;
    let r = Mpi::from_unsigned_be_bytes(&sig[..half]);
    let s = Mpi::from_unsigned_be_bytes(&sig[half..]);
    let mut content = Vec::new();
    tasn1::primitives::integer::encode_unsigned(&r, &mut content);
    tasn1::primitives::integer::encode_unsigned(&s, &mut content);
    let mut out = Vec::new();
    tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut out);
    out.extend_from_slice(&content);
    out
}

/// Normalizes a DSA/ECDSA signature to the DER `SEQUENCE { r, s }` form
/// ("the signature may be either a SEQUENCE of
/// (r,s) integers or raw concatenated r||s; normalize"). RSA and EdDSA
/// signatures pass through untouched.
fn normalize_signature(key: &VerifyKey, signature: &[u8]) -> Vec<u8> {
    match key {
        VerifyKey::Dsa { .. } | VerifyKey::Ec { .. } => {
            if is_der_two_integer_sequence(signature) {
                signature.to_vec()
            } else {
                raw_concat_to_der_sequence(signature)
            }
        }
        VerifyKey::Rsa { .. } | VerifyKey::Ed25519 { .. } | VerifyKey::Ed448 { .. } => signature.to_vec(),
    }
}

// --- The async HASH/KEY/DO/CHECK state machine ---------------------

/// Resumption state of a [`SignatureContext`]. HASH and KEY always
/// complete synchronously inside [`SignatureContext::new`]; DO is the
/// only phase a hardware backend can suspend, so `step` only ever
/// re-enters there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureState {
    Hash,
    Key,
    Do,
    Check,
    Done,
}

/// Holds the one owning digest buffer, the normalized signature bytes,
/// and the tagged key this verification is running against (
/// "Signature context holds..."). Both buffers are zeroed on teardown.
pub struct SignatureContext {
    state: SignatureState,
    key: VerifyKey,
    hash_id: Option<HashId>,
    digest: Vec<u8>,
    signature: Vec<u8>,
}

impl SignatureContext {
    /// Runs the HASH and KEY phases immediately (neither can suspend):
    /// chooses the pre-hash algorithm from `sig_id` (Ed25519/Ed448 skip
    /// pre-hashing and carry `tbs` itself forward as the "digest"), then
    /// normalizes the signature for the resolved key type.
    pub fn new(
        tbs: &[u8],
        signature: &[u8],
        sig_id: SigId,
        key: VerifyKey,
        digest: &dyn Digest,
    ) -> Result<Self, PkixError> {
        let (hash_id, buf) = if matches!(sig_id, SigId::Ed25519 | SigId::Ed448) {
            (None, tbs.to_vec())
        } else {
            let h = HashId::from_signature_oid(sig_id.oid_bytes()).ok_or(PkixError::new(PkixErrorKind::AlgoId))?;
            (Some(h), digest.hash(h, tbs))
        };
        let normalized = normalize_signature(&key, signature);
        Ok(Self { state: SignatureState::Do, key, hash_id, digest: buf, signature: normalized })
    }

    pub fn state(&self) -> SignatureState {
        self.state
    }

    fn zeroize(&mut self) {
        self.digest.iter_mut().for_each(|b| *b = 0);
        self.signature.iter_mut().for_each(|b| *b = 0);
    }

    /// Drives the DO and CHECK phases. Returns `Poll::Pending` if the
    /// primitive reports an asynchronous hardware operation still in
    /// flight; the caller re-invokes `step` with the same `sig` later.
    /// `Poll::Ready(())` means the signature confirmed; `Err` covers
    /// both `ConfirmFail` (mismatch) and `UnknownOid` (no pre-hash
    /// algorithm resolved for an RSA key).
    pub fn step(&mut self, sig: &dyn SignaturePrimitive) -> Result<Poll<()>, PkixError> {
        if self.state == SignatureState::Done {
            return Ok(Poll::Ready(()));
        }
        self.state = SignatureState::Do;

        match &self.key {
            VerifyKey::Rsa { .. } => {
                let hash_id = self.hash_id.ok_or(PkixError::new(PkixErrorKind::AlgoId))?;
                let recovered = sig
                    .recover_rsa(&self.key, &self.signature)
                    .ok_or(PkixError::new(PkixErrorKind::SignatureConfirm))?;
                self.state = SignatureState::Check;
                let expected = digest_info(hash_id, &self.digest);
                let ok =
                    strip_pkcs1v15_padding(&recovered).map(|block| block == expected.as_slice()).unwrap_or(false);
                self.zeroize();
                if ok {
                    self.state = SignatureState::Done;
                    Ok(Poll::Ready(()))
                } else {
                    Err(PkixError::new(PkixErrorKind::SignatureConfirm))
                }
            }
            _ => match sig.verify(&self.key, &self.digest, &self.signature) {
                SignatureOutcome::Pending => Ok(Poll::Pending),
                SignatureOutcome::Valid => {
                    self.state = SignatureState::Check;
                    self.zeroize();
                    self.state = SignatureState::Done;
                    Ok(Poll::Ready(()))
                }
                SignatureOutcome::Invalid => {
                    self.state = SignatureState::Check;
                    self.zeroize();
                    Err(PkixError::new(PkixErrorKind::SignatureConfirm))
                }
            },
        }
    }
}

/// Runs a [`SignatureContext`] to completion, retrying on
/// `Poll::Pending` (for callers whose [`SignaturePrimitive`] never
/// actually suspends). Implements its `VerifySignature(tbs,
/// sig, sigAlgoOid, pubKey, pubKeyAlgoOid) -> Ok | ConfirmFail |
/// UnknownOid`.
pub fn verify_signature_sync(
    tbs: &[u8],
    signature: &[u8],
    sig_id: SigId,
    spki: &SubjectPublicKeyInfo,
    digest: &dyn Digest,
    sig: &dyn SignaturePrimitive,
) -> Result<(), PkixError> {
    let key = verify_key_from_spki(spki)?;
    let mut ctx = SignatureContext::new(tbs, signature, sig_id, key, digest)?;
    loop {
        if let Poll::Ready(()) = ctx.step(sig)? {
            return Ok(());
        }
    }
}

// --- Issuer resolution (X-CA) ----------------------------------------

/// Resolves a certificate's issuer against a [`SignerStore`] (spec
/// "Issuing-chain resolution"): Authority Key Identifier first,
/// then the SHA-family hash of the issuer `Name`. A match found only
/// through the name-hash fallback is rejected if the certificate
/// carried an AKI that the by-key lookup missed and the resolved
/// signer's own key hash disagrees with it — the signer would be wrong
/// even though the name matched.
pub fn resolve_issuer(store: &dyn SignerStore, cert: &Certificate, hash: HashId, digest: &dyn Digest) -> Option<Signer> {
    let aki_key_id = cert.tbs.authority_key_identifier().and_then(|a| a.key_id.clone());

    if let Some(key_id) = &aki_key_id {
        if let Some(signer) = store.by_key_hash(key_id) {
            return Some(signer);
        }
    }

    let issuer_hash = cert.issuer_name_hash(hash, digest);
    let by_name = store.by_name_hash(&issuer_hash)?;

    if let (Some(aki), Some(ski)) = (&aki_key_id, &by_name.subject_key_hash) {
        if aki != ski {
            return None;
        }
    }
    Some(by_name)
}

/// OCSP's extra issuer fallback ("by subject-name +
/// public-key equality, used only when the verify mode is specifically
/// OCSP"). `candidate` is a signer the caller already has in hand (for
/// example the certificate the OCSP response itself was attached
/// alongside) rather than one looked up by hash.
pub fn resolve_ocsp_fallback_signer(
    mode: VerifyMode,
    candidate_subject_hash: &[u8],
    candidate: &Signer,
    target_subject_hash: &[u8],
    target_key: &VerifyKey,
) -> Option<Signer> {
    if mode != VerifyMode::Ocsp {
        return None;
    }
    if candidate_subject_hash == target_subject_hash && verify_keys_equal(&candidate.key, target_key) {
        Some(candidate.clone())
    } else {
        None
    }
}

fn verify_keys_equal(a: &VerifyKey, b: &VerifyKey) -> bool {
    match (a, b) {
        (VerifyKey::Rsa { modulus: m1, exponent: e1 }, VerifyKey::Rsa { modulus: m2, exponent: e2 }) => {
            m1 == m2 && e1 == e2
        }
        (VerifyKey::Dsa { p: p1, q: q1, g: g1, y: y1 }, VerifyKey::Dsa { p: p2, q: q2, g: g2, y: y2 }) => {
            p1 == p2 && q1 == q2 && g1 == g2 && y1 == y2
        }
        (VerifyKey::Ec { curve: c1, point: p1 }, VerifyKey::Ec { curve: c2, point: p2 }) => c1 == c2 && p1 == p2,
        (VerifyKey::Ed25519 { public: a }, VerifyKey::Ed25519 { public: b }) => a == b,
        (VerifyKey::Ed448 { public: a }, VerifyKey::Ed448 { public: b }) => a == b,
        _ => false,
    }
}

// --- Path-length policy -----------------------------------------------

/// One step of the path-length budget threaded down a certificate
/// chain ( "Path-length policy"). `running_max_path_len` is
/// the budget inherited from the parent CA (`None` means unconstrained
/// so far); `child` is the next certificate's own `BasicConstraints`.
/// Returns the budget to carry into `child`'s own children.
pub fn check_path_length(
    running_max_path_len: Option<u8>,
    child: &BasicConstraints,
    child_is_leaf: bool,
) -> Result<Option<u8>, PkixErrorKind> {
    match running_max_path_len {
        Some(parent_len) => {
            if parent_len == 0 && !child_is_leaf {
                return Err(PkixErrorKind::PathLengthInvalid);
            }
            match child.path_len {
                Some(child_len) if child_len > parent_len => Err(PkixErrorKind::PathLengthInvalid),
                Some(child_len) => Ok(Some(child_len)),
                None => Ok(Some(parent_len - 1)),
            }
        }
        None => Ok(child.path_len),
    }
}

// --- Name-constraints policy -------------------------------------------

fn general_name_matches(constraint: &GeneralName, candidate: &GeneralName) -> bool {
    match (constraint, candidate) {
        (GeneralName::Dns(c), GeneralName::Dns(n)) => {
            let c = c.to_ascii_lowercase();
            let n = n.to_ascii_lowercase();
            n == c || n.ends_with(&format!(".{c}"))
        }
        (GeneralName::Rfc822(c), GeneralName::Rfc822(n)) => {
            let c = c.to_ascii_lowercase();
            let n = n.to_ascii_lowercase();
            if c.contains('@') {
                n == c
            } else {
                n.ends_with(&format!("@{c}")) || n.ends_with(&format!(".{c}"))
            }
        }
        (GeneralName::Directory(c), GeneralName::Directory(n)) => c == n,
        (GeneralName::Ip(c), GeneralName::Ip(n)) => c == n,
        (GeneralName::Uri(c), GeneralName::Uri(n)) => {
            n.to_ascii_lowercase().ends_with(&c.to_ascii_lowercase())
        }
        _ => false,
    }
}

fn same_category(a: &GeneralName, b: &GeneralName) -> bool {
    core::mem::discriminant(a) == core::mem::discriminant(b)
}

/// Checks a subordinate certificate's `subjectAltName` entries against
/// an issuer's `NameConstraints` ("if the CA has a
/// permittedNames list, every matching alt-name category in the child
/// must satisfy at least one entry; any excludedNames match fails").
pub fn check_name_constraints(constraints: &NameConstraints, child_names: &[GeneralName]) -> Result<(), PkixErrorKind> {
    for name in child_names {
        if constraints.excluded.iter().any(|s| general_name_matches(&s.base, name)) {
            return Err(PkixErrorKind::NameInvalid);
        }
    }
    for name in child_names {
        let applicable: Vec<_> = constraints.permitted.iter().filter(|s| same_category(&s.base, name)).collect();
        if !applicable.is_empty() && !applicable.iter().any(|s| general_name_matches(&s.base, name)) {
            return Err(PkixErrorKind::NameInvalid);
        }
    }
    Ok(())
}

// --- Date policy -------------------------------------------------------

fn to_utc(t: &CertTime) -> Result<DateTime<Utc>, PkixErrorKind> {
    t.fields.to_utc().ok_or(PkixErrorKind::BeforeDate)
}

/// `VerifyBefore(now, notBefore)`: `false` once `now` (plus `skew`) has
/// reached `notBefore`.
pub fn verify_before(now: DateTime<Utc>, not_before: &CertTime, skew: Duration) -> bool {
    match to_utc(not_before) {
        Ok(nb) => now + skew >= nb,
        Err(_) => false,
    }
}

/// `VerifyAfter(now, notAfter)`: `false` once `now` (minus `skew`) has
/// passed `notAfter`.
pub fn verify_after(now: DateTime<Utc>, not_after: &CertTime, skew: Duration) -> bool {
    match to_utc(not_after) {
        Ok(na) => now - skew <= na,
        Err(_) => false,
    }
}

/// Checks a certificate/CRL's validity window against `now`, with an
/// optional clock-skew allowance ( "Date policy"). The result
/// is meant to be deferred by the caller the same way decode-time
/// deferred errors are: the rest of the chain walk continues even when
/// a date check fails.
pub fn check_validity(validity: &Validity, now: DateTime<Utc>, skew: Duration) -> Result<(), PkixErrorKind> {
    if !verify_before(now, &validity.not_before, skew) {
        return Err(PkixErrorKind::BeforeDate);
    }
    if !verify_after(now, &validity.not_after, skew) {
        return Err(PkixErrorKind::AfterDate);
    }
    Ok(())
}

/// CRL/OCSP equivalent of [`verify_after`] for `nextUpdate`. `None`
/// (no stated `nextUpdate`) never expires.
pub fn check_next_update(next_update: Option<&CertTime>, now: DateTime<Utc>, skew: Duration) -> Result<(), PkixErrorKind> {
    match next_update {
        Some(t) if !verify_after(now, t, skew) => Err(PkixErrorKind::CrlExpired),
        _ => Ok(()),
    }
}

// --- CRL key-usage policy -----------------------------------------------

/// `(ca.keyUsage & KEYUSE_CRL_SIGN) != 0` is required unless key-usage
/// checking is disabled . A CA with no `KeyUsage` extension
/// at all is unconstrained.
pub fn check_crl_signer_key_usage(issuer_key_usage: Option<KeyUsage>, enforce: bool) -> Result<(), PkixErrorKind> {
    if !enforce {
        return Ok(());
    }
    match issuer_key_usage {
        Some(ku) if !ku.crl_sign() => Err(PkixErrorKind::KeyUsage),
        _ => Ok(()),
    }
}

// --- OCSP responder resolution ------------------------------------------

/// Spec three OCSP responder cases. The caller supplies the
/// identity comparisons already performed (this module has no OCSP
/// wire types of its own): `responder_is_issuing_ca` is "issuer hash
/// equal to CA subject hash" (case a); `delegated` carries a
/// responder certificate's `ExtendedKeyUsage` plus whether its issuer
/// matches the responding CA (case b); `allow_lax_any_ca` is the
/// policy flag for case (c).
pub fn ocsp_responder_is_authorized(
    responder_is_issuing_ca: bool,
    delegated: Option<(&ExtendedKeyUsage, bool)>,
    allow_lax_any_ca: bool,
) -> bool {
    if responder_is_issuing_ca {
        return true;
    }
    if let Some((eku, issuer_matches_ca)) = delegated {
        if issuer_matches_ca && eku.contains(ExtKeyUseId::OcspSign) {
            return true;
        }
    }
    allow_lax_any_ca
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::TimeKind;
    use tasn1::oid::CertNameId;

    struct StubDigest;
    impl Digest for StubDigest {
        fn hash(&self, _alg: HashId, data: &[u8]) -> Vec<u8> {
            // a trivial non-cryptographic "digest": first 4 bytes, zero-padded.
            let mut out = vec![0u8; 4];
            for (i, b) in data.iter().take(4).enumerate() {
                out[i] = *b;
            }
            out
        }
    }

    fn rsa_spki(modulus: &[u8], exponent: &[u8]) -> SubjectPublicKeyInfo {
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_unsigned(&Mpi::from_unsigned_be_bytes(modulus), &mut content);
        tasn1::primitives::integer::encode_unsigned(&Mpi::from_unsigned_be_bytes(exponent), &mut content);
        let mut bare = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut bare);
        bare.extend_from_slice(&content);
        let mut null_params = Vec::new();
        tasn1::primitives::null::encode(&mut null_params);
        SubjectPublicKeyInfo {
            algorithm: crate::algorithms::AlgorithmIdentifier {
                algorithm: KeyId::Rsa.oid_bytes().to_vec(),
                parameters: Some(null_params),
            },
            public_key: BitString::exact(bare),
        }
    }

    struct AlwaysValidRsa {
        expected_digest_info: Vec<u8>,
    }

    impl SignaturePrimitive for AlwaysValidRsa {
        fn verify(&self, _key: &VerifyKey, _digest: &[u8], _sig: &[u8]) -> SignatureOutcome {
            SignatureOutcome::Invalid
        }
        fn recover_rsa(&self, _key: &VerifyKey, _sig: &[u8]) -> Option<Vec<u8>> {
            let mut block = vec![0x00, 0x01];
            block.extend(std::iter::repeat(0xFFu8).take(8));
            block.push(0x00);
            block.extend_from_slice(&self.expected_digest_info);
            Some(block)
        }
    }

    #[test]
    fn rsa_signature_confirms_on_matching_digest_info() {
        let spki = rsa_spki(&[0xB2, 0xD0, 0x4F], &[0x01, 0x01]);
        let key = verify_key_from_spki(&spki).unwrap();
        let digest = StubDigest;
        let tbs = b"to-be-signed bytes";
        let expected_digest = digest.hash(HashId::Sha256, tbs);
        let primitive = AlwaysValidRsa { expected_digest_info: digest_info(HashId::Sha256, &expected_digest) };
        let mut ctx = SignatureContext::new(tbs, b"signature-bytes-ignored", SigId::Sha256WithRsa, key, &digest).unwrap();
        assert_eq!(ctx.step(&primitive).unwrap(), Poll::Ready(()));
        assert_eq!(ctx.state(), SignatureState::Done);
    }

    #[test]
    fn rsa_signature_rejects_on_mismatched_digest_info() {
        let spki = rsa_spki(&[0xB2, 0xD0, 0x4F], &[0x01, 0x01]);
        let key = verify_key_from_spki(&spki).unwrap();
        let digest = StubDigest;
        let primitive = AlwaysValidRsa { expected_digest_info: vec![0xDE, 0xAD, 0xBE, 0xEF] };
        let mut ctx =
            SignatureContext::new(b"tbs", b"sig", SigId::Sha256WithRsa, key, &digest).unwrap();
        assert!(ctx.step(&primitive).is_err());
    }

    #[test]
    fn dsa_raw_concat_signature_normalizes_to_der_sequence() {
        let key = VerifyKey::Dsa { p: vec![0x01], q: vec![0x01], g: vec![0x01], y: vec![0x01] };
        let raw = [0x01u8, 0x02, 0x03, 0x04]; // r = 01 02, s = 03 04
        let normalized = normalize_signature(&key, &raw);
        assert!(is_der_two_integer_sequence(&normalized));
    }

    #[test]
    fn dsa_already_der_signature_passes_through() {
        let key = VerifyKey::Dsa { p: vec![0x01], q: vec![0x01], g: vec![0x01], y: vec![0x01] };
        let mut content = Vec::new();
        tasn1::primitives::integer::encode_unsigned(&Mpi::from_unsigned_be_bytes(&[0x01]), &mut content);
        tasn1::primitives::integer::encode_unsigned(&Mpi::from_unsigned_be_bytes(&[0x02]), &mut content);
        let mut der = Vec::new();
        tasn1::primitives::sequence::encode_header(Tag::SEQUENCE, content.len(), &mut der);
        der.extend_from_slice(&content);
        assert_eq!(normalize_signature(&key, &der), der);
    }

    #[test]
    fn path_length_budget_decrements_when_child_has_none() {
        let child = BasicConstraints { ca: true, path_len: None };
        assert_eq!(check_path_length(Some(2), &child, false).unwrap(), Some(1));
    }

    #[test]
    fn path_length_rejects_child_wider_than_parent() {
        let child = BasicConstraints { ca: true, path_len: Some(5) };
        assert!(check_path_length(Some(1), &child, false).is_err());
    }

    #[test]
    fn path_length_zero_rejects_non_leaf_child() {
        let child = BasicConstraints { ca: true, path_len: None };
        assert!(check_path_length(Some(0), &child, false).is_err());
        assert!(check_path_length(Some(0), &child, true).is_ok());
    }

    fn dns(name: &str) -> GeneralName {
        GeneralName::Dns(name.to_string())
    }

    fn subtree(name: GeneralName) -> crate::extensions::GeneralSubtree {
        crate::extensions::GeneralSubtree { base: name }
    }

    #[test]
    fn name_constraints_permit_matching_subdomain() {
        let constraints = NameConstraints { permitted: vec![subtree(dns("example.com"))], excluded: vec![] };
        assert!(check_name_constraints(&constraints, &[dns("www.example.com")]).is_ok());
    }

    #[test]
    fn name_constraints_reject_non_matching_domain() {
        let constraints = NameConstraints { permitted: vec![subtree(dns("example.com"))], excluded: vec![] };
        assert!(check_name_constraints(&constraints, &[dns("evil.example.net")]).is_err());
    }

    #[test]
    fn name_constraints_excluded_always_wins() {
        let constraints = NameConstraints { permitted: vec![], excluded: vec![subtree(dns("blocked.example.com"))] };
        assert!(check_name_constraints(&constraints, &[dns("host.blocked.example.com")]).is_err());
    }

    fn utc(year: u16, mon: u8, day: u8) -> CertTime {
        CertTime { fields: DateFields { year, mon, day, hour: 0, min: 0, sec: 0 }, kind: TimeKind::Utc }
    }

    #[test]
    fn date_policy_accepts_inside_window() {
        let validity = Validity { not_before: utc(2020, 1, 1), not_after: utc(2030, 1, 1) };
        let now = utc(2024, 6, 1).fields.to_utc().unwrap();
        assert!(check_validity(&validity, now, Duration::zero()).is_ok());
    }

    #[test]
    fn date_policy_rejects_before_not_before() {
        let validity = Validity { not_before: utc(2030, 1, 1), not_after: utc(2040, 1, 1) };
        let now = utc(2024, 6, 1).fields.to_utc().unwrap();
        assert_eq!(check_validity(&validity, now, Duration::zero()), Err(PkixErrorKind::BeforeDate));
    }

    #[test]
    fn date_policy_rejects_after_not_after() {
        let validity = Validity { not_before: utc(2000, 1, 1), not_after: utc(2010, 1, 1) };
        let now = utc(2024, 6, 1).fields.to_utc().unwrap();
        assert_eq!(check_validity(&validity, now, Duration::zero()), Err(PkixErrorKind::AfterDate));
    }

    #[test]
    fn crl_key_usage_requires_crl_sign_bit_when_enforced() {
        let ku = KeyUsage(0); // no bits set
        assert_eq!(check_crl_signer_key_usage(Some(ku), true), Err(PkixErrorKind::KeyUsage));
        assert!(check_crl_signer_key_usage(None, true).is_ok());
    }

    #[test]
    fn ocsp_responder_accepts_self_case() {
        assert!(ocsp_responder_is_authorized(true, None, false));
    }

    #[test]
    fn ocsp_responder_accepts_delegated_with_eku_and_matching_issuer() {
        let eku = ExtendedKeyUsage { recognized: vec![ExtKeyUseId::OcspSign], oids: vec![] };
        assert!(ocsp_responder_is_authorized(false, Some((&eku, true)), false));
    }

    #[test]
    fn ocsp_responder_rejects_delegated_without_matching_issuer() {
        let eku = ExtendedKeyUsage { recognized: vec![ExtKeyUseId::OcspSign], oids: vec![] };
        assert!(!ocsp_responder_is_authorized(false, Some((&eku, false)), false));
    }

    #[test]
    fn ocsp_responder_lax_mode_accepts_any_ca() {
        assert!(ocsp_responder_is_authorized(false, None, true));
    }

    #[test]
    fn resolve_issuer_by_name_hash_rejects_mismatched_aki() {
        struct StoreStub;
        impl SignerStore for StoreStub {
            fn by_key_hash(&self, _hash: &[u8]) -> Option<Signer> {
                None
            }
            fn by_name_hash(&self, _hash: &[u8]) -> Option<Signer> {
                Some(Signer {
                    key: VerifyKey::Rsa { modulus: vec![0x01], exponent: vec![0x01] },
                    subject_name_hash: vec![0xAA],
                    subject_key_hash: Some(vec![0x11]),
                })
            }
        }

        let issuer = crate::name::Name(vec![crate::name::RelativeDistinguishedName(vec![
            crate::name::AttributeTypeAndValue {
                oid: CertNameId::CommonName.oid_bytes().to_vec(),
                known: Some(CertNameId::CommonName),
                tag: Tag::UTF8_STRING,
                value: b"issuer".to_vec(),
            },
        ])]);
        let subject = issuer.clone();

        // Build a minimal certificate carrying an AKI key id that will
        // not match the store's `by_key_hash` (empty) nor the stub
        // signer's `subject_key_hash`, to exercise the mismatch guard.
        let der = crate::cert::tests_support::self_signed_with_aki(&issuer, &subject, &[0x22]);
        let cert = Certificate::decode(&der).unwrap();
        let digest = StubDigest;
        assert!(resolve_issuer(&StoreStub, &cert, HashId::Sha256, &digest).is_none());
    }
}
