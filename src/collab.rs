//! External collaborator traits ( "External interfaces"): primitive
//! cryptography, randomness, and the certificate store a chain
//! verification walks are supplied by the embedder, not implemented
//! here. PEM armoring (X-PEM) has no trait at all — out of scope —
//! this workspace only ever accepts and returns raw DER.

use crate::oid::CurveId;

/// A verification key in whatever concrete form the collaborator needs;
/// this crate only ever carries it opaquely between the schema layer
/// and the signature collaborator.
#[derive(Debug, Clone)]
pub enum VerifyKey {
    Rsa { modulus: Vec<u8>, exponent: Vec<u8> },
    Dsa { p: Vec<u8>, q: Vec<u8>, g: Vec<u8>, y: Vec<u8> },
    Ec { curve: CurveId, point: Vec<u8> },
    Ed25519 { public: Vec<u8> },
    Ed448 { public: Vec<u8> },
}

/// Digest computation (X-HASH). `alg` identifies the hash by the same
/// `HashId` the OID registry resolved from the signature algorithm.
pub trait Digest {
    fn hash(&self, alg: crate::oid::HashId, data: &[u8]) -> Vec<u8>;
}

/// The outcome of one signature-verification attempt, including the
/// asynchronous "try again" case some hardware backends need (
/// "Signature context" "the primitive crypto reports a pending
/// status").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureOutcome {
    Valid,
    Invalid,
    Pending,
}

/// Signature verification and RSA signature recovery (X-SIG).
pub trait SignaturePrimitive {
    fn verify(&self, key: &VerifyKey, digest: &[u8], sig: &[u8]) -> SignatureOutcome;

    /// Recovers the padded digest info from an RSA signature (PKCS#1 v1.5
    /// signatures are not hashed by the verifier directly; the primitive
    /// performs the public-key operation and returns the recovered
    /// padded block for the schema layer to strip and compare).
    fn recover_rsa(&self, key: &VerifyKey, sig: &[u8]) -> Option<Vec<u8>>;
}

/// Randomness (X-RNG): only used by callers building requests (OCSP
/// nonces, CSR challenge values) — never by decode.
pub trait Rng {
    fn fill(&self, dst: &mut [u8]) -> Result<(), ()>;
}

/// A resolved signer: a public key plus the identifying hashes a
/// `SignerStore` indexes by.
#[derive(Debug, Clone)]
pub struct Signer {
    pub key: VerifyKey,
    pub subject_name_hash: Vec<u8>,
    pub subject_key_hash: Option<Vec<u8>>,
}

/// Certificate/signer lookup (X-CA): how chain verification finds the
/// issuer for a given certificate.
pub trait SignerStore {
    fn by_key_hash(&self, hash: &[u8]) -> Option<Signer>;
    fn by_name_hash(&self, hash: &[u8]) -> Option<Signer>;
}

/// Which way a password-based cipher operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherDirection {
    Encrypt,
    Decrypt,
}

/// Password-based encryption/decryption: `pbe_crypt(alg,
/// password, salt, iter, iv, data, direction)`. The collaborator
/// performs both the PBKDF and the block-cipher operation; this crate
/// never derives key material or touches a block cipher itself.
pub trait Cipher {
    fn pbe_crypt(
        &self,
        alg: crate::oid::PbeId,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        iv: Option<&[u8]>,
        data: &[u8],
        direction: CipherDirection,
    ) -> Result<Vec<u8>, ()>;

    /// PBES2's generic `encryptionScheme` is a `BlockId` rather than a
    /// `PbeId` (the KDF and cipher are specified independently); kept as
    /// a separate method rather than overloading `pbe_crypt`'s `alg`
    /// parameter with two unrelated enums.
    fn pbes2_crypt(
        &self,
        block: crate::oid::BlockId,
        derived_key: &[u8],
        iv: &[u8],
        data: &[u8],
        direction: CipherDirection,
    ) -> Result<Vec<u8>, ()>;

    /// PBES2's key derivation function (PBKDF2 in every profile this
    /// crate supports), run ahead of [`Cipher::pbes2_crypt`] so a single
    /// derived key can be reused if the caller retries the cipher step.
    fn pbkdf2(&self, password: &[u8], salt: &[u8], iterations: u32, key_len: usize) -> Vec<u8>;
}
