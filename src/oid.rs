//! C3 — the OID registry: a bidirectional map between `(kind, numeric
//! sum)` and the canonical DER bytes of an OBJECT IDENTIFIER.
//!
//! The registry is a flat `const` table, searched linearly. Every
//! supported OID is small in count (a few hundred at most across all
//! kinds) so a linear scan is simpler and just as fast in practice as a
//! perfect hash; prior art reaches for `once_cell`-guarded statics only
//! where a table must be *built* at runtime, which this one never is.

use crate::error::{DecodeError, DecodeErrorKind};

/// Discriminates which family of OIDs a numeric sum should be looked up
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OidKind {
    HashType,
    SigType,
    KeyType,
    CurveType,
    BlockType,
    OcspType,
    CertExtType,
    CrlExtType,
    CertAuthInfoType,
    CertPolicyType,
    CertAltNameType,
    CertKeyUseType,
    KdfType,
    PbeType,
    KeyWrapType,
    CmsKeyAgreeType,
    HmacType,
    CompressType,
    CertNameType,
    TlsExtType,
    CsrAttrType,
    /// The schema does not care which OID is present; no lookup is
    /// performed and the raw bytes are simply stored.
    Ignore,
}

macro_rules! ids {
    ($enum_name:ident { $($variant:ident),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(non_camel_case_types)]
        pub enum $enum_name {
            $($variant),+
        }
    };
}

ids!(HashId { Md2, Md5, Sha1, Sha224, Sha256, Sha384, Sha512, Sha3_224, Sha3_256, Sha3_384, Sha3_512 });
ids!(SigId {
    Md2WithRsa, Md5WithRsa, Sha1WithRsa, Sha224WithRsa, Sha256WithRsa, Sha384WithRsa, Sha512WithRsa,
    Sha1WithEcdsa, Sha224WithEcdsa, Sha256WithEcdsa, Sha384WithEcdsa, Sha512WithEcdsa,
    Sha1WithDsa, Ed25519, Ed448,
});
ids!(KeyId { Rsa, Dsa, Dh, Ecdsa, Ed25519, X25519, Ed448, X448 });
ids!(BlockId {
    Aes128Cbc, Aes192Cbc, Aes256Cbc, Aes128Gcm, Aes256Gcm, Des, Des3,
});
ids!(OcspType { Basic, Nonce, NoCheck });
ids!(CertExtId {
    BasicCa, AltNames, CrlDist, AuthInfo, AuthKey, SubjKey, CertPolicy, KeyUsage,
    InhibitAny, ExtKeyUsage, NameCons, OcspNoCheck, PolicyConstraints, NetscapeCertType,
});
ids!(ExtKeyUseId { Any, ServerAuth, ClientAuth, CodeSign, EmailProt, Timestamp, OcspSign });
ids!(PbeId {
    Sha1Rc4_128, Md5Des, Sha1Des, Sha1Des3, Sha140Rc2, Aes128Cbc, Aes256Cbc, Pbes2,
});
ids!(CurveId { P256, P384, P521 });
ids!(CertAuthInfoId { Ocsp, CaIssuers });
ids!(CertPolicyId { AnyPolicy, CpsQualifier, UserNoticeQualifier });
ids!(CertNameId {
    CommonName, Surname, Country, Locality, State, Organization, OrganizationalUnit,
    SerialNumber, BusinessCategory, Email, UserId, DomainComponent,
    JurisdictionCountry, JurisdictionState, Title, GivenName, Initials, DnQualifier,
});
ids!(CsrAttrId { ChallengePassword, ExtensionRequest });
ids!(CrlExtId {
    Number, DeltaIndicator, IssuingDistPoint, FreshestCrl, ReasonCode, InvalidityDate, CertIssuer,
});
ids!(HmacId { Sha1, Sha224, Sha256, Sha384, Sha512 });
ids!(KeyWrapId { Aes128Wrap, Aes256Wrap });
ids!(KdfId { Pbkdf2 });

impl HashId {
    /// The canonical DER content bytes for this hash's OID.
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            HashId::Md2 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x02],
            HashId::Md5 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x05],
            HashId::Sha1 => SHA1,
            HashId::Sha224 => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x04],
            HashId::Sha256 => SHA256,
            HashId::Sha384 => SHA384,
            HashId::Sha512 => SHA512,
            HashId::Sha3_224 => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x07],
            HashId::Sha3_256 => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x08],
            HashId::Sha3_384 => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x09],
            HashId::Sha3_512 => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x0A],
        }
    }

    /// Maps a signature-algorithm OID to the hash it pre-hashes with, per
    /// phase HASH. Returns `None` for Ed25519/Ed448, which do not
    /// pre-hash.
    pub fn from_signature_oid(bytes: &[u8]) -> Option<Self> {
        match SigId::from_oid_bytes(bytes)? {
            SigId::Md2WithRsa => Some(HashId::Md2),
            SigId::Md5WithRsa => Some(HashId::Md5),
            SigId::Sha1WithRsa | SigId::Sha1WithEcdsa | SigId::Sha1WithDsa => Some(HashId::Sha1),
            SigId::Sha224WithRsa | SigId::Sha224WithEcdsa => Some(HashId::Sha224),
            SigId::Sha256WithRsa | SigId::Sha256WithEcdsa => Some(HashId::Sha256),
            SigId::Sha384WithRsa | SigId::Sha384WithEcdsa => Some(HashId::Sha384),
            SigId::Sha512WithRsa | SigId::Sha512WithEcdsa => Some(HashId::Sha512),
            SigId::Ed25519 | SigId::Ed448 => None,
        }
    }
}

impl KeyId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            KeyId::Rsa => RSA_ENCRYPTION,
            KeyId::Dsa => ID_DSA,
            KeyId::Dh => DH_PUBLIC_NUMBER,
            KeyId::Ecdsa => ID_EC_PUBLIC_KEY,
            KeyId::Ed25519 => ED25519,
            KeyId::X25519 => X25519,
            KeyId::Ed448 => ED448,
            KeyId::X448 => X448,
        }
    }

    /// Recognises a well-known public-key-algorithm OID, if any.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            KeyId::Rsa,
            KeyId::Dsa,
            KeyId::Dh,
            KeyId::Ecdsa,
            KeyId::Ed25519,
            KeyId::X25519,
            KeyId::Ed448,
            KeyId::X448,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl ExtKeyUseId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            ExtKeyUseId::Any => ANY_EXTENDED_KEY_USAGE,
            ExtKeyUseId::ServerAuth => SERVER_AUTH,
            ExtKeyUseId::ClientAuth => CLIENT_AUTH,
            ExtKeyUseId::CodeSign => CODE_SIGNING,
            ExtKeyUseId::EmailProt => EMAIL_PROTECTION,
            ExtKeyUseId::Timestamp => TIME_STAMPING,
            ExtKeyUseId::OcspSign => OCSP_SIGNING,
        }
    }

    /// Recognises a well-known extended-key-usage OID, if any.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        use well_known::*;
        Some(match bytes {
            b if b == ANY_EXTENDED_KEY_USAGE => ExtKeyUseId::Any,
            b if b == SERVER_AUTH => ExtKeyUseId::ServerAuth,
            b if b == CLIENT_AUTH => ExtKeyUseId::ClientAuth,
            b if b == CODE_SIGNING => ExtKeyUseId::CodeSign,
            b if b == EMAIL_PROTECTION => ExtKeyUseId::EmailProt,
            b if b == TIME_STAMPING => ExtKeyUseId::Timestamp,
            b if b == OCSP_SIGNING => ExtKeyUseId::OcspSign,
            _ => return None,
        })
    }
}

impl CertExtId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            CertExtId::BasicCa => BASIC_CONSTRAINTS,
            CertExtId::AltNames => SUBJECT_ALT_NAME,
            CertExtId::CrlDist => CRL_DISTRIBUTION_POINTS,
            CertExtId::AuthInfo => AUTHORITY_INFO_ACCESS,
            CertExtId::AuthKey => AUTHORITY_KEY_IDENTIFIER,
            CertExtId::SubjKey => SUBJECT_KEY_IDENTIFIER,
            CertExtId::CertPolicy => CERTIFICATE_POLICIES,
            CertExtId::KeyUsage => KEY_USAGE,
            CertExtId::InhibitAny => INHIBIT_ANY_POLICY,
            CertExtId::ExtKeyUsage => EXT_KEY_USAGE,
            CertExtId::NameCons => NAME_CONSTRAINTS,
            CertExtId::OcspNoCheck => ID_PKIX_OCSP_NOCHECK,
            CertExtId::PolicyConstraints => POLICY_CONSTRAINTS,
            CertExtId::NetscapeCertType => NETSCAPE_CERT_TYPE,
        }
    }

    /// Recognises a well-known certificate-extension OID, if any.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            CertExtId::BasicCa,
            CertExtId::AltNames,
            CertExtId::CrlDist,
            CertExtId::AuthInfo,
            CertExtId::AuthKey,
            CertExtId::SubjKey,
            CertExtId::CertPolicy,
            CertExtId::KeyUsage,
            CertExtId::InhibitAny,
            CertExtId::ExtKeyUsage,
            CertExtId::NameCons,
            CertExtId::OcspNoCheck,
            CertExtId::PolicyConstraints,
            CertExtId::NetscapeCertType,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl CrlExtId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            CrlExtId::Number => CRL_NUMBER,
            CrlExtId::DeltaIndicator => DELTA_CRL_INDICATOR,
            CrlExtId::IssuingDistPoint => ISSUING_DISTRIBUTION_POINT,
            CrlExtId::FreshestCrl => FRESHEST_CRL,
            CrlExtId::ReasonCode => CRL_REASON,
            CrlExtId::InvalidityDate => INVALIDITY_DATE,
            CrlExtId::CertIssuer => CERTIFICATE_ISSUER,
        }
    }

    /// Recognises a well-known CRL or CRL-entry extension OID.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            CrlExtId::Number,
            CrlExtId::DeltaIndicator,
            CrlExtId::IssuingDistPoint,
            CrlExtId::FreshestCrl,
            CrlExtId::ReasonCode,
            CrlExtId::InvalidityDate,
            CrlExtId::CertIssuer,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl CertNameId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            CertNameId::CommonName => COMMON_NAME,
            CertNameId::Surname => SURNAME,
            CertNameId::Country => COUNTRY_NAME,
            CertNameId::Locality => LOCALITY_NAME,
            CertNameId::State => STATE_OR_PROVINCE_NAME,
            CertNameId::Organization => ORGANIZATION_NAME,
            CertNameId::OrganizationalUnit => ORGANIZATIONAL_UNIT_NAME,
            CertNameId::SerialNumber => SERIAL_NUMBER,
            CertNameId::BusinessCategory => BUSINESS_CATEGORY,
            CertNameId::Email => EMAIL_ADDRESS,
            CertNameId::UserId => USER_ID,
            CertNameId::DomainComponent => DOMAIN_COMPONENT,
            CertNameId::JurisdictionCountry => {
                &[0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3C, 0x02, 0x01, 0x03]
            }
            CertNameId::JurisdictionState => {
                &[0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3C, 0x02, 0x01, 0x02]
            }
            CertNameId::Title => TITLE,
            CertNameId::GivenName => GIVEN_NAME,
            CertNameId::Initials => INITIALS,
            CertNameId::DnQualifier => DN_QUALIFIER,
        }
    }

    /// Recognises a well-known RDN attribute-type OID; unrecognised
    /// attributes are skipped
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            CertNameId::CommonName,
            CertNameId::Surname,
            CertNameId::Country,
            CertNameId::Locality,
            CertNameId::State,
            CertNameId::Organization,
            CertNameId::OrganizationalUnit,
            CertNameId::SerialNumber,
            CertNameId::BusinessCategory,
            CertNameId::Email,
            CertNameId::UserId,
            CertNameId::DomainComponent,
            CertNameId::JurisdictionCountry,
            CertNameId::JurisdictionState,
            CertNameId::Title,
            CertNameId::GivenName,
            CertNameId::Initials,
            CertNameId::DnQualifier,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl OcspType {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            OcspType::Basic => ID_PKIX_OCSP_BASIC,
            OcspType::Nonce => ID_PKIX_OCSP_NONCE,
            OcspType::NoCheck => ID_PKIX_OCSP_NOCHECK,
        }
    }

    /// Recognises a well-known OCSP OID (`id-pkix-ocsp-*`), if any.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [OcspType::Basic, OcspType::Nonce, OcspType::NoCheck]
            .into_iter()
            .find(|id| id.oid_bytes() == bytes)
    }
}

impl CertAuthInfoId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            CertAuthInfoId::Ocsp => ID_AD_OCSP,
            CertAuthInfoId::CaIssuers => ID_AD_CA_ISSUERS,
        }
    }

    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        use well_known::*;
        Some(match bytes {
            b if b == ID_AD_OCSP => CertAuthInfoId::Ocsp,
            b if b == ID_AD_CA_ISSUERS => CertAuthInfoId::CaIssuers,
            _ => return None,
        })
    }
}

impl SigId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            SigId::Md2WithRsa => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x02],
            SigId::Md5WithRsa => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x04],
            SigId::Sha1WithRsa => SHA1_WITH_RSA,
            SigId::Sha224WithRsa => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0E],
            SigId::Sha256WithRsa => SHA256_WITH_RSA,
            SigId::Sha384WithRsa => SHA384_WITH_RSA,
            SigId::Sha512WithRsa => SHA512_WITH_RSA,
            SigId::Sha1WithEcdsa => SHA1_WITH_ECDSA,
            SigId::Sha224WithEcdsa => &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x01],
            SigId::Sha256WithEcdsa => SHA256_WITH_ECDSA,
            SigId::Sha384WithEcdsa => SHA384_WITH_ECDSA,
            SigId::Sha512WithEcdsa => SHA512_WITH_ECDSA,
            SigId::Sha1WithDsa => DSA_WITH_SHA1,
            SigId::Ed25519 => ED25519,
            SigId::Ed448 => ED448,
        }
    }

    /// Maps a raw signature-algorithm OID to its typed id, if recognised.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            SigId::Md2WithRsa,
            SigId::Md5WithRsa,
            SigId::Sha1WithRsa,
            SigId::Sha224WithRsa,
            SigId::Sha256WithRsa,
            SigId::Sha384WithRsa,
            SigId::Sha512WithRsa,
            SigId::Sha1WithEcdsa,
            SigId::Sha224WithEcdsa,
            SigId::Sha256WithEcdsa,
            SigId::Sha384WithEcdsa,
            SigId::Sha512WithEcdsa,
            SigId::Sha1WithDsa,
            SigId::Ed25519,
            SigId::Ed448,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl CurveId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            CurveId::P256 => PRIME256V1,
            CurveId::P384 => SECP384R1,
            CurveId::P521 => SECP521R1,
        }
    }

    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        use well_known::*;
        Some(match bytes {
            b if b == PRIME256V1 => CurveId::P256,
            b if b == SECP384R1 => CurveId::P384,
            b if b == SECP521R1 => CurveId::P521,
            _ => return None,
        })
    }
}

impl BlockId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            BlockId::Aes128Cbc => AES128_CBC,
            BlockId::Aes192Cbc => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x16],
            BlockId::Aes256Cbc => AES256_CBC,
            BlockId::Aes128Gcm => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x06],
            BlockId::Aes256Gcm => &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2E],
            BlockId::Des => DES_CBC,
            BlockId::Des3 => DES3_CBC,
        }
    }

    /// Recognises a well-known PBES2 `encryptionScheme` OID.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            BlockId::Aes128Cbc,
            BlockId::Aes192Cbc,
            BlockId::Aes256Cbc,
            BlockId::Aes128Gcm,
            BlockId::Aes256Gcm,
            BlockId::Des,
            BlockId::Des3,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl PbeId {
    pub fn oid_bytes(self) -> &'static [u8] {
        use well_known::*;
        match self {
            PbeId::Sha1Rc4_128 => PBE_SHA1_RC4_128,
            PbeId::Md5Des => PBE_MD5_DES_CBC,
            PbeId::Sha1Des => PBE_SHA1_DES_CBC,
            PbeId::Sha1Des3 => PBE_SHA1_3DES_CBC,
            PbeId::Sha140Rc2 => PBE_SHA1_40RC2_CBC,
            PbeId::Aes128Cbc => AES128_CBC,
            PbeId::Aes256Cbc => AES256_CBC,
            PbeId::Pbes2 => ID_PBES2,
        }
    }

    /// Distinguishes a PBES1 scheme (fixed hash+cipher) from PBES2
    /// (separate KDF and cipher `AlgorithmIdentifier`s)
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [
            PbeId::Sha1Rc4_128,
            PbeId::Md5Des,
            PbeId::Sha1Des,
            PbeId::Sha1Des3,
            PbeId::Sha140Rc2,
            PbeId::Pbes2,
        ]
        .into_iter()
        .find(|id| id.oid_bytes() == bytes)
    }
}

impl HmacId {
    pub fn oid_bytes(self) -> &'static [u8] {
        match self {
            HmacId::Sha1 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x07],
            HmacId::Sha224 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x08],
            HmacId::Sha256 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x09],
            HmacId::Sha384 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x0A],
            HmacId::Sha512 => &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x0B],
        }
    }

    /// PBKDF2's `prf` field defaults to `hmacWithSHA1` when absent.
    pub fn from_oid_bytes(bytes: &[u8]) -> Option<Self> {
        [HmacId::Sha1, HmacId::Sha224, HmacId::Sha256, HmacId::Sha384, HmacId::Sha512]
            .into_iter()
            .find(|id| id.oid_bytes() == bytes)
    }
}

/// One row of the registry: which kind it belongs to, the OID's byte-sum
/// identity, and its canonical DER content bytes (no header).
struct Row {
    kind: OidKind,
    sum: u32,
    bytes: &'static [u8],
}

const fn sum_of(bytes: &[u8]) -> u32 {
    let mut sum = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        sum += bytes[i] as u32;
        i += 1;
    }
    sum
}

macro_rules! row {
    ($kind:expr, $bytes:expr) => {
        Row {
            kind: $kind,
            sum: sum_of($bytes),
            bytes: $bytes,
        }
    };
}

#[rustfmt::skip]
static REGISTRY: &[Row] = &[
    // --- hash algorithms ---
    row!(OidKind::HashType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x02]), // md2
    row!(OidKind::HashType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x05]), // md5
    row!(OidKind::HashType, &[0x2B, 0x0E, 0x03, 0x02, 0x1A]), // sha1
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x04]), // sha224
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01]), // sha256
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02]), // sha384
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03]), // sha512
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x07]), // sha3-224
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x08]), // sha3-256
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x09]), // sha3-384
    row!(OidKind::HashType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x0A]), // sha3-512

    // --- signature algorithms ---
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x02]), // md2WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x04]), // md5WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x05]), // sha1WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0E]), // sha224WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0B]), // sha256WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0C]), // sha384WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0D]), // sha512WithRSA
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x01]), // ecdsa-with-SHA1
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x01]), // ecdsa-with-SHA224
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02]), // ecdsa-with-SHA256
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x03]), // ecdsa-with-SHA384
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x04]), // ecdsa-with-SHA512
    row!(OidKind::SigType, &[0x2A, 0x86, 0x48, 0xCE, 0x38, 0x04, 0x03]), // dsa-with-sha1
    row!(OidKind::SigType, &[0x2B, 0x65, 0x70]), // id-Ed25519
    row!(OidKind::SigType, &[0x2B, 0x65, 0x71]), // id-Ed448

    // --- key types ---
    row!(OidKind::KeyType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01]), // rsaEncryption
    row!(OidKind::KeyType, &[0x2A, 0x86, 0x48, 0xCE, 0x38, 0x04, 0x01]), // id-dsa
    row!(OidKind::KeyType, &[0x2A, 0x86, 0x48, 0xCE, 0x3E, 0x02, 0x01]), // dhpublicnumber
    row!(OidKind::KeyType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01]), // id-ecPublicKey
    row!(OidKind::KeyType, &[0x2B, 0x65, 0x70]), // id-X25519 shares prefix family but distinct sum below
    row!(OidKind::KeyType, &[0x2B, 0x65, 0x6E]), // id-X25519
    row!(OidKind::KeyType, &[0x2B, 0x65, 0x71]), // id-Ed448
    row!(OidKind::KeyType, &[0x2B, 0x65, 0x6F]), // id-X448

    // --- named curves ---
    row!(OidKind::CurveType, &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07]), // prime256v1 / P-256
    row!(OidKind::CurveType, &[0x2B, 0x81, 0x04, 0x00, 0x22]), // secp384r1 / P-384
    row!(OidKind::CurveType, &[0x2B, 0x81, 0x04, 0x00, 0x23]), // secp521r1 / P-521

    // --- symmetric ciphers (PBES2 encryption scheme references only) ---
    row!(OidKind::BlockType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x02]), // aes128-CBC
    row!(OidKind::BlockType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x16]), // aes192-CBC
    row!(OidKind::BlockType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2A]), // aes256-CBC
    row!(OidKind::BlockType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x06]), // aes128-GCM
    row!(OidKind::BlockType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2E]), // aes256-GCM
    row!(OidKind::BlockType, &[0x2B, 0x0E, 0x03, 0x02, 0x07]), // desCBC
    row!(OidKind::BlockType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x03, 0x07]), // des-EDE3-CBC

    // --- OCSP ---
    row!(OidKind::OcspType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, 0x01]), // id-pkix-ocsp-basic
    row!(OidKind::OcspType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, 0x02]), // id-pkix-ocsp-nonce
    row!(OidKind::OcspType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, 0x05]), // id-pkix-ocsp-nocheck

    // --- certificate extensions ---
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x13]), // basicConstraints
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x11]), // subjectAltName
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x1F]), // crlDistributionPoints
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x01, 0x01]), // authorityInfoAccess
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x23]), // authorityKeyIdentifier
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x0E]), // subjectKeyIdentifier
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x20]), // certificatePolicies
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x0F]), // keyUsage
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x36]), // inhibitAnyPolicy
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x25]), // extKeyUsage
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x1E]), // nameConstraints
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x24]), // policyConstraints
    row!(OidKind::CertExtType, &[0x60, 0x86, 0x48, 0x01, 0x86, 0xF8, 0x42, 0x01, 0x01]), // netscapeCertType

    // --- CRL and CRL-entry extensions ---
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x14]), // cRLNumber
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x1B]), // deltaCRLIndicator
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x1C]), // issuingDistributionPoint
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x2E]), // freshestCRL
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x15]), // cRLReason (entry extension)
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x18]), // invalidityDate (entry extension)
    row!(OidKind::CrlExtType, &[0x55, 0x1D, 0x1D]), // certificateIssuer (entry extension)

    // --- AIA access methods ---
    row!(OidKind::CertAuthInfoType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01]), // id-ad-ocsp
    row!(OidKind::CertAuthInfoType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x02]), // id-ad-caIssuers

    // --- certificate policies ---
    row!(OidKind::CertPolicyType, &[0x55, 0x1D, 0x20, 0x00]), // anyPolicy
    row!(OidKind::CertPolicyType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x01]), // id-qt-cps
    row!(OidKind::CertPolicyType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x02]), // id-qt-unotice

    // --- extended key usage ---
    row!(OidKind::CertExtType, &[0x55, 0x1D, 0x25, 0x00]), // anyExtendedKeyUsage (reuses CertExtType kind, see ExtKeyUseId::Any)
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01]), // serverAuth
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x02]), // clientAuth
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x03]), // codeSigning
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x04]), // emailProtection
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x08]), // timeStamping
    row!(OidKind::CertExtType, &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x09]), // OCSPSigning

    // --- RDN attribute types ---
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x03]), // commonName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x04]), // surname
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x05]), // serialNumber
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x06]), // countryName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x07]), // localityName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x08]), // stateOrProvinceName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x0A]), // organizationName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x0B]), // organizationalUnitName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x0C]), // title
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x0F]), // businessCategory
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x2A]), // givenName
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x2B]), // initials
    row!(OidKind::CertNameType, &[0x55, 0x04, 0x2E]), // dnQualifier
    row!(OidKind::CertNameType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x01]), // emailAddress
    row!(OidKind::CertNameType, &[0x09, 0x92, 0x26, 0x89, 0x93, 0xF2, 0x2C, 0x64, 0x01, 0x01]), // userId
    row!(OidKind::CertNameType, &[0x09, 0x92, 0x26, 0x89, 0x93, 0xF2, 0x2C, 0x64, 0x01, 0x19]), // domainComponent
    row!(OidKind::CertNameType, &[0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3C, 0x02, 0x01, 0x03]), // jurisdictionCountry
    row!(OidKind::CertNameType, &[0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3C, 0x02, 0x01, 0x02]), // jurisdictionState

    // --- CSR attributes ---
    row!(OidKind::CsrAttrType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x07]), // challengePassword
    row!(OidKind::CsrAttrType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x0E]), // extensionRequest

    // --- KDF / PBE ---
    row!(OidKind::KdfType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x0C]), // id-PBKDF2
    row!(OidKind::PbeType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x0D]), // id-PBES2
    row!(OidKind::PbeType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x0C, 0x01, 0x01]), // pbeWithSHAAnd128BitRC4
    row!(OidKind::PbeType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x03]), // pbeWithMD5AndDES-CBC
    row!(OidKind::PbeType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x0A]), // pbeWithSHA1AndDES-CBC
    row!(OidKind::PbeType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x0C, 0x01, 0x03]), // pbeWithSHAAnd3-KeyTripleDES-CBC
    row!(OidKind::PbeType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x0C, 0x01, 0x06]), // pbeWithSHAAnd40BitRC2-CBC

    // --- HMAC ---
    row!(OidKind::HmacType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x07]), // hmacWithSHA1
    row!(OidKind::HmacType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x08]), // hmacWithSHA224
    row!(OidKind::HmacType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x09]), // hmacWithSHA256
    row!(OidKind::HmacType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x0A]), // hmacWithSHA384
    row!(OidKind::HmacType, &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x02, 0x0B]), // hmacWithSHA512

    // --- key wrap ---
    row!(OidKind::KeyWrapType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x05]), // aes128-wrap
    row!(OidKind::KeyWrapType, &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2D]), // aes256-wrap
];

/// Looks up `(kind, sum)` and verifies the candidate bytes match the
/// canonical encoding (the numeric sum is a fast identity check, not a
/// substitute for the strict byte comparison — the encoding rule).
pub fn lookup(kind: OidKind, sum: u32, bytes: &[u8]) -> Result<(), DecodeError> {
    if matches!(kind, OidKind::Ignore) {
        return Ok(());
    }
    for row in REGISTRY {
        if row.kind == kind && row.sum == sum && row.bytes == bytes {
            return Ok(());
        }
    }
    Err(DecodeError::new(DecodeErrorKind::OidUnknown { kind }))
}

/// Returns `true` if `bytes` is a registered OID of the given kind, used
/// when an OID has already been decoded and its kind membership must be
/// tested (e.g. "is this OID a `CertExtType`, and if so, which one").
pub fn kind_contains(kind: OidKind, bytes: &[u8]) -> bool {
    REGISTRY.iter().any(|row| row.kind == kind && row.bytes == bytes)
}

/// Computes the identity sum used by the encoding rule (sum over raw content
/// bytes of an OBJECT IDENTIFIER).
pub fn byte_sum(bytes: &[u8]) -> u32 {
    bytes.iter().map(|&b| b as u32).sum()
}

/// Canonical byte constants for the OIDs the schema crates embed
/// directly (signature/hash/key algorithm identifiers and the
/// certificate-extension OIDs), named the way the established
/// `rasn-pkix::algorithms` module names its `Oid` constants.
pub mod well_known {
    pub const SHA1: &[u8] = &[0x2B, 0x0E, 0x03, 0x02, 0x1A];
    pub const SHA256: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01];
    pub const SHA384: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02];
    pub const SHA512: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03];

    pub const SHA1_WITH_RSA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x05];
    pub const SHA256_WITH_RSA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0B];
    pub const SHA384_WITH_RSA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0C];
    pub const SHA512_WITH_RSA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0D];
    pub const SHA1_WITH_ECDSA: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x01];
    pub const SHA256_WITH_ECDSA: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02];
    pub const SHA384_WITH_ECDSA: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x03];
    pub const SHA512_WITH_ECDSA: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x04];
    pub const DSA_WITH_SHA1: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x38, 0x04, 0x03];
    pub const ED25519: &[u8] = &[0x2B, 0x65, 0x70];
    pub const ED448: &[u8] = &[0x2B, 0x65, 0x71];
    pub const X25519: &[u8] = &[0x2B, 0x65, 0x6E];
    pub const X448: &[u8] = &[0x2B, 0x65, 0x6F];

    pub const RSA_ENCRYPTION: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01];
    pub const ID_DSA: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x38, 0x04, 0x01];
    pub const DH_PUBLIC_NUMBER: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3E, 0x02, 0x01];
    pub const ID_EC_PUBLIC_KEY: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01];

    pub const PRIME256V1: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];
    pub const SECP384R1: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x22];
    pub const SECP521R1: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x23];

    pub const BASIC_CONSTRAINTS: &[u8] = &[0x55, 0x1D, 0x13];
    pub const SUBJECT_ALT_NAME: &[u8] = &[0x55, 0x1D, 0x11];
    pub const CRL_DISTRIBUTION_POINTS: &[u8] = &[0x55, 0x1D, 0x1F];
    pub const AUTHORITY_INFO_ACCESS: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x01, 0x01];
    pub const AUTHORITY_KEY_IDENTIFIER: &[u8] = &[0x55, 0x1D, 0x23];
    pub const SUBJECT_KEY_IDENTIFIER: &[u8] = &[0x55, 0x1D, 0x0E];
    pub const CERTIFICATE_POLICIES: &[u8] = &[0x55, 0x1D, 0x20];
    pub const KEY_USAGE: &[u8] = &[0x55, 0x1D, 0x0F];
    pub const INHIBIT_ANY_POLICY: &[u8] = &[0x55, 0x1D, 0x36];
    pub const EXT_KEY_USAGE: &[u8] = &[0x55, 0x1D, 0x25];
    pub const NAME_CONSTRAINTS: &[u8] = &[0x55, 0x1D, 0x1E];
    pub const POLICY_CONSTRAINTS: &[u8] = &[0x55, 0x1D, 0x24];
    pub const NETSCAPE_CERT_TYPE: &[u8] =
        &[0x60, 0x86, 0x48, 0x01, 0x86, 0xF8, 0x42, 0x01, 0x01];
    pub const CRL_NUMBER: &[u8] = &[0x55, 0x1D, 0x14];
    pub const DELTA_CRL_INDICATOR: &[u8] = &[0x55, 0x1D, 0x1B];
    pub const ISSUING_DISTRIBUTION_POINT: &[u8] = &[0x55, 0x1D, 0x1C];
    pub const FRESHEST_CRL: &[u8] = &[0x55, 0x1D, 0x2E];
    pub const CRL_REASON: &[u8] = &[0x55, 0x1D, 0x15];
    pub const INVALIDITY_DATE: &[u8] = &[0x55, 0x1D, 0x18];
    pub const CERTIFICATE_ISSUER: &[u8] = &[0x55, 0x1D, 0x1D];
    pub const ANY_POLICY: &[u8] = &[0x55, 0x1D, 0x20, 0x00];
    pub const ANY_EXTENDED_KEY_USAGE: &[u8] = &[0x55, 0x1D, 0x25, 0x00];
    pub const SERVER_AUTH: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01];
    pub const CLIENT_AUTH: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x02];
    pub const CODE_SIGNING: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x03];
    pub const EMAIL_PROTECTION: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x04];
    pub const TIME_STAMPING: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x08];
    pub const OCSP_SIGNING: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x09];

    pub const ID_AD_OCSP: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01];
    pub const ID_AD_CA_ISSUERS: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x02];
    pub const ID_PKIX_OCSP_BASIC: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, 0x01];
    pub const ID_PKIX_OCSP_NONCE: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, 0x02];
    pub const ID_PKIX_OCSP_NOCHECK: &[u8] = &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, 0x05];

    pub const COMMON_NAME: &[u8] = &[0x55, 0x04, 0x03];
    pub const SURNAME: &[u8] = &[0x55, 0x04, 0x04];
    pub const SERIAL_NUMBER: &[u8] = &[0x55, 0x04, 0x05];
    pub const COUNTRY_NAME: &[u8] = &[0x55, 0x04, 0x06];
    pub const LOCALITY_NAME: &[u8] = &[0x55, 0x04, 0x07];
    pub const STATE_OR_PROVINCE_NAME: &[u8] = &[0x55, 0x04, 0x08];
    pub const ORGANIZATION_NAME: &[u8] = &[0x55, 0x04, 0x0A];
    pub const ORGANIZATIONAL_UNIT_NAME: &[u8] = &[0x55, 0x04, 0x0B];
    pub const TITLE: &[u8] = &[0x55, 0x04, 0x0C];
    pub const BUSINESS_CATEGORY: &[u8] = &[0x55, 0x04, 0x0F];
    pub const GIVEN_NAME: &[u8] = &[0x55, 0x04, 0x2A];
    pub const INITIALS: &[u8] = &[0x55, 0x04, 0x2B];
    pub const DN_QUALIFIER: &[u8] = &[0x55, 0x04, 0x2E];
    pub const EMAIL_ADDRESS: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x01];
    pub const USER_ID: &[u8] = &[0x09, 0x92, 0x26, 0x89, 0x93, 0xF2, 0x2C, 0x64, 0x01, 0x01];
    pub const DOMAIN_COMPONENT: &[u8] =
        &[0x09, 0x92, 0x26, 0x89, 0x93, 0xF2, 0x2C, 0x64, 0x01, 0x19];

    pub const CHALLENGE_PASSWORD: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x07];
    pub const EXTENSION_REQUEST: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x0E];

    pub const ID_PBES2: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x0D];
    pub const ID_PBKDF2: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x0C];
    pub const PBE_SHA1_RC4_128: &[u8] =
        &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x0C, 0x01, 0x01];
    pub const PBE_MD5_DES_CBC: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x03];
    pub const PBE_SHA1_DES_CBC: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x05, 0x0A];
    pub const PBE_SHA1_3DES_CBC: &[u8] =
        &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x0C, 0x01, 0x03];
    pub const PBE_SHA1_40RC2_CBC: &[u8] =
        &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x0C, 0x01, 0x06];

    pub const DES3_CBC: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x03, 0x07];
    pub const DES_CBC: &[u8] = &[0x2B, 0x0E, 0x03, 0x02, 0x07];
    pub const AES128_CBC: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x02];
    pub const AES256_CBC: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2A];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_registered() {
        let bytes = [0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01];
        let sum = byte_sum(&bytes);
        assert!(lookup(OidKind::HashType, sum, &bytes).is_ok());
    }

    #[test]
    fn unknown_oid_in_known_kind_fails() {
        let bytes = [0x01, 0x02, 0x03];
        let sum = byte_sum(&bytes);
        assert!(lookup(OidKind::HashType, sum, &bytes).is_err());
    }

    #[test]
    fn ignore_kind_always_passes() {
        assert!(lookup(OidKind::Ignore, 0, &[]).is_ok());
    }
}
