//! RSA, DSA, DH, EC, and EdDSA key schemas, the PKCS#8 private-key
//! wrapper, and PBES1/PBES2 encrypted-key bodies, built on `tasn1`'s
//! template and primitive codec.

pub mod dsa;
pub mod ec;
pub mod edwards;
pub mod error;
pub mod pbe;
pub mod pkcs8;
pub mod rsa;

pub use error::KeyError;
