//! `Mpi`, a thin newtype over [`num_bigint`] standing in for its
//! X-MP external collaborator. The template engine only ever needs to
//! construct one from big-endian bytes, read it back out, and ask its
//! size/sign — real RSA/DSA/ECDSA arithmetic stays outside this crate.

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::{DecodeError, DecodeErrorKind};

/// An arbitrary-precision integer as read from, or to be written as, a
/// DER `INTEGER` content field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpi(BigInt);

impl Mpi {
    /// Builds an `Mpi` from the two's-complement big-endian bytes DER
    /// uses for `INTEGER` content (leading zero already stripped or kept
    /// by the caller as appropriate; see `primitives::integer`).
    pub fn from_signed_be_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::new(DecodeErrorKind::MpInit { len: 0 }));
        }
        let negative = bytes[0] & 0x80 != 0;
        if !negative {
            return Ok(Self(BigInt::from_biguint(
                Sign::Plus,
                BigUint::from_bytes_be(bytes),
            )));
        }
        // Two's complement decode: invert and add one over the magnitude.
        let mut inverted: Vec<u8> = bytes.iter().map(|b| !b).collect();
        let mut carry = 1u16;
        for byte in inverted.iter_mut().rev() {
            let sum = *byte as u16 + carry;
            *byte = sum as u8;
            carry = sum >> 8;
            if carry == 0 {
                break;
            }
        }
        let magnitude = BigUint::from_bytes_be(&inverted);
        Ok(Self(BigInt::from_biguint(Sign::Minus, magnitude)))
    }

    /// Builds a non-negative `Mpi` straight from an unsigned magnitude
    /// (the common case: serial numbers, moduli, exponents).
    pub fn from_unsigned_be_bytes(bytes: &[u8]) -> Self {
        Self(BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_be(bytes)))
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Minimal big-endian magnitude bytes (no sign, no padding).
    pub fn to_unsigned_be_bytes(&self) -> Vec<u8> {
        self.0.to_biguint().unwrap_or_default().to_bytes_be()
    }

    /// `true` if the encoded unsigned magnitude's top bit is set, i.e. a
    /// `0x00` sign-pad byte is required on encode.
    pub fn needs_sign_pad(&self) -> bool {
        self.to_unsigned_be_bytes()
            .first()
            .is_some_or(|b| b & 0x80 != 0)
    }

    /// Minimal two's-complement big-endian bytes, sign included — the
    /// DER content a signed `INTEGER` needs.
    pub fn to_signed_be_bytes(&self) -> Vec<u8> {
        self.0.to_signed_bytes_be()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn from_bigint(value: BigInt) -> Self {
        Self(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(BigInt::from(value))
    }

    pub fn to_i64(&self) -> Option<i64> {
        num_traits::ToPrimitive::to_i64(&self.0)
    }
}

impl core::fmt::Display for Mpi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_roundtrips() {
        let mpi = Mpi::from_signed_be_bytes(&[0x00]).unwrap();
        assert_eq!(mpi.to_unsigned_be_bytes(), Vec::<u8>::new());
        assert!(!mpi.needs_sign_pad());
    }

    #[test]
    fn positive_with_high_bit_needs_pad() {
        let mpi = Mpi::from_unsigned_be_bytes(&[0x85]);
        assert!(mpi.needs_sign_pad());
    }
}
