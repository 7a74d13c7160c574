//! 256-bit unsigned integer with a fixed 32-byte little-endian encoding.

use crate::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;
use std::fmt;
use std::str::FromStr;

/// The length of `U256` values in bytes.
pub const U256_SIZE: usize = 32;

/// Unsigned 256-bit integer stored as little-endian bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U256([u8; U256_SIZE]);

impl U256 {
    /// Zero.
    pub const ZERO: Self = Self([0u8; U256_SIZE]);

    /// `2^256 - 1`.
    pub const MAX: Self = Self([0xFFu8; U256_SIZE]);

    /// Wraps little-endian bytes.
    pub const fn from_le_bytes(bytes: [u8; U256_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the little-endian bytes.
    pub const fn to_le_bytes(&self) -> [u8; U256_SIZE] {
        self.0
    }

    /// Converts an arbitrary-precision unsigned value, failing when it needs more than 256 bits.
    pub fn from_biguint(value: &BigUint) -> IoResult<Self> {
        if value.bits() > (U256_SIZE as u64) * 8 {
            return Err(IoError::out_of_range("u256", value));
        }
        let digits = value.to_bytes_le();
        let mut bytes = [0u8; U256_SIZE];
        bytes[..digits.len()].copy_from_slice(&digits);
        Ok(Self(bytes))
    }

    /// Converts an arbitrary-precision signed value, failing on negatives and overflow.
    pub fn from_bigint(value: &BigInt) -> IoResult<Self> {
        match value.sign() {
            Sign::Minus => Err(IoError::out_of_range("u256", value)),
            _ => match value.to_biguint() {
                Some(magnitude) => Self::from_biguint(&magnitude),
                None => Err(IoError::out_of_range("u256", value)),
            },
        }
    }

    /// Returns the value as an arbitrary-precision integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0)
    }

    /// Narrows to `u128`, or `None` if the value does not fit.
    pub fn to_u128(&self) -> Option<u128> {
        self.to_biguint().to_u128()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; U256_SIZE];
        bytes[..16].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }
}

impl TryFrom<&BigUint> for U256 {
    type Error = IoError;

    fn try_from(value: &BigUint) -> Result<Self, Self::Error> {
        Self::from_biguint(value)
    }
}

impl TryFrom<&BigInt> for U256 {
    type Error = IoError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        Self::from_bigint(value)
    }
}

impl FromStr for U256 {
    type Err = IoError;

    /// Parses a decimal integer, with an optional leading minus that is rejected as out of range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigInt::from_str(s.trim())
            .map_err(|_| IoError::invalid_data(format!("invalid u256 literal {s:?}")))?;
        Self::from_bigint(&value)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({self})")
    }
}

impl Serializable for U256 {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.0);
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_fixed::<U256_SIZE>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SerializableExt;
    use num_traits::One;

    #[test]
    fn test_small_values_little_endian() {
        let value = U256::from(0x0102u64);
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes.len(), U256_SIZE);
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);
        assert_eq!(U256::from_bytes(&bytes).unwrap(), value);
        assert_eq!(value.to_u128(), Some(0x0102));
        assert_eq!(U256::MAX.to_u128(), None);
    }

    #[test]
    fn test_max_value_accepted() {
        let max = (BigUint::one() << 256u32) - BigUint::one();
        let value = U256::from_biguint(&max).unwrap();
        assert_eq!(value, U256::MAX);
        assert_eq!(value.to_biguint(), max);
    }

    #[test]
    fn test_overflow_rejected() {
        let too_big = BigUint::one() << 256u32;
        assert!(matches!(
            U256::from_biguint(&too_big),
            Err(IoError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            U256::from_bigint(&BigInt::from(-1)),
            Err(IoError::OutOfRange { .. })
        ));
        assert!(matches!("-5".parse::<U256>(), Err(IoError::OutOfRange { .. })));
    }

    #[test]
    fn test_decimal_parse_and_display() {
        let text = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let value: U256 = text.parse().unwrap();
        assert_eq!(value, U256::MAX);
        assert_eq!(value.to_string(), text);
        assert_eq!(U256::ZERO.to_string(), "0");
        assert!("abc".parse::<U256>().is_err());
    }
}
