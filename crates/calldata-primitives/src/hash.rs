//! 32-byte hash type

use std::fmt;

use crate::{decode_hex, PrimitiveError};

/// Hash size in bytes
pub const HASH_LENGTH: usize = 32;

/// 256-bit hash (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct H256([u8; HASH_LENGTH]);

impl H256 {
    /// Zero hash
    pub const ZERO: H256 = H256([0u8; HASH_LENGTH]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        H256(bytes)
    }

    /// Create from a slice of exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let bytes: [u8; HASH_LENGTH] =
            slice
                .try_into()
                .map_err(|_| PrimitiveError::InvalidLength {
                    expected: HASH_LENGTH,
                    actual: slice.len(),
                })?;
        Ok(H256(bytes))
    }

    /// Parse from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        Self::from_slice(&decode_hex(s)?)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_LENGTH]
    }

    /// Lowercase hex with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; HASH_LENGTH]> for H256 {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        H256(bytes)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h256_from_hex() {
        let hash = H256::from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert!(!hash.is_zero());
        assert_eq!(hash.as_bytes()[31], 1);
    }

    #[test]
    fn test_h256_wrong_length() {
        assert!(matches!(
            H256::from_hex("0x01"),
            Err(PrimitiveError::InvalidLength { expected: 32, actual: 1 })
        ));
    }
}
