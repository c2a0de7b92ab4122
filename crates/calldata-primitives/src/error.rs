//! Error type for primitive parsing

use thiserror::Error;

/// Primitive parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Input was not valid hex
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required byte length
        expected: usize,
        /// Byte length supplied
        actual: usize,
    },
}
