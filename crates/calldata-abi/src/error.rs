//! ABI error types

use thiserror::Error;

/// Errors raised while building an interface or encoding call data
#[derive(Debug, Error)]
pub enum AbiError {
    /// Malformed or inconsistent interface definition
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON interface could not be deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecognized type descriptor
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// No function with this name or signature
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Several overloads match a bare function name
    #[error("Ambiguous function: {0}")]
    AmbiguousFunction(String),

    /// Interface declares no constructor
    #[error("Constructor is not set")]
    MissingConstructor,

    /// Argument or element count differs from the declaration
    #[error("Arity mismatch: expected {expected} values, got {actual}")]
    ArityMismatch {
        /// Declared count
        expected: usize,
        /// Supplied count
        actual: usize,
    },

    /// Value shape doesn't fit the declared type
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Canonical declared type
        expected: String,
        /// Kind of value supplied
        actual: &'static str,
    },

    /// Sign, bit width or length violation
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Type or value nested deeper than the configured limit
    #[error("Nesting depth exceeds limit of {0}")]
    DepthExceeded(usize),

    /// Rejected encoder configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// ABI result type
pub type AbiResult<T> = Result<T, AbiError>;
