//! # calldata-primitives
//!
//! Fixed-size value types used when building contract call data.
//!
//! - [`Address`]: 20-byte account address
//! - [`H256`]: 32-byte hash / ABI word
//! - [`U256`]: 256-bit unsigned integer (re-exported from `primitive-types`)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::{Address, ADDRESS_LENGTH};
pub use error::PrimitiveError;
pub use hash::{H256, HASH_LENGTH};

pub use primitive_types::U256;

/// Strip an optional `0x` / `0X` prefix and hex-decode the remainder.
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))
}
