//! Elementary value encoders

use calldata_primitives::ADDRESS_LENGTH;

use crate::integer::encode_integer;
use crate::word::{pad_left, pad_right, padded_len, usize_word, Word};
use crate::{AbiError, AbiResult, I256};

/// `true` as 1, `false` as 0, in a uint256 word
pub fn encode_bool(value: bool) -> AbiResult<Word> {
    encode_integer(&I256::from(u8::from(value)), 256, false)
}

/// Left-pad up to 20 address bytes
pub fn encode_address(data: &[u8]) -> AbiResult<Word> {
    if data.len() > ADDRESS_LENGTH {
        return Err(AbiError::OutOfRange(format!(
            "address is {} bytes, at most {} allowed",
            data.len(),
            ADDRESS_LENGTH
        )));
    }
    Ok(pad_left(data, 0x00))
}

/// Right-pad up to `size` bytes for a `bytes<size>` slot
pub fn encode_fixed_bytes(data: &[u8], size: usize) -> AbiResult<Word> {
    if data.len() > size {
        return Err(AbiError::OutOfRange(format!(
            "{} bytes given for bytes{}",
            data.len(),
            size
        )));
    }
    Ok(pad_right(data, 0x00))
}

/// Length word followed by the content padded to a word boundary
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(32 + padded_len(data.len()));
    result.extend_from_slice(&usize_word(data.len()));
    result.extend_from_slice(data);
    result.resize(32 + padded_len(data.len()), 0);
    result
}

/// UTF-8 bytes of `s`, encoded as dynamic bytes
pub fn encode_string(s: &str) -> Vec<u8> {
    encode_bytes(s.as_bytes())
}
