//! ABI encoding
//!
//! Tuples, function argument lists and arrays share one head/tail layout:
//! static members are written inline in the head, dynamic members get a head
//! slot holding the byte offset (from the start of the enclosing tuple) of
//! their data in the tail.

use tracing::trace;

use crate::integer::encode_integer;
use crate::scalar::{encode_address, encode_bool, encode_bytes, encode_fixed_bytes, encode_string};
use crate::selector::Selector;
use crate::word::usize_word;
use crate::{AbiError, AbiResult, EncoderConfig, ParamType, Token, I256};

/// Encode tokens against their declared types with the default config
pub fn encode(types: &[ParamType], tokens: &[Token]) -> AbiResult<Vec<u8>> {
    Encoder::default().encode_tuple(types, tokens)
}

/// Encode function call (selector + params)
pub fn encode_function_call(
    selector: Selector,
    types: &[ParamType],
    tokens: &[Token],
) -> AbiResult<Vec<u8>> {
    let mut result = selector.to_vec();
    result.extend(encode(types, tokens)?);
    Ok(result)
}

/// Head/tail encoder bounded by an [`EncoderConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Create an encoder with the given limits
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `tokens` as a tuple of `types`
    pub fn encode_tuple(&self, types: &[ParamType], tokens: &[Token]) -> AbiResult<Vec<u8>> {
        let members: Vec<&ParamType> = types.iter().collect();
        self.encode_members(&members, tokens, 0)
    }

    fn encode_members(
        &self,
        types: &[&ParamType],
        tokens: &[Token],
        depth: usize,
    ) -> AbiResult<Vec<u8>> {
        if types.len() != tokens.len() {
            return Err(AbiError::ArityMismatch {
                expected: types.len(),
                actual: tokens.len(),
            });
        }

        let head_size = types
            .iter()
            .try_fold(0usize, |acc, t| acc.checked_add(t.checked_head_size()?))
            .ok_or_else(|| AbiError::OutOfRange("head size overflows usize".to_string()))?;
        let mut head = Vec::new();
        let mut tail = Vec::new();

        for (param_type, token) in types.iter().zip(tokens) {
            if param_type.is_dynamic() {
                let offset = head_size + tail.len();
                trace!(%param_type, offset, "dynamic member");
                head.extend_from_slice(&usize_word(offset));
                tail.extend(self.encode_token(param_type, token, depth + 1)?);
            } else {
                head.extend(self.encode_token(param_type, token, depth + 1)?);
            }
        }

        head.extend(tail);
        Ok(head)
    }

    fn encode_token(
        &self,
        param_type: &ParamType,
        token: &Token,
        depth: usize,
    ) -> AbiResult<Vec<u8>> {
        let composite = matches!(
            param_type,
            ParamType::FixedArray(..) | ParamType::Array(_) | ParamType::Tuple(_)
        );
        if composite && depth > self.config.max_depth {
            return Err(AbiError::DepthExceeded(self.config.max_depth));
        }

        match param_type {
            // Fixed-point values arrive already scaled by 10^decimals.
            ParamType::Uint(bits) | ParamType::UFixed(bits, _) => {
                let value = integer_value(param_type, token)?;
                Ok(encode_integer(&value, *bits, false)?.to_vec())
            }
            ParamType::Int(bits) | ParamType::Fixed(bits, _) => {
                let value = integer_value(param_type, token)?;
                Ok(encode_integer(&value, *bits, true)?.to_vec())
            }
            ParamType::Bool => match token {
                Token::Bool(b) => Ok(encode_bool(*b)?.to_vec()),
                _ => Err(mismatch(param_type, token)),
            },
            ParamType::Address => match token {
                Token::Address(addr) => Ok(encode_address(addr.as_bytes())?.to_vec()),
                Token::FixedBytes(raw) | Token::Bytes(raw) => Ok(encode_address(raw)?.to_vec()),
                _ => Err(mismatch(param_type, token)),
            },
            ParamType::FixedBytes(size) => match token {
                Token::FixedBytes(data) => Ok(encode_fixed_bytes(data, *size)?.to_vec()),
                _ => Err(mismatch(param_type, token)),
            },
            ParamType::Bytes => match token {
                Token::Bytes(data) => Ok(encode_bytes(data)),
                _ => Err(mismatch(param_type, token)),
            },
            ParamType::String => match token {
                Token::String(s) => Ok(encode_string(s)),
                _ => Err(mismatch(param_type, token)),
            },
            ParamType::FixedArray(inner, size) => {
                let tokens = token.as_array().ok_or_else(|| mismatch(param_type, token))?;
                if tokens.len() != *size {
                    return Err(AbiError::ArityMismatch {
                        expected: *size,
                        actual: tokens.len(),
                    });
                }
                let members = vec![inner.as_ref(); *size];
                self.encode_members(&members, tokens, depth)
            }
            ParamType::Array(inner) => {
                let tokens = token.as_array().ok_or_else(|| mismatch(param_type, token))?;
                let members = vec![inner.as_ref(); tokens.len()];
                let mut result = usize_word(tokens.len()).to_vec();
                result.extend(self.encode_members(&members, tokens, depth)?);
                Ok(result)
            }
            ParamType::Tuple(types) => match token {
                Token::Tuple(tokens) => {
                    let members: Vec<&ParamType> = types.iter().collect();
                    self.encode_members(&members, tokens, depth)
                }
                _ => Err(mismatch(param_type, token)),
            },
        }
    }
}

fn integer_value(param_type: &ParamType, token: &Token) -> AbiResult<I256> {
    match token {
        Token::Uint(value) => Ok(I256::from(*value)),
        Token::Int(value) => Ok(*value),
        _ => Err(mismatch(param_type, token)),
    }
}

fn mismatch(param_type: &ParamType, token: &Token) -> AbiError {
    AbiError::TypeMismatch {
        expected: param_type.to_string(),
        actual: token.kind_name(),
    }
}
