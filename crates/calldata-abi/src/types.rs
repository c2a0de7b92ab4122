//! ABI type definitions

use std::fmt;
use std::str::FromStr;

use calldata_primitives::{Address, H256, U256};

use crate::word::WORD_SIZE;
use crate::AbiError;

/// Solidity parameter types.
///
/// Each variant is one kind of the ABI type grammar; its payload carries the
/// kind's metadata (bit width, fraction digits, byte length, array length,
/// components). Descriptors that match no kind never become a `ParamType`:
/// the classifier reports them as [`AbiError::UnknownType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Signed fixed-point number: bit size, decimal places
    Fixed(usize, usize),
    /// Unsigned fixed-point number: bit size, decimal places
    UFixed(usize, usize),
    /// Boolean
    Bool,
    /// Address
    Address,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Dynamic array
    Array(Box<ParamType>),
    /// Tuple
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(types) => types.iter().any(ParamType::is_dynamic),
            ParamType::Uint(_)
            | ParamType::Int(_)
            | ParamType::Fixed(..)
            | ParamType::UFixed(..)
            | ParamType::Bool
            | ParamType::Address
            | ParamType::FixedBytes(_) => false,
        }
    }

    /// Bytes this type occupies in the head of an enclosing tuple.
    ///
    /// Dynamic types take one offset slot. Static arrays and tuples are
    /// inlined, so they take the sum of their members.
    ///
    /// Saturates at `usize::MAX`; see [`ParamType::checked_head_size`].
    pub fn head_size(&self) -> usize {
        self.checked_head_size().unwrap_or(usize::MAX)
    }

    /// Head size, or `None` if it does not fit in `usize`
    pub fn checked_head_size(&self) -> Option<usize> {
        if self.is_dynamic() {
            return Some(WORD_SIZE);
        }
        match self {
            ParamType::FixedArray(inner, len) => inner.checked_head_size()?.checked_mul(*len),
            ParamType::Tuple(types) => types
                .iter()
                .try_fold(0usize, |acc, ty| acc.checked_add(ty.checked_head_size()?)),
            _ => Some(WORD_SIZE),
        }
    }
}

/// Canonical form used in signatures: `uint256`, `bytes32`, `(uint8,bool)[]`
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Fixed(bits, decimals) => write!(f, "fixed{}x{}", bits, decimals),
            ParamType::UFixed(bits, decimals) => write!(f, "ufixed{}x{}", bits, decimals),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Address => f.write_str("address"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::Tuple(types) => {
                f.write_str("(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", ty)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::classify::parse_type(s)
    }
}

/// Signed 256-bit integer in sign-magnitude form.
///
/// Covers `-(2^256 - 1) ..= 2^256 - 1`, wider than any ABI integer type, so
/// range checks happen against the declared type at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256
    pub fn new(abs: U256, negative: bool) -> Self {
        Self { abs, negative }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self {
            abs: U256::from(value.unsigned_abs()),
            negative: value < 0,
        }
    }

    /// Check if zero (of either sign)
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Strictly below zero; `-0` is not negative
    pub fn is_negative(&self) -> bool {
        self.negative && !self.abs.is_zero()
    }
}

impl From<U256> for I256 {
    fn from(abs: U256) -> Self {
        Self::new(abs, false)
    }
}

macro_rules! impl_i256_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for I256 {
                fn from(value: $t) -> Self {
                    Self::from_i128(value as i128)
                }
            }
        )*
    };
}

impl_i256_from!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

/// Parses an optionally `-`-prefixed decimal string
impl FromStr for I256 {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(AbiError::OutOfRange(format!("invalid integer {:?}", s)));
        }
        let abs = U256::from_dec_str(digits)
            .map_err(|e| AbiError::OutOfRange(format!("invalid integer {:?}: {:?}", s, e)))?;
        Ok(Self::new(abs, negative))
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// Solidity ABI token types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer
    Uint(U256),
    /// Signed integer
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
    /// Tuple (struct)
    Tuple(Vec<Token>),
}

impl Token {
    /// Create an address token
    pub fn address(addr: Address) -> Self {
        Token::Address(addr)
    }

    /// Create an unsigned integer token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create a signed integer token
    pub fn int(value: impl Into<I256>) -> Self {
        Token::Int(value.into())
    }

    /// Create a bytes token
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Token::Bytes(data.into())
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Create a bytes32 token
    pub fn bytes32(data: H256) -> Self {
        Token::FixedBytes(data.as_bytes().to_vec())
    }

    /// Short name of the token variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::Bool(_) => "bool",
            Token::Bytes(_) => "bytes",
            Token::FixedBytes(_) => "fixed bytes",
            Token::String(_) => "string",
            Token::Array(_) => "array",
            Token::FixedArray(_) => "fixed array",
            Token::Tuple(_) => "tuple",
        }
    }

    /// Elements of an array token of either kind
    pub fn as_array(&self) -> Option<&[Token]> {
        match self {
            Token::Array(tokens) | Token::FixedArray(tokens) => Some(tokens),
            _ => None,
        }
    }
}

impl From<Address> for Token {
    fn from(addr: Address) -> Self {
        Token::Address(addr)
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::Uint(value)
    }
}

impl From<I256> for Token {
    fn from(value: I256) -> Self {
        Token::Int(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::String(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint_array() -> ParamType {
        ParamType::Array(Box::new(ParamType::Uint(256)))
    }

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());
        assert!(!ParamType::Fixed(128, 18).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(uint_array().is_dynamic());
    }

    #[test]
    fn test_composite_dynamism_follows_members() {
        let static_arr = ParamType::FixedArray(Box::new(ParamType::Uint(8)), 3);
        assert!(!static_arr.is_dynamic());

        let dynamic_arr = ParamType::FixedArray(Box::new(ParamType::String), 3);
        assert!(dynamic_arr.is_dynamic());

        assert!(!ParamType::Tuple(vec![ParamType::Bool, ParamType::Address]).is_dynamic());
        assert!(ParamType::Tuple(vec![ParamType::Bool, ParamType::Bytes]).is_dynamic());
        assert!(!ParamType::Tuple(vec![]).is_dynamic());
    }

    #[test]
    fn test_head_size() {
        assert_eq!(ParamType::Uint(8).head_size(), 32);
        assert_eq!(ParamType::String.head_size(), 32);
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::Uint(8)), 3).head_size(),
            96
        );
        let nested = ParamType::Tuple(vec![
            ParamType::Bool,
            ParamType::FixedArray(Box::new(ParamType::Address), 2),
        ]);
        assert_eq!(nested.head_size(), 96);
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::Bytes), 4).head_size(),
            32
        );
    }

    #[test]
    fn test_head_size_overflow_saturates() {
        let huge = ParamType::FixedArray(Box::new(ParamType::Uint(256)), usize::MAX / 16);
        assert_eq!(huge.checked_head_size(), None);
        assert_eq!(huge.head_size(), usize::MAX);

        let tuple = ParamType::Tuple(vec![ParamType::Bool, huge]);
        assert_eq!(tuple.checked_head_size(), None);

        let fits = ParamType::FixedArray(Box::new(ParamType::Bool), 4);
        assert_eq!(fits.checked_head_size(), Some(128));
    }

    #[test]
    fn test_canonical_display() {
        assert_eq!(ParamType::Uint(256).to_string(), "uint256");
        assert_eq!(ParamType::UFixed(128, 18).to_string(), "ufixed128x18");
        assert_eq!(ParamType::FixedBytes(4).to_string(), "bytes4");
        let ty = ParamType::Array(Box::new(ParamType::Tuple(vec![
            ParamType::Uint(8),
            ParamType::FixedArray(Box::new(ParamType::Bool), 2),
        ])));
        assert_eq!(ty.to_string(), "(uint8,bool[2])[]");
    }

    #[test]
    fn test_i256_from_i128() {
        let positive = I256::from_i128(100);
        assert!(!positive.negative);
        assert_eq!(positive.abs, U256::from(100));

        let negative = I256::from_i128(-100);
        assert!(negative.negative);
        assert_eq!(negative.abs, U256::from(100));

        let min = I256::from_i128(i128::MIN);
        assert_eq!(min.abs, U256::from(1u128 << 127));

        assert!(I256::from_i128(0).is_zero());
    }

    #[test]
    fn test_i256_negative_zero_is_not_negative() {
        let neg_zero = I256::new(U256::zero(), true);
        assert!(neg_zero.is_zero());
        assert!(!neg_zero.is_negative());
        assert_eq!(neg_zero.to_string(), "0");
    }

    #[test]
    fn test_i256_from_str() {
        let value: I256 = "-12345".parse().unwrap();
        assert_eq!(value, I256::from(-12345i64));
        assert_eq!(value.to_string(), "-12345");
        assert!("12a".parse::<I256>().is_err());
        assert!("".parse::<I256>().is_err());
        assert!("-".parse::<I256>().is_err());
        assert_eq!("-0".parse::<I256>().unwrap().to_string(), "0");
    }

    #[test]
    fn test_token_kind_name() {
        assert_eq!(Token::Address(Address::ZERO).kind_name(), "address");
        assert_eq!(Token::uint(1u64).kind_name(), "uint");
        assert_eq!(Token::from("x").kind_name(), "string");
        assert!(Token::Array(vec![]).as_array().is_some());
        assert!(Token::Tuple(vec![]).as_array().is_none());
    }
}
