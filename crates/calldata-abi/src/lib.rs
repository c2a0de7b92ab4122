//! # calldata-abi
//!
//! Solidity contract ABI type system and call-data encoder.
//!
//! ## Features
//!
//! - **Types**: classify declared type strings (`uint256`, `bytes32`,
//!   `address[3]`, `tuple[]`) into [`ParamType`]
//! - **Encoding**: head/tail layout for static and dynamic values, nested
//!   arrays and tuples
//! - **Selectors**: canonical signatures and 4-byte function selectors
//! - **Interface**: JSON ABI parsing, overload-aware function lookup and
//!   constructor / function call data
//!
//! ## Quick Start
//!
//! ```rust
//! use calldata_abi::{Interface, Token};
//!
//! let abi = r#"[{
//!     "type": "function",
//!     "name": "setValue",
//!     "inputs": [{"name": "val", "type": "uint32"}],
//!     "outputs": [],
//!     "stateMutability": "nonpayable"
//! }]"#;
//!
//! let interface = Interface::from_json(abi)?;
//! let data = interface.encode_function_call_data("setValue", &[Token::uint(12345u64)])?;
//!
//! // selector followed by one 32-byte word
//! assert_eq!(data.len(), 36);
//! assert_eq!(&data[34..], &[0x30, 0x39]);
//! # Ok::<(), calldata_abi::AbiError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod classify;
mod config;
mod encode;
mod error;
mod integer;
mod interface;
mod json;
mod scalar;
mod selector;
mod types;
mod word;

pub use classify::{parse_param, parse_signature, parse_type};
pub use config::EncoderConfig;
pub use encode::{encode, encode_function_call, Encoder};
pub use error::{AbiError, AbiResult};
pub use integer::encode_integer;
pub use interface::{
    ErrorDef, EventDef, EventParam, FunctionDef, FunctionKind, Interface, InterfaceBuilder, Param,
    StateMutability,
};
pub use scalar::{encode_address, encode_bool, encode_bytes, encode_fixed_bytes, encode_string};
pub use selector::{selector, selector_from_signature, signature, signature_hash, Selector};
pub use types::{ParamType, Token, I256};
pub use word::{Word, WORD_SIZE};
