//! # coda-abi
//!
//! Ethereum Contract ABI encoding and decoding: the deterministic,
//! bidirectional mapping between structured values and the canonical
//! 32-byte-word layout used for contract call data, return data, and event
//! logs.
//!
//! This crate provides:
//!
//! - **Type parsing**: type strings and signatures into [`ParamType`] trees
//! - **Encoding**: (types, values) into head/tail call data
//! - **Decoding**: return data back into [`Token`] trees
//! - **Signatures**: canonical signatures, 4-byte selectors, event topics
//!
//! Transport, transaction assembly, signing, and hex framing of JSON-RPC
//! payloads live outside this crate; Keccak-256 is consumed from
//! `coda-crypto`.
//!
//! # Example
//!
//! ```rust
//! use coda_abi::{decode, encode, resolve_signature, Token};
//! use coda_primitives::U256;
//!
//! # fn main() -> Result<(), coda_abi::AbiError> {
//! // Resolve a human-written signature
//! let f = resolve_signature("balanceOf(address owner)")?;
//! assert_eq!(f.selector, [0x70, 0xa0, 0x82, 0x31]);
//!
//! // Encode the call body and decode a response
//! let types = f.input_types();
//! let owner = coda_primitives::Address::ZERO;
//! let call = encode(&types, &[Token::Address(owner)])?;
//! assert_eq!(call.len(), 32);
//!
//! let response = [0u8; 32];
//! let balance = decode(&[coda_abi::ParamType::Uint(256)], &response)?;
//! assert_eq!(balance[0], Token::Uint(U256::zero()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod error;
mod function;
mod parser;
mod token;
mod types;

pub use decode::{decode, decode_single, decode_strict};
pub use encode::{encode, encode_function_call, encode_single};
pub use error::AbiError;
pub use function::{
    erc20, event_topic, function_selector, resolve_signature, Contract, ContractBuilder, Function,
};
pub use parser::{parse_param_list, parse_type};
pub use token::{I256, Token};
pub use types::{Param, ParamType};

// Re-export primitives for convenience
pub use coda_primitives::{Address, H256, U256};
