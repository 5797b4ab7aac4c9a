//! ABI value model
//!
//! A [`Token`] tree mirrors the shape of its paired
//! [`ParamType`](crate::ParamType). Tokens are transient: built immediately
//! before an encode call, or freshly allocated by a decode call and handed
//! to the caller.

use std::fmt;

use coda_primitives::{Address, H256, U256};

/// Signed 256-bit integer in sign-magnitude form.
///
/// Two's complement only materializes at the wire boundary
/// ([`to_word`](I256::to_word) / [`from_word`](I256::from_word)); zero is
/// normalized to non-negative so values decode back to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Create a new signed value from magnitude and sign
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from an `i128`
    pub fn from_i128(value: i128) -> Self {
        if value < 0 {
            Self::new(U256::from(value.unsigned_abs()), true)
        } else {
            Self::new(U256::from(value as u128), false)
        }
    }

    /// Magnitude
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// Whether the value is strictly negative
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Encode as a 32-byte two's-complement big-endian word
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        self.abs.to_big_endian(&mut word);
        if self.negative {
            word = negate_word(word);
        }
        word
    }

    /// Decode from a 32-byte two's-complement big-endian word
    pub fn from_word(word: [u8; 32]) -> Self {
        if word[0] & 0x80 != 0 {
            Self::new(U256::from_big_endian(&negate_word(word)), true)
        } else {
            Self::new(U256::from_big_endian(&word), false)
        }
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// Two's complement negation: flip all bits, add one
fn negate_word(word: [u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, b) in word.iter().enumerate() {
        out[i] = !b;
    }
    let mut carry = 1u16;
    for i in (0..32).rev() {
        let sum = out[i] as u16 + carry;
        out[i] = sum as u8;
        carry = sum >> 8;
    }
    out
}

/// Solidity ABI values
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
    /// Dynamic byte string
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Array elements, in order; the paired type decides whether the array
    /// is fixed- or variable-length
    Array(Vec<Token>),
    /// Tuple fields as ordered (name, value) pairs; unnamed components carry
    /// their positional index as the name
    Tuple(Vec<(String, Token)>),
}

impl Token {
    /// Create an unsigned integer token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create a signed integer token from an `i128`
    pub fn int(value: i128) -> Self {
        Token::Int(I256::from_i128(value))
    }

    /// Create an address token
    pub fn address(addr: Address) -> Self {
        Token::Address(addr)
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Create a `bytes32` token from a hash/word
    pub fn bytes32(word: H256) -> Self {
        Token::FixedBytes(word.as_bytes().to_vec())
    }

    /// Create a tuple token with positional field names ("0", "1", ...)
    pub fn tuple(values: Vec<Token>) -> Self {
        Token::Tuple(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        )
    }

    /// Short label for the value variant, used in mismatch errors
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
            Token::Tuple(_) => "tuple",
        }
    }

    /// Extract an unsigned integer
    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(v),
            _ => None,
        }
    }

    /// Extract a signed integer
    pub fn into_int(self) -> Option<I256> {
        match self {
            Token::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Extract an address
    pub fn into_address(self) -> Option<Address> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Extract a boolean
    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Extract dynamic or fixed-size bytes
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Token::Bytes(b) | Token::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    /// Extract a string
    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract array elements
    pub fn into_array(self) -> Option<Vec<Token>> {
        match self {
            Token::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Extract tuple fields
    pub fn into_tuple(self) -> Option<Vec<(String, Token)>> {
        match self {
            Token::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a tuple field by name
    pub fn field(&self, name: &str) -> Option<&Token> {
        match self {
            Token::Tuple(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}
