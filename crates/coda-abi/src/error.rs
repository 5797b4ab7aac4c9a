//! ABI error types

use thiserror::Error;

/// ABI codec error.
///
/// All variants indicate a programming error, a malformed schema, or a
/// malformed wire response. None are transient; the codec never retries.
#[derive(Debug, Error)]
pub enum AbiError {
    /// Malformed type or signature string
    #[error("type syntax error: {0}")]
    TypeSyntax(String),

    /// Value shape inconsistent with its paired type
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// What the type required
        expected: String,
        /// What the value provided
        got: String,
    },

    /// Integer out of the bit-width's representable range, or negative
    /// where an unsigned type was expected
    #[error("value out of range for {ty}: {value}")]
    NumericRange {
        /// Canonical type name
        ty: String,
        /// Offending value, rendered in decimal
        value: String,
    },

    /// Fixed-size length violated by a `bytesN` or `T[N]` value
    #[error("length mismatch for {ty}: expected {expected}, got {got}")]
    LengthMismatch {
        /// Canonical type name
        ty: String,
        /// Declared length
        expected: usize,
        /// Actual value length
        got: usize,
    },

    /// Buffer ends before a declared head slot or tail segment
    #[error("buffer too short: need {needed} bytes, have {have}")]
    BufferTooShort {
        /// Bytes required to continue decoding
        needed: usize,
        /// Bytes actually available
        have: usize,
    },

    /// Dynamic pointer resolves outside the valid tail region
    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    /// Declared byte length or element count would read past the buffer
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Unconsumed bytes after the last tail segment (strict decoding only)
    #[error("{0} unconsumed trailing bytes")]
    TrailingData(usize),

    /// Non-UTF-8 bytes under a `string` type
    #[error("invalid utf-8 in string data: {0}")]
    InvalidUtf8(String),

    /// Function name not registered on a [`Contract`](crate::Contract)
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}
