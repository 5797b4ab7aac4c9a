//! 256-bit hash / word type

use std::fmt;
use thiserror::Error;

/// Hash parsing error
#[derive(Debug, Error)]
pub enum HashError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid hash length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        got: usize,
    },
}

/// 256-bit hash (32 bytes).
///
/// Also the natural carrier for a single ABI word, e.g. a `bytes32` value or
/// an event topic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct H256([u8; 32]);

impl H256 {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Zero hash
    pub const ZERO: H256 = H256([0u8; 32]);

    /// Create from a byte array
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }

    /// Create from a slice, checking the length
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        if slice.len() != Self::LEN {
            return Err(HashError::InvalidLength {
                expected: Self::LEN,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(H256(bytes))
    }

    /// Parse from a hex string, with or without `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Render as a lowercase hex string with `0x` prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for H256 {
    fn from(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
