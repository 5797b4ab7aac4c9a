//! Ethereum account address (20 bytes)

use std::fmt;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Error)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// 20-byte Ethereum address.
///
/// In ABI encodings an address occupies the low 20 bytes of a 32-byte word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of an address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from a byte array
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create an address from a slice, checking the length
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::LEN {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Parse an address from a hex string, with or without `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Render as a lowercase hex string with `0x` prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_roundtrip() {
        let original = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
        let addr = Address::from_hex(original).unwrap();
        assert_eq!(addr.to_hex(), original);

        // Prefix is optional, case is ignored
        let bare = Address::from_hex("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::default(), Address::ZERO);
        assert_eq!(
            Address::ZERO.to_hex(),
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        // Wrong lengths
        assert!(matches!(
            Address::from_hex("0x1234"),
            Err(AddressError::InvalidLength(2))
        ));
        assert!(matches!(
            Address::from_hex("0x"),
            Err(AddressError::InvalidLength(0))
        ));
        // Non-hex characters
        assert!(matches!(
            Address::from_hex("0xzz2d35cc6634c0532925a3b844bc9e7595f0ab3d"),
            Err(AddressError::InvalidHex(_))
        ));
        // Odd number of digits
        assert!(Address::from_hex("0x123").is_err());
    }

    #[test]
    fn test_from_slice_length_check() {
        assert!(Address::from_slice(&[0u8; 20]).is_ok());
        assert!(matches!(
            Address::from_slice(&[0u8; 19]),
            Err(AddressError::InvalidLength(19))
        ));
        assert!(matches!(
            Address::from_slice(&[0u8; 21]),
            Err(AddressError::InvalidLength(21))
        ));
    }

    #[test]
    fn test_display_and_debug() {
        let addr = Address::from_hex("0x000000000000000000000000000000000000dEaD").unwrap();
        assert_eq!(format!("{}", addr), "0x000000000000000000000000000000000000dead");
        assert!(format!("{:?}", addr).starts_with("Address(0x"));
    }
}
