//! Keccak-256 hashing

use coda_primitives::H256;
use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vectors cross-checked with ethers.js / the sha3 crate.

    #[test]
    fn test_empty_input() {
        assert_eq!(
            keccak256(&[]).to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            keccak256(b"hello").to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
        assert_eq!(
            keccak256(b"The quick brown fox jumps over the lazy dog").to_hex(),
            "0x4d741b6f1eb29cb2a9b9911c82f56fa8d73b04959d3d9d222895df6c0b28aa15"
        );
    }

    #[test]
    fn test_zero_word() {
        // keccak256 of 32 zero bytes, as seen for empty storage slots
        assert_eq!(
            keccak256(&[0u8; 32]).to_hex(),
            "0x290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
    }

    #[test]
    fn test_selector_prefixes() {
        // First four bytes of the signature hash form the function selector
        let transfer = keccak256(b"transfer(address,uint256)");
        assert_eq!(&transfer.as_bytes()[..4], &[0xa9, 0x05, 0x9c, 0xbb]);

        let balance_of = keccak256(b"balanceOf(address)");
        assert_eq!(&balance_of.as_bytes()[..4], &[0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_deterministic() {
        let data = hex::decode("deadbeef").unwrap();
        assert_eq!(keccak256(&data), keccak256(&data));
        assert_ne!(keccak256(&data), keccak256(b"deadbeef"));
    }

    #[test]
    fn test_block_boundaries() {
        // 136 bytes is the keccak rate; 137 spans two blocks
        assert_ne!(keccak256(&[0xab; 136]), keccak256(&[0xab; 137]));
    }
}
