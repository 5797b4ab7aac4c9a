//! # coda-primitives
//!
//! Primitive Ethereum types shared by the Coda crates: the 20-byte
//! [`Address`], the 32-byte [`H256`] hash/word, and the 256-bit unsigned
//! integer [`U256`] (re-exported from `primitive-types`).
//!
//! All types parse from and render to `0x`-prefixed hex, which is how they
//! travel inside JSON-RPC payloads.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{H256, HashError};

// Re-export primitive-types for U256
pub use primitive_types::U256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_arithmetic() {
        let a = U256::from(7u64);
        let b = U256::from(5u64);
        assert_eq!(a * b, U256::from(35u64));
        assert_eq!(U256::one() << 8, U256::from(256u64));
    }
}
