//! # coda-crypto
//!
//! Keccak-256 hashing for the Coda ABI toolkit.
//!
//! The ABI codec consumes hashing as a black box: function selectors and
//! event topics are prefixes of `keccak256(canonical_signature)`. This crate
//! is that black box.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::keccak256;
