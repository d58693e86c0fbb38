//! Utility functions and helpers
//!
//! Hashing and hex helpers shared by the codecs, the function selector
//! builder, and TRX/sun unit conversion.

pub mod abi;
pub mod crypto;
pub mod units;

pub use abi::{function_selector, sha3};
pub use crypto::{
    checksum, double_sha256, hex_decode, hex_encode, sha256_digest, CHECKSUM_LEN,
};
pub use units::{from_sun, to_sun, trx_to_sun, SUN_PER_TRX};
