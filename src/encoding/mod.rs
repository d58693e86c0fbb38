//! Binary-to-text codecs used for addresses and keys.

pub mod base58;
pub mod base58check;

pub use base58::{Base58, BASE58_ALPHABET};
pub use base58check::{Base58Check, COMPRESSION_MARKER, DEFAULT_VERSION_PREFIX};
