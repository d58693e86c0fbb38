//! Key management and address derivation
//!
//! An address is the network prefix byte followed by the last 20 bytes of the
//! Keccak-256 hash of the uncompressed public key (without its `0x04` tag),
//! rendered as hex or as Base58Check text.

pub mod address;
pub mod keys;
#[allow(clippy::module_inception)]
pub mod wallet;

pub use address::{
    hash_pub_key, Address, ADDRESS_BASE58_LEN, ADDRESS_HASH_LEN, ADDRESS_LEN, ADDRESS_PAYLOAD_LEN,
};
pub use keys::{KeyPair, PrivateKey};
pub use wallet::{
    address_from_hex, address_from_private_key, address_to_hex, convert_address, generate_address,
    generate_address_with_prefix, is_address, is_address_with_prefix, GeneratedAddress, Wallet,
};
