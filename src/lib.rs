//! # tron-core - Cryptographic core of a TRON client
//!
//! Everything a client needs to hold keys and move value without trusting a
//! node with secrets: arbitrary-precision arithmetic, radix and Base58(Check)
//! codecs, the original Keccak sponge, address derivation and transaction
//! signing.
//!
//! ## Layout
//! - `math/`: `BigInteger` and conversion between any base from 2 to 256
//! - `encoding/`: Base58 and Base58Check text codecs
//! - `keccak/`: Keccak-f[1600] sponge, fixed-size hashes and SHAKE
//! - `ecdsa/`: secp256k1 signing and public key recovery
//! - `wallet/`: key pairs, addresses, address validation
//! - `transaction/`: validate-then-sign pipeline for node-built payloads
//! - `config/`: network prefix and primality settings
//! - `utils/`: SHA-256, hex, unit conversion, ABI selectors
//!
//! ## Things to remember
//! - Keccak here is the pre-standard variant. It is not SHA3-256.
//! - Addresses are `0x41 || last20(keccak256(pub[1..]))`, 34 chars in Base58.
//! - All operations are synchronous and free of shared mutable state.

pub mod config;
pub mod ecdsa;
pub mod encoding;
pub mod error;
pub mod keccak;
pub mod math;
pub mod transaction;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use config::{Config, GLOBAL_CONFIG};
pub use ecdsa::{EcdsaSigner, RecoverableSignature, Secp256k1Signer};
pub use encoding::{Base58, Base58Check};
pub use error::{Result, TronError};
pub use keccak::{keccak256, Keccak, KeccakHasher};
pub use math::{from_base, to_base, Alphabet, BigInteger};
pub use transaction::{
    recover_signer, sign_transaction, verify_transaction_signature, SignedTransaction,
    UnsignedTransaction, ValidatedTransaction,
};
pub use utils::{function_selector, from_sun, sha256_digest, to_sun};
pub use wallet::{
    address_from_hex, address_from_private_key, address_to_hex, convert_address, generate_address,
    hash_pub_key, is_address, Address, GeneratedAddress, KeyPair, PrivateKey, Wallet,
};
