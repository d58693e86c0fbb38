//! Signing of node-built transaction payloads
//!
//! The node returns transactions as JSON objects. Signing checks the payload
//! shape, signs the 32-byte `txID` with secp256k1 and appends the
//! `r || s || v` hex string to the `signature` array. Each step is its own
//! type, so an unvalidated payload cannot be signed and a signed one cannot be
//! signed twice.

pub mod signer;

pub use signer::{
    recover_signer, sign_transaction, sign_transaction_with, verify_transaction_signature,
    SignedTransaction, UnsignedTransaction, ValidatedTransaction,
};

pub const TX_ID_FIELD: &str = "txID";
pub const RAW_DATA_FIELD: &str = "raw_data";
pub const SIGNATURE_FIELD: &str = "signature";
/// Set by the node when it could not build the transaction
pub const ERROR_FIELD: &str = "Error";
