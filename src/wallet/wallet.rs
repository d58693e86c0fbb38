use crate::config::GLOBAL_CONFIG;
use crate::error::{Result, TronError};
use crate::transaction;
use crate::utils::hex_encode;
use crate::wallet::address::{Address, ADDRESS_BASE58_LEN};
use crate::wallet::keys::KeyPair;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything `generate_address` produces, in the hex/Base58 text forms the
/// node API expects.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAddress {
    pub private_key_hex: String,
    pub public_key_hex: String,
    pub address_hex: String,
    pub address_base58: String,
}

impl std::fmt::Debug for GeneratedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedAddress")
            .field("public_key_hex", &self.public_key_hex)
            .field("address_hex", &self.address_hex)
            .field("address_base58", &self.address_base58)
            .finish_non_exhaustive()
    }
}

/// A key pair together with the address it controls.
#[derive(Clone, Debug)]
pub struct Wallet {
    key_pair: KeyPair,
    address: Address,
}

impl Wallet {
    pub fn new() -> Result<Wallet> {
        Ok(Self::from_key_pair(KeyPair::generate()?))
    }

    pub fn from_private_key_hex(private_key: &str) -> Result<Wallet> {
        Ok(Self::from_key_pair(KeyPair::from_private_key_hex(private_key)?))
    }

    pub fn from_key_pair(key_pair: KeyPair) -> Wallet {
        let address =
            Address::from_public_key(key_pair.public_key(), GLOBAL_CONFIG.get_address_prefix());
        Wallet { key_pair, address }
    }

    pub fn get_address(&self) -> &Address {
        &self.address
    }

    pub fn get_public_key(&self) -> &[u8] {
        self.key_pair.public_key()
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Sign a transaction payload with this wallet's key.
    pub fn sign_transaction(&self, payload: Value) -> Result<Value> {
        transaction::sign_transaction(payload, &self.key_pair.private_key().to_hex())
    }
}

/// Generate a fresh key pair and derive its address on the configured network.
pub fn generate_address() -> Result<GeneratedAddress> {
    generate_address_with_prefix(GLOBAL_CONFIG.get_address_prefix())
}

pub fn generate_address_with_prefix(prefix: u8) -> Result<GeneratedAddress> {
    let key_pair = KeyPair::generate()?;
    let address = Address::from_public_key(key_pair.public_key(), prefix);

    let address_hex = address.to_hex();
    let address_base58 = address
        .to_base58()
        .map_err(|e| TronError::Runtime(format!("Failed to encode address {address_hex}: {e}")))?;

    log::debug!("Generated address {address_base58}");
    Ok(GeneratedAddress {
        private_key_hex: key_pair.private_key().to_hex(),
        public_key_hex: key_pair.public_key_hex(),
        address_hex,
        address_base58,
    })
}

/// Whether `candidate` is a well-formed Base58Check address of the configured
/// network. Never errors: malformed input is simply not an address.
pub fn is_address(candidate: &str) -> bool {
    is_address_with_prefix(candidate, GLOBAL_CONFIG.get_address_prefix())
}

pub fn is_address_with_prefix(candidate: &str, prefix: u8) -> bool {
    if candidate.len() != ADDRESS_BASE58_LEN {
        return false;
    }

    match Address::from_base58(candidate) {
        Ok(address) => address.prefix() == prefix,
        Err(_) => false, // Invalid base58 encoding or checksum
    }
}

/// Base58Check address to its 42-character hex form.
pub fn address_to_hex(address: &str) -> Result<String> {
    Ok(Address::from_base58(address)?.to_hex())
}

/// 42-character hex address to Base58Check text.
pub fn address_from_hex(address_hex: &str) -> Result<String> {
    Address::from_hex(address_hex)?.to_base58()
}

pub fn address_from_private_key(private_key: &str) -> Result<String> {
    Wallet::from_private_key_hex(private_key)?.get_address().to_base58()
}

/// Hex form of the address controlled by an uncompressed public key.
pub fn convert_address(public_key: &[u8; 65]) -> String {
    let address = Address::from_public_key(public_key, GLOBAL_CONFIG.get_address_prefix());
    hex_encode(address.as_bytes())
}
