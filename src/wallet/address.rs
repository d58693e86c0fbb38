use crate::ecdsa::PUBLIC_KEY_LEN;
use crate::encoding::Base58Check;
use crate::error::{Result, TronError};
use crate::keccak::keccak256;
use crate::utils::{checksum, hex_decode, hex_encode, CHECKSUM_LEN};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix byte + 20-byte public key hash
pub const ADDRESS_LEN: usize = 21;
pub const ADDRESS_HASH_LEN: usize = 20;
/// Address bytes followed by the checksum
pub const ADDRESS_PAYLOAD_LEN: usize = ADDRESS_LEN + CHECKSUM_LEN;
/// Length of Base58Check addresses by network convention
pub const ADDRESS_BASE58_LEN: usize = 34;

/// Last 20 bytes of Keccak-256 over the public key without its `0x04` tag.
pub fn hash_pub_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> [u8; ADDRESS_HASH_LEN] {
    let digest = keccak256(&public_key[1..]);
    let mut hash = [0u8; ADDRESS_HASH_LEN];
    hash.copy_from_slice(&digest[digest.len() - ADDRESS_HASH_LEN..]);
    hash
}

/// A 21-byte network address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LEN], prefix: u8) -> Address {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = prefix;
        bytes[1..].copy_from_slice(&hash_pub_key(public_key));
        Address { bytes }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Address> {
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            TronError::Validation(format!(
                "Address must be {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Address { bytes })
    }

    pub fn from_hex(address: &str) -> Result<Address> {
        Self::from_bytes(&hex_decode(address)?)
    }

    /// Parse Base58Check text, verifying the checksum. The prefix byte is kept
    /// as found; use `wallet::is_address` to also pin it to the network.
    pub fn from_base58(address: &str) -> Result<Address> {
        let payload = hex_decode(&Base58Check::decode_address_payload(address)?)?;
        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(TronError::Validation(format!(
                "Address payload must be {ADDRESS_PAYLOAD_LEN} bytes, got {}",
                payload.len()
            )));
        }

        let (body, actual_checksum) = payload.split_at(ADDRESS_LEN);
        if checksum(body) != actual_checksum {
            return Err(TronError::Validation(format!(
                "Address checksum mismatch: {address}"
            )));
        }
        Self::from_bytes(body)
    }

    pub fn prefix(&self) -> u8 {
        self.bytes[0]
    }

    pub fn hash(&self) -> &[u8] {
        &self.bytes[1..]
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.bytes)
    }

    /// The prefix is already part of the 21 bytes: no extra version byte and
    /// no compression marker.
    pub fn to_base58(&self) -> Result<String> {
        Base58Check::encode(&self.to_hex(), 0, false)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_base58().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

/// Accepts the 42-character hex form or Base58Check text.
impl FromStr for Address {
    type Err = TronError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() == 2 * ADDRESS_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Address::from_hex(s)
        } else {
            Address::from_base58(s)
        }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let text = self.to_base58().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // USDT token contract on mainnet
    const CONTRACT_BASE58: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
    const CONTRACT_HEX: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";

    #[test]
    fn test_known_address_conversion() {
        let address = Address::from_hex(CONTRACT_HEX).unwrap();
        assert_eq!(address.to_base58().unwrap(), CONTRACT_BASE58);
        assert_eq!(Address::from_base58(CONTRACT_BASE58).unwrap(), address);
        assert_eq!(address.prefix(), 0x41);
        assert_eq!(address.hash().len(), ADDRESS_HASH_LEN);
    }

    #[test]
    fn test_from_str_accepts_both_forms() {
        let from_hex: Address = CONTRACT_HEX.parse().unwrap();
        let from_base58: Address = CONTRACT_BASE58.parse().unwrap();
        assert_eq!(from_hex, from_base58);
        assert_eq!(from_hex.to_string(), CONTRACT_BASE58);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let mut tampered = CONTRACT_BASE58.to_string();
        tampered.replace_range(33..34, "u");
        assert!(Address::from_base58(&tampered).is_err());
    }

    #[test]
    fn test_wrong_lengths_rejected() {
        assert!(Address::from_hex("41a614").is_err());
        assert!(Address::from_bytes(&[0x41; 22]).is_err());
        assert!(Address::from_base58("1111").is_err());
    }

    #[test]
    fn test_base58_form_is_base58check_without_version() {
        let address = Address::from_hex(CONTRACT_HEX).unwrap();
        assert_eq!(
            address.to_base58().unwrap(),
            Base58Check::encode(CONTRACT_HEX, 0, false).unwrap()
        );
        assert_eq!(
            Base58Check::decode(CONTRACT_BASE58, 0, CHECKSUM_LEN, false).unwrap(),
            CONTRACT_HEX
        );
    }

    #[test]
    fn test_from_base58_agrees_with_is_address() {
        let mut tampered = CONTRACT_BASE58.to_string();
        tampered.replace_range(10..11, "z");
        let other_prefix = Address::from_hex("40a614f803b6fd780986a42c78ec9c7f77e6ded13c")
            .unwrap()
            .to_base58()
            .unwrap();

        for candidate in [CONTRACT_BASE58, tampered.as_str(), "1111", "0OIl", ""] {
            assert_eq!(
                Address::from_base58(candidate).is_ok(),
                crate::wallet::is_address(candidate),
                "{candidate:?}"
            );
        }
        // Parsing keeps any prefix; only the predicate pins the network.
        assert_eq!(Address::from_base58(&other_prefix).unwrap().prefix(), 0x40);
        assert!(!crate::wallet::is_address(&other_prefix));
    }

    #[test]
    fn test_serde_uses_base58() {
        let address = Address::from_hex(CONTRACT_HEX).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{CONTRACT_BASE58}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
