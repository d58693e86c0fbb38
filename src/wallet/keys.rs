use crate::ecdsa::{EcdsaSigner, Secp256k1Signer, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use crate::error::{Result, TronError};
use crate::utils::{hex_decode, hex_encode};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 32-byte secp256k1 scalar, wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_LEN]) -> PrivateKey {
        PrivateKey { bytes }
    }

    /// Key material problems are runtime errors: the key is expected to be well formed.
    pub fn from_hex(private_key: &str) -> Result<PrivateKey> {
        if private_key.trim().is_empty() {
            return Err(TronError::Runtime("Missing private key".to_string()));
        }

        let mut decoded = hex_decode(private_key.trim())
            .map_err(|e| TronError::Runtime(format!("Private key is not valid hex: {e}")))?;
        if decoded.len() != PRIVATE_KEY_LEN {
            let len = decoded.len();
            decoded.zeroize();
            return Err(TronError::Runtime(format!(
                "Private key must be {PRIVATE_KEY_LEN} bytes, got {len}"
            )));
        }

        let mut bytes = [0u8; PRIVATE_KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(PrivateKey { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.bytes)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: [u8; PUBLIC_KEY_LEN],
}

impl KeyPair {
    pub fn generate() -> Result<KeyPair> {
        Self::generate_with(&Secp256k1Signer)
    }

    pub fn generate_with<S: EcdsaSigner>(signer: &S) -> Result<KeyPair> {
        let private_key = PrivateKey::from_bytes(signer.generate_private_key());
        Self::from_private_key_with(signer, private_key)
    }

    pub fn from_private_key(private_key: PrivateKey) -> Result<KeyPair> {
        Self::from_private_key_with(&Secp256k1Signer, private_key)
    }

    pub fn from_private_key_hex(private_key: &str) -> Result<KeyPair> {
        Self::from_private_key(PrivateKey::from_hex(private_key)?)
    }

    fn from_private_key_with<S: EcdsaSigner>(signer: &S, private_key: PrivateKey) -> Result<KeyPair> {
        let public_key = signer.derive_uncompressed_public_key(private_key.as_bytes())?;
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Uncompressed point `0x04 || X || Y`
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    pub fn public_key_hex(&self) -> String {
        hex_encode(&self.public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_private_key() {
        let err = PrivateKey::from_hex("").unwrap_err();
        assert_eq!(err, TronError::Runtime("Missing private key".to_string()));
        assert!(PrivateKey::from_hex("   ").unwrap_err().is_runtime());
    }

    #[test]
    fn test_malformed_private_key() {
        assert!(PrivateKey::from_hex("not hex").unwrap_err().is_runtime());
        assert!(PrivateKey::from_hex("abcd").unwrap_err().is_runtime());
    }

    #[test]
    fn test_private_key_hex_round_trip() {
        let hex = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";
        let key = PrivateKey::from_hex(hex).unwrap();
        assert_eq!(key.to_hex(), hex);
        assert_eq!(format!("{key:?}"), "PrivateKey(..)");
    }

    #[test]
    fn test_generated_pairs_differ() {
        let first = KeyPair::generate().unwrap();
        let second = KeyPair::generate().unwrap();
        assert_ne!(first.private_key().as_bytes(), second.private_key().as_bytes());
        assert_ne!(first.public_key(), second.public_key());
        assert_eq!(first.public_key()[0], 0x04);
        assert_eq!(first.public_key_hex().len(), 130);
    }

    #[test]
    fn test_from_private_key_hex_is_deterministic() {
        let generated = KeyPair::generate().unwrap();
        let restored = KeyPair::from_private_key_hex(&generated.private_key().to_hex()).unwrap();
        assert_eq!(restored.public_key(), generated.public_key());
    }
}
