use crate::error::{Result, TronError};
use crate::utils::{hex_decode, hex_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const SIGNATURE_LEN: usize = 65;
const SCALAR_LEN: usize = 32;
// Some wallets add 27 to the recovery id
const LEGACY_RECOVERY_OFFSET: u8 = 27;

/// ECDSA signature with the recovery id needed to rebuild the signer's public key.
/// Serialized as `r || s || v`, 65 bytes or 130 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoverableSignature {
    r: [u8; SCALAR_LEN],
    s: [u8; SCALAR_LEN],
    recovery_id: u8,
}

impl RecoverableSignature {
    pub fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Result<RecoverableSignature> {
        if recovery_id > 1 {
            return Err(TronError::Validation(format!(
                "Recovery id must be 0 or 1, got {recovery_id}"
            )));
        }
        Ok(RecoverableSignature { r, s, recovery_id })
    }

    /// Accepts `v` as 0/1 or as 27/28.
    pub fn from_bytes(bytes: &[u8]) -> Result<RecoverableSignature> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(TronError::Validation(format!(
                "Signature must be {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut r = [0u8; SCALAR_LEN];
        let mut s = [0u8; SCALAR_LEN];
        r.copy_from_slice(&bytes[..SCALAR_LEN]);
        s.copy_from_slice(&bytes[SCALAR_LEN..2 * SCALAR_LEN]);

        let v = bytes[2 * SCALAR_LEN];
        let recovery_id = if v >= LEGACY_RECOVERY_OFFSET {
            v - LEGACY_RECOVERY_OFFSET
        } else {
            v
        };
        Self::new(r, s, recovery_id)
    }

    pub fn from_hex(signature: &str) -> Result<RecoverableSignature> {
        Self::from_bytes(&hex_decode(signature)?)
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..SCALAR_LEN].copy_from_slice(&self.r);
        bytes[SCALAR_LEN..2 * SCALAR_LEN].copy_from_slice(&self.s);
        bytes[2 * SCALAR_LEN] = self.recovery_id;
        bytes
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.to_bytes())
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature({})", self.to_hex())
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for RecoverableSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecoverableSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        RecoverableSignature::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecoverableSignature {
        RecoverableSignature::new([0x11; 32], [0x22; 32], 1).unwrap()
    }

    #[test]
    fn test_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes[0], 0x11);
        assert_eq!(bytes[32], 0x22);
        assert_eq!(bytes[64], 0x01);

        let hex = sample().to_hex();
        assert_eq!(hex.len(), 130);
        assert!(hex.ends_with("01"));
        assert_eq!(RecoverableSignature::from_hex(&hex).unwrap(), sample());
    }

    #[test]
    fn test_legacy_recovery_offset() {
        let mut bytes = sample().to_bytes();
        bytes[64] = 28;
        assert_eq!(RecoverableSignature::from_bytes(&bytes).unwrap().recovery_id(), 1);
    }

    #[test]
    fn test_rejects_bad_signatures() {
        assert!(RecoverableSignature::new([0; 32], [0; 32], 2).is_err());
        assert!(RecoverableSignature::from_bytes(&[0u8; 64]).is_err());
        let mut bytes = sample().to_bytes();
        bytes[64] = 30;
        assert!(RecoverableSignature::from_bytes(&bytes).is_err());
        assert!(RecoverableSignature::from_hex("zz").is_err());
    }
}
