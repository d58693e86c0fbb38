//! ECDSA over secp256k1
//!
//! The curve arithmetic itself comes from `k256`; this module only adapts it to
//! the [`EcdsaSigner`] capability used by key generation and transaction signing.
//!
//! Signing emits low-s signatures, but recovery and verification accept both
//! `s` and `n - s` because the network's nodes do not enforce canonical
//! signatures.

pub mod signature;

pub use signature::{RecoverableSignature, SIGNATURE_LEN};

use crate::error::{Result, TronError};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

pub const PRIVATE_KEY_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 65;
pub const MESSAGE_HASH_LEN: usize = 32;

/// Elliptic-curve operations the wallet and signing pipeline depend on.
pub trait EcdsaSigner {
    /// A new private scalar from a cryptographically secure source.
    fn generate_private_key(&self) -> [u8; PRIVATE_KEY_LEN];

    /// `0x04 || X || Y`
    fn derive_uncompressed_public_key(
        &self,
        private_key: &[u8; PRIVATE_KEY_LEN],
    ) -> Result<[u8; PUBLIC_KEY_LEN]>;

    /// Sign an already hashed 32-byte message.
    fn sign_prehash(
        &self,
        message_hash: &[u8; MESSAGE_HASH_LEN],
        private_key: &[u8; PRIVATE_KEY_LEN],
    ) -> Result<RecoverableSignature>;

    fn recover_public_key(
        &self,
        message_hash: &[u8; MESSAGE_HASH_LEN],
        signature: &RecoverableSignature,
    ) -> Result<[u8; PUBLIC_KEY_LEN]>;

    fn verify(
        &self,
        message_hash: &[u8; MESSAGE_HASH_LEN],
        signature: &RecoverableSignature,
        public_key: &[u8; PUBLIC_KEY_LEN],
    ) -> bool {
        match self.recover_public_key(message_hash, signature) {
            Ok(recovered) => recovered == *public_key,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Signer;

impl Secp256k1Signer {
    fn signing_key(private_key: &[u8; PRIVATE_KEY_LEN]) -> Result<SigningKey> {
        SigningKey::from_slice(private_key)
            .map_err(|e| TronError::Runtime(format!("Invalid secp256k1 private key: {e}")))
    }

    fn encode_public_key(verifying_key: &VerifyingKey) -> Result<[u8; PUBLIC_KEY_LEN]> {
        let point = verifying_key.to_encoded_point(false);
        point.as_bytes().try_into().map_err(|_| {
            TronError::Runtime(format!(
                "Uncompressed public key must be {PUBLIC_KEY_LEN} bytes, got {}",
                point.as_bytes().len()
            ))
        })
    }
}

impl EcdsaSigner for Secp256k1Signer {
    fn generate_private_key(&self) -> [u8; PRIVATE_KEY_LEN] {
        let signing_key = SigningKey::random(&mut OsRng);
        signing_key.to_bytes().into()
    }

    fn derive_uncompressed_public_key(
        &self,
        private_key: &[u8; PRIVATE_KEY_LEN],
    ) -> Result<[u8; PUBLIC_KEY_LEN]> {
        let signing_key = Self::signing_key(private_key)?;
        Self::encode_public_key(signing_key.verifying_key())
    }

    fn sign_prehash(
        &self,
        message_hash: &[u8; MESSAGE_HASH_LEN],
        private_key: &[u8; PRIVATE_KEY_LEN],
    ) -> Result<RecoverableSignature> {
        let signing_key = Self::signing_key(private_key)?;
        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(message_hash)
            .map_err(|e| TronError::Runtime(format!("Failed to sign message: {e}")))?;

        let (r, s) = signature.split_bytes();
        RecoverableSignature::new(r.into(), s.into(), recovery_id.to_byte())
    }

    fn recover_public_key(
        &self,
        message_hash: &[u8; MESSAGE_HASH_LEN],
        signature: &RecoverableSignature,
    ) -> Result<[u8; PUBLIC_KEY_LEN]> {
        let mut signature_bytes = [0u8; 64];
        signature_bytes[..32].copy_from_slice(signature.r());
        signature_bytes[32..].copy_from_slice(signature.s());

        let mut parsed = Signature::from_slice(&signature_bytes)
            .map_err(|e| TronError::Validation(format!("Invalid signature scalars: {e}")))?;
        let mut recovery_id = RecoveryId::from_byte(signature.recovery_id()).ok_or_else(|| {
            TronError::Validation(format!("Invalid recovery id {}", signature.recovery_id()))
        })?;

        // n - s recovers through the mirrored R point, so the y parity flips.
        if let Some(normalized) = parsed.normalize_s() {
            parsed = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let verifying_key = VerifyingKey::recover_from_prehash(message_hash, &parsed, recovery_id)
            .map_err(|e| TronError::Validation(format!("Public key recovery failed: {e}")))?;
        Self::encode_public_key(&verifying_key)
    }
}

/// Flip a signature to its high-s twin `(r, n - s)` with the matching recovery id.
pub fn to_high_s(signature: &RecoverableSignature) -> Result<RecoverableSignature> {
    let mut signature_bytes = [0u8; 64];
    signature_bytes[..32].copy_from_slice(signature.r());
    signature_bytes[32..].copy_from_slice(signature.s());
    let parsed = Signature::from_slice(&signature_bytes)
        .map_err(|e| TronError::Validation(format!("Invalid signature scalars: {e}")))?;

    let negated_s = -*parsed.s();
    let flipped = Signature::from_scalars(parsed.r().to_bytes(), negated_s.to_bytes())
        .map_err(|e| TronError::Validation(format!("Invalid signature scalars: {e}")))?;
    let (r, s) = flipped.split_bytes();
    RecoverableSignature::new(r.into(), s.into(), signature.recovery_id() ^ 1)
}
