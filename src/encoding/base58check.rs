use crate::encoding::Base58;
use crate::error::{Result, TronError};
use crate::utils::{checksum, hex_decode, hex_encode, CHECKSUM_LEN};

/// Version byte used when the caller does not pick one (private key WIF).
pub const DEFAULT_VERSION_PREFIX: u8 = 128;
pub const COMPRESSION_MARKER: u8 = 0x01;

/// Base58 with a version prefix, optional compression marker and a four byte
/// double SHA-256 checksum.
///
/// Decoding only strips bytes; it never checks the version or checksum. Callers
/// that care about those (see `wallet::is_address`) verify them on the raw payload.
pub struct Base58Check;

impl Base58Check {
    pub fn encode(hex_payload: &str, version_prefix: u8, append_compression: bool) -> Result<String> {
        let payload = hex_decode(hex_payload)?;

        let mut buffer = Vec::with_capacity(payload.len() + 2 + CHECKSUM_LEN);
        if version_prefix != 0 {
            buffer.push(version_prefix);
        }
        buffer.extend(payload);
        if append_compression {
            buffer.push(COMPRESSION_MARKER);
        }
        let checksum = checksum(&buffer);
        buffer.extend(checksum);

        Base58::encode_bytes(&buffer)
    }

    /// `encode` with version 128 and the compression marker.
    pub fn encode_default(hex_payload: &str) -> Result<String> {
        Self::encode(hex_payload, DEFAULT_VERSION_PREFIX, true)
    }

    /// Decode to lowercase hex, dropping `remove_leading` bytes from the front,
    /// `remove_trailing` bytes from the back and then, if asked, the compression
    /// byte that precedes the trailing bytes.
    pub fn decode(
        text: &str,
        remove_leading: usize,
        remove_trailing: usize,
        remove_compression: bool,
    ) -> Result<String> {
        let bytes = Base58::decode_bytes(text)?;

        let compression = usize::from(remove_compression);
        let stripped = remove_leading
            .checked_add(remove_trailing)
            .and_then(|n| n.checked_add(compression))
            .ok_or_else(|| {
                TronError::Validation(format!(
                    "Strip counts {remove_leading} + {remove_trailing} overflow"
                ))
            })?;
        if stripped > bytes.len() {
            return Err(TronError::Validation(format!(
                "Cannot strip {stripped} bytes from a {} byte Base58Check payload",
                bytes.len()
            )));
        }

        let end = bytes.len() - remove_trailing - compression;
        log::debug!(
            "Base58Check decoded {} bytes, keeping [{remove_leading}..{end})",
            bytes.len()
        );
        Ok(hex_encode(&bytes[remove_leading..end]))
    }

    /// Strips the version byte, the checksum and the compression marker.
    pub fn decode_default(text: &str) -> Result<String> {
        Self::decode(text, 1, CHECKSUM_LEN, true)
    }

    /// Keeps every byte, checksum included, so the caller can verify it.
    pub fn decode_address_payload(text: &str) -> Result<String> {
        Self::decode(text, 0, 0, false)
    }
}
