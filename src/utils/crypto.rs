use ring::digest::{Context, SHA256};

use crate::error::{Result, TronError};
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};

/// Number of checksum bytes appended by Base58Check and verified by `is_address`.
pub const CHECKSUM_LEN: usize = 4;

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

pub fn double_sha256(data: &[u8]) -> Vec<u8> {
    let first_sha = sha256_digest(data);
    sha256_digest(first_sha.as_slice())
}

/// First four bytes of SHA-256(SHA-256(payload)).
pub fn checksum(payload: &[u8]) -> Vec<u8> {
    double_sha256(payload)[0..CHECKSUM_LEN].to_vec()
}

pub fn hex_encode(data: &[u8]) -> String {
    HEXLOWER.encode(data)
}

/// Decode hex text. Accepts either letter case and an optional `0x` prefix.
pub fn hex_decode(data: &str) -> Result<Vec<u8>> {
    let digits = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    HEXLOWER_PERMISSIVE
        .decode(digits.as_bytes())
        .map_err(|e| TronError::Validation(format!("Invalid hex string '{data}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex_encode(&sha256_digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_double_sha256_is_sha256_twice() {
        let once = sha256_digest(b"hello");
        assert_eq!(double_sha256(b"hello"), sha256_digest(&once));
        assert_eq!(checksum(b"hello"), double_sha256(b"hello")[..4].to_vec());
    }

    #[test]
    fn test_hex_decode_accepts_prefix_and_upper_case() {
        assert_eq!(hex_decode("0xDEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(hex_decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_decode_rejects_malformed() {
        assert!(hex_decode("abc").unwrap_err().is_validation());
        assert!(hex_decode("zz").unwrap_err().is_validation());
    }
}
