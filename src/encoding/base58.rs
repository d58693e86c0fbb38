use crate::error::{Result, TronError};
use crate::math::{from_base, to_base, Alphabet, BigInteger};
use once_cell::sync::Lazy;

/// Digits, upper and lower case letters without `0`, `O`, `I` and `l`.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BASE: u32 = 58;
const ZERO_DIGIT: char = '1';

static ALPHABET: Lazy<Alphabet> =
    Lazy::new(|| Alphabet::new(BASE58_ALPHABET).expect("Base58 alphabet is 58 distinct symbols"));

pub struct Base58;

impl Base58 {
    /// Encode a non-negative base-10 literal.
    pub fn encode(decimal: &str) -> Result<String> {
        to_base(decimal, BASE, Some(&ALPHABET))
    }

    /// Decode Base58 text to a base-10 literal.
    pub fn decode(text: &str) -> Result<String> {
        from_base(text, BASE, Some(&ALPHABET))
    }

    /// Encode raw bytes, writing one `'1'` per leading zero byte.
    pub fn encode_bytes(data: &[u8]) -> Result<String> {
        let leading_zeros = data.iter().take_while(|b| **b == 0).count();
        let value = BigInteger::from_bytes_be(data);

        let mut encoded = ZERO_DIGIT.to_string().repeat(leading_zeros);
        if !value.is_zero() {
            encoded.push_str(&Self::encode(&value.to_string())?);
        }
        Ok(encoded)
    }

    /// Inverse of [`Base58::encode_bytes`]: every leading `'1'` becomes a `0x00` byte.
    pub fn decode_bytes(text: &str) -> Result<Vec<u8>> {
        let leading_ones = text.chars().take_while(|c| *c == ZERO_DIGIT).count();
        let rest = &text[leading_ones..];

        let mut bytes = vec![0u8; leading_ones];
        if !rest.is_empty() {
            let decimal = Self::decode(rest).map_err(|e| {
                TronError::Validation(format!("Invalid Base58 string '{text}': {e}"))
            })?;
            bytes.extend(BigInteger::new(&decimal)?.to_bytes_be());
        }
        Ok(bytes)
    }
}
