// Only the function selector is built here; argument encoding is left to the
// node's trigger API.

use crate::keccak::keccak256;
use crate::utils::hex_encode;

const SELECTOR_LEN: usize = 4;

/// First four bytes of Keccak-256 of the canonical signature, as hex.
/// Whitespace is dropped first, so `"transfer(address, uint256)"` and
/// `"transfer(address,uint256)"` give the same selector.
pub fn function_selector(signature: &str) -> String {
    let canonical: String = signature.chars().filter(|c| !c.is_whitespace()).collect();
    hex_encode(&keccak256(canonical.as_bytes())[..SELECTOR_LEN])
}

/// Keccak-256 of UTF-8 text as hex, optionally `0x` prefixed.
pub fn sha3(text: &str, with_prefix: bool) -> String {
    let digest = hex_encode(&keccak256(text.as_bytes()));
    if with_prefix {
        format!("0x{digest}")
    } else {
        digest
    }
}
