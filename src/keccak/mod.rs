//! Keccak sponge hashing
//!
//! This is the original Keccak submission (domain byte `0x01`), not FIPS-202
//! SHA-3 (domain byte `0x06`). The two produce different digests for the same
//! input and the network hashes with the former, so this engine must not be
//! swapped for a SHA-3 implementation.
//!
//! ## Parameters
//! - `hash`: digest sizes 224, 256, 384 and 512 bits, capacity twice the digest size
//! - `shake`: security levels 128 and 256, any whole number of output bytes

pub mod permutation;
mod sponge;

pub use sponge::{KECCAK_DELIMITER, SHAKE_DELIMITER};

use crate::error::{Result, TronError};
use crate::utils::hex_encode;
use sponge::Sponge;

const STATE_BYTES: usize = 200;
const SUPPORTED_DIGEST_BITS: [usize; 4] = [224, 256, 384, 512];
const SUPPORTED_SECURITY_LEVELS: [usize; 2] = [128, 256];

/// Rate in bytes for a sponge whose capacity is `2 * bits`.
fn rate_for(bits: usize) -> usize {
    STATE_BYTES - bits / 4
}

/// Incremental Keccak / SHAKE hasher.
#[derive(Clone)]
pub struct KeccakHasher {
    sponge: Sponge,
    delimiter: u8,
    output_len: usize,
}

impl KeccakHasher {
    pub fn new(digest_bits: usize) -> Result<KeccakHasher> {
        if !SUPPORTED_DIGEST_BITS.contains(&digest_bits) {
            return Err(TronError::UnsupportedOperation(format!(
                "Keccak digest size {digest_bits} is not one of 224, 256, 384, 512"
            )));
        }
        Ok(KeccakHasher {
            sponge: Sponge::new(rate_for(digest_bits)),
            delimiter: KECCAK_DELIMITER,
            output_len: digest_bits / 8,
        })
    }

    pub fn new_shake(security_level: usize, output_bits: usize) -> Result<KeccakHasher> {
        if !SUPPORTED_SECURITY_LEVELS.contains(&security_level) {
            return Err(TronError::UnsupportedOperation(format!(
                "SHAKE security level {security_level} is not one of 128, 256"
            )));
        }
        if output_bits == 0 || output_bits % 8 != 0 {
            return Err(TronError::Validation(format!(
                "SHAKE output length must be a positive multiple of 8 bits, got {output_bits}"
            )));
        }
        Ok(KeccakHasher {
            sponge: Sponge::new(rate_for(security_level)),
            delimiter: SHAKE_DELIMITER,
            output_len: output_bits / 8,
        })
    }

    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    pub fn finalize(self) -> Vec<u8> {
        self.sponge.finalize(self.delimiter, self.output_len)
    }
}

/// One-shot entry points.
pub struct Keccak;

impl Keccak {
    pub fn hash(input: &[u8], digest_bits: usize) -> Result<Vec<u8>> {
        let mut hasher = KeccakHasher::new(digest_bits)?;
        hasher.update(input);
        Ok(hasher.finalize())
    }

    pub fn hash_hex(input: &[u8], digest_bits: usize) -> Result<String> {
        Ok(hex_encode(&Self::hash(input, digest_bits)?))
    }

    pub fn shake(input: &[u8], security_level: usize, output_bits: usize) -> Result<Vec<u8>> {
        let mut hasher = KeccakHasher::new_shake(security_level, output_bits)?;
        hasher.update(input);
        Ok(hasher.finalize())
    }

    pub fn shake_hex(input: &[u8], security_level: usize, output_bits: usize) -> Result<String> {
        Ok(hex_encode(&Self::shake(input, security_level, output_bits)?))
    }
}

/// Keccak-256, the digest used for addresses and function selectors.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut sponge = Sponge::new(rate_for(256));
    sponge.absorb(input);
    let digest = sponge.finalize(KECCAK_DELIMITER, 32);

    let mut output = [0u8; 32];
    output.copy_from_slice(&digest);
    output
}
