use crate::keccak::permutation::{keccak_f, STATE_LANES};

/// Domain separation byte of the original Keccak submission.
pub const KECCAK_DELIMITER: u8 = 0x01;
/// Domain separation byte of the SHAKE extendable-output functions.
pub const SHAKE_DELIMITER: u8 = 0x1f;

const LANE_BYTES: usize = 8;

/// Absorb/squeeze state. `rate` is in bytes and always a multiple of the lane size.
#[derive(Clone)]
pub(crate) struct Sponge {
    state: [u64; STATE_LANES],
    rate: usize,
    position: usize,
}

impl Sponge {
    pub(crate) fn new(rate: usize) -> Sponge {
        debug_assert!(rate > 0 && rate < STATE_LANES * LANE_BYTES && rate % LANE_BYTES == 0);
        Sponge {
            state: [0u64; STATE_LANES],
            rate,
            position: 0,
        }
    }

    fn xor_byte(&mut self, index: usize, byte: u8) {
        self.state[index / LANE_BYTES] ^= u64::from(byte) << (8 * (index % LANE_BYTES));
    }

    fn byte_at(&self, index: usize) -> u8 {
        (self.state[index / LANE_BYTES] >> (8 * (index % LANE_BYTES))) as u8
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        for byte in data {
            self.xor_byte(self.position, *byte);
            self.position += 1;
            if self.position == self.rate {
                keccak_f(&mut self.state);
                self.position = 0;
            }
        }
    }

    /// pad10*1 with the given domain byte. A message that ended exactly on a
    /// block boundary has already been permuted, so the padding lands in a
    /// fresh all-padding block.
    fn pad(&mut self, delimiter: u8) {
        self.xor_byte(self.position, delimiter);
        self.xor_byte(self.rate - 1, 0x80);
        keccak_f(&mut self.state);
        self.position = 0;
    }

    pub(crate) fn finalize(mut self, delimiter: u8, output_len: usize) -> Vec<u8> {
        self.pad(delimiter);

        let mut output = Vec::with_capacity(output_len);
        loop {
            let take = (output_len - output.len()).min(self.rate);
            output.extend((0..take).map(|index| self.byte_at(index)));
            if output.len() == output_len {
                break;
            }
            keccak_f(&mut self.state);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_are_little_endian() {
        let mut sponge = Sponge::new(136);
        sponge.xor_byte(0, 0xaa);
        sponge.xor_byte(9, 0xbb);
        assert_eq!(sponge.state[0], 0xaa);
        assert_eq!(sponge.state[1], 0xbb00);
        assert_eq!(sponge.byte_at(9), 0xbb);
    }

    #[test]
    fn test_absorb_permutes_on_full_block() {
        let mut sponge = Sponge::new(72);
        sponge.absorb(&[0u8; 71]);
        assert_eq!(sponge.position, 71);
        sponge.absorb(&[0u8]);
        assert_eq!(sponge.position, 0);
        // zero input permuted once: lane 0 is the first lane of keccak_f(0)
        assert_eq!(sponge.state[0], 0xf1258f7940e1dde7);
    }

    #[test]
    fn test_squeeze_longer_than_rate() {
        let long = Sponge::new(72).finalize(KECCAK_DELIMITER, 200);
        let short = Sponge::new(72).finalize(KECCAK_DELIMITER, 64);
        assert_eq!(long.len(), 200);
        assert_eq!(&long[..64], short.as_slice());
    }
}
