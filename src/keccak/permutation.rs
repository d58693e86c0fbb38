// Keccak-f[1600] on a 5x5 state of 64-bit lanes, lane (x, y) at index x + 5y.

pub const ROUNDS: usize = 24;
pub const STATE_LANES: usize = 25;

const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

// rho offsets, in the order lanes are visited by pi starting from lane 1
const RHO_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

pub fn keccak_f(state: &mut [u64; STATE_LANES]) {
    for round_constant in ROUND_CONSTANTS {
        theta(state);
        rho_pi(state);
        chi(state);
        // iota
        state[0] ^= round_constant;
    }
}

fn theta(state: &mut [u64; STATE_LANES]) {
    let mut parity = [0u64; 5];
    for (x, column) in parity.iter_mut().enumerate() {
        *column = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
    }
    for x in 0..5 {
        let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            state[x + 5 * y] ^= d;
        }
    }
}

fn rho_pi(state: &mut [u64; STATE_LANES]) {
    let mut carried = state[1];
    for (offset, lane) in RHO_OFFSETS.iter().zip(PI_LANES) {
        let displaced = state[lane];
        state[lane] = carried.rotate_left(*offset);
        carried = displaced;
    }
}

fn chi(state: &mut [u64; STATE_LANES]) {
    for y in 0..5 {
        let row: [u64; 5] = [
            state[5 * y],
            state[5 * y + 1],
            state[5 * y + 2],
            state[5 * y + 3],
            state[5 * y + 4],
        ];
        for x in 0..5 {
            state[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
        }
    }
}
