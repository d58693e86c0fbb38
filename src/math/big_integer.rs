// Arbitrary-precision signed integer used by the radix converter, Base58 and unit
// conversion. Named operations borrow and return a fresh value; the `*Assign`
// operators are the in-place (mutable) variants.

use crate::config::GLOBAL_CONFIG;
use crate::error::{Result, TronError};
use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

const MIN_PRIMALITY_ROUNDS: i64 = 5;
const MAX_PRIMALITY_ROUNDS: i64 = 10;

// Cheap trial division before Miller-Rabin.
const SMALL_PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigInteger {
    value: BigInt,
}

impl BigInteger {
    /// Parse a base-10 literal: an optional `-` followed by one or more ASCII digits.
    pub fn new(literal: &str) -> Result<BigInteger> {
        let digits = literal.strip_prefix('-').unwrap_or(literal);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TronError::Validation(format!(
                "Not a valid decimal integer: '{literal}'"
            )));
        }

        let value = BigInt::parse_bytes(literal.as_bytes(), 10).ok_or_else(|| {
            TronError::Validation(format!("Not a valid decimal integer: '{literal}'"))
        })?;
        Ok(BigInteger { value })
    }

    pub fn zero() -> BigInteger {
        BigInteger::from_i64(0)
    }

    pub fn from_i64(value: i64) -> BigInteger {
        BigInteger {
            value: BigInt::from(value),
        }
    }

    /// Interpret `bytes` as an unsigned big-endian magnitude.
    pub fn from_bytes_be(bytes: &[u8]) -> BigInteger {
        BigInteger {
            value: BigInt::from_bytes_be(Sign::Plus, bytes),
        }
    }

    /// Big-endian magnitude without leading zero bytes. Zero yields an empty vector.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![];
        }
        let (_, bytes) = self.value.to_bytes_be();
        bytes
    }

    /// Most significant digit first, each digit in `0..radix`. Zero yields `[0]`.
    pub(crate) fn to_radix_digits(&self, radix: u32) -> Vec<u8> {
        self.value.magnitude().to_radix_be(radix)
    }

    pub(crate) fn from_radix_digits(digits: &[u8], radix: u32) -> Option<BigInteger> {
        if digits.is_empty() {
            return Some(BigInteger::zero());
        }
        let magnitude = BigUint::from_radix_be(digits, radix)?;
        Some(BigInteger {
            value: BigInt::from_biguint(Sign::Plus, magnitude),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.value.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.value.sign() == Sign::Minus
    }

    pub fn add(&self, other: &BigInteger) -> BigInteger {
        BigInteger {
            value: &self.value + &other.value,
        }
    }

    pub fn subtract(&self, other: &BigInteger) -> BigInteger {
        BigInteger {
            value: &self.value - &other.value,
        }
    }

    pub fn multiply(&self, other: &BigInteger) -> BigInteger {
        BigInteger {
            value: &self.value * &other.value,
        }
    }

    /// Quotient truncated toward zero: `-7 / 2 == -3`.
    pub fn divide(&self, other: &BigInteger) -> Result<BigInteger> {
        if other.is_zero() {
            return Err(TronError::Validation("Division by zero".to_string()));
        }
        Ok(BigInteger {
            value: &self.value / &other.value,
        })
    }

    /// Remainder of truncated division; the result carries the dividend's sign.
    pub fn modulo(&self, other: &BigInteger) -> Result<BigInteger> {
        if other.is_zero() {
            return Err(TronError::Validation("Modulo by zero".to_string()));
        }
        Ok(BigInteger {
            value: &self.value % &other.value,
        })
    }

    pub fn pow(&self, exponent: u32) -> BigInteger {
        BigInteger {
            value: self.value.pow(exponent),
        }
    }

    pub fn negate(&self) -> BigInteger {
        BigInteger {
            value: -&self.value,
        }
    }

    pub fn abs(&self) -> BigInteger {
        BigInteger {
            value: BigInt::from_biguint(Sign::Plus, self.value.magnitude().clone()),
        }
    }

    pub fn factorial(&self) -> Result<BigInteger> {
        if self.is_negative() {
            return Err(TronError::Validation(format!(
                "Factorial of a negative number: {self}"
            )));
        }

        let mut result = BigInt::from(1);
        let mut counter = BigInt::from(2);
        while counter <= self.value {
            result *= &counter;
            counter += 1;
        }
        Ok(BigInteger { value: result })
    }

    /// Three-way comparison returning -1, 0 or 1.
    pub fn compare(&self, other: &BigInteger) -> i32 {
        match self.value.cmp(&other.value) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Primality test using the configured default confidence.
    pub fn is_prime(&self) -> Result<bool> {
        self.is_probable_prime(GLOBAL_CONFIG.get_primality_confidence())
    }

    /// Miller-Rabin test. `confidence` in [0, 1] maps linearly onto 5..=10 rounds;
    /// anything that maps outside that range is rejected, not clamped.
    pub fn is_probable_prime(&self, confidence: f64) -> Result<bool> {
        let rounds = primality_rounds(confidence)?;

        if self.value <= BigInt::from(1) {
            return Ok(false);
        }
        let n = self.value.magnitude();

        for small in SMALL_PRIMES {
            let small = BigUint::from(small);
            if *n == small {
                return Ok(true);
            }
            if (n % &small) == BigUint::from(0u32) {
                return Ok(false);
            }
        }

        let one = BigUint::from(1u32);
        let two = BigUint::from(2u32);
        let n_minus_one = n - &one;
        let shift = n_minus_one.trailing_zeros().unwrap_or(0);
        let d = &n_minus_one >> shift;

        let mut rng = OsRng;
        'witness: for _ in 0..rounds {
            let a = rng.gen_biguint_range(&two, &n_minus_one);
            let mut x = a.modpow(&d, n);
            if x == one || x == n_minus_one {
                continue;
            }
            for _ in 1..shift {
                x = x.modpow(&two, n);
                if x == n_minus_one {
                    continue 'witness;
                }
            }
            return Ok(false);
        }
        Ok(true)
    }
}

fn primality_rounds(confidence: f64) -> Result<i64> {
    if !confidence.is_finite() {
        return Err(TronError::Validation(format!(
            "Primality confidence must be a finite number, got {confidence}"
        )));
    }
    let rounds = (MIN_PRIMALITY_ROUNDS as f64 + confidence * 5.0).floor() as i64;
    if !(MIN_PRIMALITY_ROUNDS..=MAX_PRIMALITY_ROUNDS).contains(&rounds) {
        return Err(TronError::Validation(format!(
            "Primality confidence {confidence} gives {rounds} rounds, expected 5 to 10"
        )));
    }
    Ok(rounds)
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for BigInteger {
    type Err = TronError;

    fn from_str(s: &str) -> Result<Self> {
        BigInteger::new(s)
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        BigInteger::from_i64(value)
    }
}

impl From<u64> for BigInteger {
    fn from(value: u64) -> Self {
        BigInteger {
            value: BigInt::from(value),
        }
    }
}

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        BigInteger::new(&literal).map_err(serde::de::Error::custom)
    }
}

impl Add for &BigInteger {
    type Output = BigInteger;

    fn add(self, rhs: &BigInteger) -> BigInteger {
        BigInteger::add(self, rhs)
    }
}

impl Sub for &BigInteger {
    type Output = BigInteger;

    fn sub(self, rhs: &BigInteger) -> BigInteger {
        self.subtract(rhs)
    }
}

impl Mul for &BigInteger {
    type Output = BigInteger;

    fn mul(self, rhs: &BigInteger) -> BigInteger {
        self.multiply(rhs)
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        self.negate()
    }
}

impl AddAssign<&BigInteger> for BigInteger {
    fn add_assign(&mut self, rhs: &BigInteger) {
        self.value += &rhs.value;
    }
}

impl SubAssign<&BigInteger> for BigInteger {
    fn sub_assign(&mut self, rhs: &BigInteger) {
        self.value -= &rhs.value;
    }
}

impl MulAssign<&BigInteger> for BigInteger {
    fn mul_assign(&mut self, rhs: &BigInteger) {
        self.value *= &rhs.value;
    }
}
