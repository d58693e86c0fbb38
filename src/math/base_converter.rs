//! Decimal string <-> arbitrary radix string conversion.
//!
//! Digits are symbols of an [`Alphabet`]; a digit's value is its position in
//! the alphabet. Bases above 64 default to one symbol per byte value, using
//! the code points U+0000..=U+00FF. In a `String` those above U+007F take two
//! UTF-8 bytes, so the text form is not the raw digit bytes. Use
//! [`to_base_bytes`] / [`from_base_bytes`] when every digit must be one byte.

use crate::error::{Result, TronError};
use crate::math::BigInteger;
use std::collections::HashMap;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 256;

const DEFAULT_SYMBOLS: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_";

/// An ordered set of distinct digit symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    positions: HashMap<char, u8>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Alphabet> {
        Self::from_symbols(symbols.chars().collect())
    }

    fn from_symbols(symbols: Vec<char>) -> Result<Alphabet> {
        if symbols.len() < MIN_BASE as usize || symbols.len() > MAX_BASE as usize {
            return Err(TronError::Validation(format!(
                "Alphabet must have between {MIN_BASE} and {MAX_BASE} symbols, got {}",
                symbols.len()
            )));
        }

        let mut positions = HashMap::with_capacity(symbols.len());
        for (index, symbol) in symbols.iter().enumerate() {
            if positions.insert(*symbol, index as u8).is_some() {
                return Err(TronError::Validation(format!(
                    "Alphabet contains duplicate symbol '{symbol}'"
                )));
            }
        }
        Ok(Alphabet { symbols, positions })
    }

    /// The default alphabet for `base`, truncated to exactly `base` symbols.
    pub fn default_for(base: u32) -> Result<Alphabet> {
        check_base(base)?;
        let symbols: Vec<char> = if base as usize <= DEFAULT_SYMBOLS.len() {
            DEFAULT_SYMBOLS.chars().take(base as usize).collect()
        } else {
            (0..base).filter_map(char::from_u32).collect()
        };
        Self::from_symbols(symbols)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, value: u8) -> Option<char> {
        self.symbols.get(value as usize).copied()
    }

    pub fn value_of(&self, symbol: char) -> Option<u8> {
        self.positions.get(&symbol).copied()
    }
}

fn check_base(base: u32) -> Result<()> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(TronError::Validation(format!(
            "Base must be between {MIN_BASE} and {MAX_BASE}, got {base}"
        )));
    }
    Ok(())
}

fn resolve_alphabet(base: u32, alphabet: Option<&Alphabet>) -> Result<Alphabet> {
    check_base(base)?;
    match alphabet {
        Some(alphabet) if alphabet.len() < base as usize => Err(TronError::Validation(format!(
            "Alphabet has {} symbols, base {base} needs at least {base}",
            alphabet.len()
        ))),
        Some(alphabet) => Ok(alphabet.clone()),
        None => Alphabet::default_for(base),
    }
}

/// Convert a non-negative base-10 literal to `base`. The output has no
/// leading zero digit unless the value is zero.
pub fn to_base(decimal: &str, base: u32, alphabet: Option<&Alphabet>) -> Result<String> {
    let alphabet = resolve_alphabet(base, alphabet)?;
    let value = BigInteger::new(decimal)?;
    if value.is_negative() {
        return Err(TronError::Validation(format!(
            "Cannot convert negative value {decimal} to base {base}"
        )));
    }

    value
        .to_radix_digits(base)
        .into_iter()
        .map(|digit| {
            alphabet.symbol(digit).ok_or_else(|| {
                TronError::Validation(format!("Digit {digit} has no symbol in the alphabet"))
            })
        })
        .collect()
}

/// Convert text written in `base` back to a base-10 literal. Empty text is zero.
pub fn from_base(text: &str, base: u32, alphabet: Option<&Alphabet>) -> Result<String> {
    let alphabet = resolve_alphabet(base, alphabet)?;

    let digits = text
        .chars()
        .map(|symbol| match alphabet.value_of(symbol) {
            Some(value) if (value as u32) < base => Ok(value),
            _ => Err(TronError::Validation(format!(
                "Symbol '{symbol}' is not a base {base} digit"
            ))),
        })
        .collect::<Result<Vec<u8>>>()?;

    let value = BigInteger::from_radix_digits(&digits, base).ok_or_else(|| {
        TronError::Validation(format!("'{text}' is not a valid base {base} number"))
    })?;
    Ok(value.to_string())
}

/// Like [`to_base`], but each digit is emitted as its raw byte value.
pub fn to_base_bytes(decimal: &str, base: u32) -> Result<Vec<u8>> {
    check_base(base)?;
    let value = BigInteger::new(decimal)?;
    if value.is_negative() {
        return Err(TronError::Validation(format!(
            "Cannot convert negative value {decimal} to base {base}"
        )));
    }
    Ok(value.to_radix_digits(base))
}

/// Inverse of [`to_base_bytes`]: every byte is one digit in `0..base`.
pub fn from_base_bytes(digits: &[u8], base: u32) -> Result<String> {
    check_base(base)?;
    if let Some(digit) = digits.iter().find(|d| u32::from(**d) >= base) {
        return Err(TronError::Validation(format!(
            "Byte {digit} is not a base {base} digit"
        )));
    }

    let value = BigInteger::from_radix_digits(digits, base).ok_or_else(|| {
        TronError::Validation(format!("Digits are not a valid base {base} number"))
    })?;
    Ok(value.to_string())
}
