//! Arbitrary-precision arithmetic
//!
//! `BigInteger` is the numeric value type behind every conversion in the
//! crate; `base_converter` reinterprets decimal values in any radix from 2 to 256.

pub mod base_converter;
pub mod big_integer;

pub use base_converter::{from_base, from_base_bytes, to_base, to_base_bytes, Alphabet};
pub use big_integer::BigInteger;
