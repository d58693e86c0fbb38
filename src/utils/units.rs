//! Monetary units of the network
//!
//! ## Units
//! - **Sun**: the smallest unit, used in every on-chain amount
//! - **TRX**: 1,000,000 sun
//!
//! Conversions are exact: amounts go through `BigInteger`, never through `f64`.

use crate::error::{Result, TronError};
use crate::math::BigInteger;

/// Number of sun in one TRX
pub const SUN_PER_TRX: i64 = 1_000_000;

/// Decimal places of a TRX amount
pub const TRX_DECIMALS: usize = 6;

/// Convert a TRX amount written in decimal (e.g. `"1.5"`, `"-0.000001"`) to sun.
///
/// # Examples
/// ```
/// use tron_core::utils::units::to_sun;
/// assert_eq!(to_sun("1.5").unwrap().to_string(), "1500000");
/// assert_eq!(to_sun("2").unwrap().to_string(), "2000000");
/// ```
pub fn to_sun(trx: &str) -> Result<BigInteger> {
    let (negative, unsigned) = match trx.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trx),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if whole.is_empty() || whole.starts_with('-') {
        return Err(TronError::Validation(format!("Invalid TRX amount: '{trx}'")));
    }
    if fraction.len() > TRX_DECIMALS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TronError::Validation(format!(
            "TRX amount '{trx}' has more than {TRX_DECIMALS} decimal places"
        )));
    }

    let padded = format!("{whole}{fraction:0<width$}", width = TRX_DECIMALS);
    let sun = BigInteger::new(&padded)?;
    Ok(if negative { sun.negate() } else { sun })
}

/// Convert sun to a TRX decimal string without trailing fractional zeros.
///
/// # Examples
/// ```
/// use tron_core::math::BigInteger;
/// use tron_core::utils::units::from_sun;
/// assert_eq!(from_sun(&BigInteger::from_i64(1_500_000)), "1.5");
/// ```
pub fn from_sun(sun: &BigInteger) -> String {
    let digits = sun.abs().to_string();
    let padded = format!("{digits:0>width$}", width = TRX_DECIMALS + 1);
    let (whole, fraction) = padded.split_at(padded.len() - TRX_DECIMALS);
    let fraction = fraction.trim_end_matches('0');

    let sign = if sun.is_negative() { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

/// Whole TRX to sun
pub fn trx_to_sun(trx: u64) -> BigInteger {
    BigInteger::from(trx).multiply(&BigInteger::from_i64(SUN_PER_TRX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sun() {
        assert_eq!(to_sun("1").unwrap().to_string(), "1000000");
        assert_eq!(to_sun("0.000001").unwrap().to_string(), "1");
        assert_eq!(to_sun("1.").unwrap().to_string(), "1000000");
        assert_eq!(to_sun("-2.25").unwrap().to_string(), "-2250000");
        assert_eq!(
            to_sun("123456789012345678901234567890").unwrap().to_string(),
            "123456789012345678901234567890000000"
        );
    }

    #[test]
    fn test_to_sun_rejects_bad_amounts() {
        for bad in ["", ".5", "1.0000001", "abc", "1.2.3", "--1", "1e6", "1.-5"] {
            assert!(to_sun(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_from_sun() {
        assert_eq!(from_sun(&BigInteger::from_i64(1_000_000)), "1");
        assert_eq!(from_sun(&BigInteger::from_i64(1)), "0.000001");
        assert_eq!(from_sun(&BigInteger::from_i64(0)), "0");
        assert_eq!(from_sun(&BigInteger::from_i64(-2_250_000)), "-2.25");
    }

    #[test]
    fn test_round_trip() {
        for amount in ["0.5", "100", "-7.000001", "98765.4321"] {
            assert_eq!(from_sun(&to_sun(amount).unwrap()), amount);
        }
        assert_eq!(trx_to_sun(3).to_string(), "3000000");
        assert_eq!(trx_to_sun(u64::MAX).to_string(), "18446744073709551615000000");
    }
}
