//! Decimal normalization between raw integer token units and decimal amounts
//!
//! Venues report token amounts as integer strings in the token's smallest
//! denomination. These conversions must be exact up to 18 decimals (EVM
//! tokens), so everything runs on `rust_decimal` fixed-point — no binary
//! floats anywhere in the money path.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("malformed raw amount '{0}'")]
    Malformed(String),
    #[error("amount {0} does not fit at {1} decimals")]
    Overflow(Decimal, u32),
}

fn pow10(decimals: u32) -> Result<Decimal, AmountError> {
    let units = 10i128
        .checked_pow(decimals)
        .ok_or(AmountError::Overflow(Decimal::ZERO, decimals))?;
    Decimal::try_from_i128_with_scale(units, 0)
        .map_err(|_| AmountError::Overflow(Decimal::ZERO, decimals))
}

/// Convert a raw integer amount string to a decimal amount:
/// `raw / 10^decimals`.
///
/// Fails with `Malformed` when the string is not a non-negative integer.
pub fn to_decimal(raw: &str, decimals: u32) -> Result<Decimal, AmountError> {
    let units: i128 = raw
        .trim()
        .parse()
        .map_err(|_| AmountError::Malformed(raw.to_string()))?;
    if units < 0 {
        return Err(AmountError::Malformed(raw.to_string()));
    }

    Decimal::try_from_i128_with_scale(units, decimals)
        .map(|d| d.normalize())
        .map_err(|_| AmountError::Malformed(raw.to_string()))
}

/// Convert a decimal amount to raw integer units:
/// `trunc(amount * 10^decimals)`, rendered as an integer string.
///
/// Truncates, never rounds up: when bridging an amount to a venue with
/// fewer decimals the request must never exceed what the source leg
/// actually produced.
pub fn to_raw_units(amount: Decimal, decimals: u32) -> Result<String, AmountError> {
    let factor = pow10(decimals)?;
    let scaled = amount
        .checked_mul(factor)
        .ok_or(AmountError::Overflow(amount, decimals))?;

    Ok(scaled.trunc().normalize().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_decimal_basic() {
        assert_eq!(to_decimal("510123456", 6).unwrap(), dec!(510.123456));
        assert_eq!(to_decimal("1000000000000000000", 18).unwrap(), dec!(1));
        assert_eq!(to_decimal("42", 0).unwrap(), dec!(42));
        assert_eq!(to_decimal("0", 9).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_exact_at_18_decimals() {
        // Every digit must survive at full EVM precision
        let d = to_decimal("123456789012345678", 18).unwrap();
        assert_eq!(d.to_string(), "0.123456789012345678");
    }

    #[test]
    fn test_to_decimal_malformed() {
        assert!(matches!(
            to_decimal("not-a-number", 6),
            Err(AmountError::Malformed(_))
        ));
        assert!(matches!(to_decimal("", 6), Err(AmountError::Malformed(_))));
        assert!(matches!(
            to_decimal("1.5", 6),
            Err(AmountError::Malformed(_))
        ));
        assert!(matches!(
            to_decimal("-100", 6),
            Err(AmountError::Malformed(_))
        ));
    }

    #[test]
    fn test_to_raw_units_basic() {
        assert_eq!(to_raw_units(dec!(500), 18).unwrap(), "500000000000000000000");
        assert_eq!(to_raw_units(dec!(510.123456), 6).unwrap(), "510123456");
        assert_eq!(to_raw_units(dec!(0), 9).unwrap(), "0");
    }

    #[test]
    fn test_to_raw_units_truncates_never_rounds_up() {
        // 1.9999999 at 6 decimals: the seventh fractional digit is dropped
        assert_eq!(to_raw_units(dec!(1.9999999), 6).unwrap(), "1999999");
        assert_eq!(to_raw_units(dec!(0.0000009), 6).unwrap(), "0");
    }

    #[test]
    fn test_round_trip_never_overshoots() {
        // to_raw_units(to_decimal(raw, d), d) <= raw, with equality for
        // exact representations
        for (raw, decimals) in [
            ("1000000000000000000", 18u32),
            ("123456789012345678", 18),
            ("510123456", 6),
            ("1", 9),
            ("0", 0),
        ] {
            let round_tripped = to_raw_units(to_decimal(raw, decimals).unwrap(), decimals).unwrap();
            assert_eq!(round_tripped, raw);
        }
    }

    #[test]
    fn test_cross_venue_bridge_drops_excess_precision() {
        // 18-decimal amount re-encoded at 9 decimals keeps only 9 digits
        let normalized = to_decimal("1234567891234567891", 18).unwrap();
        assert_eq!(to_raw_units(normalized, 9).unwrap(), "1234567891");
    }
}
