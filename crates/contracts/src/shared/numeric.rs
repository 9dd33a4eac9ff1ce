//! Decimal helpers shared by every calculation.
//!
//! Quantities and money stay exact `Decimal`s; rounding happens only when a
//! value is displayed or submitted.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places kept for weight-based quantities (kg of dry ice).
pub const WEIGHT_DECIMALS: u32 = 3;

/// Decimal places of currency amounts.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Parse user-entered numeric text, degrading to zero.
///
/// Accepts `,` as decimal separator. Empty input, garbage and negative values
/// all yield `0`.
pub fn parse_or_zero(input: &str) -> Decimal {
    let cleaned = input.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    let parsed = Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned));
    match parsed {
        Ok(value) if value > Decimal::ZERO => value,
        _ => Decimal::ZERO,
    }
}

/// Negative values become zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Round to 2 decimal places, half away from zero, padded to scale 2.
pub fn round_currency(value: Decimal) -> Decimal {
    round_to(value, CURRENCY_DECIMALS)
}

pub fn round_to(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

/// Normalise an entered quantity to the precision a line accepts:
/// weight lines keep up to 3 decimals, unit lines keep the integer part.
pub fn normalize_quantity(value: Decimal, weight_based: bool) -> Decimal {
    let value = non_negative(value);
    if weight_based {
        value
            .round_dp_with_strategy(WEIGHT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    } else {
        value.trunc()
    }
}

/// True when the value carries a fractional part.
pub fn has_fraction(value: Decimal) -> bool {
    value.fract() != Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("3"), d("3"));
        assert_eq!(parse_or_zero(" 0.750 "), d("0.75"));
        assert_eq!(parse_or_zero("2,5"), d("2.5"));
        assert_eq!(parse_or_zero("1e1"), d("10"));
        assert_eq!(parse_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_or_zero("abc"), Decimal::ZERO);
        assert_eq!(parse_or_zero("NaN"), Decimal::ZERO);
        assert_eq!(parse_or_zero("-4"), Decimal::ZERO);
    }

    #[test]
    fn test_round_currency_pads_and_rounds_half_up() {
        assert_eq!(round_currency(d("17.5")).to_string(), "17.50");
        assert_eq!(round_currency(d("0.005")).to_string(), "0.01");
        assert_eq!(round_currency(d("5.2549")).to_string(), "5.25");
        assert_eq!(round_currency(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(d("2.7"), false), d("2"));
        assert_eq!(normalize_quantity(d("0.7505"), true), d("0.751"));
        assert_eq!(normalize_quantity(d("1.750"), true), d("1.75"));
        assert_eq!(normalize_quantity(d("-1"), true), Decimal::ZERO);
    }

    #[test]
    fn test_has_fraction() {
        assert!(has_fraction(d("2.5")));
        assert!(!has_fraction(d("2.000")));
    }
}
