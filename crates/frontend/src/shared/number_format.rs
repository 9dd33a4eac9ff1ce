//! Number formatting for tables and totals (pt-BR: `1.234,56`)

use super::config::config;
use contracts::shared::numeric::{round_to, CURRENCY_DECIMALS, WEIGHT_DECIMALS};
use rust_decimal::Decimal;

/// Formats a decimal with thousands separator (`.`), decimal comma and the
/// given number of decimals (half away from zero).
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(format_number_with_decimals(dec!(1234.567), 2), "1.234,57");
/// ```
pub fn format_number_with_decimals(value: Decimal, decimals: u32) -> String {
    let formatted = round_to(value, decimals).to_string();
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match digits.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (digits, None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    // "-0,00" after rounding reads as zero
    let sign = if integer_part.chars().chain(decimal_part.unwrap_or("").chars()).all(|c| c == '0') {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// `R$ 1.234,56`
pub fn format_money(value: Decimal) -> String {
    format_money_with(value, &config().settlement.currency_symbol)
}

pub fn format_money_with(value: Decimal, symbol: &str) -> String {
    format!("{} {}", symbol, format_number_with_decimals(value, CURRENCY_DECIMALS))
}

/// Quantities at the precision the calculators keep: up to
/// [`WEIGHT_DECIMALS`] for weight lines, integer otherwise.
pub fn format_quantity(value: Decimal, weight_based: bool) -> String {
    if weight_based {
        let rounded = round_to(value, WEIGHT_DECIMALS).normalize();
        let decimals = rounded.scale();
        format!("{} kg", format_number_with_decimals(rounded, decimals))
    } else {
        format_number_with_decimals(value.trunc(), 0)
    }
}

/// Value for an `<input type="number">`: plain dot decimal, no grouping.
pub fn input_value(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::numeric::normalize_quantity;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(d("1234.56")), "R$ 1.234,56");
        assert_eq!(format_money(d("1234567.891")), "R$ 1.234.567,89");
        assert_eq!(format_money(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_money(d("-1234.5")), "R$ -1.234,50");
        assert_eq!(format_money(d("17.5")), "R$ 17,50");
        assert_eq!(format_money(d("-0.001")), "R$ 0,00");
        assert_eq!(format_money_with(d("5.25"), "US$"), "US$ 5,25");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(d("1234.567"), 0), "1.235");
        assert_eq!(format_number_with_decimals(d("1234.567"), 1), "1.234,6");
        assert_eq!(format_number_with_decimals(d("1234.567"), 3), "1.234,567");
        assert_eq!(format_number_with_decimals(d("999"), 0), "999");
        assert_eq!(format_number_with_decimals(d("100000"), 0), "100.000");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(d("1.750"), true), "1,75 kg");
        assert_eq!(format_quantity(d("2"), true), "2 kg");
        assert_eq!(format_quantity(d("0.12345"), true), "0,123 kg");
        assert_eq!(format_quantity(d("1500"), false), "1.500");
        assert_eq!(format_quantity(d("7.9"), false), "7");
    }

    #[test]
    fn test_format_quantity_matches_stored_precision() {
        for raw in ["0.12345", "2.5", "1.0005", "7"] {
            let stored = normalize_quantity(d(raw), true);
            let shown = format_quantity(d(raw), true);
            assert_eq!(shown, format!("{} kg", format_number_with_decimals(stored, stored.scale())));
        }
        assert_eq!(format_quantity(d("1.0005"), true), "1,001 kg");
    }

    #[test]
    fn test_input_value() {
        assert_eq!(input_value(d("3.000")), "3");
        assert_eq!(input_value(d("0.750")), "0.75");
    }
}
