/// Utilities for date and time formatting
///
/// Dates are shown pt-BR style (DD/MM/YYYY).
use chrono::{NaiveDate, NaiveDateTime};

/// Example: 2024-03-15 14:02:26 -> "15/03/2024 14:02"
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// Example: 2024-03-15 -> "15/03/2024"
pub fn format_date(value: &NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Optional timestamp as a date, `-` when absent
pub fn format_opt_date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|v| format_date(&v.date()))
        .unwrap_or_else(|| "-".to_string())
}

/// Value of an `<input type="date">` (YYYY-MM-DD); empty or invalid gives None
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn input_date_value(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap();
        assert_eq!(format_datetime(&dt), "15/03/2024 14:02");
        assert_eq!(format_opt_date(Some(dt)), "15/03/2024");
        assert_eq!(format_opt_date(None), "-");
    }

    #[test]
    fn test_input_dates() {
        let date = parse_input_date("2025-01-31");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(input_date_value(date), "2025-01-31");
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("31/01/2025"), None);
        assert_eq!(input_date_value(None), "");
    }
}
