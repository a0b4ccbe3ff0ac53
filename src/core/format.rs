//! Human-readable amount formatting.

use std::collections::HashMap;

use once_cell::sync::Lazy;

// Per-currency decimal places; codes not listed use two.
static DECIMAL_PLACES: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| HashMap::from([("JPY", 0), ("INR", 0)]));

pub fn decimal_places(currency: &str) -> u32 {
    DECIMAL_PLACES.get(currency).copied().unwrap_or(2)
}

/// Formats `value` with the currency's decimal places and `,` thousands
/// grouping, e.g. `1234.5` as `"1,234.50"` for USD or `"1,235"` for JPY.
pub fn format_amount(value: f64, currency: &str) -> String {
    let places = decimal_places(currency) as usize;
    let fixed = format!("{value:.places$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_places_defaults_to_two() {
        assert_eq!(decimal_places("USD"), 2);
        assert_eq!(decimal_places("EUR"), 2);
        assert_eq!(decimal_places("JPY"), 0);
        assert_eq!(decimal_places("INR"), 0);
        assert_eq!(decimal_places("XYZ"), 2);
    }

    #[test]
    fn test_groups_integer_digits_in_threes() {
        assert_eq!(format_amount(1234.0, "USD"), "1,234.00");
        assert_eq!(format_amount(1234567.891, "USD"), "1,234,567.89");
        assert_eq!(format_amount(134080.0, "JPY"), "134,080");
    }

    #[test]
    fn test_small_values_have_no_separator() {
        assert_eq!(format_amount(999.0, "USD"), "999.00");
        assert_eq!(format_amount(0.5, "USD"), "0.50");
        assert_eq!(format_amount(42.0, "JPY"), "42");
    }

    #[test]
    fn test_sign_stays_ahead_of_grouping() {
        assert_eq!(format_amount(-1234.5, "USD"), "-1,234.50");
    }
}
