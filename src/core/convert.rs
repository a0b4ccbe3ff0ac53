//! Conversion request validation and the USD-pivot arithmetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::{decimal_places, format_amount};
use crate::core::rates::RateTable;

/// Validation failures surfaced to API callers as 400 responses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing amount/from/to")]
    MissingField,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Unsupported currency")]
    UnsupportedCurrency,
}

/// Amounts arrive as JSON numbers or loosely formatted strings; any other
/// JSON type degrades to its textual form and fails amount parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl AmountInput {
    fn as_text(&self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s.clone(),
            AmountInput::Other(v) => v.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionRequest {
    pub amount: Option<AmountInput>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub result: f64,
    pub formatted_from: String,
    pub formatted_result: String,
}

/// Strips thousands separators and stray characters, then parses the rest as
/// a float. Keeps digits, `.` and `-`; the parse itself rejects a second
/// decimal point or a misplaced sign.
fn parse_amount(input: &AmountInput) -> Result<f64, ValidationError> {
    let cleaned: String = input
        .as_text()
        .trim()
        .replace(',', "")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let amount: f64 = cleaned.parse().map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

// Ties round to the even neighbor.
fn round_to_places(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round_ties_even() / scale
}

/// Validates `request` against `rates` and converts through the USD pivot.
///
/// Requires a USD-relative table with `rates["USD"] == 1`: the amount is
/// divided by the source rate and multiplied by the target rate.
pub fn convert(
    request: &ConversionRequest,
    rates: &RateTable,
) -> Result<Conversion, ValidationError> {
    let (amount_input, from, to) = match (&request.amount, &request.from, &request.to) {
        (Some(amount), Some(from), Some(to)) => (amount, from.trim(), to.trim()),
        _ => return Err(ValidationError::MissingField),
    };
    if from.is_empty() || to.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let amount = parse_amount(amount_input)?;
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }

    let from = from.to_uppercase();
    let to = to.to_uppercase();
    let (Some(from_rate), Some(to_rate)) = (rates.get(&from), rates.get(&to)) else {
        return Err(ValidationError::UnsupportedCurrency);
    };

    let amount_in_usd = amount / from_rate;
    let result = round_to_places(amount_in_usd * to_rate, decimal_places(&to));

    Ok(Conversion {
        formatted_from: format!("{} {}", format_amount(amount, &from), from),
        formatted_result: format!("{} {}", format_amount(result, &to), to),
        from,
        to,
        amount,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::fallback_rates;
    use serde_json::json;

    fn request(amount: AmountInput, from: &str, to: &str) -> ConversionRequest {
        ConversionRequest {
            amount: Some(amount),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }

    fn text(s: &str) -> AmountInput {
        AmountInput::Text(s.to_string())
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let empty = ConversionRequest {
            amount: None,
            from: None,
            to: None,
        };
        assert_eq!(
            convert(&empty, &fallback_rates()),
            Err(ValidationError::MissingField)
        );

        let blank_from = request(text("10"), "  ", "USD");
        assert_eq!(
            convert(&blank_from, &fallback_rates()),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn test_unparseable_amount_is_invalid() {
        for raw in ["abc", "", "1.2.3", "--5"] {
            assert_eq!(
                convert(&request(text(raw), "USD", "EUR"), &fallback_rates()),
                Err(ValidationError::InvalidAmount),
                "amount {raw:?} should be invalid"
            );
        }
        // Non-string, non-number JSON degrades to its text and fails the parse
        let boolean = request(AmountInput::Other(json!(true)), "USD", "EUR");
        assert_eq!(
            convert(&boolean, &fallback_rates()),
            Err(ValidationError::InvalidAmount)
        );
    }

    #[test]
    fn test_zero_and_negative_amounts_are_rejected() {
        for input in [text("0"), text("-5"), AmountInput::Number(0.0)] {
            assert_eq!(
                convert(&request(input, "USD", "EUR"), &fallback_rates()),
                Err(ValidationError::NonPositiveAmount)
            );
        }
    }

    #[test]
    fn test_unknown_currency_is_unsupported() {
        assert_eq!(
            convert(&request(text("10"), "USD", "XYZ"), &fallback_rates()),
            Err(ValidationError::UnsupportedCurrency)
        );
        assert_eq!(
            convert(&request(text("10"), "XYZ", "USD"), &fallback_rates()),
            Err(ValidationError::UnsupportedCurrency)
        );
    }

    #[test]
    fn test_amount_sanitization_accepts_loose_input() {
        let conversion = convert(&request(text(" $1,234.50 "), "USD", "USD"), &fallback_rates())
            .expect("sanitized amount should parse");
        assert_eq!(conversion.amount, 1234.50);
    }

    #[test]
    fn test_same_currency_is_identity_up_to_rounding() {
        let conversion =
            convert(&request(text("123.456"), "EUR", "EUR"), &fallback_rates()).unwrap();
        assert_eq!(conversion.result, 123.46);
    }

    #[test]
    fn test_usd_base_multiplies_directly() {
        let rates = fallback_rates();
        let conversion = convert(&request(text("10"), "USD", "GBP"), &rates).unwrap();
        assert_eq!(conversion.result, 8.2);
    }

    // Fallback table has USD=1 and JPY=134.08; JPY formats with no decimals.
    #[test]
    fn test_usd_to_jpy_with_fallback_rates() {
        let conversion =
            convert(&request(text("1,000"), "usd", "jpy"), &fallback_rates()).unwrap();
        assert_eq!(conversion.from, "USD");
        assert_eq!(conversion.to, "JPY");
        assert_eq!(conversion.amount, 1000.0);
        assert_eq!(conversion.result, 134080.0);
        assert_eq!(conversion.formatted_from, "1,000.00 USD");
        assert_eq!(conversion.formatted_result, "134,080 JPY");
    }

    #[test]
    fn test_eur_to_usd_with_fallback_rates() {
        let conversion = convert(&request(text("100"), "EUR", "USD"), &fallback_rates()).unwrap();
        assert_eq!(conversion.result, 106.38);
        assert_eq!(conversion.formatted_result, "106.38 USD");
    }

    #[test]
    fn test_round_trip_is_stable_within_rounding() {
        let rates = fallback_rates();
        let there = convert(&request(text("250"), "EUR", "GBP"), &rates).unwrap();
        let back = convert(
            &request(AmountInput::Number(there.result), "GBP", "EUR"),
            &rates,
        )
        .unwrap();
        assert!(
            (back.result - 250.0).abs() < 0.02,
            "round trip drifted: {}",
            back.result
        );
    }

    // Ties round to even, both at zero and at two decimal places.
    #[test]
    fn test_rounding_ties_go_to_even() {
        let unit = RateTable::from([("USD".to_string(), 1.0), ("JPY".to_string(), 1.0)]);
        let down = convert(&request(text("2.5"), "USD", "JPY"), &unit).unwrap();
        assert_eq!(down.result, 2.0);
        let up = convert(&request(text("3.5"), "USD", "JPY"), &unit).unwrap();
        assert_eq!(up.result, 4.0);

        let cents = convert(&request(text("0.125"), "USD", "USD"), &unit).unwrap();
        assert_eq!(cents.result, 0.12);
    }
}
