//! Normalization of raw field text into typed values.
//!
//! Every cleaner is total: input it cannot make sense of maps to a default
//! instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ImportError;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Strips everything but digits and dots, then parses what is left.
///
/// `"£1,234.56"` becomes `1234.56`; `"abc"`, `""` and `"1.2.3"` become `0.0`.
pub fn clean_price(raw: &str) -> f64 {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    digits.parse::<f64>().unwrap_or(0.0)
}

/// Parses a stock level. Non-numeric and negative input yield 0.
///
/// A decimal numeral keeps its integer part: `"12.7"` is 12. Values past
/// `i64::MAX`, the range of the INTEGER column, saturate there.
pub fn clean_stock(raw: &str) -> i64 {
    let trimmed = raw.trim();

    if let Ok(stock) = trimmed.parse::<i64>() {
        return stock.max(0);
    }

    match trimmed.parse::<f64>() {
        // `as` saturates at i64::MAX
        Ok(stock) if stock.is_finite() && stock > 0.0 => stock.trunc() as i64,
        _ => 0,
    }
}

/// `"yes"` in any case, surrounded by any whitespace, is the only truthy value.
pub fn clean_discontinued(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("yes")
}

/// Parses the optional added-at column. Blank input means no timestamp.
///
/// # Errors
///
/// [`ImportError::InvalidTimestamp`] when a non-blank value matches none of
/// the accepted formats.
pub fn parse_timestamp(raw: &str) -> Result<Option<NaiveDateTime>, ImportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(timestamp.naive_utc()));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(Some)
        .ok_or_else(|| ImportError::InvalidTimestamp(trimmed.to_string()))
}
