//! Base contract system

use chrono::{DateTime, NaiveDate};
use serde_json::json;
use ts_core::error::TsError;

/// Result of contract validation
pub type ValidationResult<T = ()> = Result<T, TsError>;

/// Base contract trait
///
/// A contract validates raw input and yields the validated value.
pub trait Contract<T: ?Sized>: Send + Sync {
    type Output;

    /// Validate the input
    fn validate(&self, input: &T) -> ValidationResult<Self::Output>;
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (as echoed back by
/// clients that stored a serialized entry), keeping only the date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()))
}

/// Validate a required date field
pub fn validate_date(raw: Option<&str>) -> ValidationResult<NaiveDate> {
    let provided = raw.unwrap_or_default();
    parse_date(provided).ok_or_else(|| {
        TsError::validation(
            "Invalid date format",
            json!({
                "error": "Date Validation Failed",
                "providedValue": raw,
                "expectedFormat": "YYYY-MM-DD",
                "example": "2024-03-01",
                "help": "Please ensure all dates are in ISO format (YYYY-MM-DD)",
            }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_date(" 2024-12-31 "), NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_parse_timestamp_keeps_date() {
        assert_eq!(
            parse_date("2024-03-01T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("01/03/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_missing_date_reports_null_value() {
        let err = validate_date(None).unwrap_err();
        let body = err.body();
        assert_eq!(body.message, "Invalid date format");
        assert_eq!(body.detail("providedValue"), Some(&serde_json::Value::Null));
    }
}
