//! Year view query contract

use ts_core::error::TsError;

use crate::base::{Contract, ValidationResult};

/// Raw `:year` path segment and `costId` query parameter
#[derive(Debug, Clone, Default)]
pub struct YearQuery {
    pub year: String,
    pub cost_id: Option<String>,
}

/// Contract for the year view; the cost id is checked first
#[derive(Debug, Clone, Copy)]
pub struct YearQueryContract {
    min_year: i32,
    max_year: i32,
}

impl YearQueryContract {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }
}

impl Contract<YearQuery> for YearQueryContract {
    type Output = (i32, String);

    fn validate(&self, query: &YearQuery) -> ValidationResult<(i32, String)> {
        let cost_id = match query.cost_id.as_deref().map(str::trim) {
            Some(cost_id) if !cost_id.is_empty() => cost_id.to_string(),
            _ => {
                return Err(TsError::validation(
                    "Missing required parameter: costId",
                    "Please provide a valid costId in the query parameters to fetch timesheet entries.",
                ))
            }
        };

        let year = query
            .year
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|year| (self.min_year..=self.max_year).contains(year))
            .ok_or_else(|| {
                TsError::validation(
                    "Invalid year parameter",
                    format!(
                        "Please provide a valid year between {} and {}.",
                        self.min_year, self.max_year
                    ),
                )
            })?;

        Ok((year, cost_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(year: &str, cost_id: Option<&str>) -> YearQuery {
        YearQuery {
            year: year.to_string(),
            cost_id: cost_id.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_query() {
        let contract = YearQueryContract::new(2000, 2100);
        assert_eq!(
            contract.validate(&query("2024", Some("abc"))).unwrap(),
            (2024, "abc".to_string())
        );
        assert!(contract.validate(&query("2000", Some("abc"))).is_ok());
        assert!(contract.validate(&query("2100", Some("abc"))).is_ok());
    }

    #[test]
    fn test_year_out_of_range() {
        let contract = YearQueryContract::new(2000, 2100);
        for year in ["1999", "2101", "-5", "abc", ""] {
            let err = contract.validate(&query(year, Some("abc"))).unwrap_err();
            assert_eq!(err.body().message, "Invalid year parameter");
        }
    }

    #[test]
    fn test_missing_cost_id_reported_before_year() {
        let contract = YearQueryContract::new(2000, 2100);
        for cost_id in [None, Some(""), Some("  ")] {
            let err = contract.validate(&query("1800", cost_id)).unwrap_err();
            assert_eq!(err.body().message, "Missing required parameter: costId");
        }
    }
}
