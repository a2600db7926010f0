//! Timesheet services
//!
//! [`TimesheetService`] is the single entry point used by the HTTP layer.
//! Each operation lives in its own module:
//!
//! - `create`: validate and persist a batch of days
//! - `by_year`: fetch and aggregate one year for a cost id
//! - `bulk_update`: overwrite day type and hours of existing entries
//! - `manage`: listing, lookup and deletion used by maintenance tasks

mod aggregate;
mod by_year;
mod bulk_update;
mod create;
mod manage;

pub use aggregate::build_year_view;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use ts_contracts::timesheets::TimesheetDayData;
use ts_core::config::TimesheetConfig;
use ts_core::error::TsError;
use ts_db::{RepositoryError, TimesheetStore};

/// One day of a create request, as received
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetDayParams {
    pub date: Option<String>,
    pub day_type: Option<String>,
    pub working_hours: Option<i64>,
}

impl TimesheetDayData for TimesheetDayParams {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn day_type(&self) -> Option<&str> {
        self.day_type.as_deref()
    }

    fn working_hours(&self) -> Option<i64> {
        self.working_hours
    }
}

/// Create request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimesheetParams {
    pub cost_id: Option<String>,
    #[serde(default)]
    pub days: Vec<TimesheetDayParams>,
}

/// One item of a bulk update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDayParams {
    pub date: Option<String>,
    pub day_type: Option<String>,
    pub working_hours: Option<i64>,
    /// Narrows the target when several cost ids share a date
    pub cost_id: Option<String>,
}

impl TimesheetDayData for UpdateDayParams {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn day_type(&self) -> Option<&str> {
        self.day_type.as_deref()
    }

    fn working_hours(&self) -> Option<i64> {
        self.working_hours
    }
}

pub type BulkUpdateParams = Vec<UpdateDayParams>;

/// Timesheet operations over a shared store
#[derive(Clone)]
pub struct TimesheetService {
    store: Arc<dyn TimesheetStore>,
    config: TimesheetConfig,
}

impl TimesheetService {
    pub fn new(store: Arc<dyn TimesheetStore>, config: TimesheetConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn TimesheetStore> {
        &self.store
    }
}

/// Store operation a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Create,
    Fetch,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create timesheet entry",
            Operation::Fetch => "Failed to fetch timesheet entries",
            Operation::Update => "Failed to update timesheet entry",
            Operation::Delete => "Failed to delete timesheet entry",
        }
    }
}

/// Map a store failure during `op` to the error reported to the caller
pub(crate) fn store_error(op: Operation) -> impl Fn(RepositoryError) -> TsError {
    move |err| match err {
        RepositoryError::DuplicateDate(date) => TsError::conflict(
            "Duplicate entry found",
            json!({
                "error": "Unique Constraint Violation",
                "date": date.format("%Y-%m-%d").to_string(),
                "help": "A timesheet entry for this date already exists. Please use a different date or update the existing entry.",
            }),
        ),
        RepositoryError::NotFound(message) => TsError::not_found(
            message,
            "The entry may have been removed by another request.",
        ),
        other => {
            tracing::error!(error = %other, operation = ?op, "Timesheet store failure");
            TsError::store(
                op.failure_message(),
                json!({
                    "error": other.to_string(),
                    "help": "Please check your input data and try again.",
                }),
            )
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ts_core::config::DateUniqueness;
    use ts_db::MemoryTimesheetStore;

    pub const COST_ID: &str = "0b9a7c8e-5d7e-4a57-9a53-1c2b3d4e5f60";
    pub const OTHER_COST_ID: &str = "6f1c2d3e-4b5a-4c6d-8e7f-a0b1c2d3e4f5";

    pub fn service(uniqueness: DateUniqueness) -> TimesheetService {
        let config = TimesheetConfig {
            date_uniqueness: uniqueness,
            ..TimesheetConfig::default()
        };
        TimesheetService::new(Arc::new(MemoryTimesheetStore::new(uniqueness)), config)
    }

    pub fn day(date: &str, day_type: &str, hours: i64) -> TimesheetDayParams {
        TimesheetDayParams {
            date: Some(date.to_string()),
            day_type: Some(day_type.to_string()),
            working_hours: Some(hours),
        }
    }

    pub fn create_params(cost_id: &str, days: Vec<TimesheetDayParams>) -> CreateTimesheetParams {
        CreateTimesheetParams {
            cost_id: Some(cost_id.to_string()),
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = store_error(Operation::Create)(RepositoryError::DuplicateDate(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.body().detail("date"), Some(&json!("2024-03-01")));
    }

    #[test]
    fn test_other_failures_map_to_store_error() {
        let err = store_error(Operation::Create)(RepositoryError::InvalidRow("bad".into()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.body().message, "Failed to create timesheet entry");
        assert_eq!(err.body().detail("error"), Some(&json!("Invalid row: bad")));
        assert!(err.body().detail("help").is_some());
    }

    #[test]
    fn test_store_failure_message_names_operation() {
        let cases = [
            (Operation::Fetch, "Failed to fetch timesheet entries"),
            (Operation::Update, "Failed to update timesheet entry"),
            (Operation::Delete, "Failed to delete timesheet entry"),
        ];
        for (op, message) in cases {
            let err = store_error(op)(RepositoryError::InvalidRow("bad".into()));
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.body().message, message);
            assert!(err.body().details.is_object());
        }
    }

    #[test]
    fn test_params_deserialize_camel_case() {
        let params: CreateTimesheetParams = serde_json::from_value(json!({
            "costId": "abc",
            "days": [{"date": "2024-03-01", "dayType": "working", "workingHours": 8}]
        }))
        .unwrap();
        assert_eq!(params.cost_id.as_deref(), Some("abc"));
        assert_eq!(params.days[0].working_hours, Some(8));

        let updates: BulkUpdateParams =
            serde_json::from_value(json!([{"date": "2024-03-01", "dayType": "sick"}])).unwrap();
        assert_eq!(updates[0].working_hours, None);
    }
}
