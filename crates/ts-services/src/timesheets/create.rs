//! Create service for timesheet days

use ts_contracts::base::Contract;
use ts_contracts::timesheets::{CostIdContract, CreateDayContract};
use ts_core::error::TsResult;
use ts_models::{CreatedTimesheet, NewTimesheetDay};

use crate::result::ServiceOutput;
use super::{store_error, CreateTimesheetParams, Operation, TimesheetService};

impl TimesheetService {
    /// Validate every day in request order, then persist the batch.
    ///
    /// The first invalid day fails the request and nothing is stored.
    pub async fn create(&self, params: CreateTimesheetParams) -> TsResult<ServiceOutput<CreatedTimesheet>> {
        let cost_id = CostIdContract.validate(&params.cost_id).map_err(|e| {
            tracing::warn!(cost_id = ?params.cost_id, "Rejected timesheet cost id");
            e
        })?;

        let contract = CreateDayContract::new(self.config.max_working_hours);
        let days = params
            .days
            .iter()
            .map(|day| contract.validate(day))
            .collect::<TsResult<Vec<NewTimesheetDay>>>()
            .map_err(|e| {
                tracing::warn!(message = %e.body().message, "Rejected timesheet day");
                e
            })?;

        tracing::debug!(cost_id = %cost_id, count = days.len(), "Inserting timesheet days");
        let entries = self.store.insert_days(&cost_id, &days).await.map_err(store_error(Operation::Create))?;

        let created = CreatedTimesheet::from_entries(entries);
        tracing::info!(
            cost_id = %cost_id,
            total_entries = created.summary.total_entries,
            "Timesheet entries created"
        );

        Ok(ServiceOutput::success_with_message(
            created,
            "Timesheet entries created successfully",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use serde_json::json;
    use ts_core::config::DateUniqueness;

    #[tokio::test]
    async fn test_create_reports_summary() {
        let service = service(DateUniqueness::Global);
        let output = service
            .create(create_params(
                COST_ID,
                vec![
                    day("2024-03-01", "working", 8),
                    day("2024-03-04", "sick", 0),
                    day("2024-03-05", "vacation", 0),
                    day("2024-03-06", "working", 6),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(output.message(), "Timesheet entries created successfully");
        let summary = output.result().summary;
        assert_eq!(summary.total_entries, 4);
        assert_eq!(summary.totals.total_working_hours, 14);
        assert_eq!(summary.totals.total_sick_leaves, 1);
        assert_eq!(summary.totals.total_vacation_leaves, 1);
        assert!(output.result().days.iter().all(|d| d.cost_id == COST_ID));
    }

    #[tokio::test]
    async fn test_invalid_cost_id() {
        let service = service(DateUniqueness::Global);
        let err = service
            .create(create_params("not-a-uuid", vec![day("2024-03-01", "working", 8)]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.body().message, "Invalid UUID format for costId");
        assert_eq!(err.body().detail("providedValue"), Some(&json!("not-a-uuid")));
    }

    #[tokio::test]
    async fn test_first_invalid_day_fails_whole_batch() {
        let service = service(DateUniqueness::Global);
        let err = service
            .create(create_params(
                COST_ID,
                vec![
                    day("2024-03-01", "working", 8),
                    day("2024-03-02", "sick", 4),
                    day("2024-03-03", "vacation", 2),
                ],
            ))
            .await
            .unwrap_err();

        assert_eq!(err.body().message, "Invalid working hours for sick leave");
        assert!(service.store().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_date_is_conflict() {
        let service = service(DateUniqueness::Global);
        service
            .create(create_params(COST_ID, vec![day("2024-03-01", "working", 8)]))
            .await
            .unwrap();

        let err = service
            .create(create_params(OTHER_COST_ID, vec![day("2024-03-01", "working", 4)]))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.body().message, "Duplicate entry found");
    }

    #[tokio::test]
    async fn test_per_cost_id_allows_shared_dates() {
        let service = service(DateUniqueness::PerCostId);
        service
            .create(create_params(COST_ID, vec![day("2024-03-01", "working", 8)]))
            .await
            .unwrap();
        assert!(service
            .create(create_params(OTHER_COST_ID, vec![day("2024-03-01", "working", 4)]))
            .await
            .is_ok());
        assert_eq!(
            service
                .create(create_params(COST_ID, vec![day("2024-03-01", "working", 4)]))
                .await
                .unwrap_err()
                .status_code(),
            409
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let service = service(DateUniqueness::Global);
        let output = service.create(create_params(COST_ID, Vec::new())).await.unwrap();
        assert_eq!(output.result().summary.total_entries, 0);
        assert!(output.result().days.is_empty());
    }
}
