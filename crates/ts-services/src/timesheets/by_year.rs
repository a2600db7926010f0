//! Year view service

use ts_contracts::base::Contract;
use ts_contracts::timesheets::{YearQuery, YearQueryContract};
use ts_core::error::{TsError, TsResult};
use ts_models::YearTimesheet;

use crate::result::ServiceOutput;
use super::{build_year_view, store_error, Operation, TimesheetService};

impl TimesheetService {
    /// Fetch one year of entries for a cost id, grouped by month
    pub async fn by_year(&self, query: YearQuery) -> TsResult<ServiceOutput<YearTimesheet>> {
        let contract = YearQueryContract::new(self.config.min_year, self.config.max_year);
        let (year, cost_id) = contract.validate(&query)?;

        let entries = self.store.find_by_year(year, &cost_id).await.map_err(store_error(Operation::Fetch))?;
        if entries.is_empty() {
            tracing::debug!(year, cost_id = %cost_id, "No timesheet entries for year");
            return Err(TsError::not_found(
                format!("No timesheet entries found for year {} and costId {}", year, cost_id),
                "Please check the year and costId, or create timesheet entries first.",
            ));
        }

        let view = build_year_view(year, entries);
        tracing::info!(year, cost_id = %cost_id, months = view.months.len(), "Timesheet fetched");

        Ok(ServiceOutput::success_with_message(
            view,
            format!("Timesheet for year {} fetched successfully", year),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use ts_contracts::timesheets::YearQuery;
    use ts_core::config::DateUniqueness;

    fn query(year: &str, cost_id: &str) -> YearQuery {
        YearQuery {
            year: year.to_string(),
            cost_id: Some(cost_id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_round_trip_into_month_bucket() {
        let service = service(DateUniqueness::Global);
        service
            .create(create_params(COST_ID, vec![day("2024-03-01", "working", 8)]))
            .await
            .unwrap();

        let output = service.by_year(query("2024", COST_ID)).await.unwrap();
        assert_eq!(output.message(), "Timesheet for year 2024 fetched successfully");

        let view = output.result();
        assert!(view.totals.total_working_hours >= 8);
        let march = view.months.get("March").unwrap();
        assert_eq!(march.days.len(), 1);
        assert_eq!(march.days[0].date.to_string(), "2024-03-01");
    }

    #[tokio::test]
    async fn test_only_matching_cost_id_and_year() {
        let service = service(DateUniqueness::Global);
        service
            .create(create_params(
                COST_ID,
                vec![day("2024-01-10", "working", 8), day("2023-12-29", "working", 8)],
            ))
            .await
            .unwrap();
        service
            .create(create_params(OTHER_COST_ID, vec![day("2024-01-11", "sick", 0)]))
            .await
            .unwrap();

        let output = service.by_year(query("2024", COST_ID)).await.unwrap();
        let view = output.result();
        assert_eq!(view.months.len(), 1);
        assert_eq!(view.totals.total_sick_leaves, 0);
        assert_eq!(view.totals.total_working_hours, 8);
    }

    #[tokio::test]
    async fn test_no_entries_is_not_found() {
        let service = service(DateUniqueness::Global);
        let err = service.by_year(query("2024", COST_ID)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.body().message,
            format!("No timesheet entries found for year 2024 and costId {}", COST_ID)
        );
    }

    #[tokio::test]
    async fn test_year_out_of_range() {
        let service = service(DateUniqueness::Global);
        for year in ["1999", "2101", "twenty"] {
            let err = service.by_year(query(year, COST_ID)).await.unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
    }
}
