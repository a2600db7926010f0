//! Bulk update service for timesheet days
//!
//! Items are handled in request order. For each item the proposed values
//! are checked first, then the target entry is looked up by date, then the
//! merged values are checked against the stored entry. Only when every item
//! passes are the updates written, in one batch.

use ts_contracts::base::Contract;
use ts_contracts::timesheets::UpdateDayContract;
use ts_core::error::{TsError, TsResult};
use ts_models::{DayUpdate, TimesheetEntry};
use uuid::Uuid;

use crate::result::ServiceOutput;
use super::{store_error, BulkUpdateParams, Operation, TimesheetService};

impl TimesheetService {
    pub async fn bulk_update(&self, updates: BulkUpdateParams) -> TsResult<ServiceOutput<Vec<TimesheetEntry>>> {
        let contract = UpdateDayContract::new(self.config.max_working_hours);
        let mut resolved: Vec<DayUpdate> = Vec::with_capacity(updates.len());
        // Entries already touched by earlier items of this batch
        let mut staged: Vec<(Uuid, TimesheetEntry)> = Vec::new();

        for item in &updates {
            let proposed = contract.validate(item).map_err(|e| {
                tracing::warn!(message = %e.body().message, "Rejected timesheet update");
                e
            })?;

            let stored = self
                .store
                .find_by_date(proposed.date, item.cost_id.as_deref())
                .await
                .map_err(store_error(Operation::Update))?
                .ok_or_else(|| {
                    let date = proposed.date.format("%Y-%m-%d").to_string();
                    tracing::debug!(date = %date, "No timesheet entry to update");
                    TsError::not_found(
                        format!("No timesheet entry found for date {}", date),
                        "Please verify the date or create a new timesheet entry for this date.",
                    )
                })?;

            let current = staged
                .iter()
                .find(|(id, _)| *id == stored.id)
                .map(|(_, entry)| entry.clone())
                .unwrap_or(stored);

            let update = contract.resolve(&proposed, &current, item.cost_id.clone())?;

            let mut merged = current;
            merged.day_type = update.day_type;
            merged.working_hours = update.working_hours;
            match staged.iter_mut().find(|(id, _)| *id == merged.id) {
                Some(slot) => slot.1 = merged,
                None => staged.push((merged.id, merged)),
            }

            resolved.push(update);
        }

        let updated = self.store.apply_updates(&resolved).await.map_err(store_error(Operation::Update))?;
        tracing::info!(count = updated.len(), "Timesheet days updated");

        Ok(ServiceOutput::success_with_message(
            updated,
            "Timesheet days updated successfully",
        ))
    }
}
