//! Listing, lookup and deletion
//!
//! Not routed over HTTP; entries are only created and updated there.

use ts_core::error::{TsError, TsResult};
use ts_models::TimesheetEntry;
use uuid::Uuid;

use super::{store_error, Operation, TimesheetService};

impl TimesheetService {
    pub async fn find_all(&self) -> TsResult<Vec<TimesheetEntry>> {
        self.store.find_all().await.map_err(store_error(Operation::Fetch))
    }

    pub async fn find_one(&self, id: Uuid) -> TsResult<Option<TimesheetEntry>> {
        self.store.find_by_id(id).await.map_err(store_error(Operation::Fetch))
    }

    /// Hard delete one entry
    pub async fn remove(&self, id: Uuid) -> TsResult<TimesheetEntry> {
        let removed = self.store.delete(id).await.map_err(|e| match e {
            ts_db::RepositoryError::NotFound(_) => TsError::not_found(
                format!("No timesheet entry found with id {}", id),
                "Please verify the entry id.",
            ),
            other => store_error(Operation::Delete)(other),
        })?;

        tracing::info!(id = %id, date = %removed.date, "Timesheet entry removed");
        Ok(removed)
    }

    /// Hard delete every entry dated within a year, across all cost ids
    pub async fn delete_by_year(&self, year: i32) -> TsResult<u64> {
        let count = self.store.delete_by_year(year).await.map_err(store_error(Operation::Delete))?;
        tracing::info!(year, count, "Timesheet entries deleted for year");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use ts_core::config::DateUniqueness;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_and_remove() {
        let service = service(DateUniqueness::Global);
        let created = service
            .create(create_params(
                COST_ID,
                vec![day("2024-03-02", "working", 8), day("2024-03-01", "sick", 0)],
            ))
            .await
            .unwrap();
        let id = created.result().days[0].id;

        let all = service.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].date.to_string(), "2024-03-01");

        assert_eq!(service.find_one(id).await.unwrap().unwrap().id, id);
        assert_eq!(service.remove(id).await.unwrap().id, id);
        assert!(service.find_one(id).await.unwrap().is_none());
        assert_eq!(service.remove(id).await.unwrap_err().status_code(), 404);
        assert_eq!(service.remove(Uuid::new_v4()).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_delete_by_year_spans_cost_ids() {
        let service = service(DateUniqueness::Global);
        service
            .create(create_params(COST_ID, vec![day("2024-03-01", "working", 8)]))
            .await
            .unwrap();
        service
            .create(create_params(
                OTHER_COST_ID,
                vec![day("2024-07-01", "vacation", 0), day("2025-01-02", "working", 4)],
            ))
            .await
            .unwrap();

        assert_eq!(service.delete_by_year(2024).await.unwrap(), 2);
        assert_eq!(service.find_all().await.unwrap().len(), 1);
        assert_eq!(service.delete_by_year(2024).await.unwrap(), 0);
    }
}
