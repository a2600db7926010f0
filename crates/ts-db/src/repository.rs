//! Repository trait for timesheet persistence
//!
//! Batch writes are all-or-nothing: when one item of `insert_days` or
//! `apply_updates` fails, nothing from that call is stored.

use async_trait::async_trait;
use chrono::NaiveDate;
use ts_core::config::DateUniqueness;
use ts_models::{DayUpdate, NewTimesheetDay, TimesheetEntry};
use uuid::Uuid;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// The date uniqueness constraint rejected a write
    #[error("Duplicate entry for date {0}")]
    DuplicateDate(NaiveDate),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to an entry
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Timesheet persistence
#[async_trait]
pub trait TimesheetStore: Send + Sync {
    /// Scope of the date uniqueness constraint this store enforces
    fn uniqueness(&self) -> DateUniqueness;

    /// Insert a batch of days for one cost id, in order
    async fn insert_days(
        &self,
        cost_id: &str,
        days: &[NewTimesheetDay],
    ) -> RepositoryResult<Vec<TimesheetEntry>>;

    /// Entries of a cost id dated within a calendar year, by date ascending
    async fn find_by_year(&self, year: i32, cost_id: &str) -> RepositoryResult<Vec<TimesheetEntry>>;

    /// The earliest created entry on a date, optionally narrowed to a cost id
    async fn find_by_date(
        &self,
        date: NaiveDate,
        cost_id: Option<&str>,
    ) -> RepositoryResult<Option<TimesheetEntry>>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<TimesheetEntry>>;

    async fn find_all(&self) -> RepositoryResult<Vec<TimesheetEntry>>;

    /// Overwrite day type and hours of the entries addressed by date
    async fn apply_updates(&self, updates: &[DayUpdate]) -> RepositoryResult<Vec<TimesheetEntry>>;

    /// Delete an entry, returning it
    async fn delete(&self, id: Uuid) -> RepositoryResult<TimesheetEntry>;

    /// Delete every entry dated within a calendar year, returning the count
    async fn delete_by_year(&self, year: i32) -> RepositoryResult<u64>;

    /// Check the store is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}

/// First and last day of a calendar year
pub fn year_bounds(year: i32) -> RepositoryResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    start
        .zip(end)
        .ok_or_else(|| RepositoryError::InvalidRow(format!("year {} is out of range", year)))
}
