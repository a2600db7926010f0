//! Timesheet repository
//!
//! PostgreSQL implementation of [`TimesheetStore`]. Batch writes run inside
//! a single transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use ts_core::config::DateUniqueness;
use ts_models::{DayType, DayUpdate, NewTimesheetDay, TimesheetEntry};
use uuid::Uuid;

use crate::repository::{year_bounds, RepositoryError, RepositoryResult, TimesheetStore};

const UNIQUE_VIOLATION: &str = "23505";

/// Timesheet database entity
#[derive(Debug, Clone, FromRow)]
pub struct TimesheetRow {
    pub id: Uuid,
    pub cost_id: String,
    pub date: NaiveDate,
    pub day_type: String,
    pub working_hours: i32,
}

impl TimesheetRow {
    pub fn into_entry(self) -> RepositoryResult<TimesheetEntry> {
        let day_type = self
            .day_type
            .parse::<DayType>()
            .map_err(|e| RepositoryError::InvalidRow(e.to_string()))?;
        let working_hours = u32::try_from(self.working_hours).map_err(|_| {
            RepositoryError::InvalidRow(format!("negative working hours on {}", self.id))
        })?;

        Ok(TimesheetEntry {
            id: self.id,
            cost_id: self.cost_id,
            date: self.date,
            day_type,
            working_hours,
        })
    }
}

fn into_entries(rows: Vec<TimesheetRow>) -> RepositoryResult<Vec<TimesheetEntry>> {
    rows.into_iter().map(TimesheetRow::into_entry).collect()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Timesheet repository implementation
pub struct PgTimesheetRepository {
    pool: PgPool,
    uniqueness: DateUniqueness,
}

impl PgTimesheetRepository {
    pub fn new(pool: PgPool, uniqueness: DateUniqueness) -> Self {
        Self { pool, uniqueness }
    }
}

#[async_trait]
impl TimesheetStore for PgTimesheetRepository {
    fn uniqueness(&self) -> DateUniqueness {
        self.uniqueness
    }

    async fn insert_days(
        &self,
        cost_id: &str,
        days: &[NewTimesheetDay],
    ) -> RepositoryResult<Vec<TimesheetEntry>> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(days.len());

        for day in days {
            let row = sqlx::query_as::<_, TimesheetRow>(
                r#"
                INSERT INTO timesheets (id, cost_id, date, day_type, working_hours)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, cost_id, date, day_type, working_hours
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(cost_id)
            .bind(day.date)
            .bind(day.day_type.as_str())
            .bind(day.working_hours as i32)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepositoryError::DuplicateDate(day.date)
                } else {
                    RepositoryError::Database(e)
                }
            })?;
            rows.push(row);
        }

        tx.commit().await?;
        into_entries(rows)
    }

    async fn find_by_year(&self, year: i32, cost_id: &str) -> RepositoryResult<Vec<TimesheetEntry>> {
        let (start, end) = year_bounds(year)?;
        let rows = sqlx::query_as::<_, TimesheetRow>(
            r#"
            SELECT id, cost_id, date, day_type, working_hours
            FROM timesheets
            WHERE cost_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(cost_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        into_entries(rows)
    }

    async fn find_by_date(
        &self,
        date: NaiveDate,
        cost_id: Option<&str>,
    ) -> RepositoryResult<Option<TimesheetEntry>> {
        let row = sqlx::query_as::<_, TimesheetRow>(
            r#"
            SELECT id, cost_id, date, day_type, working_hours
            FROM timesheets
            WHERE date = $1 AND ($2::text IS NULL OR cost_id = $2)
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(date)
        .bind(cost_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TimesheetRow::into_entry).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<TimesheetEntry>> {
        let row = sqlx::query_as::<_, TimesheetRow>(
            "SELECT id, cost_id, date, day_type, working_hours FROM timesheets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TimesheetRow::into_entry).transpose()
    }

    async fn find_all(&self) -> RepositoryResult<Vec<TimesheetEntry>> {
        let rows = sqlx::query_as::<_, TimesheetRow>(
            r#"
            SELECT id, cost_id, date, day_type, working_hours
            FROM timesheets
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_entries(rows)
    }

    async fn apply_updates(&self, updates: &[DayUpdate]) -> RepositoryResult<Vec<TimesheetEntry>> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(updates.len());

        for update in updates {
            let row = sqlx::query_as::<_, TimesheetRow>(
                r#"
                UPDATE timesheets
                SET day_type = $1, working_hours = $2, updated_at = NOW()
                WHERE id = (
                    SELECT id FROM timesheets
                    WHERE date = $3 AND ($4::text IS NULL OR cost_id = $4)
                    ORDER BY created_at ASC, id ASC
                    LIMIT 1
                )
                RETURNING id, cost_id, date, day_type, working_hours
                "#,
            )
            .bind(update.day_type.as_str())
            .bind(update.working_hours as i32)
            .bind(update.date)
            .bind(update.cost_id.as_deref())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("No timesheet entry found for date {}", update.date))
            })?;
            rows.push(row);
        }

        tx.commit().await?;
        into_entries(rows)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<TimesheetEntry> {
        let row = sqlx::query_as::<_, TimesheetRow>(
            r#"
            DELETE FROM timesheets WHERE id = $1
            RETURNING id, cost_id, date, day_type, working_hours
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Timesheet entry with id {}", id)))?;

        row.into_entry()
    }

    async fn delete_by_year(&self, year: i32) -> RepositoryResult<u64> {
        let (start, end) = year_bounds(year)?;
        let result = sqlx::query("DELETE FROM timesheets WHERE date >= $1 AND date <= $2")
            .bind(start)
            .bind(end)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day_type: &str, hours: i32) -> TimesheetRow {
        TimesheetRow {
            id: Uuid::new_v4(),
            cost_id: "cost".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            day_type: day_type.to_string(),
            working_hours: hours,
        }
    }

    #[test]
    fn test_row_into_entry() {
        let entry = row("sick", 0).into_entry().unwrap();
        assert_eq!(entry.day_type, DayType::Sick);
        assert_eq!(entry.working_hours, 0);
    }

    #[test]
    fn test_row_with_unknown_day_type() {
        assert!(matches!(
            row("holiday", 0).into_entry(),
            Err(RepositoryError::InvalidRow(_))
        ));
        assert!(matches!(
            row("working", -1).into_entry(),
            Err(RepositoryError::InvalidRow(_))
        ));
    }
}
