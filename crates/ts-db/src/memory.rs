//! In-memory timesheet store
//!
//! Keeps entries in creation order and enforces the same uniqueness scope
//! as the PostgreSQL schema. Used by tests and by the server when no
//! database is configured.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use parking_lot::RwLock;
use ts_core::config::DateUniqueness;
use ts_models::{DayUpdate, NewTimesheetDay, TimesheetEntry};
use uuid::Uuid;

use crate::repository::{RepositoryError, RepositoryResult, TimesheetStore};

#[derive(Debug, Default)]
pub struct MemoryTimesheetStore {
    entries: RwLock<Vec<TimesheetEntry>>,
    uniqueness: DateUniqueness,
}

impl MemoryTimesheetStore {
    pub fn new(uniqueness: DateUniqueness) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            uniqueness,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn collides(&self, entry: &TimesheetEntry, cost_id: &str, date: NaiveDate) -> bool {
        entry.date == date
            && match self.uniqueness {
                DateUniqueness::Global => true,
                DateUniqueness::PerCostId => entry.cost_id == cost_id,
            }
    }
}

fn locate(entries: &[TimesheetEntry], date: NaiveDate, cost_id: Option<&str>) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.date == date && cost_id.map_or(true, |c| e.cost_id == c))
}

#[async_trait]
impl TimesheetStore for MemoryTimesheetStore {
    fn uniqueness(&self) -> DateUniqueness {
        self.uniqueness
    }

    async fn insert_days(
        &self,
        cost_id: &str,
        days: &[NewTimesheetDay],
    ) -> RepositoryResult<Vec<TimesheetEntry>> {
        let mut entries = self.entries.write();
        let mut created: Vec<TimesheetEntry> = Vec::with_capacity(days.len());

        for day in days {
            let taken = entries
                .iter()
                .chain(created.iter())
                .any(|e| self.collides(e, cost_id, day.date));
            if taken {
                return Err(RepositoryError::DuplicateDate(day.date));
            }
            created.push(TimesheetEntry::new(cost_id, day));
        }

        entries.extend(created.iter().cloned());
        Ok(created)
    }

    async fn find_by_year(&self, year: i32, cost_id: &str) -> RepositoryResult<Vec<TimesheetEntry>> {
        let mut found: Vec<TimesheetEntry> = self
            .entries
            .read()
            .iter()
            .filter(|e| e.cost_id == cost_id && e.date.year() == year)
            .cloned()
            .collect();
        // stable, so same-date entries keep creation order
        found.sort_by_key(|e| e.date);
        Ok(found)
    }

    async fn find_by_date(
        &self,
        date: NaiveDate,
        cost_id: Option<&str>,
    ) -> RepositoryResult<Option<TimesheetEntry>> {
        let entries = self.entries.read();
        Ok(locate(&entries, date, cost_id).map(|i| entries[i].clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<TimesheetEntry>> {
        Ok(self.entries.read().iter().find(|e| e.id == id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<TimesheetEntry>> {
        let mut all = self.entries.read().clone();
        all.sort_by_key(|e| e.date);
        Ok(all)
    }

    async fn apply_updates(&self, updates: &[DayUpdate]) -> RepositoryResult<Vec<TimesheetEntry>> {
        let mut entries = self.entries.write();

        // Resolve every target before touching anything
        let mut targets = Vec::with_capacity(updates.len());
        for update in updates {
            let index = locate(&entries, update.date, update.cost_id.as_deref()).ok_or_else(|| {
                RepositoryError::NotFound(format!("No timesheet entry found for date {}", update.date))
            })?;
            targets.push(index);
        }

        let mut updated = Vec::with_capacity(updates.len());
        for (update, index) in updates.iter().zip(targets) {
            let entry = &mut entries[index];
            entry.day_type = update.day_type;
            entry.working_hours = update.working_hours;
            updated.push(entry.clone());
        }

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<TimesheetEntry> {
        let mut entries = self.entries.write();
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Timesheet entry with id {}", id)))?;
        Ok(entries.remove(index))
    }

    async fn delete_by_year(&self, year: i32) -> RepositoryResult<u64> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.date.year() != year);
        Ok((before - entries.len()) as u64)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
