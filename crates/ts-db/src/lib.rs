//! # ts-db
//!
//! Database layer for Timesheet RS.
//!
//! This crate provides timesheet persistence behind the [`TimesheetStore`]
//! trait, including:
//!
//! - Connection pool management
//! - Schema creation for the configured date uniqueness scope
//! - A PostgreSQL repository using SQLx
//! - An in-memory store with the same constraint behavior
//!
//! ## Example
//!
//! ```ignore
//! use ts_db::{Database, PgTimesheetRepository, TimesheetStore};
//!
//! let db = Database::connect(&config.database).await?;
//! ts_db::schema::ensure_schema(db.pool(), DateUniqueness::Global).await?;
//!
//! let repo = PgTimesheetRepository::new(db.pool().clone(), DateUniqueness::Global);
//! let entries = repo.find_by_year(2024, cost_id).await?;
//! ```

pub mod memory;
pub mod pool;
pub mod repository;
pub mod schema;
pub mod timesheets;

// Re-exports
pub use memory::MemoryTimesheetStore;
pub use pool::{Database, PoolStats};
pub use repository::{RepositoryError, RepositoryResult, TimesheetStore};
pub use timesheets::{PgTimesheetRepository, TimesheetRow};
