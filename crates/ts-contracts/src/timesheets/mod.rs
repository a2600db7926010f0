//! Timesheet contracts
//!
//! - cost id format
//! - day-type/working-hours rules on create
//! - the same rules on bulk update, checked before and after the stored
//!   entry is known
//! - year view query parameters

mod base;
mod cost_id;
mod create;
mod update;
mod year;

pub use base::{check_day_rules, DayRuleViolation, TimesheetDayData};
pub use cost_id::{is_uuid_v4, CostIdContract};
pub use create::CreateDayContract;
pub use update::{ProposedUpdate, UpdateDayContract};
pub use year::{YearQuery, YearQueryContract};
