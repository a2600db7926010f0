//! # ts-models
//!
//! Domain models for Timesheet RS.
//!
//! This crate contains the timesheet entry entity, the day type enumeration
//! and the derived aggregate views returned by the year and create operations.

pub mod summary;
pub mod timesheet;

pub use summary::{CreatedTimesheet, CreationSummary, LeaveTotals, MonthBuckets, MonthSummary, YearTimesheet};
pub use timesheet::{month_name, month_number, DayType, DayUpdate, NewTimesheetDay, ParseDayTypeError, TimesheetEntry, MONTH_NAMES};
