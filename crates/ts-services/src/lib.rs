//! # ts-services
//!
//! Business logic services for Timesheet RS.
//!
//! Services validate input through the contracts in `ts-contracts`, persist
//! through a [`ts_db::TimesheetStore`] and shape the aggregate views returned
//! to callers.

pub mod result;
pub mod timesheets;

pub use result::ServiceOutput;
pub use timesheets::{
    BulkUpdateParams, CreateTimesheetParams, TimesheetDayParams, TimesheetService, UpdateDayParams,
};
