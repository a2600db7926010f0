//! # ts-contracts
//!
//! Contract validation for Timesheet RS.
//!
//! Contracts check raw request input before anything touches the store and
//! turn it into validated domain values. Every rejection is a
//! [`ts_core::TsError::Validation`] carrying field-level details.

pub mod base;
pub mod timesheets;

pub use base::*;
