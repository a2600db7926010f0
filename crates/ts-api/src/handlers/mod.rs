//! API handlers

pub mod timesheets;
