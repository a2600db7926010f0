//! # ts-core
//!
//! Core types and utilities for Timesheet RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The domain error type and its HTTP status mapping
//! - Result type alias
//! - Configuration types and loading

pub mod config;
pub mod error;

pub use config::{AppConfig, DateUniqueness};
pub use error::*;
