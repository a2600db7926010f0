//! # ts-api
//!
//! REST handlers for Timesheet RS.
//!
//! Every response is a JSON envelope: successes carry
//! `{statusCode, message, data}` and failures `{statusCode, message, details}`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
