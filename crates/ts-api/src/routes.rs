//! API routes

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::timesheets;

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timesheet", post(timesheets::create_timesheet))
        .route("/timesheet/bulk-update", put(timesheets::bulk_update_timesheet_days))
        .route("/timesheet/:year", get(timesheets::get_timesheet_by_year))
}
