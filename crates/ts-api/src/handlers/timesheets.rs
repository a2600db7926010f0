//! Timesheet API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use ts_contracts::timesheets::YearQuery;
use ts_models::{CreatedTimesheet, TimesheetEntry, YearTimesheet};
use ts_services::{BulkUpdateParams, CreateTimesheetParams};

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, Envelope};

/// POST /timesheet
pub async fn create_timesheet(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<CreateTimesheetParams>,
) -> ApiResult<Envelope<CreatedTimesheet>> {
    let output = state.service.create(params).await?;
    Ok(Envelope::new(StatusCode::CREATED, output))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearParams {
    pub cost_id: Option<String>,
}

/// GET /timesheet/:year?costId=
pub async fn get_timesheet_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
    params: Option<Query<YearParams>>,
) -> ApiResult<Envelope<YearTimesheet>> {
    let query = YearQuery {
        year,
        cost_id: params.and_then(|Query(p)| p.cost_id),
    };
    let output = state.service.by_year(query).await?;
    Ok(Envelope::new(StatusCode::OK, output))
}

/// PUT /timesheet/bulk-update
pub async fn bulk_update_timesheet_days(
    State(state): State<AppState>,
    ApiJson(updates): ApiJson<BulkUpdateParams>,
) -> ApiResult<Envelope<Vec<TimesheetEntry>>> {
    let output = state.service.bulk_update(updates).await?;
    Ok(Envelope::new(StatusCode::OK, output))
}
