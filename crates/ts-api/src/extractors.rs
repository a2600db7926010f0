//! Axum extractors and response wrappers for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use ts_services::{ServiceOutput, TimesheetService};

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TimesheetService>,
}

impl AppState {
    pub fn new(service: TimesheetService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// JSON body extractor that reports malformed bodies as 400 envelopes
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Rejected request body");
                Err(json_rejection(rejection))
            }
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(
        "Invalid request body",
        json!({
            "error": "Request Body Validation Failed",
            "reason": rejection.body_text(),
            "help": "Please send a JSON body with the documented fields and types.",
        }),
    )
}

/// Success envelope: `{statusCode, message, data}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: StatusCode, output: ServiceOutput<T>) -> Self {
        let (data, message) = output.into_parts();
        Self {
            status_code: status.as_u16(),
            message,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
