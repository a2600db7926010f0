//! API error handling
//!
//! Renders domain errors as `{statusCode, message, details}` envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use ts_core::error::TsError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// A failure raised by the timesheet services
    Domain(TsError),
    /// The request could not be read into the expected shape
    BadRequest { message: String, details: Value },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, details: impl Into<Value>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<TsError> for ApiError {
    fn from(err: TsError) -> Self {
        ApiError::Domain(err)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    status_code: u16,
    message: String,
    details: Value,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, details) = match self {
            ApiError::Domain(err) => {
                if status.is_server_error() {
                    tracing::error!(error = %err, code = err.error_code(), "Request failed");
                } else {
                    tracing::debug!(code = err.error_code(), status = status.as_u16(), "Request rejected");
                }
                let body = err.body();
                (body.message, body.details)
            }
            ApiError::BadRequest { message, details } => (message, details),
        };

        let envelope = ErrorEnvelope {
            status_code: status.as_u16(),
            message,
            details,
        };

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_domain_error() {
        let err = ApiError::from(TsError::conflict("Duplicate entry found", "taken"));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(TsError::internal("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::bad_request("Invalid request body", "expected an array");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
