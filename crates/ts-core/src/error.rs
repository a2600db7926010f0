//! Core error types for Timesheet RS
//!
//! Every failure that reaches a caller carries an [`ErrorBody`]: a short
//! message plus a `details` payload that is either a plain hint or a
//! structured object naming the offending field, the provided value and
//! what was expected.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Standard Result type for timesheet operations
pub type TsResult<T> = Result<T, TsError>;

/// Message and details reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub details: Value,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, details: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Look up a key inside structured details
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

/// Core error type for all timesheet operations
#[derive(Error, Debug)]
pub enum TsError {
    /// Malformed input or a broken day-type/hours rule
    #[error("Validation failed: {}", .0.message)]
    Validation(ErrorBody),

    #[error("Not found: {}", .0.message)]
    NotFound(ErrorBody),

    /// Store-level uniqueness violation
    #[error("Conflict: {}", .0.message)]
    Conflict(ErrorBody),

    /// Unexpected store failure, reported to the caller as a bad request
    #[error("Store error: {}", .0.message)]
    Store(ErrorBody),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TsError {
    pub fn validation(message: impl Into<String>, details: impl Into<Value>) -> Self {
        TsError::Validation(ErrorBody::new(message, details))
    }

    pub fn not_found(message: impl Into<String>, details: impl Into<Value>) -> Self {
        TsError::NotFound(ErrorBody::new(message, details))
    }

    pub fn conflict(message: impl Into<String>, details: impl Into<Value>) -> Self {
        TsError::Conflict(ErrorBody::new(message, details))
    }

    pub fn store(message: impl Into<String>, details: impl Into<Value>) -> Self {
        TsError::Store(ErrorBody::new(message, details))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TsError::Internal(message.into())
    }

    /// HTTP status code mapping
    pub fn status_code(&self) -> u16 {
        match self {
            TsError::Validation(_) | TsError::Store(_) => 400,
            TsError::NotFound(_) => 404,
            TsError::Conflict(_) => 409,
            TsError::Config(_) | TsError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TsError::Validation(_) => "validation_failed",
            TsError::NotFound(_) => "not_found",
            TsError::Conflict(_) => "conflict",
            TsError::Store(_) => "store_error",
            TsError::Config(_) => "configuration_error",
            TsError::Internal(_) => "internal_error",
        }
    }

    /// The body reported to the caller
    pub fn body(&self) -> ErrorBody {
        match self {
            TsError::Validation(body)
            | TsError::NotFound(body)
            | TsError::Conflict(body)
            | TsError::Store(body) => body.clone(),
            TsError::Config(_) | TsError::Internal(_) => ErrorBody::new(
                "Internal server error",
                "An unexpected error occurred. Please try again later.",
            ),
        }
    }
}
