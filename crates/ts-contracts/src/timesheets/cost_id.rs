//! Cost identifier contract

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use ts_core::error::TsError;

use crate::base::{Contract, ValidationResult};

static UUID_V4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("UUID v4 pattern is valid")
});

pub fn is_uuid_v4(value: &str) -> bool {
    UUID_V4.is_match(value)
}

/// Contract for the cost id of a create request
#[derive(Debug, Default, Clone, Copy)]
pub struct CostIdContract;

impl Contract<Option<String>> for CostIdContract {
    type Output = String;

    fn validate(&self, input: &Option<String>) -> ValidationResult<String> {
        match input.as_deref() {
            Some(cost_id) if is_uuid_v4(cost_id) => Ok(cost_id.to_string()),
            provided => Err(TsError::validation(
                "Invalid UUID format for costId",
                json!({
                    "error": "UUID Validation Failed",
                    "providedValue": provided,
                    "expectedFormat": "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx (where x is any hexadecimal digit and y is one of 8, 9, a, or b)",
                    "example": "123e4567-e89b-42d3-a456-426614174000",
                    "help": "Please ensure the costId is a valid UUID v4 format. Only hexadecimal characters (0-9, a-f) are allowed.",
                }),
            )),
        }
    }
}
