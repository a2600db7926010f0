//! HTTP client for the timesheet API

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use ts_models::{CreatedTimesheet, TimesheetEntry, YearTimesheet};

use crate::form::{Submission, UpdatePayload};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error envelope
    #[error("{status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        details: Value,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Success envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    #[serde(default)]
    details: Value,
}

pub struct TimesheetClient {
    http: reqwest::Client,
    base_url: String,
}

impl TimesheetClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn create_url(&self) -> String {
        format!("{}/timesheet", self.base_url)
    }

    pub fn year_url(&self, year: i32) -> String {
        format!("{}/timesheet/{}", self.base_url, year)
    }

    pub fn bulk_update_url(&self) -> String {
        format!("{}/timesheet/bulk-update", self.base_url)
    }

    pub async fn create(&self, submission: &Submission) -> Result<Envelope<CreatedTimesheet>, ClientError> {
        let response = self.http.post(self.create_url()).json(submission).send().await?;
        read_envelope(response).await
    }

    pub async fn by_year(&self, year: i32, cost_id: &str) -> Result<Envelope<YearTimesheet>, ClientError> {
        let response = self
            .http
            .get(self.year_url(year))
            .query(&[("costId", cost_id)])
            .send()
            .await?;
        read_envelope(response).await
    }

    pub async fn bulk_update(
        &self,
        updates: &[UpdatePayload],
    ) -> Result<Envelope<Vec<TimesheetEntry>>, ClientError> {
        let response = self.http.put(self.bulk_update_url()).json(updates).send().await?;
        read_envelope(response).await
    }
}

async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<Envelope<T>, ClientError> {
    let status = response.status();
    tracing::debug!(%status, url = %response.url(), "Response received");

    if status.is_success() {
        return Ok(response.json::<Envelope<T>>().await?);
    }

    let body = response.text().await?;
    Err(api_error(status, &body))
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ClientError::Api {
            status,
            message: envelope
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
            details: envelope.details,
        },
        Err(_) => ClientError::Api {
            status,
            message: body.trim().to_string(),
            details: Value::Null,
        },
    }
}
