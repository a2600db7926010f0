//! Request metrics
//!
//! Counters exported as Prometheus text on `/metrics` and as JSON on
//! `/metrics.json`.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info_span, Instrument};

/// Metrics collector
pub struct Metrics {
    pub http_requests_total: AtomicU64,
    pub http_requests_2xx: AtomicU64,
    pub http_requests_4xx: AtomicU64,
    pub http_requests_5xx: AtomicU64,
    pub http_request_duration_ms_total: AtomicU64,
    pub in_flight_requests: AtomicU64,
    /// Timesheet operations by endpoint
    pub timesheet_creates: AtomicU64,
    pub timesheet_year_views: AtomicU64,
    pub timesheet_bulk_updates: AtomicU64,
    /// Duplicate-date rejections
    pub timesheet_conflicts: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            http_requests_total: AtomicU64::new(0),
            http_requests_2xx: AtomicU64::new(0),
            http_requests_4xx: AtomicU64::new(0),
            http_requests_5xx: AtomicU64::new(0),
            http_request_duration_ms_total: AtomicU64::new(0),
            in_flight_requests: AtomicU64::new(0),
            timesheet_creates: AtomicU64::new(0),
            timesheet_year_views: AtomicU64::new(0),
            timesheet_bulk_updates: AtomicU64::new(0),
            timesheet_conflicts: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a finished HTTP request
    pub fn record_request(&self, status: StatusCode, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_ms_total
            .fetch_add(duration_ms, Ordering::Relaxed);

        let counter = match status.as_u16() {
            200..=299 => Some(&self.http_requests_2xx),
            400..=499 => Some(&self.http_requests_4xx),
            500..=599 => Some(&self.http_requests_5xx),
            _ => None,
        };
        if let Some(counter) = counter {
            counter.fetch_add(1, Ordering::Relaxed);
        }
        if status == StatusCode::CONFLICT {
            self.timesheet_conflicts.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Count a request against the timesheet endpoint it targets
    pub fn record_endpoint(&self, method: &Method, path: &str) {
        let counter = if *method == Method::POST && path == "/timesheet" {
            &self.timesheet_creates
        } else if *method == Method::PUT && path == "/timesheet/bulk-update" {
            &self.timesheet_bulk_updates
        } else if *method == Method::GET && path.starts_with("/timesheet/") {
            &self.timesheet_year_views
        } else {
            return;
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut out = String::new();
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

        let _ = writeln!(out, "# HELP http_requests_total Total number of HTTP requests");
        let _ = writeln!(out, "# TYPE http_requests_total counter");
        let _ = writeln!(out, "http_requests_total {}", load(&self.http_requests_total));

        let _ = writeln!(out, "# HELP http_requests_by_status HTTP requests by status code range");
        let _ = writeln!(out, "# TYPE http_requests_by_status counter");
        for (range, counter) in [
            ("2xx", &self.http_requests_2xx),
            ("4xx", &self.http_requests_4xx),
            ("5xx", &self.http_requests_5xx),
        ] {
            let _ = writeln!(out, "http_requests_by_status{{status=\"{}\"}} {}", range, load(counter));
        }

        let _ = writeln!(out, "# HELP http_request_duration_ms_total Total HTTP request duration in milliseconds");
        let _ = writeln!(out, "# TYPE http_request_duration_ms_total counter");
        let _ = writeln!(out, "http_request_duration_ms_total {}", load(&self.http_request_duration_ms_total));

        let _ = writeln!(out, "# HELP http_requests_in_flight Requests currently being handled");
        let _ = writeln!(out, "# TYPE http_requests_in_flight gauge");
        let _ = writeln!(out, "http_requests_in_flight {}", load(&self.in_flight_requests));

        let _ = writeln!(out, "# HELP timesheet_requests_total Timesheet requests by operation");
        let _ = writeln!(out, "# TYPE timesheet_requests_total counter");
        for (operation, counter) in [
            ("create", &self.timesheet_creates),
            ("year_view", &self.timesheet_year_views),
            ("bulk_update", &self.timesheet_bulk_updates),
        ] {
            let _ = writeln!(out, "timesheet_requests_total{{operation=\"{}\"}} {}", operation, load(counter));
        }

        let _ = writeln!(out, "# HELP timesheet_conflicts_total Writes rejected for a duplicate date");
        let _ = writeln!(out, "# TYPE timesheet_conflicts_total counter");
        let _ = writeln!(out, "timesheet_conflicts_total {}", load(&self.timesheet_conflicts));

        let _ = writeln!(out, "# HELP uptime_seconds Server uptime in seconds");
        let _ = writeln!(out, "# TYPE uptime_seconds gauge");
        let _ = writeln!(out, "uptime_seconds {}", self.uptime_seconds());

        out
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        serde_json::json!({
            "http": {
                "requests_total": load(&self.http_requests_total),
                "requests_2xx": load(&self.http_requests_2xx),
                "requests_4xx": load(&self.http_requests_4xx),
                "requests_5xx": load(&self.http_requests_5xx),
                "request_duration_ms_total": load(&self.http_request_duration_ms_total),
                "in_flight": load(&self.in_flight_requests),
            },
            "timesheet": {
                "creates": load(&self.timesheet_creates),
                "year_views": load(&self.timesheet_year_views),
                "bulk_updates": load(&self.timesheet_bulk_updates),
                "conflicts": load(&self.timesheet_conflicts),
            },
            "uptime_seconds": self.uptime_seconds(),
        })
    }
}

/// Metrics middleware
pub async fn metrics_middleware(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().path().to_string();

    metrics.record_endpoint(&method, &uri);
    metrics.in_flight_requests.fetch_add(1, Ordering::Relaxed);

    let response = next
        .run(request)
        .instrument(info_span!("http_request", %method, %uri))
        .await;

    let duration = start.elapsed();
    let status = response.status();

    debug!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    metrics.record_request(status, duration.as_millis() as u64);
    metrics.in_flight_requests.fetch_sub(1, Ordering::Relaxed);

    response
}

/// Handler for /metrics (Prometheus format)
pub async fn prometheus_metrics(State(metrics): State<Arc<Metrics>>) -> String {
    metrics.export_prometheus()
}

/// Handler for /metrics.json
pub async fn json_metrics(State(metrics): State<Arc<Metrics>>) -> axum::Json<serde_json::Value> {
    axum::Json(metrics.export_json())
}
