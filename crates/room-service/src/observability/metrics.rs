//! Metrics definitions for the Meeting Room Service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `rooms_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `method`: 7 values max (GET, POST, PATCH, DELETE, PUT, HEAD, OPTIONS)
//! - `endpoint`: 6 values (known paths plus `/other`)
//! - `operation`: bounded by code (book, unbook, add_participants, remove_participants)
//! - `status`: bounded by outcome (success, partial, error code)

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("rooms_http".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP latency buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus metrics recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `rooms_http_requests_total`, `rooms_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status`
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("rooms_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("rooms_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Map a request path onto a bounded set of endpoint labels.
///
/// Room ids travel in the query string, so the path alone is already bounded;
/// anything unrecognised becomes `/other`.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/" => "/",
        "/health" => "/health",
        "/metrics" => "/metrics",
        "/meeting_rooms_available" => "/meeting_rooms_available",
        "/meeting_room" => "/meeting_room",
        _ => "/other",
    }
}

// ============================================================================
// Room Operation Metrics
// ============================================================================

/// Record the outcome of a room state operation.
///
/// Metric: `rooms_operations_total`
/// Labels: `operation`, `status`
///
/// `status` is `success`, `partial` (some participants not removed), or the
/// error code of the failure.
pub fn record_room_operation(operation: &'static str, status: &'static str) {
    counter!("rooms_operations_total",
        "operation" => operation,
        "status" => status
    )
    .increment(1);
}

/// Set the number of currently open rooms.
///
/// Metric: `rooms_available`
pub fn set_rooms_available(count: usize) {
    gauge!("rooms_available").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_status_code() {
        assert_eq!(categorize_status_code(200), "success");
        assert_eq!(categorize_status_code(204), "success");
        assert_eq!(categorize_status_code(401), "error");
        assert_eq!(categorize_status_code(404), "error");
        assert_eq!(categorize_status_code(408), "timeout");
        assert_eq!(categorize_status_code(504), "timeout");
    }

    #[test]
    fn test_normalize_endpoint_known_paths() {
        assert_eq!(normalize_endpoint("/"), "/");
        assert_eq!(
            normalize_endpoint("/meeting_rooms_available"),
            "/meeting_rooms_available"
        );
        assert_eq!(normalize_endpoint("/meeting_room"), "/meeting_room");
        assert_eq!(normalize_endpoint("/health"), "/health");
    }

    #[test]
    fn test_normalize_endpoint_unknown_paths() {
        assert_eq!(normalize_endpoint("/meeting_room/1"), "/other");
        assert_eq!(normalize_endpoint("/admin"), "/other");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        // No recorder installed in unit tests; calls must not panic
        record_http_request("GET", "/meeting_room", 200, Duration::from_millis(3));
        record_room_operation("book", "success");
        set_rooms_available(2);
    }
}
