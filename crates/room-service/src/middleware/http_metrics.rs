//! Per-request HTTP metrics.
//!
//! Sits outside every other layer so that responses produced before a handler
//! runs (405 from the router, the JSON 404 fallback, 401 from Basic auth)
//! are counted alongside handler responses.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::debug;

use crate::observability::metrics::record_http_request;

/// Record method, path, status and latency of every response.
pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let elapsed = started.elapsed();
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        debug!(
            target: "rooms.middleware.http_metrics",
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Request rejected"
        );
    }

    record_http_request(method.as_str(), &path, status.as_u16(), elapsed);
    response
}
