//! HTTP middleware for the Meeting Room Service.

pub mod auth;
pub mod http_metrics;

pub use auth::{require_basic_auth, AuthState};
pub use http_metrics::http_metrics_middleware;
