//! Observability for the Meeting Room Service.
//!
//! Logging goes through `tracing`; this module holds the Prometheus metrics.

pub mod metrics;
