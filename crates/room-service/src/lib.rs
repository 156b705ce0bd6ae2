//! Meeting Room Service Library
//!
//! HTTP API for a fixed pool of meeting rooms:
//!
//! - Room availability (count of open rooms, per-room status)
//! - Booking and unbooking rooms
//! - Adding and removing participants in booked rooms
//! - HTTP Basic authentication on every mutating route
//!
//! # Architecture
//!
//! The service follows the Handler -> Registry pattern:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> registry/mod.rs
//! ```
//!
//! The registry owns all room state and is the only place where room status
//! and participants change. Handlers validate input, take the registry lock
//! once per request and serialize the outcome.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Basic auth and HTTP metrics middleware
//! - `models` - Request and response payloads
//! - `observability` - Prometheus metrics
//! - `registry` - Room state and transition rules
//! - `routes` - Axum router setup

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod registry;
pub mod routes;
