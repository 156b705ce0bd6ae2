//! HTTP routes for the Meeting Room Service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::middleware::{http_metrics_middleware, require_basic_auth, AuthState};
use crate::registry::RoomRegistry;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// All room state. One lock guards the whole registry so that every
    /// request's checks and mutation happen as one step.
    pub registry: Arc<Mutex<RoomRegistry>>,
}

impl AppState {
    /// Build state with a registry seeded from the configured capacities.
    pub fn new(config: Config) -> Self {
        let registry = RoomRegistry::with_capacities(&config.room_capacities);
        Self {
            config,
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/` - API documentation listing - public
/// - `/health` - Liveness probe - public
/// - `/metrics` - Prometheus metrics endpoint - public
/// - `GET /meeting_rooms_available` - Availability / room status - public
/// - `PUT /meeting_rooms_available` - Book or delete booking - Basic auth
/// - `GET /meeting_room` - Room detail - public
/// - `POST /meeting_room` - Add participants - Basic auth
/// - `DELETE /meeting_room` - Remove participants - Basic auth
/// - JSON 404 fallback for unknown paths
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let auth_state = Arc::new(AuthState {
        username: state.config.auth_username.clone(),
        password: state.config.auth_password.clone(),
    });
    let auth_layer = middleware::from_fn_with_state(auth_state, require_basic_auth);

    // Read methods are public; mutating methods on the same paths sit behind
    // Basic auth via their own route_layer.
    let room_routes = Router::new()
        .route("/", get(handlers::api_docs))
        .route("/health", get(handlers::health_check))
        .route(
            "/meeting_rooms_available",
            get(handlers::get_availability)
                .merge(put(handlers::update_booking).route_layer(auth_layer.clone())),
        )
        .route(
            "/meeting_room",
            get(handlers::get_room).merge(
                post(handlers::add_participants)
                    .delete(handlers::remove_participants)
                    .route_layer(auth_layer),
            ),
        )
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. http_metrics_middleware - Record ALL responses (outermost)
    room_routes
        .merge(metrics_routes)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(http_metrics_middleware))
}
