//! Health check handler.

/// Liveness probe.
///
/// Room state lives in memory, so a responding process is a healthy one.
#[tracing::instrument(skip_all, name = "rooms.health.check")]
pub async fn health_check() -> &'static str {
    "OK"
}
