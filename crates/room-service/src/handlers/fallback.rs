//! Generic not-found handler for unknown paths.

use crate::errors::RoomServiceError;
use axum::http::Uri;

/// Router fallback.
///
/// Distinct from the unknown-room response: this one answers for paths the
/// service does not serve at all.
pub async fn not_found(uri: Uri) -> RoomServiceError {
    tracing::debug!(target: "rooms.handlers.fallback", path = %uri.path(), "No route matched");
    RoomServiceError::NotFound(uri.path().to_string())
}
