//! HTTP request handlers for the Meeting Room Service.
//!
//! Every handler that touches room state takes the registry lock once and
//! performs its validation and mutation under that single acquisition.

pub mod availability;
pub mod docs;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod rooms;

pub use availability::{get_availability, update_booking};
pub use docs::api_docs;
pub use fallback::not_found;
pub use health::health_check;
pub use metrics::metrics_handler;
pub use rooms::{add_participants, get_room, remove_participants};

use crate::errors::RoomServiceError;
use crate::registry::{RoomId, RoomRegistry};
use axum::body::Bytes;
use axum::extract::{rejection::QueryRejection, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Query string shared by the room routes (`?id=N`).
#[derive(Debug, Default, Deserialize)]
pub struct RoomQuery {
    pub id: Option<String>,
}

/// Raw `id` of an extracted query string, for span fields.
fn query_id(query: &Result<Query<RoomQuery>, QueryRejection>) -> Option<&str> {
    query.as_ref().ok().and_then(|query| query.id.as_deref())
}

/// Unwrap the extracted query string, reporting a rejected one (e.g. a
/// repeated `id`) as `InvalidRequest` instead of axum's plain-text 400.
fn room_query(
    query: Result<Query<RoomQuery>, QueryRejection>,
) -> Result<RoomQuery, RoomServiceError> {
    query
        .map(|Query(query)| query)
        .map_err(|e| RoomServiceError::InvalidRequest(e.body_text()))
}

/// Resolve the `id` query parameter to a room that exists in the registry.
///
/// A missing id yields `RoomIdMissing`; a non-numeric or unknown id yields
/// `RoomNotFound` carrying the id as the client sent it.
fn resolve_room_id(
    query: &RoomQuery,
    registry: &RoomRegistry,
) -> Result<RoomId, RoomServiceError> {
    let raw = query.id.as_deref().ok_or(RoomServiceError::RoomIdMissing)?;

    let id: RoomId = raw
        .parse()
        .map_err(|_| RoomServiceError::RoomNotFound(raw.to_string()))?;

    registry.room_status(id)?;
    Ok(id)
}

/// Parse a JSON body, mapping every failure to `InvalidRequest`.
fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, RoomServiceError> {
    if body.is_empty() {
        return Err(RoomServiceError::InvalidRequest(
            "request body is empty".to_string(),
        ));
    }

    serde_json::from_slice(body).map_err(|e| RoomServiceError::InvalidRequest(e.to_string()))
}
