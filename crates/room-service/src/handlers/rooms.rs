//! Room detail and participant handlers.
//!
//! - `GET /meeting_room?id=N` - Room detail (public)
//! - `POST /meeting_room?id=N` - Add participants (Basic auth)
//! - `DELETE /meeting_room?id=N` - Remove participants (Basic auth)

use super::{parse_json_body, query_id, resolve_room_id, room_query, RoomQuery};
use crate::errors::RoomServiceError;
use crate::models::{
    ParticipantsAddedResponse, ParticipantsRemovedResponse, ParticipantsRequest, RoomDetail,
};
use crate::observability::metrics::record_room_operation;
use crate::routes::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for GET /meeting_room?id=N
///
/// Returns the room's capacity, participant count and participants.
///
/// ```json
/// { "id": 1, "max_capacity": 15, "current_count": 2, "participants": ["Tom", "Jerry"] }
/// ```
#[instrument(skip_all, name = "rooms.room.get", fields(room_id = ?query_id(&query)))]
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoomQuery>, QueryRejection>,
) -> Result<Json<RoomDetail>, RoomServiceError> {
    let registry = state.registry.lock().await;
    let query = room_query(query)?;

    let id = resolve_room_id(&query, &registry)?;
    Ok(Json(registry.room_detail(id)?))
}

/// Handler for POST /meeting_room?id=N
///
/// Adds participants, in order, to a booked room.
///
/// A room that is not booked is rejected before the body is looked at. If the
/// room fills up part way through the list, the names already added stay in
/// the room and the request fails with `ROOM_FULL`.
///
/// # Response
///
/// - 200 OK: All participants added, updated room returned
/// - 401 Unauthorized: Missing or invalid credentials (from middleware)
/// - 404 Not Found: Unknown room, room not booked, invalid body, or room full
#[instrument(skip_all, name = "rooms.room.add_participants", fields(room_id = ?query_id(&query)))]
pub async fn add_participants(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoomQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ParticipantsAddedResponse>, RoomServiceError> {
    let mut registry = state.registry.lock().await;
    let query = room_query(query)?;

    let id = resolve_room_id(&query, &registry)?;
    registry.ensure_booked(id).map_err(|e| {
        record_room_operation("add_participants", e.code());
        e
    })?;

    let request: ParticipantsRequest = parse_json_body(&body)?;

    let room = registry
        .add_participants(id, &request.participants)
        .map_err(|e| {
            record_room_operation("add_participants", e.code());
            e
        })?;
    record_room_operation("add_participants", "success");

    info!(
        target: "rooms.handlers.rooms",
        room_id = id,
        added = request.participants.len(),
        current_count = room.current_count,
        "Participants added"
    );

    Ok(Json(ParticipantsAddedResponse {
        status: 200,
        message: format!("Participants added into room {}", id),
        status_of_room: room,
    }))
}

/// Handler for DELETE /meeting_room?id=N
///
/// Removes the first matching occurrence of each requested name from a
/// booked room. Names that are not in the room are skipped; the message and
/// `removed_participants` tell the caller whether everything was removed.
///
/// # Response
///
/// - 200 OK: Removal applied (fully or partially), updated room returned
/// - 401 Unauthorized: Missing or invalid credentials (from middleware)
/// - 404 Not Found: Unknown room, room not booked, or invalid body
#[instrument(skip_all, name = "rooms.room.remove_participants", fields(room_id = ?query_id(&query)))]
pub async fn remove_participants(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoomQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ParticipantsRemovedResponse>, RoomServiceError> {
    let mut registry = state.registry.lock().await;
    let query = room_query(query)?;

    let id = resolve_room_id(&query, &registry)?;
    registry.ensure_booked(id).map_err(|e| {
        record_room_operation("remove_participants", e.code());
        e
    })?;

    let request: ParticipantsRequest = parse_json_body(&body)?;

    let removal = registry
        .remove_participants(id, &request.participants)
        .map_err(|e| {
            record_room_operation("remove_participants", e.code());
            e
        })?;

    let (status, message) = if removal.is_complete() {
        (
            "success",
            format!("Specified participants are removed from room {}", id),
        )
    } else {
        ("partial", "Not all participants are removed".to_string())
    };
    record_room_operation("remove_participants", status);

    info!(
        target: "rooms.handlers.rooms",
        room_id = id,
        requested = removal.requested,
        removed = removal.removed.len(),
        current_count = removal.room.current_count,
        "Participants removed"
    );

    Ok(Json(ParticipantsRemovedResponse {
        status: 200,
        message,
        removed_participants: removal.removed,
        status_of_room: removal.room,
    }))
}
