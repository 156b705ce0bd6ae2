//! Availability handlers.
//!
//! - `GET /meeting_rooms_available` - Open-room count and ids (public)
//! - `GET /meeting_rooms_available?id=N` - Status of one room (public)
//! - `PUT /meeting_rooms_available?id=N` - Book or delete a booking (Basic auth)

use super::{parse_json_body, query_id, resolve_room_id, room_query, RoomQuery};
use crate::errors::RoomServiceError;
use crate::models::{
    AvailabilityResponse, BookingAction, BookingRequest, BookingResponse, RoomStatusResponse,
};
use crate::observability::metrics::{record_room_operation, set_rooms_available};
use crate::routes::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for GET /meeting_rooms_available
///
/// Without `id`, returns the number of open rooms and their ids:
///
/// ```json
/// { "availability": 2, "available_rooms": [2, 3] }
/// ```
///
/// With `id`, returns that room's status (`{"status": "open"}`), or 404 if
/// the room does not exist.
#[instrument(skip_all, name = "rooms.availability.get", fields(room_id = ?query_id(&query)))]
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoomQuery>, QueryRejection>,
) -> Result<Response, RoomServiceError> {
    let registry = state.registry.lock().await;
    let query = room_query(query)?;

    if query.id.is_some() {
        let id = resolve_room_id(&query, &registry)?;
        let status = registry.room_status(id)?;
        return Ok(Json(RoomStatusResponse { status }).into_response());
    }

    let availability = registry.availability();
    Ok(Json(AvailabilityResponse {
        availability: availability.available_count,
        available_rooms: availability.open_rooms,
    })
    .into_response())
}

/// Handler for PUT /meeting_rooms_available?id=N
///
/// Books an open room (`{"request": "book"}`) or deletes the booking of a
/// booked room (`{"request": "delete"}`). Deleting a booking also removes
/// every participant from the room.
///
/// # Response
///
/// - 200 OK: Transition applied, status of every room returned
/// - 401 Unauthorized: Missing or invalid credentials (from middleware)
/// - 404 Not Found: Unknown room, invalid body, already booked, or not booked
#[instrument(skip_all, name = "rooms.availability.update", fields(room_id = ?query_id(&query)))]
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoomQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<BookingResponse>, RoomServiceError> {
    let mut registry = state.registry.lock().await;
    let query = room_query(query)?;

    let id = resolve_room_id(&query, &registry)?;
    let request: BookingRequest = parse_json_body(&body)?;

    let (operation, result, message) = match request.request {
        BookingAction::Book => (
            "book",
            registry.book(id),
            format!("Room {} is booked successfully", id),
        ),
        BookingAction::Delete => (
            "unbook",
            registry.unbook(id),
            format!("Room {} booking is deleted successfully", id),
        ),
    };

    result.map_err(|e| {
        record_room_operation(operation, e.code());
        e
    })?;
    record_room_operation(operation, "success");

    let available_count = registry.availability().available_count;
    set_rooms_available(available_count);

    info!(
        target: "rooms.handlers.availability",
        room_id = id,
        operation,
        available_count,
        "Room booking updated"
    );

    let current_bookings = registry
        .statuses()
        .into_iter()
        .map(|(room_id, status)| (room_id, RoomStatusResponse { status }))
        .collect();

    Ok(Json(BookingResponse {
        status: 200,
        message,
        current_bookings,
    }))
}
