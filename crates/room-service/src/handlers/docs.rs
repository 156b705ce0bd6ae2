//! API documentation handler.

use axum::Json;
use serde_json::{json, Value};

/// Handler for GET /
///
/// Lists the available resources, methods, parameters and example calls.
#[tracing::instrument(skip_all, name = "rooms.docs.get")]
pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "status": 200,
        "message": "Please check available resources",
        "resources": ["/meeting_rooms_available", "/meeting_room"],
        "/meeting_rooms_available": {
            "methods": ["GET", "PUT"],
            "params": ["id (optional for GET)"],
            "authorisation": "username and password required to book and delete meeting rooms",
            "purpose": "Check meeting rooms statuses, book meeting room, remove meeting room booking",
            "examples": [
                "GET /meeting_rooms_available",
                "GET /meeting_rooms_available?id=2",
                "PUT /meeting_rooms_available?id=2 {\"request\": \"book\"}",
                "PUT /meeting_rooms_available?id=2 {\"request\": \"delete\"}"
            ]
        },
        "/meeting_room": {
            "methods": ["GET", "POST", "DELETE"],
            "params": ["id"],
            "authorisation": "username and password required to add and delete participants",
            "purpose": "Check meeting room status, add participants into meeting room, delete participants from meeting room",
            "examples": [
                "GET /meeting_room?id=2",
                "POST /meeting_room?id=2 {\"participants\": [\"John\", \"Tim\"]}",
                "DELETE /meeting_room?id=2 {\"participants\": [\"John\"]}"
            ]
        }
    }))
}
