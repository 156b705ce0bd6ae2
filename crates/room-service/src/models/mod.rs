//! Meeting Room Service models.
//!
//! Request and response payloads shared by the handlers and the registry.
//! Field names follow the JSON contract existing clients already consume.

use crate::registry::RoomId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Booking status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Room is free to be booked and holds no participants.
    Open,

    /// Room is booked and may hold participants.
    Booked,
}

impl RoomStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Open => "open",
            RoomStatus::Booked => "booked",
        }
    }
}

/// Snapshot of one room's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    pub id: RoomId,
    pub max_capacity: usize,
    pub current_count: usize,
    pub participants: Vec<String>,
}

// ============================================================================
// Availability API Models
// ============================================================================

/// Response for `GET /meeting_rooms_available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Number of open rooms.
    pub availability: usize,

    /// Ids of the open rooms, ascending.
    pub available_rooms: Vec<RoomId>,
}

/// Response for `GET /meeting_rooms_available?id=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusResponse {
    pub status: RoomStatus,
}

/// Action requested by `PUT /meeting_rooms_available?id=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    /// Book an open room.
    Book,

    /// Delete an existing booking.
    Delete,
}

/// Body of `PUT /meeting_rooms_available?id=N`.
///
/// ```json
/// { "request": "book" }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub request: BookingAction,
}

/// Response for a successful booking transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub status: u16,
    pub message: String,

    /// Status of every room after the transition, keyed by room id.
    pub current_bookings: BTreeMap<RoomId, RoomStatusResponse>,
}

// ============================================================================
// Participant API Models
// ============================================================================

/// Body of `POST` and `DELETE /meeting_room?id=N`.
///
/// ```json
/// { "participants": ["Tom", "Jerry"] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantsRequest {
    pub participants: Vec<String>,
}

/// Response for `POST /meeting_room?id=N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsAddedResponse {
    pub status: u16,
    pub message: String,
    #[serde(rename = "statusOfRoom")]
    pub status_of_room: RoomDetail,
}

/// Response for `DELETE /meeting_room?id=N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsRemovedResponse {
    pub status: u16,
    pub message: String,

    /// Names that matched a participant and were removed.
    pub removed_participants: Vec<String>,

    #[serde(rename = "statusOfRoom")]
    pub status_of_room: RoomDetail,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_serializes_lowercase() {
        let json = serde_json::to_value(RoomStatusResponse {
            status: RoomStatus::Booked,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "status": "booked" }));
        assert_eq!(RoomStatus::Open.as_str(), "open");
    }

    #[test]
    fn test_booking_action_rejects_unknown_request() {
        let result: Result<BookingRequest, _> =
            serde_json::from_str(r#"{"request": "cancel"}"#);
        assert!(result.is_err());

        let request: BookingRequest = serde_json::from_str(r#"{"request": "delete"}"#).unwrap();
        assert_eq!(request.request, BookingAction::Delete);
    }

    #[test]
    fn test_current_bookings_keyed_by_room_id_string() {
        let response = BookingResponse {
            status: 200,
            message: "Room 1 is booked successfully".to_string(),
            current_bookings: BTreeMap::from([
                (
                    1,
                    RoomStatusResponse {
                        status: RoomStatus::Booked,
                    },
                ),
                (
                    2,
                    RoomStatusResponse {
                        status: RoomStatus::Open,
                    },
                ),
            ]),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["current_bookings"]["1"]["status"], "booked");
        assert_eq!(json["current_bookings"]["2"]["status"], "open");
    }

    #[test]
    fn test_participants_response_uses_status_of_room_key() {
        let response = ParticipantsAddedResponse {
            status: 200,
            message: "Participants added into room 1".to_string(),
            status_of_room: RoomDetail {
                id: 1,
                max_capacity: 15,
                current_count: 1,
                participants: vec!["Tom".to_string()],
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusOfRoom"]["max_capacity"], 15);
        assert_eq!(json["statusOfRoom"]["participants"][0], "Tom");
    }
}
