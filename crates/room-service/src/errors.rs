//! Meeting Room Service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Room
//! lookup, payload and booking-state failures all answer 404, matching the
//! behavior existing clients depend on; missing or bad credentials answer 401
//! with a Basic challenge.

use crate::registry::RoomId;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Realm advertised in the `WWW-Authenticate` challenge.
pub const AUTH_REALM: &str = "meeting-rooms";

/// Meeting Room Service error type.
#[derive(Debug, Error)]
pub enum RoomServiceError {
    #[error("Please specify room id")]
    RoomIdMissing,

    #[error("No such room id: {0}")]
    RoomNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Room {0} is already booked")]
    RoomAlreadyBooked(RoomId),

    #[error("Room {0} is not booked")]
    RoomNotBooked(RoomId),

    #[error("Room {0} is full")]
    RoomFull(RoomId),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl RoomServiceError {
    /// Returns the HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> u16 {
        match self {
            RoomServiceError::Unauthorized => 401,
            RoomServiceError::RoomIdMissing
            | RoomServiceError::RoomNotFound(_)
            | RoomServiceError::InvalidRequest(_)
            | RoomServiceError::RoomAlreadyBooked(_)
            | RoomServiceError::RoomNotBooked(_)
            | RoomServiceError::RoomFull(_)
            | RoomServiceError::NotFound(_) => 404,
        }
    }

    /// Stable machine-readable code returned to clients.
    pub fn code(&self) -> &'static str {
        match self {
            RoomServiceError::RoomIdMissing | RoomServiceError::RoomNotFound(_) => {
                "ROOM_NOT_FOUND"
            }
            RoomServiceError::InvalidRequest(_) => "INVALID_REQUEST",
            RoomServiceError::RoomAlreadyBooked(_) => "ROOM_ALREADY_BOOKED",
            RoomServiceError::RoomNotBooked(_) => "ROOM_NOT_BOOKED",
            RoomServiceError::RoomFull(_) => "ROOM_FULL",
            RoomServiceError::Unauthorized => "UNAUTHORIZED",
            RoomServiceError::NotFound(_) => "NOT_FOUND",
        }
    }

    fn client_message(&self) -> String {
        match self {
            RoomServiceError::InvalidRequest(_) => {
                "Please input a valid request message".to_string()
            }
            RoomServiceError::RoomAlreadyBooked(_) => {
                "Room already booked. Please book other available rooms".to_string()
            }
            RoomServiceError::RoomNotBooked(_) => {
                "Room is not booked. Please choose a valid room".to_string()
            }
            RoomServiceError::RoomFull(_) => {
                "Room is full. Cannot add more participants".to_string()
            }
            RoomServiceError::Unauthorized => {
                "This requires authorisation. Please enter your username and password".to_string()
            }
            RoomServiceError::RoomIdMissing
            | RoomServiceError::RoomNotFound(_)
            | RoomServiceError::NotFound(_) => self.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for RoomServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::NOT_FOUND);

        if let RoomServiceError::InvalidRequest(reason) = &self {
            tracing::debug!(target: "rooms.errors", reason = %reason, "Rejected request payload");
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.client_message(),
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) =
                HeaderValue::from_str(&format!("Basic realm=\"{}\"", AUTH_REALM))
            {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, header_value);
            }
        }

        response
    }
}
