//! Basic authentication middleware for protected routes.
//!
//! Decodes the `Authorization: Basic <base64(user:pass)>` header and compares
//! it with the single configured credential pair. Runs before any handler on
//! the protected routes, so a rejected request never reaches the registry.

use crate::errors::RoomServiceError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::IntoResponse,
};
use base64::{engine::general_purpose, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Accepted username.
    pub username: String,

    /// Accepted password.
    pub password: SecretString,
}

impl AuthState {
    fn accepts(&self, username: &str, password: &SecretString) -> bool {
        username == self.username && password.expose_secret() == self.password.expose_secret()
    }
}

/// Authentication middleware that validates Basic credentials.
///
/// # Response
///
/// - Returns 401 Unauthorized with a Basic `WWW-Authenticate` challenge if the
///   header is missing, malformed, or carries the wrong credentials
/// - Continues to the next handler otherwise
#[instrument(skip_all, name = "rooms.middleware.auth")]
pub async fn require_basic_auth(
    State(state): State<Arc<AuthState>>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, RoomServiceError> {
    let (username, password) = extract_basic_credentials(req.headers())?;

    if !state.accepts(&username, &password) {
        tracing::warn!(target: "rooms.middleware.auth", "Rejected Basic credentials");
        return Err(RoomServiceError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// Extract username and password from a Basic `Authorization` header.
fn extract_basic_credentials(
    headers: &HeaderMap,
) -> Result<(String, SecretString), RoomServiceError> {
    let auth_str = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "rooms.middleware.auth", "Missing Authorization header");
            RoomServiceError::Unauthorized
        })?;

    // Scheme names are case-insensitive
    let encoded = auth_str
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("basic"))
        .map(|(_, encoded)| encoded)
        .ok_or_else(|| {
            tracing::debug!(target: "rooms.middleware.auth", "Invalid Authorization header format");
            RoomServiceError::Unauthorized
        })?;

    let decoded = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| RoomServiceError::Unauthorized)?;

    let credentials = String::from_utf8(decoded).map_err(|_| RoomServiceError::Unauthorized)?;

    match credentials.split_once(':') {
        Some((username, password)) => Ok((
            username.to_string(),
            SecretString::from(password.to_string()),
        )),
        None => Err(RoomServiceError::Unauthorized),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(user_pass))
    }

    fn auth_state() -> AuthState {
        AuthState {
            username: "admin".to_string(),
            password: SecretString::from("pw1234"),
        }
    }

    #[test]
    fn test_extract_valid_credentials() {
        let (username, password) =
            extract_basic_credentials(&headers_with(&basic("admin:pw1234"))).unwrap();

        assert_eq!(username, "admin");
        assert_eq!(password.expose_secret(), "pw1234");
    }

    #[test]
    fn test_extract_password_containing_colon() {
        let (username, password) =
            extract_basic_credentials(&headers_with(&basic("admin:pw:1234"))).unwrap();

        assert_eq!(username, "admin");
        assert_eq!(password.expose_secret(), "pw:1234");
    }

    #[test]
    fn test_extract_scheme_in_any_case() {
        let encoded = general_purpose::STANDARD.encode("admin:pw1234");

        for scheme in ["basic", "BASIC", "bAsIc"] {
            let (username, password) =
                extract_basic_credentials(&headers_with(&format!("{} {}", scheme, encoded)))
                    .unwrap();

            assert_eq!(username, "admin");
            assert_eq!(password.expose_secret(), "pw1234");
        }
    }

    #[test]
    fn test_extract_scheme_without_credentials_rejected() {
        let result = extract_basic_credentials(&headers_with("Basic"));
        assert!(matches!(result, Err(RoomServiceError::Unauthorized)));
    }

    #[test]
    fn test_extract_missing_header() {
        let result = extract_basic_credentials(&HeaderMap::new());
        assert!(matches!(result, Err(RoomServiceError::Unauthorized)));
    }

    #[test]
    fn test_extract_bearer_scheme_rejected() {
        let result = extract_basic_credentials(&headers_with("Bearer abc.def.ghi"));
        assert!(matches!(result, Err(RoomServiceError::Unauthorized)));
    }

    #[test]
    fn test_extract_invalid_base64_rejected() {
        let result = extract_basic_credentials(&headers_with("Basic not-base64!@#"));
        assert!(matches!(result, Err(RoomServiceError::Unauthorized)));
    }

    #[test]
    fn test_extract_missing_separator_rejected() {
        let result = extract_basic_credentials(&headers_with(&basic("adminpw1234")));
        assert!(matches!(result, Err(RoomServiceError::Unauthorized)));
    }

    #[test]
    fn test_accepts_only_configured_pair() {
        let state = auth_state();

        assert!(state.accepts("admin", &SecretString::from("pw1234")));
        assert!(!state.accepts("admin", &SecretString::from("1234")));
        assert!(!state.accepts("root", &SecretString::from("pw1234")));
    }
}
