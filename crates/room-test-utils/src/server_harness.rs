//! Test server harness for E2E testing
//!
//! Provides `TestRoomServer` for spawning real Meeting Room Service
//! instances in tests.

use base64::{engine::general_purpose, Engine as _};
use room_service::config::Config;
use room_service::routes::{self, AppState};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Username configured on every test server.
pub const TEST_USERNAME: &str = "admin";

/// Password configured on every test server.
pub const TEST_PASSWORD: &str = "pw1234";

/// Test harness for spawning the Meeting Room Service in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_book_room() -> Result<()> {
///     let server = TestRoomServer::spawn().await?;
///
///     let response = server.book(1).await?;
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestRoomServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestRoomServer {
    /// Spawn a server seeded with the default rooms (capacities 15, 5, 3).
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(HashMap::new()).await
    }

    /// Spawn a server with extra configuration variables.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Use `TEST_USERNAME` / `TEST_PASSWORD` unless overridden in `vars`
    /// - Start the HTTP server in the background
    pub async fn spawn_with_vars(
        mut vars: HashMap<String, String>,
    ) -> Result<Self, anyhow::Error> {
        vars.entry("BIND_ADDRESS".to_string())
            .or_insert_with(|| "127.0.0.1:0".to_string());
        vars.entry("ROOMS_AUTH_USERNAME".to_string())
            .or_insert_with(|| TEST_USERNAME.to_string());
        vars.entry("ROOMS_AUTH_PASSWORD".to_string())
            .or_insert_with(|| TEST_PASSWORD.to_string());

        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let state = Arc::new(AppState::new(config));

        // The global recorder can only be installed once per process, so each
        // test server renders from its own standalone recorder.
        let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();

        // Build routes using room-service's real route builder
        let app = routes::build_routes(state.clone(), metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            state,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the full URL for a path (and optional query string).
    pub fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.url(), path_and_query)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the shared application state, for asserting on the registry directly.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the HTTP client used by the helper methods.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `Authorization` header value for the test credentials.
    pub fn basic_auth_header() -> String {
        basic_auth_header(TEST_USERNAME, TEST_PASSWORD)
    }

    /// `PUT /meeting_rooms_available?id=N {"request": "book"}` with valid credentials.
    pub async fn book(&self, id: u32) -> Result<reqwest::Response, anyhow::Error> {
        self.update_booking(id, "book").await
    }

    /// `PUT /meeting_rooms_available?id=N {"request": "delete"}` with valid credentials.
    pub async fn unbook(&self, id: u32) -> Result<reqwest::Response, anyhow::Error> {
        self.update_booking(id, "delete").await
    }

    async fn update_booking(
        &self,
        id: u32,
        action: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .put(self.url_for(&format!("/meeting_rooms_available?id={}", id)))
            .header("Authorization", Self::basic_auth_header())
            .json(&json!({ "request": action }))
            .send()
            .await?)
    }

    /// `POST /meeting_room?id=N` with valid credentials.
    pub async fn add_participants(
        &self,
        id: u32,
        names: &[&str],
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .post(self.url_for(&format!("/meeting_room?id={}", id)))
            .header("Authorization", Self::basic_auth_header())
            .json(&json!({ "participants": names }))
            .send()
            .await?)
    }

    /// `DELETE /meeting_room?id=N` with valid credentials.
    pub async fn remove_participants(
        &self,
        id: u32,
        names: &[&str],
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .delete(self.url_for(&format!("/meeting_room?id={}", id)))
            .header("Authorization", Self::basic_auth_header())
            .json(&json!({ "participants": names }))
            .send()
            .await?)
    }

    /// `GET /meeting_room?id=N`, decoded as JSON.
    pub async fn room_detail(&self, id: u32) -> Result<serde_json::Value, anyhow::Error> {
        Ok(self
            .client
            .get(self.url_for(&format!("/meeting_room?id={}", id)))
            .send()
            .await?
            .json()
            .await?)
    }

    /// `GET /meeting_rooms_available`, decoded as JSON.
    pub async fn availability(&self) -> Result<serde_json::Value, anyhow::Error> {
        Ok(self
            .client
            .get(self.url_for("/meeting_rooms_available"))
            .send()
            .await?
            .json()
            .await?)
    }
}

impl Drop for TestRoomServer {
    fn drop(&mut self) {
        // Abort the HTTP server task so each test tears down its listener
        self._handle.abort();
    }
}

/// Build a Basic `Authorization` header value.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{}:{}", username, password))
    )
}
