//! # Room Test Utilities
//!
//! Shared test utilities for the Meeting Room Service.
//!
//! This crate provides:
//! - Server test harness (`TestRoomServer` for E2E tests)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use room_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<()> {
//!     let server = TestRoomServer::spawn().await?;
//!
//!     let response = server
//!         .client()
//!         .get(server.url_for("/meeting_rooms_available"))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;

// Re-export commonly used items
pub use server_harness::*;
