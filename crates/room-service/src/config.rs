//! Meeting Room Service configuration.
//!
//! Configuration is loaded from environment variables. The Basic auth
//! password is held as a [`SecretString`] and redacted in Debug output.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Default Basic auth username.
pub const DEFAULT_AUTH_USERNAME: &str = "admin";

/// Default Basic auth password.
pub const DEFAULT_AUTH_PASSWORD: &str = "pw1234";

/// Default room capacities. Room ids are assigned 1..N in this order.
pub const DEFAULT_ROOM_CAPACITIES: &[usize] = &[15, 5, 3];

/// Default graceful-shutdown drain period in seconds.
pub const DEFAULT_DRAIN_SECONDS: u64 = 0;

/// Meeting Room Service configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:5000").
    pub bind_address: String,

    /// Username accepted on protected routes.
    pub auth_username: String,

    /// Password accepted on protected routes.
    pub auth_password: SecretString,

    /// Maximum capacity of each room, in room id order.
    pub room_capacities: Vec<usize>,

    /// How long to keep serving in-flight requests after a shutdown signal.
    pub drain_period: Duration,
}

/// Custom Debug implementation that redacts the password.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &"[REDACTED]")
            .field("room_capacities", &self.room_capacities)
            .field("drain_period", &self.drain_period)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid credentials configuration: {0}")]
    InvalidCredentials(String),

    #[error("Invalid room capacities configuration: {0}")]
    InvalidRoomCapacities(String),

    #[error("Invalid drain period configuration: {0}")]
    InvalidDrainPeriod(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let auth_username = vars
            .get("ROOMS_AUTH_USERNAME")
            .cloned()
            .unwrap_or_else(|| DEFAULT_AUTH_USERNAME.to_string());

        if auth_username.is_empty() {
            return Err(ConfigError::InvalidCredentials(
                "ROOMS_AUTH_USERNAME must not be empty".to_string(),
            ));
        }

        let auth_password = SecretString::from(
            vars.get("ROOMS_AUTH_PASSWORD")
                .cloned()
                .unwrap_or_else(|| DEFAULT_AUTH_PASSWORD.to_string()),
        );

        if auth_password.expose_secret().is_empty() {
            return Err(ConfigError::InvalidCredentials(
                "ROOMS_AUTH_PASSWORD must not be empty".to_string(),
            ));
        }

        let room_capacities = match vars.get("ROOM_CAPACITIES") {
            Some(value) => parse_room_capacities(value)?,
            None => DEFAULT_ROOM_CAPACITIES.to_vec(),
        };

        let drain_seconds = match vars.get("ROOMS_DRAIN_SECONDS") {
            Some(value) => value.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidDrainPeriod(format!(
                    "ROOMS_DRAIN_SECONDS must be a non-negative integer, got '{}': {}",
                    value, e
                ))
            })?,
            None => DEFAULT_DRAIN_SECONDS,
        };

        Ok(Config {
            bind_address,
            auth_username,
            auth_password,
            room_capacities,
            drain_period: Duration::from_secs(drain_seconds),
        })
    }
}

/// Parse a comma-separated list of positive room capacities, e.g. "15,5,3".
fn parse_room_capacities(value: &str) -> Result<Vec<usize>, ConfigError> {
    // An empty value splits into one empty entry and fails to parse below
    value
        .split(',')
        .map(str::trim)
        .map(|part| {
            let capacity: usize = part.parse().map_err(|e| {
                ConfigError::InvalidRoomCapacities(format!(
                    "ROOM_CAPACITIES entries must be positive integers, got '{}': {}",
                    part, e
                ))
            })?;

            if capacity == 0 {
                return Err(ConfigError::InvalidRoomCapacities(
                    "ROOM_CAPACITIES entries must be greater than 0".to_string(),
                ));
            }

            Ok(capacity)
        })
        .collect()
}
