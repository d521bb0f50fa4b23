//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FIRECRACKER_HOST` - Bind address (default: 127.0.0.1)
//! - `FIRECRACKER_PORT` - Listen port (default: 3000)
//! - `FIRECRACKER_BASE_URL` - Public URL (default: `http://127.0.0.1:3000`)
//! - `FIRECRACKER_SESSION_IDLE_MINUTES` - Session lifetime without activity (default: 60)
//! - `FIRECRACKER_TRAIL_CAPACITY` - Pointer trail length (default: 50)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use firecracker_core::DEFAULT_TRAIL_CAPACITY;
use thiserror::Error;

const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;

/// One year.
const MAX_SESSION_IDLE_MINUTES: i64 = 60 * 24 * 365;

/// Upper bound on trail length; each point is an SVG circle in every response.
const MAX_TRAIL_CAPACITY: usize = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Minutes of inactivity before a session (and its cart) is dropped
    pub session_idle_minutes: i64,
    /// Number of pointer positions kept per session
    pub trail_capacity: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://127.0.0.1:3000".to_string(),
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// the trail capacity or session lifetime is zero or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = get_parsed_env("FIRECRACKER_HOST", defaults.host)?;
        let port = get_parsed_env("FIRECRACKER_PORT", defaults.port)?;
        let base_url = get_env_or_default("FIRECRACKER_BASE_URL", &defaults.base_url);
        let session_idle_minutes =
            get_parsed_env("FIRECRACKER_SESSION_IDLE_MINUTES", defaults.session_idle_minutes)?;
        let trail_capacity = get_parsed_env("FIRECRACKER_TRAIL_CAPACITY", defaults.trail_capacity)?;

        validate_session_idle_minutes(session_idle_minutes)?;
        validate_trail_capacity(trail_capacity)?;

        Ok(Self {
            host,
            port,
            base_url,
            session_idle_minutes,
            trail_capacity,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_parsed_env("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: get_parsed_env(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// How long an idle shopper keeps their session, cart and trail.
    #[must_use]
    pub const fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.unsigned_abs().saturating_mul(60))
    }

    /// Whether the storefront is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn get_parsed_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn validate_session_idle_minutes(minutes: i64) -> Result<(), ConfigError> {
    if !(1..=MAX_SESSION_IDLE_MINUTES).contains(&minutes) {
        return Err(ConfigError::InvalidEnvVar(
            "FIRECRACKER_SESSION_IDLE_MINUTES".to_string(),
            format!("must be between 1 and {MAX_SESSION_IDLE_MINUTES} (got {minutes})"),
        ));
    }
    Ok(())
}

fn validate_trail_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 || capacity > MAX_TRAIL_CAPACITY {
        return Err(ConfigError::InvalidEnvVar(
            "FIRECRACKER_TRAIL_CAPACITY".to_string(),
            format!("must be between 1 and {MAX_TRAIL_CAPACITY} (got {capacity})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.trail_capacity, 50);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_is_secure_for_https_base_url() {
        let config = StorefrontConfig {
            base_url: "https://firecrackers.example".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_value_valid() {
        let port: u16 = parse_value("FIRECRACKER_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
        let host: IpAddr = parse_value("FIRECRACKER_HOST", "0.0.0.0").unwrap();
        assert!(host.is_unspecified());
    }

    #[test]
    fn test_parse_value_invalid() {
        let result = parse_value::<u16>("FIRECRACKER_PORT", "eighty");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FIRECRACKER_PORT"));
        assert!(err.to_string().starts_with("Invalid environment variable FIRECRACKER_PORT"));
    }

    #[test]
    fn test_validate_trail_capacity() {
        assert!(validate_trail_capacity(1).is_ok());
        assert!(validate_trail_capacity(50).is_ok());
        assert!(validate_trail_capacity(0).is_err());
        assert!(validate_trail_capacity(MAX_TRAIL_CAPACITY + 1).is_err());
    }

    #[test]
    fn test_validate_session_idle_minutes() {
        assert!(validate_session_idle_minutes(1).is_ok());
        assert!(validate_session_idle_minutes(MAX_SESSION_IDLE_MINUTES).is_ok());
        assert!(validate_session_idle_minutes(0).is_err());
        assert!(validate_session_idle_minutes(-5).is_err());

        // Would overflow the cookie expiry duration
        let err = validate_session_idle_minutes(i64::MAX).unwrap_err();
        assert!(err.to_string().contains("FIRECRACKER_SESSION_IDLE_MINUTES"));
    }

    #[test]
    fn test_session_idle_duration() {
        let config = StorefrontConfig::default();
        assert_eq!(config.session_idle(), Duration::from_secs(3600));
    }
}
