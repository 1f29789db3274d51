//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SQUARE_BASE_URL` - Square API base URL (default: <https://connect.squareup.com/v2>)
//! - `SQUARE_VERSION` - Square API version header (default: 2024-09-19)
//! - `SQUARE_ACCESS_TOKEN` - Catalog API access token; absent → catalog
//!   endpoints respond with 500
//! - `SQUARE_APPLICATION_ID` - Payment application ID
//! - `SQUARE_LOCATION_ID` - Payment location ID; checkout falls back to the
//!   simulated order path unless both payment IDs are present
//! - `SQUARE_ORDERS_URL` - Order creation endpoint (default: `{base_url}/orders`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! Components never read the environment themselves - they take this struct
//! at construction time, so tests can inject fake credentials.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Square API configuration
    pub square: SquareConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Square API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct SquareConfig {
    /// Square API base URL
    pub base_url: String,
    /// Square API version header value
    pub api_version: String,
    /// Catalog API access token; `None` means the catalog endpoints report
    /// a configuration error instead of calling Square
    pub access_token: Option<SecretString>,
    /// Payment application ID
    pub application_id: Option<String>,
    /// Payment location ID
    pub location_id: Option<String>,
    /// Order creation endpoint
    pub orders_url: String,
}

impl SquareConfig {
    /// Whether the payment configuration is complete.
    ///
    /// Checkout only issues a real order-creation call when both IDs are
    /// present; otherwise it takes the simulated fallback path.
    #[must_use]
    pub const fn payment_configured(&self) -> bool {
        self.application_id.is_some() && self.location_id.is_some()
    }
}

impl std::fmt::Debug for SquareConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquareConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("application_id", &self.application_id)
            .field("location_id", &self.location_id)
            .field("orders_url", &self.orders_url)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let square = SquareConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            square,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SquareConfig {
    fn from_env() -> Self {
        let base_url = get_env_or_default("SQUARE_BASE_URL", "https://connect.squareup.com/v2");
        let orders_url =
            get_optional_env("SQUARE_ORDERS_URL").unwrap_or_else(|| format!("{base_url}/orders"));

        Self {
            base_url,
            api_version: get_env_or_default("SQUARE_VERSION", "2024-09-19"),
            access_token: get_optional_env("SQUARE_ACCESS_TOKEN").map(SecretString::from),
            application_id: get_optional_env("SQUARE_APPLICATION_ID"),
            location_id: get_optional_env("SQUARE_LOCATION_ID"),
            orders_url,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square_config(
        access_token: Option<&str>,
        application_id: Option<&str>,
        location_id: Option<&str>,
    ) -> SquareConfig {
        SquareConfig {
            base_url: "https://connect.squareup.com/v2".to_string(),
            api_version: "2024-09-19".to_string(),
            access_token: access_token.map(SecretString::from),
            application_id: application_id.map(String::from),
            location_id: location_id.map(String::from),
            orders_url: "https://connect.squareup.com/v2/orders".to_string(),
        }
    }

    #[test]
    fn test_payment_configured_requires_both_ids() {
        assert!(square_config(None, Some("app"), Some("loc")).payment_configured());
        assert!(!square_config(None, Some("app"), None).payment_configured());
        assert!(!square_config(None, None, Some("loc")).payment_configured());
        assert!(!square_config(None, None, None).payment_configured());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            square: square_config(Some("token"), None, None),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_square_config_debug_redacts_token() {
        let config = square_config(Some("super_secret_access_token"), Some("app-id"), None);
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("app-id"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access_token"));
    }
}
