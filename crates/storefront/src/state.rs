//! Application state shared across handlers.

use std::sync::Arc;

use crate::checkout::Checkout;
use crate::config::StorefrontConfig;
use crate::square::CatalogClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The Square components are constructed from
/// the configuration once, at startup; nothing reads the environment after
/// this point.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    checkout: Checkout,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.square);
        let checkout = Checkout::new(&config.square);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Square catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &Checkout {
        &self.inner.checkout
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_state_exposes_injected_config() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 4000,
            square: crate::config::SquareConfig {
                base_url: "https://connect.squareup.com/v2".to_string(),
                api_version: "2024-09-19".to_string(),
                access_token: None,
                application_id: None,
                location_id: None,
                orders_url: "https://connect.squareup.com/v2/orders".to_string(),
            },
            sentry_dsn: None,
        };

        let state = AppState::new(config);
        assert_eq!(state.config().port, 4000);
        assert!(!state.config().square.payment_configured());
    }
}
