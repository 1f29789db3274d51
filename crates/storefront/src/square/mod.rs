//! Square catalog API client.
//!
//! # Architecture
//!
//! - Plain REST client over `reqwest`; Square is the source of truth
//! - One outbound request per call, no retries, no pagination, no caching -
//!   the menu is re-fetched for every catalog request
//! - Raw wire shapes ([`rest`]) are normalized into domain types ([`types`])
//!   by the conversion layer
//!
//! # Example
//!
//! ```rust,ignore
//! use copper_cup_storefront::square::CatalogClient;
//!
//! let client = CatalogClient::new(&config.square);
//! let items = client.list_items().await?;
//! let categories = client.list_categories().await?;
//! ```

mod conversions;
pub mod rest;
pub mod types;

pub use types::{ALL_CATEGORIES, Category, MenuItem, MenuVariation, category_options, filter_by_category};

use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use crate::config::SquareConfig;

use conversions::{convert_category, convert_item};
use rest::{ApiErrorBody, CatalogObject, ListCatalogResponse};

/// Errors that can occur when interacting with the Square API.
#[derive(Debug, Error)]
pub enum SquareError {
    /// No access token configured; no request was made.
    #[error("Square access token not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Square returned a non-success status.
    #[error("Square API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a Square response body.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the Square catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    access_token: Option<String>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &SquareConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            access_token: config
                .access_token
                .as_ref()
                .map(|token| token.expose_secret().to_string()),
        }
    }

    /// List the menu items from the catalog, normalized.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::NotConfigured`] without issuing a request when
    /// no access token is configured, or an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<MenuItem>, SquareError> {
        let objects = self.list_objects("ITEM").await?;
        Ok(objects
            .into_iter()
            .map(|object| convert_item(object, &self.base_url))
            .collect())
    }

    /// List the catalog categories, normalized.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::list_items`].
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, SquareError> {
        let objects = self.list_objects("CATEGORY").await?;
        Ok(objects.into_iter().map(convert_category).collect())
    }

    /// Fetch one page of catalog objects of the given type.
    async fn list_objects(&self, object_type: &str) -> Result<Vec<CatalogObject>, SquareError> {
        let access_token = self.access_token.as_ref().ok_or(SquareError::NotConfigured)?;

        let url = format!("{}/catalog/list?types={object_type}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Square-Version", &self.api_version)
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Pass Square's own message through when it provides one
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|error| error.message)
                .unwrap_or_else(|| "Failed to fetch catalog".to_string());
            tracing::error!(status = %status, message = %message, "Square catalog request failed");
            return Err(SquareError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ListCatalogResponse = serde_json::from_str(&body)?;
        Ok(parsed.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured_client() -> CatalogClient {
        CatalogClient::new(&SquareConfig {
            base_url: "https://connect.squareup.com/v2".to_string(),
            api_version: "2024-09-19".to_string(),
            access_token: None,
            application_id: None,
            location_id: None,
            orders_url: "https://connect.squareup.com/v2/orders".to_string(),
        })
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_request() {
        let client = unconfigured_client();
        assert!(matches!(
            client.list_items().await,
            Err(SquareError::NotConfigured)
        ));
        assert!(matches!(
            client.list_categories().await,
            Err(SquareError::NotConfigured)
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SquareError::NotConfigured.to_string(),
            "Square access token not configured"
        );

        let err = SquareError::Api {
            status: 401,
            message: "Invalid token".to_string(),
        };
        assert_eq!(err.to_string(), "Square API error (401): Invalid token");
    }
}
