//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog (proxied from Square, normalized)
//! GET  /catalog/items          - Menu items, optional ?category= filter
//! GET  /catalog/categories     - Category metadata
//!
//! # Cart (session-scoped)
//! GET  /cart                   - Current cart
//! POST /cart/add               - Add one unit of a variation
//! POST /cart/update            - Replace a line's quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Unit count badge
//!
//! # Checkout
//! POST /checkout               - Submit the cart as an order
//! ```
//!
//! Every endpoint responds with the `{success, data}` envelope on success
//! and `{success: false, error}` on failure (see [`crate::error`]).

pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope wrapping every response payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(catalog::items))
        .route("/categories", get(catalog::categories))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
