//! Cart route handlers.
//!
//! The cart lives in the session (in-memory store, one cart per browsing
//! session) and is mutated only by these explicit actions. Adding a line
//! looks the variation up in a fresh catalog fetch and copies its fields
//! into the cart at that moment.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Cart, CartLine, SESSION_KEY};
use crate::error::{AppError, Result};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    /// Major-unit sum over all lines.
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, empty if none has been stored yet.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(SESSION_KEY).await?.unwrap_or_default())
}

/// Store the cart back into the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(SESSION_KEY, cart).await?;
    Ok(())
}

/// Drop the cart from the session (after a successful order).
pub async fn clear_cart(session: &Session) -> Result<()> {
    session.remove::<Cart>(SESSION_KEY).await?;
    Ok(())
}

// =============================================================================
// Request Types
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: String,
    pub variation_id: String,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub item_id: String,
    pub variation_id: String,
    /// Values at or below zero remove the line.
    pub quantity: i64,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub item_id: String,
    pub variation_id: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<ApiResponse<CartView>>> {
    let cart = load_cart(&session).await?;
    Ok(ApiResponse::ok(CartView::from(&cart)))
}

/// Add one unit of a variation to the cart.
///
/// The item and variation are resolved against a fresh catalog fetch;
/// adding an unavailable variation leaves the cart unchanged.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let items = state.catalog().list_items().await?;
    let item = items
        .iter()
        .find(|item| item.id == request.item_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown menu item: {}", request.item_id)))?;
    let variation = item
        .variations
        .iter()
        .find(|variation| variation.id == request.variation_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Unknown variation: {}", request.variation_id))
        })?;

    let mut cart = load_cart(&session).await?;
    cart.add(item, variation);
    save_cart(&session, &cart).await?;

    Ok(ApiResponse::ok(CartView::from(&cart)))
}

/// Replace a line's quantity; at or below zero removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let quantity = u32::try_from(request.quantity.max(0)).unwrap_or(u32::MAX);

    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&request.item_id, &request.variation_id, quantity);
    save_cart(&session, &cart).await?;

    Ok(ApiResponse::ok(CartView::from(&cart)))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<ApiResponse<CartView>>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&request.item_id, &request.variation_id);
    save_cart(&session, &cart).await?;

    Ok(ApiResponse::ok(CartView::from(&cart)))
}

/// Get the cart unit count.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<ApiResponse<CartCount>>> {
    let cart = load_cart(&session).await?;
    Ok(ApiResponse::ok(CartCount {
        count: cart.item_count(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_view_of_empty_cart() {
        let view = CartView::from(&Cart::new());
        assert!(view.lines.is_empty());
        assert_eq!(view.total, Decimal::ZERO);
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_cart_view_serializes_camel_case() {
        let json = serde_json::to_value(CartView::from(&Cart::new())).unwrap();
        assert!(json.get("itemCount").is_some());
        assert!(json.get("item_count").is_none());
    }
}
