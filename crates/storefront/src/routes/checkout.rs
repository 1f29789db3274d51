//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::checkout::OrderConfirmation;
use crate::error::Result;
use crate::routes::ApiResponse;
use crate::routes::cart::{clear_cart, load_cart};
use crate::state::AppState;

/// Order confirmation payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: String,
    pub payment_id: String,
    /// True when the order came from the simulated fallback path, not a real
    /// transaction.
    pub simulated: bool,
}

impl From<OrderConfirmation> for OrderView {
    fn from(confirmation: OrderConfirmation) -> Self {
        Self {
            order_id: confirmation.order_id,
            payment_id: confirmation.payment_id,
            simulated: confirmation.simulated,
        }
    }
}

/// Submit the session's cart as an order.
///
/// The cart is cleared only on success; a failed submission leaves it in the
/// session untouched so the customer can retry.
#[instrument(skip(state, session))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<OrderView>>> {
    let cart = load_cart(&session).await?;

    // A session with a cart has been saved and therefore has an id; a fresh
    // session without one fails the empty-cart check instead.
    let session_key = session.id().map_or_else(String::new, |id| id.to_string());

    let confirmation = state.checkout().submit(&session_key, &cart).await?;
    clear_cart(&session).await?;

    Ok(ApiResponse::ok(OrderView::from(confirmation)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_view_serializes_camel_case() {
        let view = OrderView::from(OrderConfirmation {
            order_id: "mock-order-1".to_string(),
            payment_id: "mock-payment-1".to_string(),
            simulated: true,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["orderId"], "mock-order-1");
        assert_eq!(json["paymentId"], "mock-payment-1");
        assert_eq!(json["simulated"], true);
    }
}
