//! Order submission.
//!
//! Submitting a cart walks an explicit state machine,
//! `Idle → Submitting → (Success | Failed)`, with two strategies behind it:
//!
//! - **Configured**: payment application and location IDs are present, so the
//!   cart is serialized into a line-item payload and POSTed once to the order
//!   endpoint. Only order creation happens here; payment capture is not
//!   implemented and the confirmation carries an empty payment id.
//! - **Fallback**: payment configuration is absent. After a fixed delay the
//!   submission succeeds with synthetic `mock-order-*` / `mock-payment-*`
//!   identifiers and `simulated: true`, so a missing configuration can never
//!   masquerade as a real transaction.
//!
//! While a session's submission is running, [`Checkout`] rejects another
//! submit for the same session key, so double-clicking checkout cannot place
//! two orders.
//!
//! No retries. A failure surfaces once as a human-readable message and the
//! cart is left untouched; the caller must re-trigger the action.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::cart::Cart;
use crate::config::SquareConfig;

/// Delay before the simulated fallback reports success.
const MOCK_ORDER_DELAY: Duration = Duration::from_secs(2);

/// Note attached to every created order.
const ORDER_NOTE: &str = "Order from web app";

/// Errors that can occur during order submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Submission was requested with nothing in the cart. No request is made.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A submission is already in flight for this cart.
    #[error("An order is already being processed")]
    InProgress,

    /// The order endpoint reported a failure; message passed through.
    #[error("{0}")]
    Provider(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: String,
    /// Empty for real orders (payment capture is not implemented); synthetic
    /// for simulated ones.
    pub payment_id: String,
    /// True when the confirmation came from the fallback path rather than a
    /// real order-creation call.
    pub simulated: bool,
}

/// States of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success(OrderConfirmation),
    Failed(String),
}

/// One submission attempt.
///
/// `begin` validates the transition into `Submitting`; the cross-request
/// guard lives in [`Checkout`], which tracks which sessions currently hold a
/// submission in flight.
#[derive(Debug)]
pub struct OrderSubmission {
    state: SubmissionState,
}

impl OrderSubmission {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Transition `Idle → Submitting`.
    ///
    /// # Errors
    ///
    /// `EmptyCart` if the cart has no lines (no transition happens) or
    /// `InProgress` if a submission is already in flight.
    pub fn begin(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        if matches!(self.state, SubmissionState::Submitting) {
            return Err(CheckoutError::InProgress);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.state = SubmissionState::Submitting;
        Ok(())
    }

    /// Transition `Submitting → Success`.
    pub fn complete(&mut self, confirmation: OrderConfirmation) {
        if matches!(self.state, SubmissionState::Submitting) {
            self.state = SubmissionState::Success(confirmation);
        }
    }

    /// Transition `Submitting → Failed`.
    pub fn fail(&mut self, message: String) {
        if matches!(self.state, SubmissionState::Submitting) {
            self.state = SubmissionState::Failed(message);
        }
    }
}

impl Default for OrderSubmission {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// One line of the order-creation payload.
#[derive(Debug, Serialize)]
pub struct OrderLineItem {
    /// Composed as `"<item> - <variation>"`.
    pub name: String,
    pub quantity: u32,
    /// Major-unit price.
    pub price: Decimal,
    pub currency: String,
    pub catalog_object_id: String,
    pub variation_name: String,
}

/// Request body for the order endpoint.
#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    line_items: Vec<OrderLineItem>,
    customer_id: String,
    note: String,
}

/// Response envelope from the order endpoint.
#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    success: bool,
    data: Option<OrderData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderData {
    order: OrderRef,
}

#[derive(Debug, Deserialize)]
struct OrderRef {
    id: String,
}

/// Serialize the cart into the order payload's line items.
#[must_use]
pub fn build_line_items(cart: &Cart) -> Vec<OrderLineItem> {
    cart.lines()
        .iter()
        .map(|line| OrderLineItem {
            name: format!("{} - {}", line.name, line.variation_name),
            quantity: line.quantity,
            price: line.price.amount,
            currency: line.price.currency.clone(),
            catalog_object_id: line.variation_id.clone(),
            variation_name: line.variation_name.clone(),
        })
        .collect()
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Session keys with a submission currently in flight.
///
/// Shared across clones of [`Checkout`], so an overlapping submit for the
/// same session is rejected instead of starting a second request.
#[derive(Clone, Default)]
struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    /// Claim the slot for `key`. `None` if one is already held.
    fn acquire(&self, key: &str) -> Option<InFlightSlot> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.to_string()) {
            return None;
        }
        Some(InFlightSlot {
            keys: Arc::clone(&self.keys),
            key: key.to_string(),
        })
    }
}

/// Releases the claimed key on drop, including early error returns.
struct InFlightSlot {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Order submission service.
#[derive(Clone)]
pub struct Checkout {
    client: reqwest::Client,
    orders_url: String,
    payment_configured: bool,
    mock_delay: Duration,
    in_flight: InFlight,
}

impl Checkout {
    /// Create a new checkout service.
    #[must_use]
    pub fn new(config: &SquareConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            orders_url: config.orders_url.clone(),
            payment_configured: config.payment_configured(),
            mock_delay: MOCK_ORDER_DELAY,
            in_flight: InFlight::default(),
        }
    }

    /// Override the fallback delay (tests use `Duration::ZERO`).
    #[must_use]
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    /// Submit the cart as an order.
    ///
    /// `session_key` identifies the submitting session; while its submission
    /// is running, another submit for the same key returns `InProgress`.
    ///
    /// # Errors
    ///
    /// `InProgress` or `EmptyCart` before any request is made, `Provider`
    /// when the order endpoint reports a failure, `Http` on transport errors.
    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    pub async fn submit(
        &self,
        session_key: &str,
        cart: &Cart,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let _slot = self
            .in_flight
            .acquire(session_key)
            .ok_or(CheckoutError::InProgress)?;

        let mut submission = OrderSubmission::new();
        submission.begin(cart)?;

        let result = if self.payment_configured {
            self.create_order(cart).await
        } else {
            Ok(self.simulated_order().await)
        };

        match result {
            Ok(confirmation) => {
                tracing::info!(
                    order_id = %confirmation.order_id,
                    simulated = confirmation.simulated,
                    "Order submitted"
                );
                submission.complete(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                tracing::error!(error = %e, "Order submission failed");
                submission.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Issue the real order-creation call.
    async fn create_order(&self, cart: &Cart) -> Result<OrderConfirmation, CheckoutError> {
        let request = CreateOrderRequest {
            line_items: build_line_items(cart),
            customer_id: String::new(),
            note: ORDER_NOTE.to_string(),
        };

        let response = self
            .client
            .post(&self.orders_url)
            .json(&request)
            .send()
            .await?;

        // The endpoint reports failures in the envelope, not the status line
        let body = response.text().await?;
        parse_order_response(&body)
    }

    /// Simulated success for the unconfigured fallback path.
    async fn simulated_order(&self) -> OrderConfirmation {
        tracing::warn!("Payment configuration missing, simulating order creation");
        tokio::time::sleep(self.mock_delay).await;

        let timestamp = Utc::now().timestamp_millis();
        OrderConfirmation {
            order_id: format!("mock-order-{timestamp}"),
            payment_id: format!("mock-payment-{timestamp}"),
            simulated: true,
        }
    }
}

/// Interpret the order endpoint's response envelope.
fn parse_order_response(body: &str) -> Result<OrderConfirmation, CheckoutError> {
    let parsed: CreateOrderResponse = serde_json::from_str(body)
        .map_err(|_| CheckoutError::Provider("Failed to create order".to_string()))?;

    if !parsed.success {
        return Err(CheckoutError::Provider(
            parsed
                .error
                .unwrap_or_else(|| "Failed to create order".to_string()),
        ));
    }

    parsed
        .data
        .map(|data| OrderConfirmation {
            order_id: data.order.id,
            payment_id: String::new(),
            simulated: false,
        })
        .ok_or_else(|| CheckoutError::Provider("Failed to create order".to_string()))
}
