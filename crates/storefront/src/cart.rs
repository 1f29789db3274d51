//! Session-scoped cart.
//!
//! The cart is an ordered list of lines, unique by (item id, variation id).
//! Lines denormalize the item name, variation name, and price at add time;
//! later catalog changes do not touch lines already in the cart. The whole
//! cart round-trips through the session store as JSON and is never persisted
//! anywhere durable.

use copper_cup_core::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::square::{MenuItem, MenuVariation};

/// Session key the cart is stored under.
pub const SESSION_KEY: &str = "cart";

/// One (item, variation) pairing with a quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub variation_id: String,
    pub name: String,
    pub variation_name: String,
    /// Major-unit price copied at add time, not re-fetched.
    pub price: Price,
    pub quantity: u32,
}

impl CartLine {
    fn matches(&self, item_id: &str, variation_id: &str) -> bool {
        self.item_id == item_id && self.variation_id == variation_id
    }
}

/// The order-in-progress for one browsing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `variation` to the cart.
    ///
    /// No-op if the variation is unavailable. A line already holding the same
    /// (item id, variation id) pair has its quantity incremented instead of a
    /// duplicate line being inserted.
    pub fn add(&mut self, item: &MenuItem, variation: &MenuVariation) {
        if !variation.available {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&item.id, &variation.id))
        {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            item_id: item.id.clone(),
            variation_id: variation.id.clone(),
            name: item.name.clone(),
            variation_name: variation.name.clone(),
            price: Price::from_minor_units(variation.price, variation.currency.clone()),
            quantity: 1,
        });
    }

    /// Replace the quantity of the matching line.
    ///
    /// A quantity of zero behaves as [`Self::remove`]. No-op if no line
    /// matches.
    pub fn update_quantity(&mut self, item_id: &str, variation_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id, variation_id);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item_id, variation_id))
        {
            line.quantity = quantity;
        }
    }

    /// Delete the matching line. No-op if absent.
    pub fn remove(&mut self, item_id: &str, variation_id: &str) {
        self.lines
            .retain(|line| !line.matches(item_id, variation_id));
    }

    /// Sum of price x quantity over all lines, in major units.
    ///
    /// Mixed-currency carts are summed as raw numbers without conversion;
    /// see the test flagging this limitation.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.price.amount * Decimal::from(line.quantity))
            .sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
