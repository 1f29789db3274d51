//! Domain types for the normalized Square catalog.
//!
//! The raw catalog wire format lives in [`super::rest`]; these are the shapes
//! the rest of the service (routes, cart, checkout) works with.

use serde::{Deserialize, Serialize};

/// Category selector value meaning "no filtering".
pub const ALL_CATEGORIES: &str = "all";

/// A purchasable menu item with its priced variations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Category label; empty when Square has no category for the item.
    pub category: String,
    /// Ordered as returned by the catalog.
    pub variations: Vec<MenuVariation>,
    pub available: bool,
    pub image_url: Option<String>,
}

/// A specific purchasable configuration of an item (e.g., size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuVariation {
    pub id: String,
    pub name: String,
    /// Price in minor currency units (cents for USD).
    pub price: i64,
    pub currency: String,
    pub sku: String,
    pub available: bool,
}

/// Category metadata from the catalog's CATEGORY objects.
///
/// Served by `GET /catalog/categories`; item filtering uses the category
/// labels on the items themselves, not these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub available: bool,
}

// =============================================================================
// Category Filtering
// =============================================================================

/// Distinct non-empty category labels across `items`, in first-occurrence
/// order, with the [`ALL_CATEGORIES`] sentinel prepended.
#[must_use]
pub fn category_options(items: &[MenuItem]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !item.category.is_empty() && !options.contains(&item.category) {
            options.push(item.category.clone());
        }
    }
    options
}

/// Items whose category label equals `selected`.
///
/// The [`ALL_CATEGORIES`] sentinel returns the full list unchanged.
#[must_use]
pub fn filter_by_category(items: Vec<MenuItem>, selected: &str) -> Vec<MenuItem> {
    if selected == ALL_CATEGORIES {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.category == selected)
        .collect()
}
