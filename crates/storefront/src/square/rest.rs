//! Raw wire types for the Square catalog REST API.
//!
//! Every field Square may omit is an `Option`; the conversion layer in
//! [`super::conversions`] applies the defaults.

use serde::Deserialize;

/// Response to `GET /catalog/list`.
#[derive(Debug, Deserialize)]
pub struct ListCatalogResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
}

/// A top-level catalog object (`types=ITEM` or `types=CATEGORY`).
#[derive(Debug, Deserialize)]
pub struct CatalogObject {
    pub id: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub item_data: Option<ItemData>,
    pub category_data: Option<CategoryData>,
}

/// Item payload of an ITEM catalog object.
#[derive(Debug, Deserialize)]
pub struct ItemData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    #[serde(default)]
    pub variations: Vec<VariationObject>,
    #[serde(default)]
    pub image_ids: Vec<String>,
}

/// A nested variation object inside an item's `variations` list.
#[derive(Debug, Deserialize)]
pub struct VariationObject {
    pub id: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub item_variation_data: Option<ItemVariationData>,
}

/// Variation payload of a variation object.
#[derive(Debug, Deserialize)]
pub struct ItemVariationData {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price_money: Option<Money>,
}

/// Square money: integer minor units plus currency code.
#[derive(Debug, Deserialize)]
pub struct Money {
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

/// Category payload of a CATEGORY catalog object.
#[derive(Debug, Deserialize)]
pub struct CategoryData {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Error body Square returns on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}
