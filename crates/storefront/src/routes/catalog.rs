//! Catalog route handlers.
//!
//! Thin proxies over the Square catalog client: fetch, normalize, filter,
//! wrap in the response envelope. The catalog is re-fetched per request.

use axum::{Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::routes::ApiResponse;
use crate::square::{ALL_CATEGORIES, Category, MenuItem, category_options, filter_by_category};
use crate::state::AppState;

/// Query parameters for the items listing.
#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// Category label to filter by; absent or "all" shows everything.
    pub category: Option<String>,
}

/// Payload of `GET /catalog/items`.
#[derive(Debug, Serialize)]
pub struct MenuData {
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<MenuItem>,
    /// Selector options derived from the loaded items, "all" first.
    pub categories: Vec<String>,
    pub total: usize,
}

/// Payload of `GET /catalog/categories`.
#[derive(Debug, Serialize)]
pub struct CategoriesData {
    pub categories: Vec<Category>,
    pub total: usize,
}

/// List menu items, optionally filtered by category label.
#[instrument(skip(state))]
pub async fn items(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<ApiResponse<MenuData>>> {
    let items = state.catalog().list_items().await?;
    let categories = category_options(&items);

    let selected = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let menu_items = filter_by_category(items, selected);
    let total = menu_items.len();

    Ok(ApiResponse::ok(MenuData {
        menu_items,
        categories,
        total,
    }))
}

/// List catalog categories.
#[instrument(skip(state))]
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoriesData>>> {
    let categories = state.catalog().list_categories().await?;
    let total = categories.len();

    Ok(ApiResponse::ok(CategoriesData { categories, total }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_data_envelope_field_names() {
        let response = ApiResponse {
            success: true,
            data: MenuData {
                menu_items: vec![],
                categories: vec![ALL_CATEGORIES.to_string()],
                total: 0,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["data"]["menuItems"].is_array());
        assert_eq!(json["data"]["total"], 0);
        assert_eq!(json["data"]["categories"][0], "all");
    }
}
