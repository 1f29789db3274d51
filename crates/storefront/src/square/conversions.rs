//! Conversions from raw Square catalog objects to domain types.
//!
//! Normalization rules: missing item name → "Unnamed Item", description → "",
//! category → "", variation name → "Default", price → 0, currency → "USD",
//! sku → ""; availability is the negation of `is_deleted`.

use copper_cup_core::DEFAULT_CURRENCY;

use super::rest::{CatalogObject, VariationObject};
use super::types::{Category, MenuItem, MenuVariation};

/// Convert an ITEM catalog object into a [`MenuItem`].
///
/// `base_url` is used to compose the image URL from the item's first image id.
pub fn convert_item(object: CatalogObject, base_url: &str) -> MenuItem {
    let available = !object.is_deleted;
    let item_data = object.item_data;

    let (name, description, category, variations, image_url) = match item_data {
        Some(data) => (
            data.name.unwrap_or_else(|| "Unnamed Item".to_string()),
            data.description.unwrap_or_default(),
            data.category_id.unwrap_or_default(),
            data.variations.into_iter().map(convert_variation).collect(),
            data.image_ids
                .first()
                .map(|image_id| image_url(base_url, image_id)),
        ),
        None => ("Unnamed Item".to_string(), String::new(), String::new(), vec![], None),
    };

    MenuItem {
        id: object.id,
        name,
        description,
        category,
        variations,
        available,
        image_url,
    }
}

/// Convert a nested variation object into a [`MenuVariation`].
pub fn convert_variation(object: VariationObject) -> MenuVariation {
    let available = !object.is_deleted;
    let data = object.item_variation_data;

    let (name, sku, price, currency) = match data {
        Some(data) => {
            let (price, currency) = data.price_money.map_or((0, None), |money| {
                (money.amount.unwrap_or(0), money.currency)
            });
            (
                data.name.unwrap_or_else(|| "Default".to_string()),
                data.sku.unwrap_or_default(),
                price,
                currency,
            )
        }
        None => ("Default".to_string(), String::new(), 0, None),
    };

    MenuVariation {
        id: object.id,
        name,
        price,
        currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        sku,
        available,
    }
}

/// Convert a CATEGORY catalog object into a [`Category`].
pub fn convert_category(object: CatalogObject) -> Category {
    let available = !object.is_deleted;
    let data = object.category_data;

    let (name, description) = match data {
        Some(data) => (
            data.name.unwrap_or_else(|| "Unnamed Category".to_string()),
            data.description.unwrap_or_default(),
        ),
        None => ("Unnamed Category".to_string(), String::new()),
    };

    Category {
        id: object.id,
        name,
        description,
        available,
    }
}

/// URL for a catalog image object.
fn image_url(base_url: &str, image_id: &str) -> String {
    format!("{base_url}/catalog/object/{image_id}/image")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::square::rest::CatalogObject;

    const BASE_URL: &str = "https://connect.squareup.com/v2";

    fn parse(value: serde_json::Value) -> CatalogObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_convert_item_full() {
        let object = parse(serde_json::json!({
            "id": "ITEM1",
            "item_data": {
                "name": "Latte",
                "description": "Espresso with steamed milk",
                "category_id": "CAT1",
                "image_ids": ["IMG1", "IMG2"],
                "variations": [{
                    "id": "VAR1",
                    "item_variation_data": {
                        "name": "Large",
                        "sku": "LAT-L",
                        "price_money": { "amount": 550, "currency": "USD" }
                    }
                }]
            }
        }));

        let item = convert_item(object, BASE_URL);
        assert_eq!(item.name, "Latte");
        assert_eq!(item.category, "CAT1");
        assert!(item.available);
        assert_eq!(
            item.image_url.as_deref(),
            Some("https://connect.squareup.com/v2/catalog/object/IMG1/image")
        );

        let variation = &item.variations[0];
        assert_eq!(variation.name, "Large");
        assert_eq!(variation.price, 550);
        assert_eq!(variation.currency, "USD");
        assert_eq!(variation.sku, "LAT-L");
        assert!(variation.available);
    }

    #[test]
    fn test_convert_item_defaults() {
        let item = convert_item(parse(serde_json::json!({ "id": "ITEM1" })), BASE_URL);
        assert_eq!(item.name, "Unnamed Item");
        assert_eq!(item.description, "");
        assert_eq!(item.category, "");
        assert!(item.variations.is_empty());
        assert!(item.available);
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_convert_variation_defaults() {
        let object = parse(serde_json::json!({
            "id": "ITEM1",
            "item_data": { "variations": [{ "id": "VAR1" }] }
        }));

        let item = convert_item(object, BASE_URL);
        let variation = &item.variations[0];
        assert_eq!(variation.name, "Default");
        assert_eq!(variation.price, 0);
        assert_eq!(variation.currency, "USD");
        assert_eq!(variation.sku, "");
    }

    #[test]
    fn test_deleted_flag_negates_availability() {
        let object = parse(serde_json::json!({
            "id": "ITEM1",
            "is_deleted": true,
            "item_data": {
                "name": "Retired Drink",
                "variations": [{ "id": "VAR1", "is_deleted": true }]
            }
        }));

        let item = convert_item(object, BASE_URL);
        assert!(!item.available);
        assert!(!item.variations[0].available);
    }

    #[test]
    fn test_convert_category() {
        let category = convert_category(parse(serde_json::json!({
            "id": "CAT1",
            "category_data": { "name": "Espresso Drinks" }
        })));
        assert_eq!(category.name, "Espresso Drinks");
        assert_eq!(category.description, "");
        assert!(category.available);
    }

    #[test]
    fn test_convert_category_defaults() {
        let category = convert_category(parse(serde_json::json!({ "id": "CAT1" })));
        assert_eq!(category.name, "Unnamed Category");
    }
}
