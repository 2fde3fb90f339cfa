use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::storage::Record;

/// Stored product. Attributes beyond the known fields are kept verbatim in
/// `extra` so files written by other tools survive a rewrite.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Product {
    fn id(&self) -> u64 { self.id }
}

/// Create input. Every known field is optional here so a missing one is
/// reported as a validation error rather than a decode failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewProduct {
    /// Require every field to be present and truthy: non-blank text,
    /// non-zero numbers. On success returns the product with `id` still 0.
    pub fn validate(self) -> Result<Product, ServiceError> {
        let mut missing = Vec::new();
        let title = present_text(self.title, "title", &mut missing);
        let description = present_text(self.description, "description", &mut missing);
        let price = self.price.filter(|p| *p != 0.0 && !p.is_nan());
        if price.is_none() {
            missing.push("price");
        }
        let thumbnail = present_text(self.thumbnail, "thumbnail", &mut missing);
        let code = present_text(self.code, "code", &mut missing);
        let stock = self.stock.filter(|s| *s != 0);
        if stock.is_none() {
            missing.push("stock");
        }

        match (title, description, price, thumbnail, code, stock) {
            (Some(title), Some(description), Some(price), Some(thumbnail), Some(code), Some(stock)) => {
                let mut extra = self.extra;
                extra.remove("id");
                Ok(Product { id: 0, title, description, price, thumbnail, code, stock, extra })
            }
            _ => Err(ServiceError::Validation(format!(
                "all fields are required; missing or empty: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn present_text(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

/// Partial update: only the fields present are written onto the stored
/// product. `id` can never be changed through a patch.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductPatch {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.title { product.title = v; }
        if let Some(v) = self.description { product.description = v; }
        if let Some(v) = self.price { product.price = v; }
        if let Some(v) = self.thumbnail { product.thumbnail = v; }
        if let Some(v) = self.code { product.code = v; }
        if let Some(v) = self.stock { product.stock = v; }
        for (key, value) in self.extra {
            if key != "id" {
                product.extra.insert(key, value);
            }
        }
    }
}

/// Result of a successful update, serialized as the response body.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductUpdated {
    pub product: Product,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_input() -> NewProduct {
        serde_json::from_value(json!({
            "title": "Mate",
            "description": "Calabash gourd",
            "price": 1500,
            "thumbnail": "mate.png",
            "code": "MATE-1",
            "stock": 10,
            "category": "kitchen"
        }))
        .unwrap()
    }

    #[test]
    fn complete_input_validates_and_keeps_extra_fields() {
        let product = full_input().validate().unwrap();
        assert_eq!(product.price, 1500.0);
        assert_eq!(product.extra.get("category"), Some(&json!("kitchen")));
    }

    #[test]
    fn missing_and_falsy_fields_are_listed() {
        let mut input = full_input();
        input.price = None;
        input.stock = Some(0);
        input.title = Some("  ".into());
        let err = input.validate().unwrap_err();
        match err {
            ServiceError::Validation(msg) => {
                assert!(msg.contains("price"));
                assert!(msg.contains("stock"));
                assert!(msg.contains("title"));
                assert!(!msg.contains("code"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn client_supplied_id_is_dropped() {
        let mut input = full_input();
        input.extra.insert("id".into(), json!(99));
        let product = input.validate().unwrap();
        assert_eq!(product.id, 0);
        assert!(!product.extra.contains_key("id"));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut product = full_input().validate().unwrap();
        product.id = 4;
        let patch: ProductPatch = serde_json::from_value(json!({"price": 99.5, "id": 12, "color": "green"})).unwrap();
        patch.apply_to(&mut product);

        assert_eq!(product.id, 4);
        assert_eq!(product.price, 99.5);
        assert_eq!(product.title, "Mate");
        assert_eq!(product.code, "MATE-1");
        assert_eq!(product.extra.get("color"), Some(&json!("green")));
        assert!(!product.extra.contains_key("id"));
    }

    #[test]
    fn product_json_is_flat() {
        let mut product = full_input().validate().unwrap();
        product.id = 1;
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["category"], json!("kitchen"));
        assert!(value.get("extra").is_none());
    }
}
