// src/templates/product.rs

use serde_json::{Map, Value};

use crate::content::{Document, ProductSections};
use crate::errors::{ContentError, Result};
use crate::templates::coerce_text;

const REQUIRED_FIELDS: [&str; 5] = ["name", "benefits", "how_to_use", "key_ingredients", "price"];

/// Build the product page from a product-shaped object.
///
/// `name`, `benefits`, `how_to_use`, `key_ingredients` and `price` are
/// required. `description`, `concentration` and `side_effects` default to
/// an empty string.
pub fn build_product_page(data: &Value) -> Result<Document> {
    let obj = data
        .as_object()
        .ok_or_else(|| ContentError::validation("product data must be a mapping"))?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(ContentError::validation(format!(
                "missing required field {field}"
            )));
        }
    }

    let sections = ProductSections {
        name: text(obj, "name"),
        description: text(obj, "description"),
        concentration: text(obj, "concentration"),
        benefits: list(obj, "benefits")?,
        usage: text(obj, "how_to_use"),
        ingredients: list(obj, "key_ingredients")?,
        price: text(obj, "price"),
        warnings: text(obj, "side_effects"),
    };

    Ok(Document::Product { sections })
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(coerce_text).unwrap_or_default()
}

fn list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(coerce_text).collect()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(_) => Err(ContentError::validation(format!(
            "field {key} must be a sequence"
        ))),
    }
}
