// src/content/product.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ContentError, Result};

/// Product record parsed from raw input.
///
/// No field is optional: anything absent in the input becomes an empty string
/// or an empty list. Once built it is never mutated; steps share it behind an
/// `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub concentration: String,
    pub skin_type: Vec<String>,
    pub key_ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub how_to_use: String,
    pub side_effects: String,
    /// Currency-tagged free text such as `"₹699"`.
    pub price: String,
}

impl Product {
    /// Build a product from untyped JSON.
    ///
    /// - The input must be an object.
    /// - String fields accept strings, numbers and booleans.
    /// - List fields accept arrays, or a single string as a one-element list.
    /// - Missing keys and `null` map to empty values.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ContentError::validation("raw product input must be a mapping"))?;

        Ok(Self {
            name: text_field(obj, "name")?,
            concentration: text_field(obj, "concentration")?,
            skin_type: list_field(obj, "skin_type")?,
            key_ingredients: list_field(obj, "key_ingredients")?,
            benefits: list_field(obj, "benefits")?,
            how_to_use: text_field(obj, "how_to_use")?,
            side_effects: text_field(obj, "side_effects")?,
            price: text_field(obj, "price")?,
        })
    }

    /// Serialize into the JSON mapping shape used by the comparison page.
    pub fn to_mapping(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Result<String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(_) => Err(ContentError::validation(format!(
            "field {key} must be a string"
        ))),
    }
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(_) | Value::Bool(_) => Ok(item.to_string()),
                _ => Err(ContentError::validation(format!(
                    "field {key} has a non-text element at index {idx}"
                ))),
            })
            .collect(),
        Some(_) => Err(ContentError::validation(format!(
            "field {key} must be a sequence"
        ))),
    }
}
