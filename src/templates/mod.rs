// src/templates/mod.rs

//! Builders for the three canonical page documents.
//!
//! Each builder takes loosely-shaped JSON (usually straight out of a model
//! response), checks the fields the page needs and returns a typed
//! [`Document`](crate::content::Document). Builders never call out to
//! anything and never mutate their input.

pub mod comparison;
pub mod faq;
pub mod product;

pub use comparison::build_comparison_page;
pub use faq::build_faq_page;
pub use product::build_product_page;

use serde_json::Value;

/// Render a JSON value as page text.
///
/// Strings pass through unquoted and `null` becomes empty text; anything
/// else is rendered as compact JSON.
pub(crate) fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
