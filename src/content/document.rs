// src/content/document.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One question/answer pair on the FAQ page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Sections of the product page, in the order they are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSections {
    pub name: String,
    pub description: String,
    pub concentration: String,
    pub benefits: Vec<String>,
    pub usage: String,
    pub ingredients: Vec<String>,
    pub price: String,
    pub warnings: String,
}

/// A canonical page document, tagged by `page_type`.
///
/// Only the builders in [`crate::templates`] construct these, so anything
/// downstream can treat a `Document` as already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page_type", rename_all = "lowercase")]
pub enum Document {
    Faq {
        faqs: Vec<FaqItem>,
    },
    Product {
        sections: ProductSections,
    },
    Comparison {
        products: Vec<Map<String, Value>>,
        comparison_metrics: Vec<Map<String, Value>>,
    },
}

impl Document {
    pub fn page_type(&self) -> &'static str {
        match self {
            Document::Faq { .. } => "faq",
            Document::Product { .. } => "product",
            Document::Comparison { .. } => "comparison",
        }
    }

    /// Blake3 fingerprint of the document's JSON encoding.
    ///
    /// Object keys inside `serde_json::Map` are kept sorted (no
    /// `preserve_order`), so equal documents always hash equally.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}
