// src/templates/faq.rs

use serde_json::Value;

use crate::content::{Document, FaqItem};
use crate::errors::{ContentError, Result};
use crate::templates::coerce_text;

/// Build the FAQ page from an array of `{question, answer}` objects.
///
/// Items keep their input order. Both fields must be present on every item;
/// their values are coerced to text.
pub fn build_faq_page(items: &Value) -> Result<Document> {
    let items = items
        .as_array()
        .ok_or_else(|| ContentError::validation("faq items must be a sequence"))?;

    let mut faqs = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            ContentError::validation(format!("faq item at index {idx} must be a mapping"))
        })?;

        let question = obj.get("question").ok_or_else(|| {
            ContentError::validation(format!("missing field question at index {idx}"))
        })?;
        let answer = obj.get("answer").ok_or_else(|| {
            ContentError::validation(format!("missing field answer at index {idx}"))
        })?;

        faqs.push(FaqItem {
            question: coerce_text(question),
            answer: coerce_text(answer),
        });
    }

    Ok(Document::Faq { faqs })
}
