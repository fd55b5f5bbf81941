// src/templates/comparison.rs

use serde_json::{Map, Value};

use crate::content::Document;
use crate::errors::{ContentError, Result};

/// Build the comparison page.
///
/// Both products must be non-empty objects and `metrics` must be an array of
/// objects. Metric entries are copied through as-is.
pub fn build_comparison_page(
    product_a: &Value,
    product_b: &Value,
    metrics: &Value,
) -> Result<Document> {
    let a = non_empty_mapping(product_a, "product_a")?;
    let b = non_empty_mapping(product_b, "product_b")?;

    let metrics = metrics
        .as_array()
        .ok_or_else(|| ContentError::validation("comparison_metrics must be a sequence"))?;

    let comparison_metrics = metrics
        .iter()
        .enumerate()
        .map(|(idx, metric)| {
            metric.as_object().cloned().ok_or_else(|| {
                ContentError::validation(format!("metric at index {idx} must be a mapping"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Document::Comparison {
        products: vec![a, b],
        comparison_metrics,
    })
}

fn non_empty_mapping(value: &Value, label: &str) -> Result<Map<String, Value>> {
    match value.as_object() {
        Some(obj) if !obj.is_empty() => Ok(obj.clone()),
        _ => Err(ContentError::validation(format!(
            "{label} must be a non-empty mapping"
        ))),
    }
}
