// src/steps/comparison.rs

use serde_json::{Map, Value, json};

use crate::content::Product;
use crate::dag::{SharedStore, UnitOutput};
use crate::errors::{ContentError, Result};
use crate::llm::CompletionService;
use crate::steps::{blocks, prompts};
use crate::templates::build_comparison_page;
use crate::types::UnitId;

const MAX_TOKENS: u32 = 1200;

/// The fictional competitor every product is compared against.
pub fn competitor() -> Product {
    Product {
        name: "RadiantGlow Vitamin C Serum".to_string(),
        concentration: "15% Vitamin C".to_string(),
        skin_type: vec!["Normal".to_string(), "Dry".to_string()],
        key_ingredients: vec![
            "Vitamin C".to_string(),
            "Vitamin E".to_string(),
            "Ferulic Acid".to_string(),
        ],
        benefits: vec!["Anti-aging".to_string(), "Brightening".to_string()],
        how_to_use: "Apply 3-4 drops morning and evening".to_string(),
        side_effects: "May cause slight redness".to_string(),
        price: "₹899".to_string(),
    }
}

/// Metrics that need no model call.
pub fn deterministic_metrics(a: &Product, b: &Product) -> Vec<Value> {
    let price = blocks::price_difference(&a.price, &b.price);
    vec![
        json!({
            "metric": "overview",
            "product_a": blocks::product_summary(a),
            "product_b": blocks::product_summary(b),
        }),
        json!({
            "metric": "ingredients",
            "common": blocks::common_ingredients(a, b),
            "unique_to_a": blocks::unique_ingredients(a, b),
            "unique_to_b": blocks::unique_ingredients(b, a),
        }),
        json!({
            "metric": "price",
            "product_a": a.price,
            "product_b": b.price,
            "difference": price.difference,
            "percentage": price.percentage,
        }),
        json!({
            "metric": "benefits",
            "shared": blocks::common_items(&a.benefits, &b.benefits),
            "unique_to_a": blocks::unique_items(&a.benefits, &b.benefits),
            "unique_to_b": blocks::unique_items(&b.benefits, &a.benefits),
        }),
    ]
}

pub async fn run(completion: &dyn CompletionService, store: &SharedStore) -> Result<UnitOutput> {
    let product_a = store.product(UnitId::Comparison)?;
    let product_b = competitor();

    let mut metrics = deterministic_metrics(&product_a, &product_b);

    let analysis = completion
        .complete_json(
            prompts::COMPARISON_SYSTEM,
            &prompts::comparison_user(&product_a, &product_b),
            MAX_TOKENS,
        )
        .await?;
    metrics.push(analysis_metric(analysis)?);

    let document = build_comparison_page(
        &product_a.to_mapping()?,
        &product_b.to_mapping()?,
        &Value::Array(metrics),
    )?;
    Ok(UnitOutput::Document(document))
}

fn analysis_metric(analysis: Value) -> Result<Value> {
    let Value::Object(fields) = analysis else {
        return Err(ContentError::validation(
            "comparison analysis must be a mapping",
        ));
    };

    let mut metric = Map::new();
    metric.insert("metric".to_string(), Value::String("analysis".to_string()));
    for (key, value) in fields {
        metric.entry(key).or_insert(value);
    }
    Ok(Value::Object(metric))
}
