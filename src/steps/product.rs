// src/steps/product.rs

use serde_json::{Value, json};

use crate::dag::{SharedStore, UnitOutput};
use crate::errors::{ContentError, Result};
use crate::llm::CompletionService;
use crate::steps::prompts;
use crate::templates::build_product_page;
use crate::types::UnitId;

const MAX_TOKENS: u32 = 1500;

/// One completion for the prose sections, merged over the product's own
/// data and passed through the product page template.
pub async fn run(completion: &dyn CompletionService, store: &SharedStore) -> Result<UnitOutput> {
    let product = store.product(UnitId::Product)?;

    let content = completion
        .complete_json(
            prompts::PRODUCT_SYSTEM,
            &prompts::product_page_user(&product),
            MAX_TOKENS,
        )
        .await?;
    let content = content
        .as_object()
        .ok_or_else(|| ContentError::validation("product page content must be a mapping"))?;

    let description = content
        .get("description")
        .cloned()
        .unwrap_or_else(|| Value::String(format!("{} is a premium skincare product.", product.name)));

    // Only a list replaces the product's own benefits.
    let benefits = match content.get("benefits_section") {
        Some(list @ Value::Array(_)) => list.clone(),
        _ => json!(product.benefits),
    };

    let usage = content
        .get("usage_section")
        .cloned()
        .unwrap_or_else(|| json!(product.how_to_use));
    let warnings = content
        .get("safety_section")
        .cloned()
        .unwrap_or_else(|| json!(product.side_effects));

    let page_data = json!({
        "name": product.name,
        "description": description,
        "concentration": product.concentration,
        "benefits": benefits,
        "how_to_use": usage,
        "key_ingredients": product.key_ingredients,
        "price": product.price,
        "side_effects": warnings,
    });

    Ok(UnitOutput::Document(build_product_page(&page_data)?))
}
