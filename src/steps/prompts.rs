// src/steps/prompts.rs

//! Prompt text for the completion-backed steps.

use crate::content::{Product, Question};

pub const QUESTIONS_SYSTEM: &str = "You are a product content specialist. Generate diverse, natural user questions about skincare products.
Questions should cover multiple categories: Informational, Safety, Usage, Purchase, and Comparison.";

pub const PRODUCT_SYSTEM: &str = "You are a professional product copywriter for skincare e-commerce.
Generate compelling, accurate product page content based on provided data.
Write in a clear, engaging style that informs and persuades customers.";

pub const COMPARISON_SYSTEM: &str =
    "You are a product comparison expert. Analyze and compare skincare products objectively.";

pub const FAQ_SYSTEM: &str = "You are a skincare product expert and customer service specialist.
Generate helpful, accurate, and engaging FAQ answers based on product data.
Answers should be informative yet concise (2-4 sentences each).";

/// The product's facts, one `Label: value` line each.
pub fn product_facts(product: &Product) -> String {
    format!(
        "Name: {}
Concentration: {}
Skin Type: {}
Ingredients: {}
Benefits: {}
Usage: {}
Side Effects: {}
Price: {}",
        product.name,
        product.concentration,
        product.skin_type.join(", "),
        product.key_ingredients.join(", "),
        product.benefits.join(", "),
        product.how_to_use,
        product.side_effects,
        product.price,
    )
}

pub fn questions_user(product: &Product) -> String {
    format!(
        r#"Given this product data:
{facts}

Generate EXACTLY 15 user questions across these categories:
- 4 INFORMATIONAL questions (about benefits, ingredients, what it does, concentration)
- 3 SAFETY questions (side effects, who should avoid, warnings, allergies)
- 3 USAGE questions (how to apply, when to use, frequency, routine placement)
- 3 PURCHASE questions (price, value, where to buy, alternatives)
- 2 COMPARISON questions (vs other products, how it differs)

Return ONLY a JSON array with this structure:
[
  {{"id": "q1", "text": "question text here", "category": "INFORMATIONAL"}},
  {{"id": "q2", "text": "question text here", "category": "SAFETY"}}
]

Use natural language. Make questions realistic and varied."#,
        facts = product_facts(product)
    )
}

pub fn product_page_user(product: &Product) -> String {
    format!(
        r#"Create product page content for:

Product Data:
{facts}

Generate a JSON object with these fields:
{{
  "description": "2-3 sentence compelling product description",
  "benefits_section": "Formatted benefits text highlighting what it does",
  "usage_section": "Clear usage instructions with tips",
  "ingredients_section": "Explanation of key ingredients and their roles",
  "safety_section": "Safety information and precautions"
}}

Write naturally, professionally. Base everything on the data provided."#,
        facts = product_facts(product)
    )
}

pub fn comparison_user(a: &Product, b: &Product) -> String {
    format!(
        r#"Compare these two products:

Product A:
{facts_a}

Product B:
{facts_b}

Generate a JSON object with:
{{
  "ingredient_analysis": "2 sentence comparison of ingredient profiles",
  "value_assessment": "which offers better value and why (2 sentences)",
  "concentration_analysis": "comparison of active ingredient concentrations",
  "recommendation": "1-2 sentences on which product suits which skin type or concern better"
}}"#,
        facts_a = product_facts(a),
        facts_b = product_facts(b),
    )
}

pub fn faq_user(product: &Product, questions: &[Question]) -> String {
    let listed = questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. [{}] {}", i + 1, q.category, q.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Generate FAQ answers for this product:

Product Data:
{facts}

Questions to answer:
{listed}

Return a JSON array with one entry per question, in the same order:
[
  {{"question": "exact question text", "answer": "helpful answer based on product data"}}
]

Base all answers on the product data provided. Be helpful and accurate."#,
        facts = product_facts(product)
    )
}
