// tests/templates.rs

use contentdag::content::{Document, FaqItem};
use contentdag::errors::ContentError;
use contentdag::templates::{build_comparison_page, build_faq_page, build_product_page};
use serde_json::json;

#[test]
fn faq_page_keeps_order_and_coerces_values() {
    let doc = build_faq_page(&json!([
        { "question": "Q1?", "answer": "A1" },
        { "question": "Q2?", "answer": 42 },
    ]))
    .unwrap();

    assert_eq!(
        doc,
        Document::Faq {
            faqs: vec![
                FaqItem { question: "Q1?".into(), answer: "A1".into() },
                FaqItem { question: "Q2?".into(), answer: "42".into() },
            ]
        }
    );
}

#[test]
fn faq_page_serialises_with_page_type() {
    let doc = build_faq_page(&json!([{ "question": "Q?", "answer": "A" }])).unwrap();
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        value,
        json!({ "page_type": "faq", "faqs": [{ "question": "Q?", "answer": "A" }] })
    );
}

#[test]
fn faq_page_missing_answer_names_field_and_index() {
    let err = build_faq_page(&json!([
        { "question": "Q1?", "answer": "A1" },
        { "question": "Q2?" },
    ]))
    .unwrap_err();

    match err {
        ContentError::Validation(msg) => assert_eq!(msg, "missing field answer at index 1"),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn faq_page_rejects_non_sequence_input() {
    assert!(matches!(
        build_faq_page(&json!({ "question": "Q?" })),
        Err(ContentError::Validation(_))
    ));
}

#[test]
fn product_page_maps_fields_to_sections() {
    let doc = build_product_page(&json!({
        "name": "GlowBoost",
        "benefits": ["Brightening"],
        "how_to_use": "Apply daily",
        "key_ingredients": ["Vitamin C"],
        "price": "₹699",
        "side_effects": "Tingling",
    }))
    .unwrap();

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        value,
        json!({
            "page_type": "product",
            "sections": {
                "name": "GlowBoost",
                "description": "",
                "concentration": "",
                "benefits": ["Brightening"],
                "usage": "Apply daily",
                "ingredients": ["Vitamin C"],
                "price": "₹699",
                "warnings": "Tingling",
            }
        })
    );
}

#[test]
fn product_page_requires_price() {
    let err = build_product_page(&json!({
        "name": "GlowBoost",
        "benefits": [],
        "how_to_use": "",
        "key_ingredients": [],
    }))
    .unwrap_err();

    match err {
        ContentError::Validation(msg) => assert_eq!(msg, "missing required field price"),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn comparison_page_wraps_products_and_metrics() {
    let doc = build_comparison_page(
        &json!({ "name": "A" }),
        &json!({ "name": "B" }),
        &json!([{ "metric": "price" }]),
    )
    .unwrap();

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        value,
        json!({
            "page_type": "comparison",
            "products": [{ "name": "A" }, { "name": "B" }],
            "comparison_metrics": [{ "metric": "price" }],
        })
    );
}

#[test]
fn comparison_page_rejects_empty_product() {
    let result = build_comparison_page(&json!({}), &json!({ "name": "B" }), &json!([]));
    match result {
        Err(ContentError::Validation(msg)) => assert!(msg.contains("product_a")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn comparison_page_rejects_non_mapping_metric() {
    let result = build_comparison_page(
        &json!({ "name": "A" }),
        &json!({ "name": "B" }),
        &json!([{ "metric": "ok" }, "not a metric"]),
    );
    match result {
        Err(ContentError::Validation(msg)) => assert!(msg.contains("index 1")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn comparison_page_rejects_non_sequence_metrics() {
    let result = build_comparison_page(&json!({ "name": "A" }), &json!({ "name": "B" }), &json!({}));
    assert!(matches!(result, Err(ContentError::Validation(_))));
}

#[test]
fn null_values_render_as_empty_text_on_every_page() {
    let faq = build_faq_page(&json!([{ "question": "Q?", "answer": null }])).unwrap();
    let Document::Faq { faqs } = faq else {
        panic!("expected faq document");
    };
    assert_eq!(faqs[0].answer, "");

    let product = build_product_page(&json!({
        "name": null,
        "benefits": ["Brightening", null],
        "how_to_use": "Apply daily",
        "key_ingredients": [],
        "price": "₹699",
    }))
    .unwrap();
    let Document::Product { sections } = product else {
        panic!("expected product document");
    };
    assert_eq!(sections.name, "");
    assert_eq!(sections.benefits, vec!["Brightening".to_string(), String::new()]);
}
