// tests/content_model.rs

use contentdag::content::{Product, Question, QuestionCategory, sample_input};
use contentdag::errors::ContentError;
use serde_json::json;

#[test]
fn sample_input_parses_into_full_product() {
    let product = Product::from_raw(&sample_input()).unwrap();

    assert_eq!(product.name, "GlowBoost Vitamin C Serum");
    assert_eq!(product.skin_type, vec!["Oily", "Combination"]);
    assert_eq!(product.key_ingredients, vec!["Vitamin C", "Hyaluronic Acid"]);
    assert_eq!(product.price, "₹699");
}

#[test]
fn missing_fields_become_empty_values() {
    let product = Product::from_raw(&json!({ "name": "Bare" })).unwrap();

    assert_eq!(product.name, "Bare");
    assert_eq!(product.concentration, "");
    assert!(product.skin_type.is_empty());
    assert!(product.key_ingredients.is_empty());
    assert!(product.benefits.is_empty());
    assert_eq!(product.side_effects, "");
}

#[test]
fn single_string_becomes_one_element_list() {
    let product = Product::from_raw(&json!({ "skin_type": "Oily", "benefits": null })).unwrap();

    assert_eq!(product.skin_type, vec!["Oily"]);
    assert!(product.benefits.is_empty());
}

#[test]
fn numeric_price_is_stringified() {
    let product = Product::from_raw(&json!({ "price": 699 })).unwrap();
    assert_eq!(product.price, "699");
}

#[test]
fn non_mapping_input_is_rejected() {
    match Product::from_raw(&json!(["not", "a", "product"])) {
        Err(ContentError::Validation(msg)) => assert!(msg.contains("mapping")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn nested_object_in_text_field_is_rejected() {
    match Product::from_raw(&json!({ "name": { "first": "Glow" } })) {
        Err(ContentError::Validation(msg)) => assert!(msg.contains("name")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn object_inside_list_field_names_the_index() {
    match Product::from_raw(&json!({ "key_ingredients": ["Vitamin C", {}] })) {
        Err(ContentError::Validation(msg)) => {
            assert!(msg.contains("key_ingredients"));
            assert!(msg.contains("index 1"));
        }
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn question_batch_parses_categories_case_insensitively() {
    let batch = Question::batch_from_value(&json!([
        { "id": "a", "text": "What is it?", "category": "informational" },
        { "id": "b", "text": "Is it safe?", "category": "Safety" },
    ]))
    .unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].category, QuestionCategory::Informational);
    assert_eq!(batch[1].category, QuestionCategory::Safety);
    assert!(batch.iter().all(|q| q.answer.is_none()));
}

#[test]
fn question_ids_are_filled_in_and_made_unique() {
    let batch = Question::batch_from_value(&json!([
        { "text": "First?", "category": "USAGE" },
        { "id": "dup", "text": "Second?", "category": "USAGE" },
        { "id": "dup", "text": "Third?", "category": "USAGE" },
    ]))
    .unwrap();

    let ids: Vec<&str> = batch.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q1", "dup", "dup-3"]);
}

#[test]
fn question_with_unknown_category_is_rejected() {
    let result = Question::batch_from_value(&json!([
        { "id": "q1", "text": "Why?", "category": "GOSSIP" }
    ]));
    assert!(matches!(result, Err(ContentError::Validation(_))));
}

#[test]
fn question_with_empty_text_is_rejected() {
    match Question::batch_from_value(&json!([{ "id": "q1", "text": "  ", "category": "USAGE" }])) {
        Err(ContentError::Validation(msg)) => assert!(msg.contains("text")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn question_serialises_category_in_upper_case_without_answer() {
    let q = Question::new("q1", "How?", QuestionCategory::Usage);
    let value = serde_json::to_value(&q).unwrap();

    assert_eq!(value, json!({ "id": "q1", "text": "How?", "category": "USAGE" }));
}
