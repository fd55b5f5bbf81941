// tests/end_to_end.rs

use contentdag::content::sample_input;
use contentdag::dag::CancelToken;
use contentdag::engine::OutputSlot;
use contentdag::sink::{FileSink, MemorySink};
use contentdag::types::{ExecutionMode, UnitId, UnitStatus};
use contentdag_test_utils::builders::pipeline;
use contentdag_test_utils::canned_completion::{
    CannedCompletion, CannedReply, COMPARISON_MARKER, FAQ_MARKER, PRODUCT_MARKER,
    QUESTIONS_MARKER,
};
use contentdag_test_utils::{init_tracing, with_timeout};
use serde_json::Value;
use tempfile::tempdir;

#[tokio::test]
async fn full_run_writes_three_documents() {
    init_tracing();
    with_timeout(async {
        let canned = CannedCompletion::standard();
        let mut pipeline = pipeline(canned.clone().into_service(3), ExecutionMode::Sequential);
        let sink = MemorySink::new();

        let report = pipeline
            .run_to_sink(sample_input(), &sink, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(sink.names(), vec!["faq", "product_page", "comparison_page"]);
        assert!(report.outputs.is_complete());
        assert!(report.statuses.iter().all(|(_, s)| *s == UnitStatus::Completed));

        let order = &report.completion_order;
        assert_eq!(order[0], UnitId::Parser);
        let pos = |id| order.iter().position(|u| *u == id).unwrap();
        assert!(pos(UnitId::Questions) < pos(UnitId::Faq));

        for marker in [QUESTIONS_MARKER, PRODUCT_MARKER, COMPARISON_MARKER, FAQ_MARKER] {
            assert_eq!(canned.calls_matching(marker), 1, "calls for {marker}");
        }
    })
    .await;
}

#[tokio::test]
async fn faq_pairs_stored_questions_with_answers() {
    with_timeout(async {
        let mut pipeline = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Sequential,
        );
        let sink = MemorySink::new();
        pipeline
            .run_to_sink(sample_input(), &sink, &CancelToken::new())
            .await
            .unwrap();

        let faq = sink.get("faq").unwrap();
        assert_eq!(faq["page_type"], "faq");
        let faqs = faq["faqs"].as_array().unwrap();
        assert_eq!(faqs.len(), 5);
        assert_eq!(
            faqs[0]["question"],
            "What are the key benefits of GlowBoost Vitamin C Serum?"
        );
        assert_eq!(faqs[4]["answer"], "Answer number 5.");
    })
    .await;
}

#[tokio::test]
async fn product_page_merges_model_content_with_product_data() {
    with_timeout(async {
        let mut pipeline = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Sequential,
        );
        let sink = MemorySink::new();
        pipeline
            .run_to_sink(sample_input(), &sink, &CancelToken::new())
            .await
            .unwrap();

        let page = sink.get("product_page").unwrap();
        let sections = &page["sections"];
        assert_eq!(page["page_type"], "product");
        assert_eq!(sections["name"], "GlowBoost Vitamin C Serum");
        assert_eq!(sections["concentration"], "10% Vitamin C");
        assert_eq!(sections["price"], "₹699");
        assert_eq!(
            sections["benefits"],
            serde_json::json!(["Brightening", "Fades dark spots", "Evens tone"])
        );
        assert_eq!(sections["warnings"], "Patch test first; mild tingling is normal.");
    })
    .await;
}

#[tokio::test]
async fn product_page_falls_back_when_model_omits_fields() {
    with_timeout(async {
        let canned = CannedCompletion::standard_with_override(
            PRODUCT_MARKER,
            vec![CannedReply::text(r#"{"benefits_section": "prose only"}"#)],
        );

        let mut pipeline = pipeline(canned.into_service(3), ExecutionMode::Sequential);
        let report = pipeline.run(sample_input(), &CancelToken::new()).await.unwrap();

        let doc = &report.outputs.get(OutputSlot::ProductPage).unwrap().document;
        let value = serde_json::to_value(doc).unwrap();
        assert_eq!(
            value["sections"]["description"],
            "GlowBoost Vitamin C Serum is a premium skincare product."
        );
        assert_eq!(
            value["sections"]["benefits"],
            serde_json::json!(["Brightening", "Fades dark spots"])
        );
        assert_eq!(
            value["sections"]["usage"],
            "Apply 2-3 drops in the morning before sunscreen"
        );
        assert_eq!(
            value["sections"]["warnings"],
            "Mild tingling for sensitive skin"
        );
    })
    .await;
}

#[tokio::test]
async fn comparison_page_has_competitor_and_analysis() {
    with_timeout(async {
        let mut pipeline = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Sequential,
        );
        let sink = MemorySink::new();
        pipeline
            .run_to_sink(sample_input(), &sink, &CancelToken::new())
            .await
            .unwrap();

        let page = sink.get("comparison_page").unwrap();
        assert_eq!(page["page_type"], "comparison");
        assert_eq!(page["products"][0]["name"], "GlowBoost Vitamin C Serum");
        assert_eq!(page["products"][1]["name"], "RadiantGlow Vitamin C Serum");

        let metrics = page["comparison_metrics"].as_array().unwrap();
        let last = metrics.last().unwrap();
        assert_eq!(last["metric"], "analysis");
        assert!(last["recommendation"].as_str().unwrap().contains("Oily"));
    })
    .await;
}

#[tokio::test]
async fn two_fresh_runs_are_byte_identical() {
    with_timeout(async {
        let mut rendered: Vec<Vec<(String, Value)>> = Vec::new();
        let mut fingerprints: Vec<Vec<String>> = Vec::new();

        for _ in 0..2 {
            let mut pipeline = pipeline(
                CannedCompletion::standard().into_service(3),
                ExecutionMode::Sequential,
            );
            let sink = MemorySink::new();
            let report = pipeline
                .run_to_sink(sample_input(), &sink, &CancelToken::new())
                .await
                .unwrap();
            rendered.push(sink.writes());
            fingerprints.push(report.outputs.iter().map(|d| d.fingerprint.clone()).collect());
        }

        let bytes = |writes: &Vec<(String, Value)>| -> Vec<String> {
            writes
                .iter()
                .map(|(_, v)| serde_json::to_string_pretty(v).unwrap())
                .collect()
        };
        assert_eq!(bytes(&rendered[0]), bytes(&rendered[1]));
        assert_eq!(fingerprints[0], fingerprints[1]);
    })
    .await;
}

#[tokio::test]
async fn concurrent_mode_produces_same_documents() {
    with_timeout(async {
        let mut sequential = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Sequential,
        );
        let mut concurrent = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Concurrent,
        );

        let a = sequential.run(sample_input(), &CancelToken::new()).await.unwrap();
        let b = concurrent.run(sample_input(), &CancelToken::new()).await.unwrap();

        assert_eq!(a.outputs, b.outputs);
        assert_eq!(b.completion_order[0], UnitId::Parser);
        assert_eq!(*b.completion_order.last().unwrap(), UnitId::Faq);
    })
    .await;
}

#[tokio::test]
async fn file_sink_writes_pretty_json_files() {
    with_timeout(async {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        let sink = FileSink::new(&out);

        let mut pipeline = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Sequential,
        );
        pipeline
            .run_to_sink(sample_input(), &sink, &CancelToken::new())
            .await
            .unwrap();

        for name in ["faq", "product_page", "comparison_page"] {
            let path = out.join(format!("{name}.json"));
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.contains('\n'), "{name} should be pretty-printed");
            let value: Value = serde_json::from_str(&text).unwrap();
            assert!(value.get("page_type").is_some());
        }

        let product = std::fs::read_to_string(out.join("product_page.json")).unwrap();
        assert!(product.contains("₹699"), "UTF-8 is written unescaped");
    })
    .await;
}

#[tokio::test]
async fn minimal_seed_produces_all_three_page_types() {
    with_timeout(async {
        let seed = serde_json::json!({
            "name": "P",
            "concentration": "10%",
            "skin_type": ["Oily"],
            "key_ingredients": ["Vitamin C"],
            "benefits": ["Brightening"],
            "how_to_use": "Apply daily",
            "side_effects": "None",
            "price": "₹699"
        });
        let mut pipeline = pipeline(
            CannedCompletion::standard().into_service(3),
            ExecutionMode::Sequential,
        );
        let sink = MemorySink::new();

        let report = pipeline
            .run_to_sink(seed, &sink, &CancelToken::new())
            .await
            .unwrap();

        let page_types: Vec<Value> = sink
            .writes()
            .into_iter()
            .map(|(_, doc)| doc["page_type"].clone())
            .collect();
        assert_eq!(page_types, vec!["faq", "product", "comparison"]);

        assert_eq!(
            report.completion_order,
            vec![
                UnitId::Parser,
                UnitId::Questions,
                UnitId::Product,
                UnitId::Comparison,
                UnitId::Faq
            ]
        );
        assert_eq!(sink.get("product_page").unwrap()["sections"]["name"], "P");
        assert_eq!(sink.get("comparison_page").unwrap()["products"][0]["price"], "₹699");
    })
    .await;
}
