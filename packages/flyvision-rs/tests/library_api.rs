//! Integration tests for the flyvision-rs library API

use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn test_prelude_imports() {
    use flyvision_rs::prelude::*;

    let point = normalize_point(300.0, 300.0, 1000.0, 1000.0).unwrap();
    let labels = parse_detect_labels(
        r#"{"Labels": [{"Name": "Cup", "Confidence": 90, "Instances": [
            {"BoundingBox": {"Left": 0.25, "Top": 0.25, "Width": 0.1, "Height": 0.1}}
        ]}]}"#,
    )
    .unwrap();
    assert_eq!(resolve_label(&labels, point).as_deref(), Some("Cup"));

    assert_eq!(
        parse_s3_url("s3://bucket/key.webp"),
        Some(("bucket".to_string(), "key.webp".to_string()))
    );
    assert_eq!(content_type_for("s3://bucket/key.webp"), "image/webp");
}

#[test]
fn test_product_index_module() {
    use flyvision_rs::product_index::{candidate_keys, slugify};

    assert_eq!(slugify("Dining Table"), "dining-table");
    let keys = candidate_keys("product-index", "Dining Table");
    assert_eq!(keys.len(), 6);
    assert_eq!(keys.last().map(String::as_str), Some("product-index/dining-table.txt"));
}

#[tokio::test]
async fn test_directory_index_lookup() {
    use flyvision_rs::{lookup_product_url, DirectoryIndex};

    let index = DirectoryIndex::new(fixtures_dir());
    let url = lookup_product_url(&index, "product-index", "Dining Table").await.unwrap();
    assert_eq!(url.as_deref(), Some("https://shop.example.com/products/dining-table"));

    let missing = lookup_product_url(&index, "product-index", "Lamp").await.unwrap();
    assert_eq!(missing, None);
}

#[tokio::test]
async fn test_response_file_detector_filters_labels() {
    use flyvision_rs::{DetectOptions, ImageSource, LabelDetector, ResponseFileDetector};

    let detector = ResponseFileDetector::new(fixtures_dir().join("kitchen_labels.json"));
    let source = ImageSource::Http("https://cdn.example.com/frame.jpg".to_string());

    let labels = detector.detect(&source, &DetectOptions::default()).await.unwrap();
    let names: Vec<_> = labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Table", "Cup", "Indoors"]);

    let options = DetectOptions {
        max_labels: 1,
        min_confidence: 0.0,
    };
    let labels = detector.detect(&source, &options).await.unwrap();
    assert_eq!(labels.len(), 1);
}

#[tokio::test]
async fn test_recommender_end_to_end() {
    use flyvision_rs::{DirectoryIndex, RecommendOptions, RecommendRequest, Recommender, ResponseFileDetector};

    let recommender = Recommender::new(
        Box::new(ResponseFileDetector::new(fixtures_dir().join("kitchen_labels.json"))),
        Some(Box::new(DirectoryIndex::new(fixtures_dir()))),
        RecommendOptions::default(),
    );
    let body = std::fs::read_to_string(fixtures_dir().join("request_cup.json")).unwrap();
    let request = RecommendRequest::from_json(&body).unwrap();

    let rec = recommender.recommend(&request).await.unwrap();
    assert_eq!(rec.label, "Cup");
    assert_eq!(rec.product_url, "https://shop.example.com/products/cup");
}
