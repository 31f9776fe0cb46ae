// Common test utilities and helpers

pub mod client;

use cropwise_api::crops::CropRecommendation;
use serde_json::{Value, json};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (logging, etc.)
pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// The form's initial measurements as a request body.
pub fn sample_body() -> Value {
    json!({
        "nitrogen": 90,
        "phosphorus": 42,
        "potassium": 43,
        "temperature": 20.87,
        "humidity": 82
    })
}

/// Asserts the shape every local fallback batch has.
pub fn assert_fallback_batch(batch: &[CropRecommendation]) {
    assert_eq!(batch.len(), 3, "Expected 3 recommendations: {batch:?}");
    for pair in batch.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
    for rec in batch {
        assert!((0.4..=0.95).contains(&rec.confidence), "{rec:?}");
        assert!(!rec.image_url.is_empty());
        assert!(!rec.description.is_empty());
    }
    let mut names: Vec<&str> = batch.iter().map(|r| r.crop_name.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 3, "Crop names must be unique");
}
