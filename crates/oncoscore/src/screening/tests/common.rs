use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::config::PredictionConfig;
use crate::screening::domain::{Feature, FeatureVector};
use crate::screening::service::{Clock, PredictionService};

/// Typical benign sample; no rule triggers.
pub(super) fn benign_measurements() -> Value {
    json!({
        "radius_mean": 14.5,
        "texture_mean": 19.2,
        "perimeter_mean": 92.0,
        "area_mean": 655,
        "smoothness_mean": 0.096,
        "compactness_mean": 0.104,
        "concavity_mean": 0.089,
        "concave_points_mean": 0.048,
        "symmetry_mean": 0.181,
        "fractal_dimension_mean": 0.063
    })
}

/// Every rule triggers.
pub(super) fn malignant_measurements() -> Value {
    json!({
        "radius_mean": 20,
        "texture_mean": 25,
        "perimeter_mean": 120,
        "area_mean": 900,
        "smoothness_mean": 0.15,
        "compactness_mean": 0.2,
        "concavity_mean": 0.2,
        "concave_points_mean": 0.1,
        "symmetry_mean": 0.25,
        "fractal_dimension_mean": 0.08
    })
}

const BENIGN_VALUES: [f64; Feature::COUNT] = [
    14.5, 19.2, 92.0, 655.0, 0.096, 0.104, 0.089, 0.048, 0.181, 0.063,
];

pub(super) fn benign_vector() -> FeatureVector {
    FeatureVector::new(BENIGN_VALUES).expect("finite values")
}

/// Benign baseline with the listed features overridden.
pub(super) fn vector_with(overrides: &[(Feature, f64)]) -> FeatureVector {
    let mut values = BENIGN_VALUES;
    for (feature, value) in overrides {
        values[feature.index()] = *value;
    }
    FeatureVector::new(values).expect("finite values")
}

pub(super) fn request_body(measurements: Value) -> Value {
    json!({ "measurements": measurements })
}

pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid instant")
}

pub(super) fn build_service() -> PredictionService<FixedClock> {
    PredictionService::new(
        Arc::new(FixedClock(fixed_instant())),
        PredictionConfig::default(),
    )
}

pub(super) fn build_delayed_service(latency: Duration) -> PredictionService<FixedClock> {
    PredictionService::new(
        Arc::new(FixedClock(fixed_instant())),
        PredictionConfig {
            simulated_latency: latency,
        },
    )
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializable body")))
        .expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
