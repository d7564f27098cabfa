use std::sync::Arc;

use oncoscore::config::PredictionConfig;
use oncoscore::screening::{
    prediction_router, recommendations, risk_factors, validate_measurements, Diagnosis, Feature,
    PredictionService, ScoringEngine, SystemClock, ValidationError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn measurements(values: [f64; 10]) -> Value {
    let record: serde_json::Map<String, Value> = Feature::ALL
        .iter()
        .zip(values)
        .map(|(feature, value)| (feature.key().to_string(), json!(value)))
        .collect();
    Value::Object(record)
}

#[test]
fn borderline_sample_flows_through_every_stage() {
    // radius, perimeter and concavity trigger: 2 + 2 + 2 = 6, which stays benign.
    let raw = measurements([
        17.9, 18.0, 117.0, 760.0, 0.09, 0.11, 0.21, 0.05, 0.17, 0.06,
    ]);

    let vector = validate_measurements(&raw).expect("valid measurements");
    let result = ScoringEngine::standard().score(&vector);

    assert_eq!(result.risk_score, 6.0);
    assert_eq!(result.diagnosis, Diagnosis::Benign);
    assert_eq!(result.confidence, 87);

    let factors = risk_factors(&vector, result.diagnosis);
    assert_eq!(
        factors,
        vec![
            "Large tumor radius detected",
            "Irregular tumor perimeter",
            "High concavity values",
        ]
    );

    let guidance = recommendations(result.diagnosis, result.confidence);
    assert_eq!(guidance[0], "Continue routine screening schedule");
}

#[test]
fn validation_errors_name_the_offending_key() {
    let mut raw = measurements([14.0; 10]);
    raw["fractal_dimension_mean"] = json!({ "value": 0.06 });

    let error = validate_measurements(&raw).expect_err("object value rejected");

    assert_eq!(error, ValidationError::InvalidNumber(Feature::FractalDimension));
    assert_eq!(
        error.to_string(),
        "Invalid or missing field: fractal_dimension_mean"
    );
}

#[tokio::test]
async fn router_serves_predictions_with_system_clock() {
    let service = PredictionService::new(Arc::new(SystemClock), PredictionConfig::default());
    let router = prediction_router(Arc::new(service));

    let body = json!({
        "measurements": {
            "radius_mean": "20",
            "texture_mean": "25",
            "perimeter_mean": "120",
            "area_mean": "900",
            "smoothness_mean": "0.15",
            "compactness_mean": "0.2",
            "concavity_mean": "0.2",
            "concave_points_mean": "0.1",
            "symmetry_mean": "0.25",
            "fractal_dimension_mean": "0.08"
        }
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/predict")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("serializable"),
                ))
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json payload");

    assert_eq!(payload["prediction"], json!("M"));
    assert_eq!(payload["confidence"], json!(95));
    assert_eq!(payload["recommendations"].as_array().map(Vec::len), Some(4));
    let timestamp = payload["timestamp"].as_str().expect("timestamp string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}
