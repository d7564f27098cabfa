use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use chrono::{SecondsFormat, Utc};
use oncoscore::screening::{prediction_router, Clock, PredictionService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_prediction_routes<C>(service: Arc<PredictionService<C>>) -> axum::Router
where
    C: Clock + 'static,
{
    prediction_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "service": oncoscore::SERVICE_NAME,
        "version": oncoscore::API_VERSION,
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::prediction_service;
    use axum::body::Body;
    use axum::http::Request;
    use oncoscore::config::PredictionConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthcheck_reports_service_identity() {
        let Json(body) = healthcheck().await;

        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["service"], json!("Breast Cancer Prediction API"));
        assert_eq!(body["version"], json!(oncoscore::API_VERSION));
        let timestamp = body["timestamp"].as_str().expect("timestamp string");
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn health_route_is_mounted_next_to_prediction_routes() {
        let router = with_prediction_routes(prediction_service(PredictionConfig::default()));

        let response = router
            .clone()
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get("/predict")
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
