use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::service::{Clock, PredictionError, PredictionReport, PredictionService};
use super::validation::ValidationError;
use crate::error::AppError;

/// Router builder exposing the prediction endpoints.
pub fn prediction_router<C>(service: Arc<PredictionService<C>>) -> Router
where
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/predict",
            get(describe_handler).post(predict_handler::<C>),
        )
        .route("/model-info", get(model_info_handler::<C>))
        .with_state(service)
}

/// Bodies are parsed as JSON whatever the `Content-Type` header says, so
/// form clients that omit it are still served.
pub(crate) async fn predict_handler<C>(
    State(service): State<Arc<PredictionService<C>>>,
    body: Bytes,
) -> Result<(StatusCode, Json<PredictionReport>), AppError>
where
    C: Clock + 'static,
{
    let body: Value = serde_json::from_slice(&body).map_err(|err| {
        warn!(reason = %err, "unreadable prediction body");
        PredictionError::from(ValidationError::InvalidPayload)
    })?;

    let report = service.predict(&body)?;

    let latency = service.config().simulated_latency;
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    info!(
        prediction = report.prediction.code(),
        confidence = report.confidence,
        "prediction served"
    );
    Ok((StatusCode::OK, Json(report)))
}

pub(crate) async fn describe_handler() -> Json<Value> {
    Json(json!({
        "message": crate::SERVICE_NAME,
        "version": crate::API_VERSION,
        "endpoints": {
            "predict": "POST /predict",
            "model_info": "GET /model-info",
            "health": "GET /health",
        },
    }))
}

pub(crate) async fn model_info_handler<C>(
    State(service): State<Arc<PredictionService<C>>>,
) -> Response
where
    C: Clock + 'static,
{
    (StatusCode::OK, Json(service.model_info())).into_response()
}
