use metrics_exporter_prometheus::PrometheusHandle;
use oncoscore::config::PredictionConfig;
use oncoscore::screening::{PredictionService, SystemClock};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn prediction_service(config: PredictionConfig) -> Arc<PredictionService<SystemClock>> {
    Arc::new(PredictionService::new(Arc::new(SystemClock), config))
}
