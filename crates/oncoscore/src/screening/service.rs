use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use super::domain::{ClassProbabilities, Diagnosis, Feature, FeatureVector};
use super::insights::{recommendations, risk_factors};
use super::patient::{validate_patient, PatientDetails};
use super::scoring::{
    max_risk_score, ScoreEvaluation, ScoringEngine, CONFIDENCE_CEILING, CONFIDENCE_FLOOR,
    MALIGNANCY_CUTOFF,
};
use super::validation::{validate_measurements, ValidationError};
use crate::config::PredictionConfig;

/// Time source for response timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub measurements: FeatureVector,
    pub patient: Option<PatientDetails>,
}

impl PredictionRequest {
    /// Parse a `{ "measurements": {...}, "patient"?: {...} }` body.
    ///
    /// Measurements are checked before patient details so a bad measurement is
    /// always the reported fault.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let measurements = body
            .as_object()
            .and_then(|record| record.get("measurements"))
            .ok_or(ValidationError::InvalidPayload)?;
        let measurements = validate_measurements(measurements)?;

        let patient = match body.get("patient") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(validate_patient(raw)?),
        };

        Ok(Self {
            measurements,
            patient,
        })
    }
}

/// Complete response body for a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub prediction: Diagnosis,
    pub confidence: u8,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub probabilities: ClassProbabilities,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Published description of the rule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_type: &'static str,
    pub version: &'static str,
    pub n_features: usize,
    pub feature_names: Vec<&'static str>,
    pub rules: Vec<RuleInfo>,
    pub malignancy_cutoff: f64,
    pub max_risk_score: f64,
    pub confidence_floor: u8,
    pub confidence_ceiling: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleInfo {
    pub feature: Feature,
    pub threshold: f64,
    pub weight: f64,
}

/// Service composing validation, scoring, and the text derivations.
pub struct PredictionService<C> {
    engine: ScoringEngine,
    clock: Arc<C>,
    config: PredictionConfig,
}

impl<C> PredictionService<C>
where
    C: Clock + 'static,
{
    pub fn new(clock: Arc<C>, config: PredictionConfig) -> Self {
        Self {
            engine: ScoringEngine::standard(),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Validate a raw request body and produce the full report.
    pub fn predict(&self, body: &Value) -> Result<PredictionReport, PredictionError> {
        let request = PredictionRequest::from_json(body).map_err(|err| {
            debug!(
                error = %err,
                field = err.feature().map(Feature::key),
                "rejected prediction request"
            );
            err
        })?;

        self.report(&request)
    }

    pub fn report(&self, request: &PredictionRequest) -> Result<PredictionReport, PredictionError> {
        let (report, _) = self.report_with_trail(request)?;
        Ok(report)
    }

    /// Produce the report together with the rule trail behind it.
    pub fn report_with_trail(
        &self,
        request: &PredictionRequest,
    ) -> Result<(PredictionReport, ScoreEvaluation), PredictionError> {
        let evaluation = self.engine.evaluate(&request.measurements);
        let result = evaluation.result;

        let report = PredictionReport {
            prediction: result.diagnosis,
            confidence: result.confidence,
            risk_score: result.risk_score,
            risk_factors: risk_factors(&request.measurements, result.diagnosis),
            recommendations: recommendations(result.diagnosis, result.confidence),
            probabilities: result.probabilities,
            timestamp: self.clock.now(),
        };

        ensure_complete(&report)?;

        debug!(
            prediction = result.diagnosis.code(),
            risk_score = result.risk_score,
            confidence = result.confidence,
            patient_supplied = request.patient.is_some(),
            "scored measurements"
        );

        Ok((report, evaluation))
    }

    pub fn model_info(&self) -> ModelInfo {
        let rules = self.engine.rules();

        ModelInfo {
            model_type: "weighted-threshold rules",
            version: crate::API_VERSION,
            n_features: rules.len(),
            feature_names: rules.iter().map(|rule| rule.feature.key()).collect(),
            rules: rules
                .iter()
                .map(|rule| RuleInfo {
                    feature: rule.feature,
                    threshold: rule.threshold,
                    weight: rule.weight,
                })
                .collect(),
            malignancy_cutoff: MALIGNANCY_CUTOFF,
            max_risk_score: max_risk_score(rules),
            confidence_floor: CONFIDENCE_FLOOR,
            confidence_ceiling: CONFIDENCE_CEILING,
        }
    }
}

/// Either the whole report is returned or none of it.
fn ensure_complete(report: &PredictionReport) -> Result<(), PredictionError> {
    if report.risk_factors.is_empty() || report.recommendations.is_empty() {
        warn!("derivation produced an empty list");
        return Err(PredictionError::Internal(
            "derived text lists must not be empty".to_string(),
        ));
    }

    let total = report.probabilities.malignant + report.probabilities.benign;
    if (total - 1.0).abs() > 1e-9 {
        return Err(PredictionError::Internal(format!(
            "class probabilities sum to {total}"
        )));
    }

    Ok(())
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("internal prediction failure: {0}")]
    Internal(String),
}
