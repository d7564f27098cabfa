//! Tumor screening pipeline: validation, rule scoring, and derived guidance.
//!
//! Every stage is a pure function of its inputs. Nothing is cached or stored
//! between requests.

pub mod domain;
pub mod insights;
pub mod patient;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ClassProbabilities, Diagnosis, Feature, FeatureVector, ScoreResult};
pub use insights::{recommendations, risk_factors};
pub use patient::{validate_patient, ClinicalExam, PatientDetails};
pub use router::prediction_router;
pub use scoring::{ScoreComponent, ScoreEvaluation, ScoringEngine, ThresholdRule};
pub use service::{
    Clock, ModelInfo, PredictionError, PredictionReport, PredictionRequest, PredictionService,
    SystemClock,
};
pub use validation::{validate_measurements, ValidationError};
