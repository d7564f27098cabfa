mod policy;
mod rules;

pub use policy::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR, CONFIDENCE_SLOPE, MALIGNANCY_CUTOFF};
pub use rules::{max_risk_score, rule_for, ThresholdRule, STANDARD_RULES};

use super::domain::{Feature, FeatureVector, ScoreResult};
use policy::{classify, confidence_for, probabilities_for};
use serde::Serialize;

/// Stateless weighted-threshold scorer.
///
/// Every call is independent; the engine can be shared across threads
/// without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    rules: &'static [ThresholdRule],
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringEngine {
    pub fn standard() -> Self {
        Self {
            rules: &STANDARD_RULES,
        }
    }

    pub fn rules(&self) -> &'static [ThresholdRule] {
        self.rules
    }

    pub fn score(&self, vector: &FeatureVector) -> ScoreResult {
        self.evaluate(vector).result
    }

    /// Score a vector and keep the per-rule trail for audits.
    pub fn evaluate(&self, vector: &FeatureVector) -> ScoreEvaluation {
        let (components, risk_score) = rules::score_vector(vector, self.rules);

        let diagnosis = classify(risk_score);
        let confidence = confidence_for(risk_score);

        ScoreEvaluation {
            result: ScoreResult {
                diagnosis,
                risk_score,
                confidence,
                probabilities: probabilities_for(diagnosis, confidence),
            },
            components,
        }
    }
}

/// Discrete contribution of one rule, allowing transparent audits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub feature: Feature,
    pub value: f64,
    pub threshold: f64,
    pub weight: f64,
    pub triggered: bool,
}

impl ScoreComponent {
    pub fn contribution(&self) -> f64 {
        if self.triggered {
            self.weight
        } else {
            0.0
        }
    }
}

/// Score result plus the rule trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEvaluation {
    pub result: ScoreResult,
    pub components: Vec<ScoreComponent>,
}

impl ScoreEvaluation {
    pub fn triggered(&self) -> impl Iterator<Item = &ScoreComponent> {
        self.components.iter().filter(|component| component.triggered)
    }
}
