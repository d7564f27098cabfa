//! Human-readable observations and guidance derived from a scored vector.

use super::domain::{Diagnosis, Feature, FeatureVector};
use super::scoring::rule_for;

/// Features that produce an observation when their scoring rule triggers,
/// in the order observations are listed.
const RISK_OBSERVATIONS: [(Feature, &str); 6] = [
    (Feature::Radius, "Large tumor radius detected"),
    (Feature::Texture, "High texture variation"),
    (Feature::Perimeter, "Irregular tumor perimeter"),
    (Feature::Area, "Large tumor area"),
    (Feature::Concavity, "High concavity values"),
    (Feature::Compactness, "High compactness"),
];

const BENIGN_BASELINE: [&str; 3] = [
    "Normal cell structure patterns",
    "Regular tumor boundaries",
    "Low asymmetry values",
];

const MALIGNANT_BASELINE: &str = "Multiple risk indicators present";

/// Below this confidence a benign result still calls for closer monitoring.
pub const ROUTINE_SCREENING_CONFIDENCE: u8 = 85;

const MALIGNANT_GUIDANCE: [&str; 4] = [
    "Immediate consultation with oncologist required",
    "Additional imaging studies recommended",
    "Tissue biopsy confirmation needed",
    "Discuss treatment options with medical team",
];

const MONITORING_GUIDANCE: [&str; 4] = [
    "Regular monitoring recommended",
    "Follow-up imaging in 6 months",
    "Consider additional diagnostic tests",
    "Maintain healthy lifestyle",
];

const ROUTINE_GUIDANCE: [&str; 4] = [
    "Continue routine screening schedule",
    "Annual mammography recommended",
    "Maintain healthy lifestyle",
    "Report any changes to physician",
];

/// List notable measurements; never returns an empty list.
pub fn risk_factors(vector: &FeatureVector, diagnosis: Diagnosis) -> Vec<String> {
    let mut factors: Vec<String> = RISK_OBSERVATIONS
        .iter()
        .filter(|(feature, _)| rule_for(*feature).triggers(vector.get(*feature)))
        .map(|(_, observation)| observation.to_string())
        .collect();

    if factors.is_empty() {
        match diagnosis {
            Diagnosis::Benign => {
                factors.extend(BENIGN_BASELINE.iter().map(|line| line.to_string()))
            }
            Diagnosis::Malignant => factors.push(MALIGNANT_BASELINE.to_string()),
        }
    }

    factors
}

pub fn recommendations(diagnosis: Diagnosis, confidence: u8) -> Vec<String> {
    let guidance = match diagnosis {
        Diagnosis::Malignant => &MALIGNANT_GUIDANCE,
        Diagnosis::Benign if confidence < ROUTINE_SCREENING_CONFIDENCE => &MONITORING_GUIDANCE,
        Diagnosis::Benign => &ROUTINE_GUIDANCE,
    };

    guidance.iter().map(|line| line.to_string()).collect()
}
