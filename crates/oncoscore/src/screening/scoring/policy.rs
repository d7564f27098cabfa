use super::super::domain::{ClassProbabilities, Diagnosis};

/// Scores strictly above this are labelled malignant.
pub const MALIGNANCY_CUTOFF: f64 = 6.0;
pub const CONFIDENCE_FLOOR: u8 = 75;
pub const CONFIDENCE_CEILING: u8 = 95;
/// Confidence points gained per point of risk score.
pub const CONFIDENCE_SLOPE: f64 = 2.0;

pub(crate) fn classify(risk_score: f64) -> Diagnosis {
    if risk_score > MALIGNANCY_CUTOFF {
        Diagnosis::Malignant
    } else {
        Diagnosis::Benign
    }
}

pub(crate) fn confidence_for(risk_score: f64) -> u8 {
    let floor = f64::from(CONFIDENCE_FLOOR);
    let ceiling = f64::from(CONFIDENCE_CEILING);
    let raw = floor + risk_score * CONFIDENCE_SLOPE;

    raw.clamp(floor, ceiling).round() as u8
}

pub(crate) fn probabilities_for(diagnosis: Diagnosis, confidence: u8) -> ClassProbabilities {
    let predicted = f64::from(confidence) / 100.0;
    let other = f64::from(100 - confidence) / 100.0;

    match diagnosis {
        Diagnosis::Malignant => ClassProbabilities {
            malignant: predicted,
            benign: other,
        },
        Diagnosis::Benign => ClassProbabilities {
            malignant: other,
            benign: predicted,
        },
    }
}
