use serde_json::{Map, Value};

use super::domain::{Feature, FeatureVector};

/// Client-side faults detected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid measurements data")]
    InvalidPayload,
    #[error("Invalid or missing field: {0}")]
    MissingField(Feature),
    #[error("Invalid or missing field: {0}")]
    InvalidNumber(Feature),
    #[error("Invalid or missing patient field: {0}")]
    MissingPatientField(&'static str),
    #[error("Invalid patient age: expected a whole number between 1 and 120")]
    InvalidPatientAge,
}

impl ValidationError {
    /// Measurement the error refers to, when it names one.
    pub fn feature(&self) -> Option<Feature> {
        match self {
            ValidationError::MissingField(feature) | ValidationError::InvalidNumber(feature) => {
                Some(*feature)
            }
            _ => None,
        }
    }
}

/// Coerce an untyped measurements record into a [`FeatureVector`].
///
/// Keys are checked in [`Feature::ALL`] order and the first offending key is
/// reported. Keys outside the ten known features are ignored.
pub fn validate_measurements(raw: &Value) -> Result<FeatureVector, ValidationError> {
    let record = raw.as_object().ok_or(ValidationError::InvalidPayload)?;

    let mut values = [0.0; Feature::COUNT];
    for (slot, feature) in values.iter_mut().zip(Feature::ALL) {
        *slot = read_feature(record, feature)?;
    }

    FeatureVector::new(values)
}

fn read_feature(record: &Map<String, Value>, feature: Feature) -> Result<f64, ValidationError> {
    let value = record
        .get(feature.key())
        .ok_or(ValidationError::MissingField(feature))?;

    coerce_number(value).ok_or(ValidationError::InvalidNumber(feature))
}

/// Numbers pass through; strings are trimmed and parsed. Anything that does
/// not yield a finite value is rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => raw.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}
