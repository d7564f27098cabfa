use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::validation::ValidationError;

/// Morphometric mean measurements collected for a tumor sample, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Radius,
    Texture,
    Perimeter,
    Area,
    Smoothness,
    Compactness,
    Concavity,
    ConcavePoints,
    Symmetry,
    FractalDimension,
}

impl Feature {
    pub const COUNT: usize = 10;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Radius,
        Feature::Texture,
        Feature::Perimeter,
        Feature::Area,
        Feature::Smoothness,
        Feature::Compactness,
        Feature::Concavity,
        Feature::ConcavePoints,
        Feature::Symmetry,
        Feature::FractalDimension,
    ];

    /// Wire key used by form clients and the JSON API.
    pub fn key(self) -> &'static str {
        match self {
            Feature::Radius => "radius_mean",
            Feature::Texture => "texture_mean",
            Feature::Perimeter => "perimeter_mean",
            Feature::Area => "area_mean",
            Feature::Smoothness => "smoothness_mean",
            Feature::Compactness => "compactness_mean",
            Feature::Concavity => "concavity_mean",
            Feature::ConcavePoints => "concave_points_mean",
            Feature::Symmetry => "symmetry_mean",
            Feature::FractalDimension => "fractal_dimension_mean",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::Radius => "Radius Mean",
            Feature::Texture => "Texture Mean",
            Feature::Perimeter => "Perimeter Mean",
            Feature::Area => "Area Mean",
            Feature::Smoothness => "Smoothness Mean",
            Feature::Compactness => "Compactness Mean",
            Feature::Concavity => "Concavity Mean",
            Feature::ConcavePoints => "Concave Points Mean",
            Feature::Symmetry => "Symmetry Mean",
            Feature::FractalDimension => "Fractal Dimension Mean",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Validated measurement set: all ten features present and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; Feature::COUNT],
}

impl FeatureVector {
    /// Build a vector from values listed in [`Feature::ALL`] order.
    pub fn new(values: [f64; Feature::COUNT]) -> Result<Self, ValidationError> {
        if let Some(feature) = Feature::ALL
            .into_iter()
            .find(|feature| !values[feature.index()].is_finite())
        {
            return Err(ValidationError::InvalidNumber(feature));
        }

        Ok(Self { values })
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL
            .into_iter()
            .map(move |feature| (feature, self.get(feature)))
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Feature::COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.key(), &value)?;
        }
        map.end()
    }
}

/// Classification label produced by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "M")]
    Malignant,
    #[serde(rename = "B")]
    Benign,
}

impl Diagnosis {
    pub fn code(self) -> &'static str {
        match self {
            Diagnosis::Malignant => "M",
            Diagnosis::Benign => "B",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::Malignant => "Malignant",
            Diagnosis::Benign => "Benign",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Class probabilities; the predicted class always carries the larger share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub malignant: f64,
    pub benign: f64,
}

/// Outcome of a single scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub diagnosis: Diagnosis,
    pub risk_score: f64,
    pub confidence: u8,
    pub probabilities: ClassProbabilities,
}
