use super::super::domain::{Feature, FeatureVector};
use super::ScoreComponent;

/// A fixed `value > threshold => +weight` rule for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    pub feature: Feature,
    pub threshold: f64,
    pub weight: f64,
}

impl ThresholdRule {
    const fn new(feature: Feature, threshold: f64, weight: f64) -> Self {
        Self {
            feature,
            threshold,
            weight,
        }
    }

    /// Strictly greater-than; a value sitting on the threshold does not count.
    pub fn triggers(&self, value: f64) -> bool {
        value > self.threshold
    }
}

/// Design constants, listed in [`Feature::ALL`] order. These are hand-set
/// cut points, not fitted parameters.
pub const STANDARD_RULES: [ThresholdRule; Feature::COUNT] = [
    ThresholdRule::new(Feature::Radius, 15.0, 2.0),
    ThresholdRule::new(Feature::Texture, 20.0, 1.5),
    ThresholdRule::new(Feature::Perimeter, 100.0, 2.0),
    ThresholdRule::new(Feature::Area, 800.0, 2.5),
    ThresholdRule::new(Feature::Smoothness, 0.12, 1.0),
    ThresholdRule::new(Feature::Compactness, 0.15, 1.5),
    ThresholdRule::new(Feature::Concavity, 0.15, 2.0),
    ThresholdRule::new(Feature::ConcavePoints, 0.08, 1.5),
    ThresholdRule::new(Feature::Symmetry, 0.2, 1.0),
    ThresholdRule::new(Feature::FractalDimension, 0.07, 1.0),
];

pub fn rule_for(feature: Feature) -> &'static ThresholdRule {
    &STANDARD_RULES[feature.index()]
}

/// Sum of every weight; the highest score a vector can reach.
pub fn max_risk_score(rules: &[ThresholdRule]) -> f64 {
    rules.iter().map(|rule| rule.weight).sum()
}

pub(crate) fn score_vector(
    vector: &FeatureVector,
    rules: &[ThresholdRule],
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::with_capacity(rules.len());
    let mut risk_score = 0.0;

    for rule in rules {
        let value = vector.get(rule.feature);
        let triggered = rule.triggers(value);
        if triggered {
            risk_score += rule.weight;
        }

        components.push(ScoreComponent {
            feature: rule.feature,
            value,
            threshold: rule.threshold,
            weight: rule.weight,
            triggered,
        });
    }

    (components, risk_score)
}
