use crate::infra::prediction_service;
use clap::{ArgGroup, Args, ValueEnum};
use oncoscore::config::PredictionConfig;
use oncoscore::error::AppError;
use oncoscore::screening::{
    PredictionError, PredictionReport, PredictionRequest, ScoreEvaluation, ValidationError,
};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "json"])))]
pub(crate) struct ScoreArgs {
    /// JSON file holding a measurements object or a full prediction request
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Inline JSON measurements object or prediction request
    #[arg(long)]
    pub(crate) json: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { file, json, format } = args;

    let raw = match (file, json) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(inline)) => inline,
        (None, None) => String::new(),
    };

    let body = request_body(&raw)?;
    let request = PredictionRequest::from_json(&body).map_err(PredictionError::from)?;

    // Offline scoring never waits on the simulated latency.
    let service = prediction_service(PredictionConfig::default());
    let (report, evaluation) = service.report_with_trail(&request)?;

    match format {
        OutputFormat::Text => print!("{}", render_report(&report, &evaluation)),
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|err| PredictionError::Internal(err.to_string()))?;
            println!("{rendered}");
        }
    }

    Ok(())
}

/// Accept either a bare measurements object or a `{ "measurements": ... }` body.
pub(crate) fn request_body(raw: &str) -> Result<Value, PredictionError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|_| PredictionError::from(ValidationError::InvalidPayload))?;

    if value.get("measurements").is_some() {
        Ok(value)
    } else {
        Ok(json!({ "measurements": value }))
    }
}

pub(crate) fn render_report(report: &PredictionReport, evaluation: &ScoreEvaluation) -> String {
    let mut lines = vec![
        "Tumor screening result".to_string(),
        format!(
            "Prediction: {} ({})",
            report.prediction.label(),
            report.prediction.code()
        ),
        format!(
            "Confidence: {}% (risk score {:.1})",
            report.confidence, report.risk_score
        ),
        format!(
            "Probabilities: malignant {:.2}, benign {:.2}",
            report.probabilities.malignant, report.probabilities.benign
        ),
    ];

    lines.push("\nRule trail".to_string());
    lines.extend(evaluation.components.iter().map(|component| {
        let marker = if component.triggered { "+" } else { " " };
        format!(
            "{marker} {:<24} {:>10.4} > {:<8} => +{:.1}",
            component.feature.label(),
            component.value,
            component.threshold,
            component.contribution()
        )
    }));

    lines.push("\nRisk factors".to_string());
    lines.extend(report.risk_factors.iter().map(|factor| format!("- {factor}")));

    lines.push("\nRecommendations".to_string());
    lines.extend(
        report
            .recommendations
            .iter()
            .map(|recommendation| format!("- {recommendation}")),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENIGN: &str = r#"{
        "radius_mean": 14.5, "texture_mean": 19.2, "perimeter_mean": 92.0,
        "area_mean": 655, "smoothness_mean": 0.096, "compactness_mean": 0.104,
        "concavity_mean": 0.089, "concave_points_mean": 0.048,
        "symmetry_mean": 0.181, "fractal_dimension_mean": 0.063
    }"#;

    #[test]
    fn bare_measurements_are_wrapped() {
        let body = request_body(BENIGN).expect("valid json");
        assert!(body["measurements"]["radius_mean"].is_number());

        let wrapped = request_body(&format!(r#"{{ "measurements": {BENIGN} }}"#))
            .expect("valid json");
        assert_eq!(wrapped, body);
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(matches!(
            request_body("radius_mean=14.5"),
            Err(PredictionError::Validation(ValidationError::InvalidPayload))
        ));
    }

    #[test]
    fn text_report_lists_trail_and_guidance() {
        let body = request_body(BENIGN).expect("valid json");
        let request = PredictionRequest::from_json(&body).expect("valid request");
        let service = prediction_service(PredictionConfig::default());
        let (report, evaluation) = service.report_with_trail(&request).expect("report builds");

        let rendered = render_report(&report, &evaluation);

        assert!(rendered.contains("Prediction: Benign (B)"));
        assert!(rendered.contains("Confidence: 75%"));
        assert!(rendered.contains("Area Mean"));
        assert!(rendered.lines().any(|line| line.starts_with("  Concave Points Mean")));
        assert!(rendered.ends_with("- Maintain healthy lifestyle\n"));
        assert!(rendered.contains("- Regular monitoring recommended"));
    }

    #[test]
    fn run_score_rejects_missing_fields() {
        let args = ScoreArgs {
            file: None,
            json: Some(r#"{ "radius_mean": 14.5 }"#.to_string()),
            format: OutputFormat::Json,
        };

        match run_score(args) {
            Err(AppError::Prediction(PredictionError::Validation(err))) => {
                assert_eq!(err.to_string(), "Invalid or missing field: texture_mean");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
