//! Patient details collected by the first step of the screening form.
//!
//! Details are validated alongside the measurements but never influence the
//! score and are never stored or logged.

use serde_json::{Map, Value};

use super::validation::ValidationError;

const MIN_AGE: u8 = 1;
const MAX_AGE: u8 = 120;

/// Findings from the clinical breast exam checkboxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClinicalExam {
    pub lump: bool,
    pub nipple_discharge: bool,
    pub skin_changes: bool,
}

/// Validated patient details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetails {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone: String,
    pub email: String,
    pub medical_id: Option<String>,
    pub medical_history: String,
    pub imaging_data: String,
    pub clinical_exam: ClinicalExam,
}

/// Validate an optional `patient` record from a prediction request.
///
/// Fields are read by their snake_case key, falling back to the form's
/// camelCase name. When both are sent the snake_case value wins.
pub fn validate_patient(raw: &Value) -> Result<PatientDetails, ValidationError> {
    let record = raw
        .as_object()
        .ok_or(ValidationError::MissingPatientField("patient"))?;

    let first_name = required(record, "first_name", "firstName")?;
    let last_name = required(record, "last_name", "lastName")?;
    let age = parse_age(field(record, "age", "age"))?;
    let phone = required(record, "phone", "phone")?;
    let email = required(record, "email", "email")?;
    let medical_history = required(record, "medical_history", "medicalHistory")?;
    let imaging_data = required(record, "imaging_data", "imagingData")?;

    let medical_id = text(record, "medical_id", "medicalId")?
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    Ok(PatientDetails {
        first_name,
        last_name,
        age,
        phone,
        email,
        medical_id,
        medical_history,
        imaging_data,
        clinical_exam: clinical_exam(record)?,
    })
}

/// Present, non-null value under `key` or its form alias.
fn field<'a>(record: &'a Map<String, Value>, key: &str, alias: &str) -> Option<&'a Value> {
    record
        .get(key)
        .filter(|value| !value.is_null())
        .or_else(|| record.get(alias).filter(|value| !value.is_null()))
}

fn text<'a>(
    record: &'a Map<String, Value>,
    key: &'static str,
    alias: &str,
) -> Result<Option<&'a str>, ValidationError> {
    match field(record, key, alias) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(ValidationError::MissingPatientField(key)),
    }
}

fn required(
    record: &Map<String, Value>,
    key: &'static str,
    alias: &str,
) -> Result<String, ValidationError> {
    text(record, key, alias)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingPatientField(key))
}

fn clinical_exam(record: &Map<String, Value>) -> Result<ClinicalExam, ValidationError> {
    let exam = match field(record, "clinical_exam", "clinicalExam") {
        None => return Ok(ClinicalExam::default()),
        Some(Value::Object(exam)) => exam,
        Some(_) => return Err(ValidationError::MissingPatientField("clinical_exam")),
    };

    let finding = |key: &str, alias: &str| match field(exam, key, alias) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(ValidationError::MissingPatientField("clinical_exam")),
    };

    Ok(ClinicalExam {
        lump: finding("lump", "lump")?,
        nipple_discharge: finding("nipple_discharge", "nippleDischarge")?,
        skin_changes: finding("skin_changes", "skinChanges")?,
    })
}

fn parse_age(value: Option<&Value>) -> Result<u8, ValidationError> {
    let value = value.ok_or(ValidationError::MissingPatientField("age"))?;
    let age = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(raw) if raw.trim().is_empty() => {
            return Err(ValidationError::MissingPatientField("age"))
        }
        Value::String(raw) => raw.trim().parse::<u64>().ok(),
        _ => None,
    };

    age.and_then(|age| u8::try_from(age).ok())
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
        .ok_or(ValidationError::InvalidPatientAge)
}
