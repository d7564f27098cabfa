pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;

/// Service name reported by the discovery and health endpoints.
pub const SERVICE_NAME: &str = "Breast Cancer Prediction API";

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
