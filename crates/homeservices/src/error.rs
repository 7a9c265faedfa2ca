use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Failures that stop the process before or while serving.
///
/// Request-level failures never surface here; they are translated by
/// [`crate::boundary`] into an [`ExternalError`](crate::boundary::ExternalError).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    Input(String),
}
