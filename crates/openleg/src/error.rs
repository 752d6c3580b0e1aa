use crate::config::ConfigError;
use crate::daybreak::{DaybreakError, ManifestError, StagingError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Daybreak(DaybreakError),
    Staging(StagingError),
    Manifest(ManifestError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Daybreak(err) => write!(f, "daybreak error: {}", err),
            AppError::Staging(err) => write!(f, "staging error: {}", err),
            AppError::Manifest(err) => write!(f, "manifest error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Daybreak(err) => Some(err),
            AppError::Staging(err) => Some(err),
            AppError::Manifest(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DaybreakError> for AppError {
    fn from(value: DaybreakError) -> Self {
        Self::Daybreak(value)
    }
}

impl From<StagingError> for AppError {
    fn from(value: StagingError) -> Self {
        Self::Staging(value)
    }
}

impl From<ManifestError> for AppError {
    fn from(value: ManifestError) -> Self {
        Self::Manifest(value)
    }
}
