use crate::catalog::CatalogLoadError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::assessment::AssessmentServiceError;
use std::fmt;

/// Top-level error for embedders wiring the engine into an application.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Catalog(CatalogLoadError),
    Io(std::io::Error),
    Workflow(AssessmentServiceError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "configuration error: {}", err),
            EngineError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            EngineError::Catalog(err) => write!(f, "catalog error: {}", err),
            EngineError::Io(err) => write!(f, "io error: {}", err),
            EngineError::Workflow(err) => write!(f, "workflow error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::Telemetry(err) => Some(err),
            EngineError::Catalog(err) => Some(err),
            EngineError::Io(err) => Some(err),
            EngineError::Workflow(err) => Some(err),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for EngineError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<CatalogLoadError> for EngineError {
    fn from(value: CatalogLoadError) -> Self {
        Self::Catalog(value)
    }
}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<AssessmentServiceError> for EngineError {
    fn from(value: AssessmentServiceError) -> Self {
        Self::Workflow(value)
    }
}
