use crate::config::{AppConfig, AppEnvironment};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the process-wide tracing subscriber.
///
/// The configured level seeds the filter; an explicit `RUST_LOG` overrides
/// it. Production output drops ANSI colors for log shippers.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let level = config.telemetry.log_level.as_str();
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|source| TelemetryError::Filter {
            value: level.to_string(),
            source,
        })
    })?;

    let ansi = config.environment != AppEnvironment::Production;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
