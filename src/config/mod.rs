use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for an embedding application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub catalog: CatalogConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ISG_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = match env::var("ISG_CATALOG_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) if environment == AppEnvironment::Production => {
                return Err(ConfigError::MissingCatalogDir);
            }
            Err(_) => PathBuf::from("./data/risks"),
        };

        let log_level = env::var("ISG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            catalog: CatalogConfig { data_dir },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the external risk catalog JSON files live.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingCatalogDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCatalogDir => {
                write!(f, "ISG_CATALOG_DIR must be set in production")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
