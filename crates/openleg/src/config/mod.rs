use chrono::Duration;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different deployments.
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

/// Top-level configuration. Fields are public so operators can adjust
/// settings while the process runs; the environment is only read at load.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    /// Database schema holding the legislative data.
    pub schema: String,
    pub directories: DirectoryConfig,
    pub processing: ProcessingConfig,
    pub spotcheck: SpotcheckConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let schema = env::var("OPENLEG_SCHEMA").unwrap_or_else(|_| "master".to_string());

        let base = env_path("OPENLEG_BASE_DIR").unwrap_or_else(|| PathBuf::from("./data"));
        let staging = env_path("OPENLEG_STAGING_DIR").unwrap_or_else(|| base.join("staging"));
        let archive = env_path("OPENLEG_ARCHIVE_DIR").unwrap_or_else(|| base.join("archive"));
        let scraped = env_path("OPENLEG_SCRAPED_DIR").unwrap_or_else(|| base.join("scraped"));

        let processing = ProcessingConfig {
            enabled: env_bool("OPENLEG_PROCESSING_ENABLED", true)?,
            logging_enabled: env_bool("OPENLEG_PROCESS_LOGGING_ENABLED", true)?,
            sobi_batch_enabled: env_bool("OPENLEG_SOBI_BATCH_ENABLED", false)?,
            sobi_batch_size: env_number("OPENLEG_SOBI_BATCH_SIZE", 100)?,
        };

        let grace_minutes: i64 = env_number("OPENLEG_SPOTCHECK_GRACE_MINUTES", 30)?;
        let spotcheck = SpotcheckConfig {
            scheduled: env_bool("OPENLEG_SPOTCHECK_SCHEDULED", false)?,
            alert_grace_period: Duration::minutes(grace_minutes),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            schema,
            directories: DirectoryConfig::new(base, staging, archive, scraped),
            processing,
            spotcheck,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// File system layout for incoming, staged, archived and scraped data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub base: PathBuf,
    pub staging: PathBuf,
    pub archive: PathBuf,
    pub calendar: PathBuf,
    pub assembly_agenda: PathBuf,
    pub senate_agenda: PathBuf,
    pub bill_text: PathBuf,
    pub bill_memo: PathBuf,
}

impl DirectoryConfig {
    pub fn new(base: PathBuf, staging: PathBuf, archive: PathBuf, scraped: PathBuf) -> Self {
        Self {
            calendar: scraped.join("calendar"),
            assembly_agenda: scraped.join("assemblyagenda"),
            senate_agenda: scraped.join("senateagenda"),
            bill_text: scraped.join("billtext"),
            bill_memo: scraped.join("billmemo"),
            base,
            staging,
            archive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub enabled: bool,
    pub logging_enabled: bool,
    pub sobi_batch_enabled: bool,
    /// Upper bound on files per batch when batching is on.
    pub sobi_batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotcheckConfig {
    pub scheduled: bool,
    pub alert_grace_period: Duration,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBool { key, value } => {
                write!(f, "{key} must be true or false, got '{value}'")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a whole number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

fn env_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value }),
    }
}

fn env_number<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    let Ok(value) = env::var(key) else {
        return Ok(default);
    };
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { key, value })
}
