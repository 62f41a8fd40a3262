//! Application configuration

use config::{Config, ConfigError, Environment, File};
use inference_engine::ModelFormat;
use reporter::{CSV_FILENAME, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration file, extension inferred
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `HOUSE_PRICE__SERVER__BIND`
pub const ENV_PREFIX: &str = "HOUSE_PRICE";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Load-once model artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub format: ModelFormat,
    /// JSON array of feature names in model order
    pub features_path: PathBuf,
    /// Importance sidecar, required for ONNX models
    pub importances_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/model.json"),
            format: ModelFormat::Json,
            features_path: PathBuf::from("models/features.json"),
            importances_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of features in the importance ranking
    pub top_n: usize,
    /// Attachment name offered for the CSV download
    pub csv_filename: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            csv_filename: CSV_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Layer built-in defaults, the optional config file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
