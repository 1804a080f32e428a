/// Site build configuration.
///
/// Read from a TOML file, by default `rainfall.toml` in the working
/// directory, or the path in `RAINFALL_CONFIG` (a `.env` file is honoured).
///
/// ```toml
/// [source]
/// kind = "http"
/// base_url = "https://example.org/data"
///
/// [site]
/// output_dir = "site"
/// page_size = 10
///
/// [logging]
/// level = "info"
/// file = "build.log"
/// timestamps = false
/// ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ingest::CsvSource;
use crate::logging::LogLevel;
use crate::table::DEFAULT_PAGE_SIZE;

pub const CONFIG_ENV_VAR: &str = "RAINFALL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "rainfall.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: CsvSource,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    pub file: Option<String>,
    #[serde(default)]
    pub timestamps: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("site")
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Read { path: String, message: String },
    /// The config file is not valid TOML or is missing required keys.
    Parse { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "Cannot read config {}: {}", path, message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid config {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse config text. `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.site.page_size = config.site.page_size.max(1);
        Ok(config)
    }

    /// Load from `RAINFALL_CONFIG` (after reading `.env`), falling back to
    /// `rainfall.toml`.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
