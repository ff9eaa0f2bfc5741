//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::upload::UploadSchedule;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub notices: NoticesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the persisted session lives
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("medfiles").to_string_lossy().to_string())
        .unwrap_or_else(|| "./medfiles_data".to_string())
}

fn default_file_name() -> String {
    "session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

/// Simulated upload timing
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_processing_delay")]
    pub processing_delay_ms: u64,

    #[serde(default = "default_refresh_delay")]
    pub refresh_delay_ms: u64,
}

fn default_processing_delay() -> u64 {
    1000
}

fn default_refresh_delay() -> u64 {
    2000
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay(),
            refresh_delay_ms: default_refresh_delay(),
        }
    }
}

/// Inline notice behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct NoticesConfig {
    #[serde(default = "default_success_timeout")]
    pub success_timeout_ms: u64,
}

fn default_success_timeout() -> u64 {
    3000
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self {
            success_timeout_ms: default_success_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit file if given, otherwise the default locations.
    ///
    /// An explicit path that cannot be read is an error. Broken files in
    /// default locations are skipped and returned alongside the config so
    /// the caller can report them once logging is up.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Vec<ConfigError>), ConfigError> {
        match explicit {
            Some(path) => Ok((Self::load_with_env(path)?, Vec::new())),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> (Self, Vec<ConfigError>) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("medfiles").join("config.toml")),
            Some(PathBuf::from("./medfiles.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// First candidate that exists and loads, else environment defaults
    fn load_first(candidates: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut skipped = Vec::new();
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => return (config, skipped),
                Err(e) => skipped.push(e),
            }
        }
        (Self::from_env(), skipped)
    }

    /// Path of the file-backed session store
    pub fn session_path(&self) -> PathBuf {
        expand_home(&self.session.data_dir).join(&self.session.file_name)
    }

    /// How long success notices stay visible
    pub fn success_timeout(&self) -> Duration {
        Duration::from_millis(self.notices.success_timeout_ms)
    }

    pub fn upload_schedule(&self) -> UploadSchedule {
        UploadSchedule::from_millis(self.upload.processing_delay_ms, self.upload.refresh_delay_ms)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("MEDFILES_DATA_DIR") {
            self.session.data_dir = data_dir;
        }

        // Upload overrides
        if let Ok(ms) = std::env::var("MEDFILES_UPLOAD_PROCESSING_MS") {
            if let Ok(ms) = ms.parse() {
                self.upload.processing_delay_ms = ms;
            }
        }
        if let Ok(ms) = std::env::var("MEDFILES_UPLOAD_REFRESH_MS") {
            if let Ok(ms) = ms.parse() {
                self.upload.refresh_delay_ms = ms;
            }
        }

        if let Ok(ms) = std::env::var("MEDFILES_NOTICE_TIMEOUT_MS") {
            if let Ok(ms) = ms.parse() {
                self.notices.success_timeout_ms = ms;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("MEDFILES_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MEDFILES_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(dir: &str) -> PathBuf {
    match (dir.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(dir),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# MedFiles Configuration
#
# Environment variables override these settings:
# - MEDFILES_DATA_DIR
# - MEDFILES_UPLOAD_PROCESSING_MS
# - MEDFILES_UPLOAD_REFRESH_MS
# - MEDFILES_NOTICE_TIMEOUT_MS
# - MEDFILES_LOG_LEVEL
# - MEDFILES_LOG_FORMAT

[session]
# Directory holding the persisted session
data_dir = "~/.local/share/medfiles"

# Session file name inside data_dir
file_name = "session.json"

[upload]
# Wait before the "processed" notice (ms)
processing_delay_ms = 1000

# Further wait before the dialog closes and the dashboard reloads (ms)
refresh_delay_ms = 2000

[notices]
# How long a success notice stays visible (ms)
success_timeout_ms = 3000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
