//! Configuration system
//!
//! Layers, lowest precedence first:
//! - Built-in defaults
//! - A TOML config file (explicit path, or the first one found in the search path)
//! - Environment variables
//! - Command line flags (applied by the binary)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::parquet::DEFAULT_BATCH_SIZE;

/// Largest preview the tool will decode in one run.
pub const MAX_PREVIEW_ROWS: usize = 1_000_000;

const LOG_FORMATS: &[&str] = &["pretty", "json"];
const LOG_OUTPUTS: &[&str] = &["console", "file", "both"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Row preview configuration
    pub preview: PreviewConfig,

    /// Paths configuration
    pub paths: PathsConfig,

    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Rows shown in the report
    pub rows: usize,
    /// Rows decoded per chunk
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "ERROR".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_directory: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    ///
    /// An explicit `path` must exist; otherwise the search path is tried and a
    /// missing file simply means defaults. The result is not validated, since
    /// command line flags may still override it; call [`Config::validate`]
    /// once every layer is applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::search_paths().into_iter().find(|p| p.is_file()) {
                Some(found) => Self::load_from_file(&found)?,
                None => Config::default(),
            },
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("parquet-inspect.toml"),
            PathBuf::from(".parquet-inspect.toml"),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("parquet-inspect").join("config.toml"));
        }
        paths
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("PARQUET_INSPECT_PREVIEW_ROWS") {
            self.preview.rows = val
                .parse()
                .context("Invalid PARQUET_INSPECT_PREVIEW_ROWS")?;
        }
        if let Ok(val) = env::var("PARQUET_INSPECT_BATCH_SIZE") {
            self.preview.batch_size = val
                .parse()
                .context("Invalid PARQUET_INSPECT_BATCH_SIZE")?;
        }

        if let Ok(val) = env::var("PARQUET_INSPECT_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.preview.batch_size == 0 {
            return Err(anyhow::anyhow!("Batch size must be greater than 0"));
        }

        if self.preview.rows > MAX_PREVIEW_ROWS {
            return Err(anyhow::anyhow!(
                "Preview rows must be at most {}, got {}",
                MAX_PREVIEW_ROWS,
                self.preview.rows
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Unknown log format '{}', expected one of {:?}",
                self.logging.format,
                LOG_FORMATS
            ));
        }

        if !LOG_OUTPUTS.contains(&self.logging.output.as_str()) {
            return Err(anyhow::anyhow!(
                "Unknown log output '{}', expected one of {:?}",
                self.logging.output,
                LOG_OUTPUTS
            ));
        }

        Ok(())
    }

    /// Log where the configuration came from and notable settings.
    ///
    /// Called once logging is installed.
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!(config_file = %path.display(), "Loaded configuration from file"),
            None => info!("Using default configuration"),
        }

        if self.preview.rows > self.preview.batch_size {
            warn!(
                rows = self.preview.rows,
                batch_size = self.preview.batch_size,
                "Preview spans several batches"
            );
        }
    }
}
