//! Configuration management for tradelog
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{JournalError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Main configuration structure for tradelog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the journal database lives
    #[serde(default)]
    pub storage: StorageConfig,
    /// Console output settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Backup export settings
    #[serde(default)]
    pub backup: BackupConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit database path; `None` uses the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string used for session dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Symbol printed in front of P&L figures
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Notes longer than this are truncated in tables
    #[serde(default = "default_max_note_width")]
    pub max_note_width: usize,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_max_note_width() -> usize {
    40
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            currency_symbol: default_currency_symbol(),
            max_note_width: default_max_note_width(),
        }
    }
}

/// Backup export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Directory that dated backup files are written to
    #[serde(default = "default_backup_dir")]
    pub default_dir: PathBuf,

    /// Pretty-print exported JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pretty() -> bool {
    true
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            default_dir: default_backup_dir(),
            pretty: default_pretty(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| JournalError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| JournalError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(date_format) = std::env::var("TRADELOG_DATE_FORMAT") {
            tracing::debug!(date_format = %date_format, "Env override: TRADELOG_DATE_FORMAT");
            self.display.date_format = date_format;
        }

        if let Ok(currency) = std::env::var("TRADELOG_CURRENCY") {
            tracing::debug!(currency = %currency, "Env override: TRADELOG_CURRENCY");
            self.display.currency_symbol = currency;
        }

        if let Ok(dir) = std::env::var("TRADELOG_BACKUP_DIR") {
            tracing::debug!(backup_dir = %dir, "Env override: TRADELOG_BACKUP_DIR");
            self.backup.default_dir = PathBuf::from(dir);
        }

        if let Ok(json_logs) = std::env::var("TRADELOG_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => self.logging.json = v,
                Err(_) => {
                    tracing::warn!("Invalid value for TRADELOG_JSON_LOGS: {}", json_logs);
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        // `--db` also reads TRADELOG_DB through clap, so it covers the env override
        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(path.clone());
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.display.date_format.trim().is_empty() {
            return Err(
                JournalError::Config("display.date_format cannot be empty".to_string()).into(),
            );
        }

        // Time and zone specifiers parse fine but fail when applied to a date
        let mut rendered = String::new();
        if write!(rendered, "{}", NaiveDate::default().format(&self.display.date_format)).is_err() {
            return Err(JournalError::Config(format!(
                "display.date_format '{}' is not a valid date format",
                self.display.date_format
            ))
            .into());
        }

        if self.display.max_note_width == 0 {
            return Err(JournalError::Config(
                "display.max_note_width must be greater than 0".to_string(),
            )
            .into());
        }

        if self.display.currency_symbol.chars().count() > 4 {
            return Err(JournalError::Config(format!(
                "display.currency_symbol '{}' is longer than 4 characters",
                self.display.currency_symbol
            ))
            .into());
        }

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(JournalError::Config("storage.path cannot be empty".to_string()).into());
            }
        }

        Ok(())
    }
}
