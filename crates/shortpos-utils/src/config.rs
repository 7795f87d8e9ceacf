//! Application configuration loaded from the environment

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the SQLite database file
pub const DATABASE_FILE_ENV: &str = "DATABASE_FILE";

/// Environment variable naming the CSV file to ingest
pub const CSV_FILE_ENV: &str = "CSV_FILE";

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database holding the `short_positions` table
    pub database_file: PathBuf,
    /// CSV source for the `load` command
    pub csv_file: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_file: PathBuf::from("short_positions.db"),
            csv_file: None,
            log_filter: "warn,shortpos_core=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration builder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Defaults overridden by `DATABASE_FILE` and `CSV_FILE`
    pub fn from_env() -> Self {
        Self::builder().with_env().build()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    pub fn database_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_file = Some(path.into());
        self
    }

    pub fn csv_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_file = Some(path.into());
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Fill unset values from `DATABASE_FILE` and `CSV_FILE`
    pub fn with_env(mut self) -> Self {
        if self.database_file.is_none() {
            self.database_file = env_path(DATABASE_FILE_ENV);
        }
        if self.csv_file.is_none() {
            self.csv_file = env_path(CSV_FILE_ENV);
        }
        self
    }

    pub fn build(self) -> AppConfig {
        let defaults = AppConfig::default();

        AppConfig {
            database_file: self.database_file.unwrap_or(defaults.database_file),
            csv_file: self.csv_file.or(defaults.csv_file),
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
