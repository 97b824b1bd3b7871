//! Configuration for loading and presenting the patient dataset.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable overriding the data file path
pub const DATA_PATH_ENV: &str = "PATIENT_SCREEN_DATA";

/// Environment variable overriding the CSV batch size
pub const BATCH_SIZE_ENV: &str = "PATIENT_SCREEN_BATCH_SIZE";

/// Number of rows shown by the dataset preview
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Rows per record batch when decoding CSV
pub const DEFAULT_CSV_BATCH_SIZE: usize = 8192;

/// Configuration for the dataset and its presentation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Path to the `.csv` or `.parquet` data file
    pub data_path: PathBuf,
    /// Number of rows shown by the preview
    pub preview_rows: usize,
    /// Fail loading when a patient number occurs more than once
    pub enforce_unique_ids: bool,
    /// Rows per record batch when decoding CSV
    pub csv_batch_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            enforce_unique_ids: false,
            csv_batch_size: DEFAULT_CSV_BATCH_SIZE,
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(Error::config)
    }

    /// Read a configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Unparseable batch sizes are ignored with a warning.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATA_PATH_ENV).filter(|p| !p.is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(BATCH_SIZE_ENV) {
            match raw.parse::<usize>() {
                Ok(size) => self.csv_batch_size = size,
                Err(_) => log::warn!("Ignoring invalid {BATCH_SIZE_ENV} value: {raw}"),
            }
        }
        self
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(Error::config("preview_rows must be at least 1"));
        }
        if self.csv_batch_size == 0 {
            return Err(Error::config("csv_batch_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.preview_rows, 10);
        assert!(!config.enforce_unique_ids);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            data_path = "/srv/data/patients.parquet"
            enforce_unique_ids = true
            "#,
        )
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/data/patients.parquet"));
        assert!(config.enforce_unique_ids);
        assert_eq!(config.preview_rows, DEFAULT_PREVIEW_ROWS);
        assert_eq!(config.csv_batch_size, DEFAULT_CSV_BATCH_SIZE);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DashboardConfig::from_toml_str("preview = 5").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = DashboardConfig::default().with_overrides_from(|key| match key {
            DATA_PATH_ENV => Some("other.csv".to_string()),
            BATCH_SIZE_ENV => Some("not-a-number".to_string()),
            _ => None,
        });

        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.csv_batch_size, DEFAULT_CSV_BATCH_SIZE);
    }

    #[test]
    fn test_validate_rejects_zero_rows() {
        let config = DashboardConfig {
            preview_rows: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
