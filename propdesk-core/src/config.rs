//! Application configuration, read from TOML.
//!
//! Every section and every field has a default, so an empty file (or no file
//! at all) is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::FilterState;
use crate::table::TableConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Table defaults shared by every admin view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDefaults {
    pub search_placeholder: String,
    pub empty_message: String,
    pub skeleton_rows: usize,
}

impl Default for TableDefaults {
    fn default() -> Self {
        let base = TableConfig::default();
        Self {
            search_placeholder: base.search_placeholder,
            empty_message: base.empty_message,
            skeleton_rows: base.skeleton_rows,
        }
    }
}

impl TableDefaults {
    /// A table config carrying these defaults.
    pub fn table_config(&self, searchable: bool, selectable: bool) -> TableConfig {
        TableConfig {
            searchable,
            search_placeholder: self.search_placeholder.clone(),
            selectable,
            empty_message: self.empty_message.clone(),
            skeleton_rows: self.skeleton_rows,
        }
    }
}

/// Mock dataset sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub seed: u64,
    pub accounts: usize,
    pub payouts: usize,
    pub alerts: usize,
    /// Artificial latency before datasets arrive, so the loading state shows.
    pub load_delay_ms: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            accounts: 120,
            payouts: 60,
            alerts: 80,
            load_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// File name, relative to the config directory.
    pub file: String,
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "propdesk.log".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub filters: FilterState,
    pub table: TableDefaults,
    pub sample: SampleConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DateRange;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [filters]
            date_range = "90d"
            plan = "Dynasty"

            [sample]
            accounts = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.filters.date_range, DateRange::Last90Days);
        assert_eq!(cfg.filters.plan, "Dynasty");
        assert_eq!(cfg.filters.status, "all");
        assert_eq!(cfg.sample.accounts, 10);
        assert_eq!(cfg.sample.seed, 42);
        assert_eq!(cfg.table.skeleton_rows, 5);
    }

    #[test]
    fn bad_bucket_is_a_parse_error() {
        let err = AppConfig::from_toml("[filters]\ndate_range = \"1y\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn file_roundtrip() {
        let mut cfg = AppConfig::default();
        cfg.filters.status = "Funded".into();
        cfg.table.empty_message = "Nothing here.".into();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(cfg.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("propdesk.toml");
        assert_eq!(AppConfig::load_or_default(&path).unwrap(), AppConfig::default());
        assert!(matches!(
            AppConfig::from_file(&path).unwrap_err(),
            ConfigError::Io { .. }
        ));
    }

    #[test]
    fn table_defaults_build_config() {
        let cfg = TableDefaults::default().table_config(true, true);
        assert!(cfg.selectable);
        assert_eq!(cfg.skeleton_rows, 5);
        assert_eq!(cfg.search_placeholder, "Search...");
    }
}
