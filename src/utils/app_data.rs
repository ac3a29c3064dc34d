use crate::directory::ParseMode;
use crate::registration::LookupPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "schooldir";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "schooldir.log";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registry source file
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Characters typed into the code field before searching
    #[serde(default = "default_search_trigger_len")]
    pub search_trigger_len: usize,

    /// Code length that triggers an exact lookup and auto-fill
    #[serde(default = "default_exact_lookup_len")]
    pub exact_lookup_len: usize,

    /// Maximum search results
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Reject rows that do not have exactly seven columns
    #[serde(default)]
    pub strict_columns: bool,

    /// Default log filter, `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data").join("schools.csv")
}

fn default_search_trigger_len() -> usize {
    3
}

fn default_exact_lookup_len() -> usize {
    11
}

fn default_result_limit() -> usize {
    crate::directory::DEFAULT_RESULT_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            search_trigger_len: default_search_trigger_len(),
            exact_lookup_len: default_exact_lookup_len(),
            result_limit: default_result_limit(),
            strict_columns: false,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load config from `config_path`, or return default if not found
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict_columns {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        LookupPolicy {
            search_trigger_len: self.search_trigger_len,
            exact_lookup_len: self.exact_lookup_len,
            result_limit: self.result_limit,
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the path to the log file used while the interactive form owns the terminal
pub fn get_log_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(LOG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/schools.csv"));
        assert_eq!(config.search_trigger_len, 3);
        assert_eq!(config.exact_lookup_len, 11);
        assert_eq!(config.result_limit, 10);
        assert!(!config.strict_columns);
        assert_eq!(config.parse_mode(), ParseMode::Lenient);
    }

    #[test]
    fn test_app_config_lookup_policy() {
        let config = AppConfig {
            search_trigger_len: 4,
            result_limit: 25,
            ..AppConfig::default()
        };

        let policy = config.lookup_policy();
        assert_eq!(policy.search_trigger_len, 4);
        assert_eq!(policy.exact_lookup_len, 11);
        assert_eq!(policy.result_limit, 25);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"strict_columns": true, "data_path": "/srv/udise.csv"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.strict_columns);
        assert_eq!(config.parse_mode(), ParseMode::Strict);
        assert_eq!(config.data_path, PathBuf::from("/srv/udise.csv"));
        assert_eq!(config.result_limit, 10); // default
    }

    #[test]
    fn test_app_config_empty_json() {
        // Empty object should use all defaults
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        // Missing file falls back to defaults
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());

        let config = AppConfig {
            exact_lookup_len: 12,
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_app_config_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
