use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

const HOME_ENV: &str = "GIFT_TRACKER_HOME";
const DEFAULT_DIR_NAME: &str = ".gift_tracker";

/// Returns the application data directory.
///
/// `GIFT_TRACKER_HOME` wins; otherwise `~/.gift_tracker`, or `./.gift_tracker`
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// User preferences. Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the slot files. Defaults to `<app data>/data`.
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding slot backups. Defaults to `<app data>/backups`.
    pub backup_dir: Option<PathBuf>,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default = "Config::default_sort_ascending")]
    pub default_sort_ascending: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            backup_dir: None,
            backup_retention: Self::default_backup_retention(),
            default_sort_ascending: Self::default_sort_ascending(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn default_sort_ascending() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| app_data_dir().join("data"))
    }

    pub fn resolve_backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| app_data_dir().join("backups"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"backup_retention": 2}"#).unwrap();
        assert_eq!(config.backup_retention, 2);
        assert!(config.default_sort_ascending);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn explicit_dirs_take_precedence() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/gifts")),
            backup_dir: Some(PathBuf::from("/tmp/gift-backups")),
            ..Config::default()
        };
        assert_eq!(config.resolve_data_dir(), PathBuf::from("/tmp/gifts"));
        assert_eq!(config.resolve_backup_dir(), PathBuf::from("/tmp/gift-backups"));
    }
}
