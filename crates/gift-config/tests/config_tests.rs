use std::fs;

use gift_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_keeps_five_backups_and_sorts_ascending() {
    let cfg = Config::default();

    assert_eq!(cfg.backup_retention, 5);
    assert!(cfg.default_sort_ascending);
    assert!(cfg.log_filter.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("fresh")).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = Config {
        data_dir: Some(dir.path().join("data")),
        backup_retention: 9,
        default_sort_ascending: false,
        log_filter: Some("gift_core=debug".into()),
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "retention = 3").unwrap();

    let err = ConfigManager::new(path.clone()).load().expect_err("not json");
    match err {
        ConfigError::Malformed { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
