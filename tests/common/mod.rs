use std::{path::PathBuf, sync::Mutex};

use gift_tracker::{Config, ConfigManager, GiftTracker};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_root() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Config pointing data and backups into `root`.
pub fn config_in(root: &std::path::Path) -> Config {
    Config {
        data_dir: Some(root.join("data")),
        backup_dir: Some(root.join("backups")),
        ..Config::default()
    }
}

/// Creates an isolated tracker plus a config manager that has saved its config.
pub fn setup_test_env() -> (GiftTracker, ConfigManager) {
    let root = temp_root();
    let manager = ConfigManager::with_base_dir(root.clone()).expect("config manager");
    manager.save(&config_in(&root)).expect("save config");
    let tracker = GiftTracker::open_with_manager(&manager).expect("open tracker");
    (tracker, manager)
}
