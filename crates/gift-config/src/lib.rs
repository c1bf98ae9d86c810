//! gift-config
//!
//! Persistent user preferences: where data lives, backup retention, default
//! list ordering and log filtering.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{app_data_dir, Config};
