#![doc(test(attr(deny(warnings))))]

//! Gift Tracker keeps a personal list of gift ideas and purchases, together
//! with the recipients and categories they are filed under.
//!
//! The heavy lifting lives in the workspace crates; this crate wires them
//! together and owns logging setup.

pub mod app;
pub mod errors;
pub mod utils;

pub use app::GiftTracker;
pub use errors::{Result, TrackerError};
pub use gift_config::{Config, ConfigManager};
pub use gift_core::{query, GiftDraft, GiftQuery, GiftStore, Slot, SortOrder};
pub use gift_domain::{Category, Gift, GiftStatus, Recipient};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with_filter(None);
}

/// Like [`init`], with an extra filter directive such as a config's `log_filter`.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Gift tracker tracing initialized.");
    });
}
