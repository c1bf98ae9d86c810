//! gift-core
//!
//! Store, persistence adapter and query logic for the gift tracker.
//! Depends on gift-domain. No terminal I/O; concrete storage lives behind
//! the [`storage::KeyValueStore`] trait.

pub mod error;
pub mod persistence;
pub mod query;
pub mod storage;
pub mod store;
pub mod summary;
pub mod validation;


pub use error::CoreError;
pub use persistence::{LoadReport, LoadStatus, Slot, SlotLoad};
pub use query::{query, GiftQuery, SortOrder};
pub use storage::{KeyValueStore, MemoryKeyValueStore};
pub use store::{snapshot_warnings, GiftStore};
pub use summary::{summary_by_recipient, GiftSummary, RecipientSummary};
pub use validation::{new_category, new_recipient, GiftDraft};
