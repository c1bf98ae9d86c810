//! gift-domain
//!
//! Pure domain models (Gift, Recipient, Category) and shared traits.
//! No I/O, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod gift;
pub mod recipient;

pub use category::*;
pub use common::*;
pub use gift::*;
pub use recipient::*;
