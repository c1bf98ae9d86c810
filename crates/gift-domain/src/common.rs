//! Shared traits implemented by every stored record.

use uuid::Uuid;

/// Exposes a stable identifier for entities kept in a collection.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Returns the position of the record with `id` inside `records`.
pub fn position_of<T: Identifiable>(records: &[T], id: Uuid) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
