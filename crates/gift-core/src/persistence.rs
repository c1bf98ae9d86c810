//! Whole-collection persistence on top of a [`KeyValueStore`].
//!
//! Every save serialises the complete ordered collection as pretty-printed
//! JSON and overwrites the slot. Loads never fail: an absent slot yields an
//! empty collection, and undecodable or unreadable data yields an empty
//! collection together with a [`LoadStatus`] describing what was recovered.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::{storage::KeyValueStore, CoreError};

/// The fixed slots the gift tracker persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Gifts,
    Recipients,
    Categories,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Gifts, Slot::Recipients, Slot::Categories];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Gifts => "gifts",
            Slot::Recipients => "recipients",
            Slot::Categories => "categories",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    /// Stored text did not decode; the collection was replaced by an empty one.
    Corrupt { reason: String },
    /// The backend failed to read; the collection was replaced by an empty one.
    Unreadable { reason: String },
}

impl LoadStatus {
    /// True when stored data existed but could not be used.
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadStatus::Corrupt { .. } | LoadStatus::Unreadable { .. })
    }
}

/// Records plus how they were obtained.
#[derive(Debug, Clone)]
pub struct SlotLoad<T> {
    pub records: Vec<T>,
    pub status: LoadStatus,
}

impl<T> SlotLoad<T> {
    fn empty(status: LoadStatus) -> Self {
        Self {
            records: Vec::new(),
            status,
        }
    }
}

/// Per-slot statuses gathered while hydrating a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    entries: Vec<(Slot, LoadStatus)>,
}

impl LoadReport {
    pub fn record(&mut self, slot: Slot, status: LoadStatus) {
        self.entries.retain(|(existing, _)| *existing != slot);
        self.entries.push((slot, status));
    }

    pub fn status(&self, slot: Slot) -> Option<&LoadStatus> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == slot)
            .map(|(_, status)| status)
    }

    /// Slots whose stored data was discarded during load.
    pub fn recovered(&self) -> impl Iterator<Item = (Slot, &LoadStatus)> {
        self.entries
            .iter()
            .filter(|(_, status)| status.is_recovered())
            .map(|(slot, status)| (*slot, status))
    }

    pub fn is_clean(&self) -> bool {
        self.recovered().next().is_none()
    }
}

pub fn encode<T: Serialize>(records: &[T]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CoreError> {
    Ok(serde_json::from_str(text)?)
}

/// Serialises `records` and overwrites the value stored under `slot`.
pub fn save<T: Serialize>(
    backend: &dyn KeyValueStore,
    slot: &str,
    records: &[T],
) -> Result<(), CoreError> {
    let text = encode(records)?;
    backend.write(slot, &text)?;
    tracing::debug!(slot, records = records.len(), "collection saved");
    Ok(())
}

/// Reads the collection stored under `slot`, falling back to an empty one.
pub fn load<T: DeserializeOwned>(backend: &dyn KeyValueStore, slot: &str) -> SlotLoad<T> {
    let text = match backend.read(slot) {
        Ok(Some(text)) => text,
        Ok(None) => return SlotLoad::empty(LoadStatus::Missing),
        Err(err) => {
            tracing::warn!(slot, error = %err, "slot unreadable; starting with an empty collection");
            return SlotLoad::empty(LoadStatus::Unreadable {
                reason: err.to_string(),
            });
        }
    };
    match decode(&text) {
        Ok(records) => SlotLoad {
            records,
            status: LoadStatus::Loaded,
        },
        Err(err) => {
            tracing::warn!(slot, error = %err, "slot corrupt; starting with an empty collection");
            SlotLoad::empty(LoadStatus::Corrupt {
                reason: err.to_string(),
            })
        }
    }
}
