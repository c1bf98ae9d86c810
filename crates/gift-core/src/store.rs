//! The gift tracker's single source of truth.

use std::collections::{BTreeSet, HashMap};

use gift_domain::{common::position_of, Category, Gift, Identifiable, Recipient};
use uuid::Uuid;

use crate::{
    persistence::{self, LoadReport, Slot},
    storage::KeyValueStore,
    CoreError,
};

/// Owns the gift, recipient and category collections and persists each one
/// wholesale after every mutating command.
///
/// Commands never validate their input; use [`crate::validation`] first.
pub struct GiftStore {
    backend: Box<dyn KeyValueStore>,
    gifts: Vec<Gift>,
    recipients: Vec<Recipient>,
    categories: Vec<Category>,
    load_report: LoadReport,
    dirty: BTreeSet<Slot>,
}

impl GiftStore {
    /// Hydrates all three collections from `backend`.
    pub fn open(backend: impl KeyValueStore + 'static) -> Self {
        let mut store = Self {
            backend: Box::new(backend),
            gifts: Vec::new(),
            recipients: Vec::new(),
            categories: Vec::new(),
            load_report: LoadReport::default(),
            dirty: BTreeSet::new(),
        };
        store.reload();
        store
    }

    /// Re-reads every slot, discarding unsaved in-memory changes.
    pub fn reload(&mut self) {
        self.load_report = LoadReport::default();
        for slot in Slot::ALL {
            self.load_slot(slot);
        }
        tracing::info!(
            gifts = self.gifts.len(),
            recipients = self.recipients.len(),
            categories = self.categories.len(),
            clean = self.load_report.is_clean(),
            "gift store loaded"
        );
    }

    /// Re-reads `slot` only. Unsaved changes in other slots are kept.
    pub fn reload_slot(&mut self, slot: Slot) {
        self.load_slot(slot);
        tracing::info!(%slot, "slot reloaded");
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn gift(&self, id: Uuid) -> Option<&Gift> {
        self.gifts.iter().find(|gift| gift.id == id)
    }

    pub fn recipient(&self, id: Uuid) -> Option<&Recipient> {
        self.recipients.iter().find(|recipient| recipient.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn add_gift(&mut self, gift: Gift) -> Result<Uuid, CoreError> {
        let id = gift.id;
        self.gifts.push(gift);
        self.persist(Slot::Gifts)?;
        Ok(id)
    }

    pub fn add_recipient(&mut self, recipient: Recipient) -> Result<Uuid, CoreError> {
        let id = recipient.id;
        self.recipients.push(recipient);
        self.persist(Slot::Recipients)?;
        Ok(id)
    }

    pub fn add_category(&mut self, category: Category) -> Result<Uuid, CoreError> {
        let id = category.id;
        self.categories.push(category);
        self.persist(Slot::Categories)?;
        Ok(id)
    }

    /// Replaces the gift with the same id in place. Returns `Ok(false)`
    /// without writing when no gift has that id.
    pub fn update_gift(&mut self, gift: Gift) -> Result<bool, CoreError> {
        if !replace_by_id(&mut self.gifts, gift) {
            return Ok(false);
        }
        self.persist(Slot::Gifts)?;
        Ok(true)
    }

    /// Gifts keep the recipient snapshot they were saved with.
    pub fn update_recipient(&mut self, recipient: Recipient) -> Result<bool, CoreError> {
        if !replace_by_id(&mut self.recipients, recipient) {
            return Ok(false);
        }
        self.persist(Slot::Recipients)?;
        Ok(true)
    }

    /// Gifts keep the category snapshot they were saved with.
    pub fn update_category(&mut self, category: Category) -> Result<bool, CoreError> {
        if !replace_by_id(&mut self.categories, category) {
            return Ok(false);
        }
        self.persist(Slot::Categories)?;
        Ok(true)
    }

    /// Removes the gifts at `positions` (indices into [`Self::gifts`]).
    pub fn delete_gifts(&mut self, positions: &[usize]) -> Result<Vec<Gift>, CoreError> {
        let removed = remove_positions(&mut self.gifts, positions)?;
        if !removed.is_empty() {
            self.persist(Slot::Gifts)?;
        }
        Ok(removed)
    }

    /// Removes recipients by position. Gifts referencing them are left as is.
    pub fn delete_recipients(&mut self, positions: &[usize]) -> Result<Vec<Recipient>, CoreError> {
        let removed = remove_positions(&mut self.recipients, positions)?;
        if !removed.is_empty() {
            self.persist(Slot::Recipients)?;
        }
        Ok(removed)
    }

    /// Removes categories by position. Gifts referencing them are left as is.
    pub fn delete_categories(&mut self, positions: &[usize]) -> Result<Vec<Category>, CoreError> {
        let removed = remove_positions(&mut self.categories, positions)?;
        if !removed.is_empty() {
            self.persist(Slot::Categories)?;
        }
        Ok(removed)
    }

    /// True when the latest change to `slot` failed to persist.
    pub fn is_dirty(&self, slot: Slot) -> bool {
        self.dirty.contains(&slot)
    }

    /// Retries every slot whose last save failed.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        let pending: Vec<Slot> = self.dirty.iter().copied().collect();
        for slot in pending {
            self.persist(slot)?;
        }
        Ok(())
    }

    /// Gifts whose embedded recipient or category no longer matches a live record.
    pub fn warnings(&self) -> Vec<String> {
        snapshot_warnings(&self.gifts, &self.recipients, &self.categories)
    }

    fn load_slot(&mut self, slot: Slot) {
        let backend = self.backend.as_ref();
        let status = match slot {
            Slot::Gifts => {
                let load = persistence::load(backend, slot.as_str());
                self.gifts = load.records;
                load.status
            }
            Slot::Recipients => {
                let load = persistence::load(backend, slot.as_str());
                self.recipients = load.records;
                load.status
            }
            Slot::Categories => {
                let load = persistence::load(backend, slot.as_str());
                self.categories = load.records;
                load.status
            }
        };
        self.load_report.record(slot, status);
        self.dirty.remove(&slot);
    }

    fn persist(&mut self, slot: Slot) -> Result<(), CoreError> {
        let backend = self.backend.as_ref();
        let result = match slot {
            Slot::Gifts => persistence::save(backend, slot.as_str(), &self.gifts),
            Slot::Recipients => persistence::save(backend, slot.as_str(), &self.recipients),
            Slot::Categories => persistence::save(backend, slot.as_str(), &self.categories),
        };
        match result {
            Ok(()) => {
                self.dirty.remove(&slot);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%slot, error = %err, "save failed; change kept in memory only");
                self.dirty.insert(slot);
                Err(err)
            }
        }
    }
}

fn replace_by_id<T: Identifiable>(records: &mut [T], record: T) -> bool {
    match position_of(records, record.id()) {
        Some(index) => {
            records[index] = record;
            true
        }
        None => false,
    }
}

fn remove_positions<T>(records: &mut Vec<T>, positions: &[usize]) -> Result<Vec<T>, CoreError> {
    let len = records.len();
    let unique: BTreeSet<usize> = positions.iter().copied().collect();
    if let Some(&position) = unique.iter().find(|&&position| position >= len) {
        return Err(CoreError::PositionOutOfRange { position, len });
    }
    let mut removed: Vec<T> = unique
        .iter()
        .rev()
        .map(|&position| records.remove(position))
        .collect();
    removed.reverse();
    Ok(removed)
}

/// Detects gifts whose recipient/category snapshot is orphaned or stale.
pub fn snapshot_warnings(
    gifts: &[Gift],
    recipients: &[Recipient],
    categories: &[Category],
) -> Vec<String> {
    let recipient_names: HashMap<Uuid, &str> = recipients
        .iter()
        .map(|r| (r.id, r.name.as_str()))
        .collect();
    let category_names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();
    let mut warnings = Vec::new();

    for gift in gifts {
        match recipient_names.get(&gift.recipient.id) {
            None => warnings.push(format!(
                "gift {} references missing recipient {}",
                gift.id, gift.recipient.id
            )),
            Some(name) if *name != gift.recipient.name => warnings.push(format!(
                "gift {} has stale recipient name `{}` (now `{}`)",
                gift.id, gift.recipient.name, name
            )),
            Some(_) => {}
        }
        match category_names.get(&gift.category.id) {
            None => warnings.push(format!(
                "gift {} references missing category {}",
                gift.id, gift.category.id
            )),
            Some(name) if *name != gift.category.name => warnings.push(format!(
                "gift {} has stale category name `{}` (now `{}`)",
                gift.id, gift.category.name, name
            )),
            Some(_) => {}
        }
    }
    warnings
}
