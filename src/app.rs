//! Process-level wiring: configuration → JSON slot storage → gift store.

use gift_config::{Config, ConfigManager};
use gift_core::{GiftDraft, GiftQuery, GiftStore, GiftSummary, Slot, SortOrder};
use gift_domain::Gift;
use gift_storage_json::{JsonSlotStorage, SlotBackupInfo, StoragePaths};
use uuid::Uuid;

use crate::errors::Result;

/// One open gift tracker. Construct it once at startup and hand out
/// references; there is no global instance.
pub struct GiftTracker {
    config: Config,
    storage: JsonSlotStorage,
    store: GiftStore,
}

impl GiftTracker {
    /// Opens the tracker described by `config`. Its `log_filter` applies when
    /// this is the first call to initialize tracing.
    pub fn open(config: Config) -> Result<Self> {
        crate::init_with_filter(config.log_filter.as_deref());
        let paths = StoragePaths {
            data_dir: config.resolve_data_dir(),
            backup_dir: config.resolve_backup_dir(),
        };
        let storage = JsonSlotStorage::with_retention(paths, config.backup_retention)?;
        let store = GiftStore::open(storage.clone());
        for (slot, status) in store.load_report().recovered() {
            tracing::warn!(%slot, ?status, "slot recovered as empty; backups may hold older data");
        }
        tracing::info!(data_dir = %storage.data_dir().display(), "gift tracker opened");
        Ok(Self {
            config,
            storage,
            store,
        })
    }

    pub fn open_with_manager(manager: &ConfigManager) -> Result<Self> {
        let config = manager.load()?;
        Self::open(config)
    }

    /// Opens using the config file in the application data directory.
    pub fn open_default() -> Result<Self> {
        Self::open_with_manager(&ConfigManager::default_location())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &GiftStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GiftStore {
        &mut self.store
    }

    pub fn default_order(&self) -> SortOrder {
        SortOrder::from_ascending(self.config.default_sort_ascending)
    }

    /// Gift list filtered by `search`, in the configured default order.
    pub fn gift_list(&self, search: &str) -> Vec<&Gift> {
        GiftQuery::new(search, self.default_order()).run(self.store.gifts())
    }

    pub fn summary(&self) -> GiftSummary {
        GiftSummary::from_gifts(self.store.gifts())
    }

    /// Validates `draft` and appends the resulting gift.
    pub fn add_gift(&mut self, draft: &GiftDraft) -> Result<Uuid> {
        let gift = draft.validate()?;
        Ok(self.store.add_gift(gift)?)
    }

    /// Validates `draft` as a replacement for gift `id`. Returns `false` when
    /// no such gift exists.
    pub fn edit_gift(&mut self, id: Uuid, draft: &GiftDraft) -> Result<bool> {
        let gift = draft.validate_update(id)?;
        Ok(self.store.update_gift(gift)?)
    }

    pub fn add_recipient(&mut self, name: &str) -> Result<Uuid> {
        let recipient = gift_core::new_recipient(name)?;
        Ok(self.store.add_recipient(recipient)?)
    }

    pub fn add_category(&mut self, name: &str) -> Result<Uuid> {
        let category = gift_core::new_category(name)?;
        Ok(self.store.add_category(category)?)
    }

    pub fn backups(&self, slot: Slot) -> Result<Vec<SlotBackupInfo>> {
        Ok(self.storage.list_backups(slot.as_str())?)
    }

    /// Restores `slot` from a backup and reloads that slot only.
    pub fn restore_backup(&mut self, slot: Slot, backup_id: &str) -> Result<()> {
        self.storage.restore_backup(slot.as_str(), backup_id)?;
        self.store.reload_slot(slot);
        Ok(())
    }
}
