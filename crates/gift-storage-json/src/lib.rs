//! gift-storage-json
//!
//! Filesystem [`KeyValueStore`]: one JSON file per slot, replaced atomically,
//! with timestamped backups of the previous file.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use gift_core::{CoreError, KeyValueStore};

const SLOT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Directories used by [`JsonSlotStorage`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
}

impl StoragePaths {
    /// `<root>/data` and `<root>/backups`.
    pub fn under(root: &Path) -> Self {
        Self {
            data_dir: root.join("data"),
            backup_dir: root.join("backups"),
        }
    }
}

/// A backup copy of a slot file.
#[derive(Debug, Clone)]
pub struct SlotBackupInfo {
    pub slot: String,
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct JsonSlotStorage {
    data_dir: PathBuf,
    backup_dir: PathBuf,
    retention: usize,
}

impl JsonSlotStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_dir)?;
        fs::create_dir_all(&paths.backup_dir)?;
        Ok(Self {
            data_dir: paths.data_dir,
            backup_dir: paths.backup_dir,
            retention: retention.max(1),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", canonical_name(slot), SLOT_EXTENSION))
    }

    /// Backups for `slot`, newest first.
    pub fn list_backups(&self, slot: &str) -> Result<Vec<SlotBackupInfo>, CoreError> {
        let dir = self.slot_backup_dir(slot);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_name(slot);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(SlotBackupInfo {
                    slot: slug.clone(),
                    id: file_name.to_string(),
                    created_at: parse_backup_name(file_name).map(|(stamp, _)| stamp),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_name(&info.id)));
        Ok(entries)
    }

    /// Copies the backup named `backup_id` over the live slot file.
    pub fn restore_backup(&self, slot: &str, backup_id: &str) -> Result<(), CoreError> {
        let source = self.slot_backup_dir(slot).join(backup_id);
        if !source.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup_id
            )));
        }
        let target = self.slot_path(slot);
        let tmp = tmp_path(&target);
        fs::copy(&source, &tmp)?;
        fs::rename(&tmp, &target)?;
        tracing::info!(slot, backup = backup_id, "slot restored from backup");
        Ok(())
    }

    pub fn delete_backup(&self, slot: &str, backup_id: &str) -> Result<(), CoreError> {
        let path = self.slot_backup_dir(slot).join(backup_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn slot_backup_dir(&self, slot: &str) -> PathBuf {
        self.backup_dir.join(canonical_name(slot))
    }

    fn backup_existing_file(&self, slot: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.slot_backup_dir(slot);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let target = unused_backup_path(&dir, &canonical_name(slot), &timestamp);
        fs::copy(path, &target)?;
        tracing::debug!(slot, backup = %target.display(), "slot backed up");
        self.prune_backups(slot)
    }

    fn prune_backups(&self, slot: &str) -> Result<(), CoreError> {
        for entry in self.list_backups(slot)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl KeyValueStore for JsonSlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key);
        self.backup_existing_file(key, &path)?;
        let tmp = tmp_path(&path);
        write_file(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(SLOT_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "slot".into()
    } else {
        sanitized
    }
}

/// First `<slug>_<stamp>[_<n>].json` in `dir` that does not exist yet.
fn unused_backup_path(dir: &Path, slug: &str, timestamp: &str) -> PathBuf {
    let mut path = dir.join(format!("{}_{}.{}", slug, timestamp, SLOT_EXTENSION));
    let mut counter = 1u32;
    while path.exists() {
        path = dir.join(format!(
            "{}_{}_{}.{}",
            slug, timestamp, counter, SLOT_EXTENSION
        ));
        counter += 1;
    }
    path
}

/// Timestamp and same-second counter encoded in a backup file name.
fn parse_backup_name(name: &str) -> Option<(DateTime<Utc>, u32)> {
    let trimmed = name.strip_suffix(&format!(".{}", SLOT_EXTENSION))?;
    let segments: Vec<&str> = trimmed.rsplitn(4, '_').collect();
    let (date, time, counter) = match segments.as_slice() {
        [time, date, ..] if is_digits(date, 8) && is_digits(time, 6) => (*date, *time, 0),
        [counter, time, date, ..] if is_digits(date, 8) && is_digits(time, 6) => {
            (*date, *time, counter.parse().ok()?)
        }
        _ => return None,
    };
    let naive = NaiveDateTime::parse_from_str(&format!("{}{}", date, time), "%Y%m%d%H%M%S").ok()?;
    Some((DateTime::from_naive_utc_and_offset(naive, Utc), counter))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
