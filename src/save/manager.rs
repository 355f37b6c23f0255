//! Save manager for inventory block files
//!
//! This module provides the SaveManager struct which handles:
//! - Loading and decoding inventory files
//! - Encoding and writing inventory files
//! - Timestamped backups of files before they are overwritten
//! - Backup cleanup and file listing

use super::codec;
use super::types::*;
use crate::inventory::Inventory;
use crate::item::ItemRegistry;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SaveManager {
    save_directory: PathBuf,
    keep_backups: usize,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>, keep_backups: usize) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
            keep_backups,
        })
    }

    pub fn save_directory(&self) -> &Path {
        &self.save_directory
    }

    /// Resolves a file name against the save directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.save_directory.join(path)
    }

    /// Load and decode an inventory file
    pub fn load(&self, path: impl AsRef<Path>, registry: &ItemRegistry) -> Result<DecodedInventory, SaveError> {
        let filepath = self.resolve(path);

        if !filepath.exists() {
            return Err(SaveError::NotFound(filepath));
        }

        let bytes = fs::read(&filepath)?;
        let decoded = codec::decode(&bytes, registry).map_err(|source| SaveError::Codec {
            path: filepath.clone(),
            source,
        })?;

        log::info!(
            "Loaded {} ({} slots, release {})",
            filepath.display(),
            decoded.inventory.len(),
            decoded.release
        );

        Ok(decoded)
    }

    /// Encode and write an inventory file
    ///
    /// An existing file is copied to a timestamped backup first, and old
    /// backups beyond the retention count are removed afterwards.
    pub fn save(&self, path: impl AsRef<Path>, inventory: &Inventory, release: i32) -> Result<PathBuf, SaveError> {
        let filepath = self.resolve(path);

        // Nothing is written if encoding fails
        let bytes = codec::encode(inventory, release).map_err(|source| SaveError::Codec {
            path: filepath.clone(),
            source,
        })?;

        if filepath.exists() {
            let backup = self.backup(&filepath)?;
            log::debug!("Backed up {} to {}", filepath.display(), backup.display());
        }

        fs::write(&filepath, bytes)?;
        log::info!("Inventory saved to: {}", filepath.display());

        self.cleanup_backups(&filepath)?;

        Ok(filepath)
    }

    /// Copies a file to `<stem>.<timestamp>.bak` beside it
    fn backup(&self, filepath: &Path) -> Result<PathBuf, SaveError> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%3f");
        let stem = file_stem(filepath);
        let backup_path = filepath.with_file_name(format!("{}.{}.bak", stem, timestamp));

        fs::copy(filepath, &backup_path)?;
        Ok(backup_path)
    }

    /// List all backups of a file, newest first
    pub fn list_backups(&self, path: impl AsRef<Path>) -> Result<Vec<PathBuf>, SaveError> {
        let filepath = self.resolve(path);
        let stem = file_stem(&filepath);
        let directory = filepath
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.save_directory.clone());

        let mut backups: Vec<PathBuf> = fs::read_dir(&directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|f| f.to_str())
                    .and_then(|name| name.strip_prefix(stem.as_str()))
                    .and_then(|rest| rest.strip_prefix('.'))
                    .and_then(|rest| rest.strip_suffix(".bak"))
                    .map(is_backup_timestamp)
                    .unwrap_or(false)
            })
            .collect();

        // Timestamps sort lexically, newest first
        backups.sort_by(|a, b| b.cmp(a));

        Ok(backups)
    }

    /// Delete old backups, keeping only the N most recent
    pub fn cleanup_backups(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        for backup in self.list_backups(path)?.iter().skip(self.keep_backups) {
            fs::remove_file(backup)?;
            log::debug!("Removed old backup {}", backup.display());
        }

        Ok(())
    }

    /// List all inventory files in the save directory, sorted by name
    pub fn list_inventories(&self) -> Result<Vec<PathBuf>, SaveError> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.save_directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(INVENTORY_EXTENSION))
            .collect();

        files.sort();

        Ok(files)
    }

    /// Check if an inventory file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path).exists()
    }
}

/// Matches the `%Y%m%d_%H%M%S%3f` shape written by `backup`
fn is_backup_timestamp(stamp: &str) -> bool {
    match stamp.split_once('_') {
        Some((date, time)) => {
            date.len() == 8
                && time.len() == 9
                && date.bytes().chain(time.bytes()).all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("inventory")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, ItemPrefix};

    fn registry() -> ItemRegistry {
        ItemRegistry::from_definitions([
            ItemDefinition::new(24, "Wooden Sword", 1),
            ItemDefinition::new(2, "Dirt Block", 999),
        ])
        .unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path(), 3).unwrap();
        let registry = registry();

        let mut inventory = Inventory::new(4);
        inventory.set_item(2, &registry, 24, 1, ItemPrefix::LEGENDARY).unwrap();

        let path = manager.save("hero.inv", &inventory, CURRENT_RELEASE).unwrap();
        assert_eq!(path, dir.path().join("hero.inv"));

        let loaded = manager.load("hero.inv", &registry).unwrap();
        assert_eq!(loaded.release, CURRENT_RELEASE);
        assert_eq!(loaded.inventory, inventory);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path(), 3).unwrap();

        assert!(matches!(
            manager.load("nobody.inv", &registry()),
            Err(SaveError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path(), 3).unwrap();
        fs::write(dir.path().join("broken.inv"), [1u8, 2, 3]).unwrap();

        match manager.load("broken.inv", &registry()) {
            Err(SaveError::Codec { source: CodecError::TruncatedHeader, .. }) => {}
            other => panic!("expected truncated header, got {:?}", other),
        }
    }

    #[test]
    fn test_overwrite_creates_backup() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path(), 3).unwrap();
        let inventory = Inventory::new(2);

        manager.save("hero.inv", &inventory, CURRENT_RELEASE).unwrap();
        assert!(manager.list_backups("hero.inv").unwrap().is_empty());

        manager.save("hero.inv", &inventory, CURRENT_RELEASE).unwrap();
        let backups = manager.list_backups("hero.inv").unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read(&backups[0]).unwrap(), fs::read(dir.path().join("hero.inv")).unwrap());
    }

    #[test]
    fn test_cleanup_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path(), 2).unwrap();
        for stamp in ["20240101_000000000", "20240102_000000000", "20240103_000000000"] {
            fs::write(dir.path().join(format!("hero.{}.bak", stamp)), b"old").unwrap();
        }
        fs::write(dir.path().join("other.20240101_000000000.bak"), b"old").unwrap();

        manager.cleanup_backups("hero.inv").unwrap();

        let remaining = manager.list_backups("hero.inv").unwrap();
        assert_eq!(
            remaining,
            vec![
                dir.path().join("hero.20240103_000000000.bak"),
                dir.path().join("hero.20240102_000000000.bak"),
            ]
        );
        assert!(dir.path().join("other.20240101_000000000.bak").exists());
    }

    #[test]
    fn test_backups_of_shared_stem_prefix_are_separate() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path(), 2).unwrap();
        fs::write(dir.path().join("hero.20240101_000000000.bak"), b"hero").unwrap();
        for stamp in ["20240102_000000000", "20240103_000000000"] {
            fs::write(dir.path().join(format!("hero.v2.{}.bak", stamp)), b"v2").unwrap();
        }
        fs::write(dir.path().join("hero.notes.bak"), b"?").unwrap();

        assert_eq!(
            manager.list_backups("hero.inv").unwrap(),
            vec![dir.path().join("hero.20240101_000000000.bak")]
        );
        assert_eq!(manager.list_backups("hero.v2.inv").unwrap().len(), 2);

        manager.cleanup_backups("hero.inv").unwrap();
        assert!(dir.path().join("hero.20240101_000000000.bak").exists());
        assert!(dir.path().join("hero.v2.20240102_000000000.bak").exists());
        assert!(dir.path().join("hero.v2.20240103_000000000.bak").exists());
    }

    #[test]
    fn test_list_inventories() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::new(dir.path().join("players"), 1).unwrap();
        let inventory = Inventory::new(1);

        manager.save("b.inv", &inventory, CURRENT_RELEASE).unwrap();
        manager.save("a.inv", &inventory, CURRENT_RELEASE).unwrap();
        fs::write(manager.resolve("notes.txt"), b"hi").unwrap();

        let files = manager.list_inventories().unwrap();
        assert_eq!(files, vec![manager.resolve("a.inv"), manager.resolve("b.inv")]);
        assert!(manager.exists("a.inv"));
    }
}
