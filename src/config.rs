//! Editor configuration
//!
//! Loaded from a JSON file; every key is optional:
//!
//! ```json
//! {
//!     "items_path": "data/items.json",
//!     "save_directory": "/home/me/.local/share/Terraria/Players",
//!     "backup_keep_count": 5,
//!     "release": 279
//! }
//! ```

use crate::item::{ItemRegistry, RegistryError};
use crate::save::CURRENT_RELEASE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// External item table; the bundled table is used when unset
    pub items_path: Option<PathBuf>,

    /// Directory that relative inventory paths are resolved against
    pub save_directory: PathBuf,

    /// How many backups to keep per inventory file
    pub backup_keep_count: usize,

    /// Release written when creating new files
    pub release: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            items_path: None,
            save_directory: default_save_directory(),
            backup_keep_count: 5,
            release: CURRENT_RELEASE,
        }
    }
}

/// The game's player directory, or `./saves` if there is no documents folder
fn default_save_directory() -> PathBuf {
    dirs::document_dir()
        .map(|p| p.join("My Games").join("Terraria").join("Players"))
        .unwrap_or_else(|| PathBuf::from("./saves"))
}

impl EditorConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EditorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads the given file, or falls back to defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Builds the item registry this configuration points at
    pub fn build_registry(&self) -> Result<ItemRegistry, RegistryError> {
        match &self.items_path {
            Some(path) => ItemRegistry::load_from_file(path),
            None => ItemRegistry::create_default(),
        }
    }
}
