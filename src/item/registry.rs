use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use super::definition::ItemDefinition;

/// Item table bundled into the binary
const BUNDLED_ITEMS: &str = include_str!("../../data/items.json");

/// Errors raised while building the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two definitions share one NetId
    #[error("item {0} is defined more than once")]
    DuplicateIdentifier(i32),

    #[error("failed to read item table {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed item table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Central registry of all item definitions
///
/// This is the single source of truth for what items exist. It is built
/// once at startup and never mutated afterwards, so a shared reference can
/// be handed to any number of readers.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: HashMap<i32, ItemDefinition>,
}

impl ItemRegistry {
    /// Builds a registry from a list of definitions
    ///
    /// Fails on the first NetId that appears twice; nothing is overwritten.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ItemDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut items = HashMap::new();

        for definition in definitions {
            if items.contains_key(&definition.net_id) {
                return Err(RegistryError::DuplicateIdentifier(definition.net_id));
            }
            items.insert(definition.net_id, definition);
        }

        Ok(ItemRegistry { items })
    }

    /// Parses a JSON array of definitions
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<ItemDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Loads an item table from disk
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::from_json_str(&json)?;
        log::info!("Loaded {} item definitions from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Creates a registry from the item table bundled with the binary
    pub fn create_default() -> Result<Self, RegistryError> {
        let registry = Self::from_json_str(BUNDLED_ITEMS)?;
        log::debug!("Loaded {} bundled item definitions", registry.len());
        Ok(registry)
    }

    /// Gets an item definition by NetId
    ///
    /// Returns None if no item with this id exists. A miss is not an error.
    pub fn lookup(&self, net_id: i32) -> Option<&ItemDefinition> {
        self.items.get(&net_id)
    }

    /// Returns true if an item with this id exists
    pub fn contains(&self, net_id: i32) -> bool {
        self.items.contains_key(&net_id)
    }

    /// Finds a definition by display name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&ItemDefinition> {
        self.items
            .values()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns all item definitions (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}
