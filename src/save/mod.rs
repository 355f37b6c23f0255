//! Save/Load system for inventory blocks
//!
//! This module provides:
//! - A versioned binary codec for inventory blocks (`codec`)
//! - Format constants, decode results, warnings and errors (`types`)
//! - SaveManager for file operations and backups (`manager`)
//!
//! # Example Usage
//!
//! ```ignore
//! let registry = ItemRegistry::create_default()?;
//! let manager = SaveManager::new("./saves", 5)?;
//!
//! let mut decoded = manager.load("hero.inv", &registry)?;
//! decoded.inventory.set_item(0, &registry, 24, 1, ItemPrefix::LEGENDARY)?;
//! manager.save("hero.inv", &decoded.inventory, decoded.release)?;
//! ```

pub mod codec;
pub mod manager;
pub mod types;

// Re-export commonly used types
pub use codec::{decode, decode_from, encode, encode_to};
pub use manager::SaveManager;
pub use types::*;
