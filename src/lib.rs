//! Inventory editing core for Terraria player saves
//!
//! - `item`: item definitions, the item registry and slot instances
//! - `inventory`: dense slot-ordered inventories
//! - `save`: the binary inventory block codec and file management
//! - `config`: editor configuration

pub mod config;
pub mod inventory;
pub mod item;
pub mod save;

pub use config::EditorConfig;
pub use inventory::{Inventory, InventoryError};
pub use item::{ItemDefinition, ItemInstance, ItemPrefix, ItemRegistry, RegistryError};
pub use save::{CodecError, DecodeWarning, DecodedInventory, SaveError, SaveManager};
