// Item system module
//
// This module provides the item data model, including:
// - Item definitions and their enumerated properties
// - Item registry for centralized lookup by NetId
// - Item instances that occupy inventory slots

pub mod definition;
pub mod instance;
pub mod properties;
pub mod registry;

// Re-export main types for convenient access
pub use definition::ItemDefinition;
pub use instance::ItemInstance;
pub use properties::{AnimationStyle, ItemColor, ItemPrefix, ProjectileType, Rarity};
pub use registry::{ItemRegistry, RegistryError};
