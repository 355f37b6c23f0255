// Inventory module
//
// A dense, slot-ordered snapshot of item instances as stored in one
// inventory block of a save file.

pub mod error;
pub mod inventory;

// Re-export main types
pub use error::InventoryError;
pub use inventory::Inventory;
