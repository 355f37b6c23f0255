use thiserror::Error;

/// Errors that can occur during inventory operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Slot index out of bounds
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    /// NetId doesn't exist in the registry
    #[error("Unknown item id: {0}")]
    UnknownItem(i32),

    /// Two instances claim the same slot
    #[error("Slot {0} is used more than once")]
    DuplicateSlot(usize),

    /// A gap in the slot sequence
    #[error("Slot {0} is missing")]
    MissingSlot(usize),
}
