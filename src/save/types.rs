//! Shared types for the inventory block codec
//!
//! This module defines the format constants, the decode result and the
//! error and warning types raised while reading or writing a block.

use crate::inventory::{Inventory, InventoryError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Oldest game release whose inventory block can be read
pub const MIN_SUPPORTED_RELEASE: i32 = 38;

/// First release that stores a favourite flag per slot
pub const FAVOURITE_RELEASE: i32 = 114;

/// Release written when creating new files
pub const CURRENT_RELEASE: i32 = 279;

/// Main inventory size: 50 item slots, 4 coin slots and 4 ammo slots
pub const PLAYER_INVENTORY_SLOTS: usize = 58;

/// File extension used for inventory block files
pub const INVENTORY_EXTENSION: &str = "inv";

/// A fully decoded inventory block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedInventory {
    /// Release number found in the block header
    pub release: i32,
    pub inventory: Inventory,
    /// Problems that were repaired while decoding
    pub warnings: Vec<DecodeWarning>,
}

/// A repaired problem in otherwise readable data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DecodeWarning {
    /// Persisted stack was above the item's max stack
    StackClamped {
        slot: usize,
        net_id: i32,
        persisted: i32,
        max_stack: i32,
    },

    /// Persisted stack was below zero
    NegativeStack {
        slot: usize,
        net_id: i32,
        persisted: i32,
    },

    /// Favourite byte was neither 0 nor 1; the slot is read as favourited
    InvalidFavourite { slot: usize, persisted: u8 },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::StackClamped { slot, net_id, persisted, max_stack } => write!(
                f,
                "slot {}: stack of item {} was {}, clamped to {}",
                slot, net_id, persisted, max_stack
            ),
            DecodeWarning::NegativeStack { slot, net_id, persisted } => write!(
                f,
                "slot {}: stack of item {} was {}, clamped to 0",
                slot, net_id, persisted
            ),
            DecodeWarning::InvalidFavourite { slot, persisted } => write!(
                f,
                "slot {}: favourite byte was {}, read as favourited",
                slot, persisted
            ),
        }
    }
}

/// Error types for decoding and encoding inventory blocks
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("input ends inside the block header")]
    TruncatedHeader,

    /// Input ran out partway through a slot record
    #[error("input ends inside slot {slot}")]
    TruncatedInput { slot: usize },

    #[error("release {0} is not supported")]
    UnsupportedRelease(i32),

    /// Releases before the favourite byte can't store the flag
    #[error("slot {slot} is favourited but release {release} has no favourite flag")]
    FavouriteUnsupported { slot: usize, release: i32 },

    #[error("{0} slots do not fit in one block")]
    TooManySlots(usize),

    #[error("unexpected data after the last slot at offset {offset}")]
    TrailingBytes { offset: u64 },

    #[error("binary error: {0}")]
    Binary(#[from] binrw::Error),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Error types for file-level save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Inventory file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Inventory file {}: {}", .path.display(), .source)]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}
