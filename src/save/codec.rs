//! Binary codec for inventory blocks
//!
//! Binary layout (little endian):
//! ```text
//! [4 bytes]  release     (game release that wrote the block)
//! [2 bytes]  slot_count
//! [slot_count × slot record]
//!     net_id(4) + stack(4) + prefix(1) + favourite(1, release >= 114 only)
//! ```
//!
//! Decoding materializes every slot from the item registry and then lays
//! the persisted stack, prefix and favourite flag over it. Encoding writes
//! the same fields back in slot order, so a well-formed block survives a
//! decode/encode cycle byte for byte.

use std::io::{Cursor, Read, Seek, Write};

use binrw::{binrw, BinRead, BinWrite};

use super::types::*;
use crate::inventory::Inventory;
use crate::item::{ItemInstance, ItemPrefix, ItemRegistry};

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockHeader {
    release: i32,
    slot_count: u16,
}

#[binrw]
#[brw(little, import(has_favourite: bool))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SlotRecord {
    net_id: i32,
    stack: i32,
    prefix: u8,
    #[br(if(has_favourite))]
    #[bw(if(has_favourite))]
    favourite: u8,
}

impl SlotRecord {
    fn from_instance(instance: &ItemInstance) -> Self {
        SlotRecord {
            net_id: instance.net_id(),
            stack: instance.stack_size(),
            prefix: instance.prefix().0,
            favourite: u8::from(instance.is_favourite()),
        }
    }
}

fn has_favourite(release: i32) -> bool {
    release >= FAVOURITE_RELEASE
}

fn check_release(release: i32) -> Result<(), CodecError> {
    if release < MIN_SUPPORTED_RELEASE {
        return Err(CodecError::UnsupportedRelease(release));
    }
    Ok(())
}

/// Decodes a complete block, rejecting any bytes after the last slot
pub fn decode(bytes: &[u8], registry: &ItemRegistry) -> Result<DecodedInventory, CodecError> {
    let mut cursor = Cursor::new(bytes);
    let decoded = decode_from(&mut cursor, registry)?;

    let offset = cursor.position();
    if offset != bytes.len() as u64 {
        return Err(CodecError::TrailingBytes { offset });
    }

    Ok(decoded)
}

/// Decodes one block from a reader, leaving it positioned after the block
///
/// Nothing is returned unless every slot decodes: a truncated slot aborts
/// the whole block.
pub fn decode_from<R: Read + Seek>(
    reader: &mut R,
    registry: &ItemRegistry,
) -> Result<DecodedInventory, CodecError> {
    let header = BlockHeader::read(reader).map_err(|err| {
        if err.is_eof() {
            CodecError::TruncatedHeader
        } else {
            CodecError::Binary(err)
        }
    })?;
    check_release(header.release)?;

    let has_favourite = has_favourite(header.release);
    let slot_count = usize::from(header.slot_count);
    let mut instances = Vec::with_capacity(slot_count);
    let mut warnings = Vec::new();

    for slot in 0..slot_count {
        let record = SlotRecord::read_args(reader, (has_favourite,)).map_err(|err| {
            if err.is_eof() {
                CodecError::TruncatedInput { slot }
            } else {
                CodecError::Binary(err)
            }
        })?;

        let reported = warnings.len();
        instances.push(materialize_slot(registry, record, slot, &mut warnings));
        for warning in &warnings[reported..] {
            log::warn!("{}", warning);
        }
    }

    log::debug!(
        "Decoded {} slots (release {}, {} warnings)",
        slot_count,
        header.release,
        warnings.len()
    );

    Ok(DecodedInventory {
        release: header.release,
        inventory: Inventory::from_instances(instances)?,
        warnings,
    })
}

/// Turns one persisted record into an instance
///
/// Stacks of known items are clamped into 0..=max_stack. Unknown items
/// keep their persisted stack since there is no max to clamp against.
/// Every repair made is pushed onto `warnings`.
fn materialize_slot(
    registry: &ItemRegistry,
    record: SlotRecord,
    slot: usize,
    warnings: &mut Vec<DecodeWarning>,
) -> ItemInstance {
    let mut instance = ItemInstance::materialize(registry, record.net_id, slot);
    instance.set_prefix(ItemPrefix(record.prefix));
    instance.set_favourite(record.favourite != 0);

    if record.favourite > 1 {
        warnings.push(DecodeWarning::InvalidFavourite {
            slot,
            persisted: record.favourite,
        });
    }

    if !registry.contains(record.net_id) {
        instance.set_raw_stack_size(record.stack);
        return instance;
    }

    let stored = instance.set_stack_size(record.stack);
    if record.stack < 0 {
        warnings.push(DecodeWarning::NegativeStack {
            slot,
            net_id: record.net_id,
            persisted: record.stack,
        });
    } else if stored != record.stack {
        warnings.push(DecodeWarning::StackClamped {
            slot,
            net_id: record.net_id,
            persisted: record.stack,
            max_stack: stored,
        });
    }

    instance
}

/// Encodes an inventory into a new buffer
pub fn encode(inventory: &Inventory, release: i32) -> Result<Vec<u8>, CodecError> {
    let mut cursor = Cursor::new(Vec::new());
    encode_to(&mut cursor, inventory, release)?;
    Ok(cursor.into_inner())
}

/// Writes an inventory block in slot order
///
/// Fails before writing anything if a favourited slot can't be stored at
/// `release`.
pub fn encode_to<W: Write + Seek>(
    writer: &mut W,
    inventory: &Inventory,
    release: i32,
) -> Result<(), CodecError> {
    check_release(release)?;

    let slot_count = u16::try_from(inventory.len())
        .map_err(|_| CodecError::TooManySlots(inventory.len()))?;
    let has_favourite = has_favourite(release);

    if !has_favourite {
        if let Some(slot) = inventory.slots().iter().position(|instance| instance.is_favourite()) {
            return Err(CodecError::FavouriteUnsupported { slot, release });
        }
    }

    BlockHeader { release, slot_count }.write(writer)?;
    for instance in inventory.slots() {
        SlotRecord::from_instance(instance).write_args(writer, (has_favourite,))?;
    }

    Ok(())
}
