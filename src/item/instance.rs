use serde::Serialize;
use super::definition::ItemDefinition;
use super::properties::ItemPrefix;
use super::registry::ItemRegistry;

/// An item sitting in one inventory slot
///
/// This is a copy of an ItemDefinition plus the values that belong to the
/// slot itself: stack size, prefix, favourite flag and slot index. The
/// copied stats are only ever written by `apply_defaults`, which keeps them
/// in step with the registry entry for `net_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemInstance {
    #[serde(flatten)]
    definition: ItemDefinition,

    /// How many of this item (0 to max_stack)
    stack_size: i32,

    prefix: ItemPrefix,
    favourite: bool,

    /// Position in the owning inventory
    slot_index: usize,
}

impl ItemInstance {
    /// Creates an empty slot (NetId 0, every stat zero)
    pub fn empty(slot_index: usize) -> Self {
        ItemInstance {
            slot_index,
            ..Default::default()
        }
    }

    /// Builds the instance for `net_id` with registry defaults applied
    ///
    /// Unknown ids produce a zeroed instance that still carries `net_id`,
    /// so items the table doesn't know about are not lost.
    pub fn materialize(registry: &ItemRegistry, net_id: i32, slot_index: usize) -> Self {
        let mut instance = Self::empty(slot_index);

        if !instance.apply_defaults(registry, net_id) {
            instance.definition.net_id = net_id;
        }

        instance
    }

    /// Copies the registry definition for `net_id` onto this instance
    ///
    /// Every definition field (NetId included) is overwritten; prefix,
    /// favourite flag and slot index are left alone, and the stack size is
    /// clamped into the new item's 0..=max_stack. Returns false and leaves
    /// the instance untouched when the id is unknown.
    pub fn apply_defaults(&mut self, registry: &ItemRegistry, net_id: i32) -> bool {
        let Some(definition) = registry.lookup(net_id) else {
            return false;
        };

        self.definition.clone_from(definition);
        self.set_stack_size(self.stack_size);
        true
    }

    /// Returns the copied definition stats
    pub fn definition(&self) -> &ItemDefinition {
        &self.definition
    }

    pub fn net_id(&self) -> i32 {
        self.definition.net_id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn max_stack(&self) -> i32 {
        self.definition.max_stack
    }

    pub fn stack_size(&self) -> i32 {
        self.stack_size
    }

    pub fn prefix(&self) -> ItemPrefix {
        self.prefix
    }

    pub fn is_favourite(&self) -> bool {
        self.favourite
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    /// Returns true if the slot holds nothing
    pub fn is_empty(&self) -> bool {
        self.definition.net_id == 0
    }

    /// Sets the stack size, clamped to 0..=max_stack
    ///
    /// Returns the value actually stored.
    pub fn set_stack_size(&mut self, stack_size: i32) -> i32 {
        self.stack_size = stack_size.clamp(0, self.max_stack().max(0));
        self.stack_size
    }

    pub fn set_prefix(&mut self, prefix: ItemPrefix) {
        self.prefix = prefix;
    }

    pub fn set_favourite(&mut self, favourite: bool) {
        self.favourite = favourite;
    }

    /// Stores a persisted stack size without clamping
    ///
    /// Only the codec uses this, for ids the registry doesn't know.
    pub(crate) fn set_raw_stack_size(&mut self, stack_size: i32) {
        self.stack_size = stack_size;
    }

    /// Adds items to this stack
    ///
    /// Returns how many items couldn't fit (overflow)
    pub fn add(&mut self, amount: i32) -> i32 {
        let total = i64::from(self.stack_size) + i64::from(amount);
        let max_stack = i64::from(self.max_stack());

        if total <= max_stack {
            self.stack_size = total.max(0) as i32;
            0
        } else {
            self.stack_size = self.max_stack();
            i32::try_from(total - max_stack).unwrap_or(i32::MAX)
        }
    }

    /// Empties the slot, keeping its index
    pub fn clear(&mut self) {
        *self = Self::empty(self.slot_index);
    }
}
