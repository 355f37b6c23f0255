use crate::item::{ItemInstance, ItemPrefix, ItemRegistry};
use super::error::InventoryError;
use serde::Serialize;

/// Slot container for one inventory block
///
/// Slots are dense: the instance at position `i` always has slot index
/// `i`, so slot indices are unique and the order matches the byte order
/// of the save file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inventory {
    slots: Vec<ItemInstance>,
}

impl Inventory {
    /// Creates an inventory of `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        Inventory {
            slots: (0..capacity).map(ItemInstance::empty).collect(),
        }
    }

    /// Builds an inventory from instances in any order
    ///
    /// The slot indices must cover `0..n` exactly once.
    pub fn from_instances(mut instances: Vec<ItemInstance>) -> Result<Self, InventoryError> {
        instances.sort_by_key(|instance| instance.slot_index());

        for (position, instance) in instances.iter().enumerate() {
            let index = instance.slot_index();
            if index < position {
                return Err(InventoryError::DuplicateSlot(index));
            }
            if index > position {
                return Err(InventoryError::MissingSlot(position));
            }
        }

        Ok(Inventory { slots: instances })
    }

    /// Number of slots (empty ones included)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the inventory has no items
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_empty())
    }

    pub fn get(&self, slot_index: usize) -> Option<&ItemInstance> {
        self.slots.get(slot_index)
    }

    pub fn get_mut(&mut self, slot_index: usize) -> Option<&mut ItemInstance> {
        self.slots.get_mut(slot_index)
    }

    /// Returns all slots in slot order
    pub fn slots(&self) -> &[ItemInstance] {
        &self.slots
    }

    /// Puts a fresh item into a slot, replacing whatever was there
    ///
    /// The stack is clamped to the item's max stack. The favourite flag is
    /// reset.
    pub fn set_item(
        &mut self,
        slot_index: usize,
        item_registry: &ItemRegistry,
        net_id: i32,
        stack_size: i32,
        prefix: ItemPrefix,
    ) -> Result<&ItemInstance, InventoryError> {
        if slot_index >= self.slots.len() {
            return Err(InventoryError::InvalidSlot(slot_index));
        }
        if !item_registry.contains(net_id) {
            return Err(InventoryError::UnknownItem(net_id));
        }

        let mut instance = ItemInstance::materialize(item_registry, net_id, slot_index);
        instance.set_stack_size(stack_size);
        instance.set_prefix(prefix);

        self.slots[slot_index] = instance;
        Ok(&self.slots[slot_index])
    }

    pub fn set_favourite(&mut self, slot_index: usize, favourite: bool) -> Result<(), InventoryError> {
        let slot = self
            .slots
            .get_mut(slot_index)
            .ok_or(InventoryError::InvalidSlot(slot_index))?;
        slot.set_favourite(favourite);
        Ok(())
    }

    /// Empties one slot
    pub fn clear_slot(&mut self, slot_index: usize) -> Result<(), InventoryError> {
        let slot = self
            .slots
            .get_mut(slot_index)
            .ok_or(InventoryError::InvalidSlot(slot_index))?;
        slot.clear();
        Ok(())
    }

    /// Counts how many of a specific item are in the inventory
    ///
    /// Summed as i64, since unknown items keep their raw persisted stacks.
    pub fn count_item(&self, net_id: i32) -> i64 {
        self.iter_items()
            .filter(|slot| slot.net_id() == net_id)
            .map(|slot| i64::from(slot.stack_size()))
            .sum()
    }

    /// Finds the first empty slot index
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_empty())
    }

    /// Adds items to the inventory
    ///
    /// Returns the number of items that couldn't fit (overflow).
    ///
    /// # Strategy
    /// 1. Top up existing stacks of the same item
    /// 2. Create new stacks in empty slots
    /// 3. Return overflow if inventory is full
    pub fn add_item(
        &mut self,
        net_id: i32,
        quantity: i32,
        item_registry: &ItemRegistry,
    ) -> Result<i32, InventoryError> {
        if quantity <= 0 {
            return Ok(0);
        }

        let max_stack = item_registry
            .lookup(net_id)
            .ok_or(InventoryError::UnknownItem(net_id))?
            .max_stack;
        let mut remaining = quantity;

        // Phase 1: existing stacks
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.net_id() == net_id && slot.stack_size() < max_stack {
                remaining = slot.add(remaining);
            }
        }

        // Phase 2: empty slots
        while remaining > 0 && max_stack > 0 {
            let Some(empty_index) = self.find_empty_slot() else {
                break;
            };

            // Empty slots may still carry a stored prefix or favourite byte
            let slot = &mut self.slots[empty_index];
            *slot = ItemInstance::materialize(item_registry, net_id, empty_index);
            remaining -= slot.set_stack_size(remaining);
        }

        Ok(remaining)
    }

    /// Returns an iterator over all non-empty slots
    pub fn iter_items(&self) -> impl Iterator<Item = &ItemInstance> {
        self.slots.iter().filter(|slot| !slot.is_empty())
    }

    pub fn into_instances(self) -> Vec<ItemInstance> {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDefinition;

    fn registry() -> ItemRegistry {
        ItemRegistry::from_definitions([
            ItemDefinition::new(24, "Wooden Sword", 1),
            ItemDefinition::new(2, "Dirt Block", 999),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_inventory_is_empty() {
        let inventory = Inventory::new(10);
        assert_eq!(inventory.len(), 10);
        assert!(inventory.is_empty());
        assert_eq!(inventory.get(9).map(|slot| slot.slot_index()), Some(9));
    }

    #[test]
    fn test_from_instances_sorts_by_slot() {
        let registry = registry();
        let instances = vec![
            ItemInstance::materialize(&registry, 2, 1),
            ItemInstance::materialize(&registry, 24, 0),
        ];

        let inventory = Inventory::from_instances(instances).unwrap();
        assert_eq!(inventory.get(0).unwrap().net_id(), 24);
        assert_eq!(inventory.get(1).unwrap().net_id(), 2);
    }

    #[test]
    fn test_from_instances_rejects_duplicates_and_gaps() {
        let duplicate = vec![ItemInstance::empty(0), ItemInstance::empty(0)];
        assert_eq!(
            Inventory::from_instances(duplicate),
            Err(InventoryError::DuplicateSlot(0))
        );

        let gap = vec![ItemInstance::empty(0), ItemInstance::empty(2)];
        assert_eq!(Inventory::from_instances(gap), Err(InventoryError::MissingSlot(1)));
    }

    #[test]
    fn test_set_item() {
        let registry = registry();
        let mut inventory = Inventory::new(5);

        let slot = inventory.set_item(3, &registry, 2, 5000, ItemPrefix::NONE).unwrap();
        assert_eq!(slot.stack_size(), 999);
        assert_eq!(slot.slot_index(), 3);

        assert_eq!(
            inventory.set_item(5, &registry, 2, 1, ItemPrefix::NONE).unwrap_err(),
            InventoryError::InvalidSlot(5)
        );
        assert_eq!(
            inventory.set_item(0, &registry, 77, 1, ItemPrefix::NONE).unwrap_err(),
            InventoryError::UnknownItem(77)
        );
    }

    #[test]
    fn test_clear_and_favourite() {
        let registry = registry();
        let mut inventory = Inventory::new(2);
        inventory.set_item(1, &registry, 24, 1, ItemPrefix::LEGENDARY).unwrap();
        inventory.set_favourite(1, true).unwrap();
        assert!(inventory.get(1).unwrap().is_favourite());

        inventory.clear_slot(1).unwrap();
        assert!(inventory.is_empty());
        assert_eq!(inventory.clear_slot(2), Err(InventoryError::InvalidSlot(2)));
    }

    #[test]
    fn test_add_item_stacks_then_fills() {
        let registry = registry();
        let mut inventory = Inventory::new(3);
        inventory.set_item(1, &registry, 2, 990, ItemPrefix::NONE).unwrap();

        let overflow = inventory.add_item(2, 1500, &registry).unwrap();
        assert_eq!(overflow, 0);
        assert_eq!(inventory.get(1).unwrap().stack_size(), 999);
        assert_eq!(inventory.get(0).unwrap().stack_size(), 999);
        assert_eq!(inventory.get(2).unwrap().stack_size(), 492);
        assert_eq!(inventory.count_item(2), 2490);
    }

    #[test]
    fn test_add_item_overflow_when_full() {
        let registry = registry();
        let mut inventory = Inventory::new(2);

        let overflow = inventory.add_item(24, 5, &registry).unwrap();
        assert_eq!(overflow, 3);
        assert_eq!(inventory.count_item(24), 2);
    }

    #[test]
    fn test_add_item_huge_quantity() {
        let registry = registry();
        let mut inventory = Inventory::new(2);
        inventory.set_item(0, &registry, 2, 990, ItemPrefix::NONE).unwrap();

        let overflow = inventory.add_item(2, i32::MAX, &registry).unwrap();
        assert_eq!(overflow, i32::MAX - 9 - 999);
        assert_eq!(inventory.count_item(2), 1998);
    }

    #[test]
    fn test_count_item_large_unknown_stacks() {
        let registry = registry();
        let mut first = ItemInstance::materialize(&registry, 77, 0);
        first.set_raw_stack_size(i32::MAX);
        let mut second = ItemInstance::materialize(&registry, 77, 1);
        second.set_raw_stack_size(i32::MAX - 1);

        let inventory = Inventory::from_instances(vec![first, second]).unwrap();
        assert_eq!(inventory.count_item(77), 2 * i64::from(i32::MAX) - 1);
    }

    #[test]
    fn test_add_item_resets_stale_empty_slot() {
        let registry = registry();
        let mut stale = ItemInstance::empty(0);
        stale.set_prefix(ItemPrefix(5));
        stale.set_favourite(true);
        let mut inventory = Inventory::from_instances(vec![stale]).unwrap();

        assert_eq!(inventory.add_item(2, 10, &registry).unwrap(), 0);
        let slot = inventory.get(0).unwrap();
        assert_eq!(slot.net_id(), 2);
        assert_eq!(slot.stack_size(), 10);
        assert_eq!(slot.prefix(), ItemPrefix::NONE);
        assert!(!slot.is_favourite());
    }
}
