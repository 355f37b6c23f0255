use serde::{Serialize, Deserialize};
use super::properties::{AnimationStyle, ItemColor, ProjectileType, Rarity};

/// The canonical stats of an item type
///
/// One definition exists per NetId in the ItemRegistry. Every ItemInstance
/// carries a copy of the definition matching its NetId, and ItemInstance
/// layers the per-slot values (stack, prefix, favourite) on top.
///
/// Field names in the item table follow the game data dump, including the
/// legacy `is_meele_weapon` spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    /// Unique identifier (NetId). 0 marks an empty slot.
    pub net_id: i32,

    /// Display name shown in the editor
    pub name: String,

    pub damage: i32,
    pub knockback: f32,
    pub mana_cost: i32,
    pub use_time: i32,
    pub animation_time: i32,
    pub animation_style: AnimationStyle,

    /// Maximum stack size (1 = non-stackable, 999 = typical material)
    pub max_stack: i32,

    pub width: i32,
    pub height: i32,

    // Tool and fishing power ratings
    pub pickaxe_power: i32,
    pub axe_power: i32,
    pub hammer_power: i32,
    pub bait_power: i32,
    pub fishing_power: i32,

    /// Ammo category this item provides
    pub ammo_type: i32,
    /// Ammo category this item consumes
    pub use_ammo: i32,

    pub projectile_type: ProjectileType,
    pub projectile_speed: f32,
    pub scale: f32,

    #[serde(rename = "is_magic_weapon")]
    pub is_magic: bool,
    #[serde(rename = "is_meele_weapon", alias = "is_melee_weapon")]
    pub is_melee: bool,
    #[serde(rename = "is_ranged_weapon")]
    pub is_ranged: bool,
    #[serde(rename = "is_thrown_weapon")]
    pub is_thrown: bool,
    pub is_accessory: bool,
    pub is_auto_reuse: bool,

    pub rarity: Rarity,
    pub color: ItemColor,
}

impl ItemDefinition {
    /// Creates a definition with the given id, name and max stack
    ///
    /// Every other stat starts at zero; use struct update syntax to fill
    /// in the rest.
    pub fn new(net_id: i32, name: impl Into<String>, max_stack: i32) -> Self {
        ItemDefinition {
            net_id,
            name: name.into(),
            max_stack,
            ..Default::default()
        }
    }

    /// Returns true if this definition describes a weapon of any class
    pub fn is_weapon(&self) -> bool {
        self.damage > 0 && (self.is_magic || self.is_melee || self.is_ranged || self.is_thrown)
    }

    /// Returns true if this item is a pickaxe, axe or hammer
    pub fn is_tool(&self) -> bool {
        self.pickaxe_power > 0 || self.axe_power > 0 || self.hammer_power > 0
    }

    /// Returns true if more than one of these fit in a slot
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_game_data_keys() {
        let json = r#"{
            "net_id": 24,
            "name": "Wooden Sword",
            "damage": 7,
            "knockback": 5.0,
            "use_time": 25,
            "animation_time": 25,
            "animation_style": 1,
            "max_stack": 1,
            "is_meele_weapon": true,
            "rarity": 0,
            "color": { "r": 0, "g": 0, "b": 0 },
            "prefix": 0,
            "stack_size": 1
        }"#;

        let definition: ItemDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.net_id, 24);
        assert_eq!(definition.name, "Wooden Sword");
        assert_eq!(definition.animation_style, AnimationStyle::Swing);
        assert!(definition.is_melee);
        assert!(definition.is_weapon());
        assert!(!definition.is_tool());
        // Missing keys fall back to zero
        assert_eq!(definition.pickaxe_power, 0);
        assert_eq!(definition.scale, 0.0);
    }

    #[test]
    fn test_melee_alias() {
        let definition: ItemDefinition =
            serde_json::from_str(r#"{"net_id": 1, "is_melee_weapon": true}"#).unwrap();
        assert!(definition.is_melee);
    }

    #[test]
    fn test_stackable() {
        assert!(ItemDefinition::new(2, "Dirt Block", 999).is_stackable());
        assert!(!ItemDefinition::new(24, "Wooden Sword", 1).is_stackable());
    }
}
