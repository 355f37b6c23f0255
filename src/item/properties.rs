use serde::{Serialize, Deserialize};
use std::fmt;

/// How an item is held and animated while in use
///
/// Stored as the game's numeric use style in item tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AnimationStyle {
    #[default]
    None,
    Swing,
    Eat,
    Stab,
    HoldUp,
    Shoot,
}

impl TryFrom<i32> for AnimationStyle {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AnimationStyle::None),
            1 => Ok(AnimationStyle::Swing),
            2 => Ok(AnimationStyle::Eat),
            3 => Ok(AnimationStyle::Stab),
            4 => Ok(AnimationStyle::HoldUp),
            5 => Ok(AnimationStyle::Shoot),
            other => Err(format!("unknown animation style: {}", other)),
        }
    }
}

impl From<AnimationStyle> for i32 {
    fn from(style: AnimationStyle) -> Self {
        match style {
            AnimationStyle::None => 0,
            AnimationStyle::Swing => 1,
            AnimationStyle::Eat => 2,
            AnimationStyle::Stab => 3,
            AnimationStyle::HoldUp => 4,
            AnimationStyle::Shoot => 5,
        }
    }
}

/// Value tier of an item, which also decides its name colour in game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rarity {
    Expert,
    Quest,
    Gray,
    #[default]
    White,
    Blue,
    Green,
    Orange,
    LightRed,
    Pink,
    LightPurple,
    Lime,
    Yellow,
    Cyan,
    Red,
    Purple,
}

impl TryFrom<i32> for Rarity {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let rarity = match value {
            -12 => Rarity::Expert,
            -11 => Rarity::Quest,
            -1 => Rarity::Gray,
            0 => Rarity::White,
            1 => Rarity::Blue,
            2 => Rarity::Green,
            3 => Rarity::Orange,
            4 => Rarity::LightRed,
            5 => Rarity::Pink,
            6 => Rarity::LightPurple,
            7 => Rarity::Lime,
            8 => Rarity::Yellow,
            9 => Rarity::Cyan,
            10 => Rarity::Red,
            11 => Rarity::Purple,
            other => return Err(format!("unknown rarity: {}", other)),
        };
        Ok(rarity)
    }
}

impl From<Rarity> for i32 {
    fn from(rarity: Rarity) -> Self {
        match rarity {
            Rarity::Expert => -12,
            Rarity::Quest => -11,
            Rarity::Gray => -1,
            Rarity::White => 0,
            Rarity::Blue => 1,
            Rarity::Green => 2,
            Rarity::Orange => 3,
            Rarity::LightRed => 4,
            Rarity::Pink => 5,
            Rarity::LightPurple => 6,
            Rarity::Lime => 7,
            Rarity::Yellow => 8,
            Rarity::Cyan => 9,
            Rarity::Red => 10,
            Rarity::Purple => 11,
        }
    }
}

/// Prefix names indexed by prefix byte (0 is "no prefix")
///
/// The game reuses some names for different weapon classes, hence the
/// repeated entries.
const PREFIX_NAMES: [&str; 84] = [
    "None", "Large", "Massive", "Dangerous", "Savage", "Sharp", "Pointy", "Tiny",
    "Terrible", "Small", "Dull", "Unhappy", "Bulky", "Shameful", "Heavy", "Light",
    "Sighted", "Rapid", "Hasty", "Intimidating", "Deadly", "Staunch", "Awful", "Lethargic",
    "Awkward", "Powerful", "Mystic", "Adept", "Masterful", "Inept", "Ignorant", "Deranged",
    "Intense", "Taboo", "Celestial", "Furious", "Keen", "Superior", "Forceful", "Broken",
    "Damaged", "Shoddy", "Quick", "Deadly", "Agile", "Nimble", "Murderous", "Slow",
    "Sluggish", "Lazy", "Annoying", "Nasty", "Manic", "Hurtful", "Strong", "Unpleasant",
    "Weak", "Ruthless", "Frenzying", "Godly", "Demonic", "Zealous", "Hard", "Guarding",
    "Armored", "Warding", "Arcane", "Precise", "Lucky", "Jagged", "Spiked", "Angry",
    "Menacing", "Brisk", "Fleeting", "Hasty", "Quick", "Wild", "Rash", "Intrepid",
    "Violent", "Legendary", "Unreal", "Mythical",
];

/// Modifier rolled onto a single item instance
///
/// Kept as the raw byte so that prefixes added by newer game versions
/// survive a decode/encode cycle untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemPrefix(pub u8);

impl ItemPrefix {
    pub const NONE: ItemPrefix = ItemPrefix(0);
    pub const LEGENDARY: ItemPrefix = ItemPrefix(81);
    pub const MYTHICAL: ItemPrefix = ItemPrefix(83);

    /// Returns the display name, or None for bytes the table doesn't cover
    pub fn name(self) -> Option<&'static str> {
        PREFIX_NAMES.get(self.0 as usize).copied()
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the prefix byte is one the game defines
    pub fn is_known(self) -> bool {
        (self.0 as usize) < PREFIX_NAMES.len()
    }
}

impl fmt::Display for ItemPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Unknown({})", self.0),
        }
    }
}

/// Projectile spawned when the item is used (0 = none)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectileType(pub i32);

/// Base colour tint of an item sprite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemColor {
    #[serde(alias = "R")]
    pub r: u8,
    #[serde(alias = "G")]
    pub g: u8,
    #[serde(alias = "B")]
    pub b: u8,
}

impl ItemColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ItemColor { r, g, b }
    }
}
