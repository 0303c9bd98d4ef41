//! Player state seen by the knowledge engine
//!
//! Only what identification needs: class traits, level, confusion, the pack
//! and the equipment slots.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::object::{ItemCategory, Object, ObjectId};

/// Equipment slots (wield_slot)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
#[repr(u8)]
pub enum EquipSlot {
    Weapon,
    Bow,
    LeftRing,
    RightRing,
    Amulet,
    Light,
    Body,
    Cloak,
    Shield,
    Head,
    Hands,
    Feet,
}

impl EquipSlot {
    /// First slot an object of this category is worn in
    pub const fn for_category(category: ItemCategory) -> Option<EquipSlot> {
        match category {
            ItemCategory::Digger
            | ItemCategory::Hafted
            | ItemCategory::Polearm
            | ItemCategory::Sword => Some(EquipSlot::Weapon),
            ItemCategory::Bow => Some(EquipSlot::Bow),
            ItemCategory::Ring => Some(EquipSlot::LeftRing),
            ItemCategory::Amulet => Some(EquipSlot::Amulet),
            ItemCategory::Light => Some(EquipSlot::Light),
            ItemCategory::SoftArmor | ItemCategory::HardArmor | ItemCategory::DragonArmor => {
                Some(EquipSlot::Body)
            }
            ItemCategory::Cloak => Some(EquipSlot::Cloak),
            ItemCategory::Shield => Some(EquipSlot::Shield),
            ItemCategory::Helm | ItemCategory::Crown => Some(EquipSlot::Head),
            ItemCategory::Gloves => Some(EquipSlot::Hands),
            ItemCategory::Boots => Some(EquipSlot::Feet),
            _ => None,
        }
    }

    /// Slots whose attack bonuses apply to every blow (everything but the
    /// weapon and the launcher)
    pub const fn adds_to_melee(&self) -> bool {
        !matches!(self, EquipSlot::Weapon | EquipSlot::Bow)
    }

    /// Description used in messages ("you are wielding", ...)
    pub const fn describe(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "you are wielding",
            EquipSlot::Bow => "you are shooting with",
            EquipSlot::Light => "you are using to light the way",
            _ => "you are wearing",
        }
    }
}

/// Player classes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PlayerClass {
    #[default]
    Warrior,
    Mage,
    Priest,
    Rogue,
    Ranger,
    Paladin,
}

impl PlayerClass {
    /// Pseudo-identification speed of the class
    pub const fn sense_profile(&self) -> SenseProfile {
        match self {
            PlayerClass::Warrior => SenseProfile::new(9000, 40, true),
            PlayerClass::Mage => SenseProfile::new(240000, 5, false),
            PlayerClass::Priest => SenseProfile::new(10000, 40, false),
            PlayerClass::Rogue => SenseProfile::new(20000, 40, false),
            PlayerClass::Ranger => SenseProfile::new(95000, 40, false),
            PlayerClass::Paladin => SenseProfile::new(77777, 40, false),
        }
    }

    /// Arcane casters are hindered by gloves
    pub const fn cumbered_by_gloves(&self) -> bool {
        matches!(
            self,
            PlayerClass::Mage | PlayerClass::Rogue | PlayerClass::Ranger
        )
    }
}

/// Parameters of periodic inventory sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseProfile {
    pub base: u32,
    pub div: u32,
    /// Sensing speeds up with the square of the level
    pub improved: bool,
}

impl SenseProfile {
    pub const fn new(base: u32, div: u32, improved: bool) -> Self {
        Self {
            base,
            div,
            improved,
        }
    }

    /// Sensing happens on a 1-in-rate roll
    pub fn rate(&self, level: u32) -> u32 {
        let scale = if self.improved { level * level } else { level };
        (self.base / (scale + self.div).max(1)).max(1)
    }
}

/// Traits of the player that change what they notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTraits {
    pub class: PlayerClass,
    pub level: u32,
    pub sense: SenseProfile,
    pub cumbered_by_gloves: bool,
}

impl PlayerTraits {
    pub const fn for_class(class: PlayerClass, level: u32) -> Self {
        Self {
            class,
            level,
            sense: class.sense_profile(),
            cumbered_by_gloves: class.cumbered_by_gloves(),
        }
    }
}

impl Default for PlayerTraits {
    fn default() -> Self {
        Self::for_class(PlayerClass::default(), 1)
    }
}

/// The player: traits, pack and equipment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub traits: PlayerTraits,
    pub confused: bool,
    /// Carried, not worn
    pub pack: Vec<Object>,
    equipment: [Option<Object>; EquipSlot::COUNT],
}

impl Player {
    pub fn new(traits: PlayerTraits) -> Self {
        Self {
            traits,
            ..Default::default()
        }
    }

    /// Put an object in a slot, returning what was there
    pub fn equip(&mut self, slot: EquipSlot, obj: Object) -> Option<Object> {
        self.equipment[slot as usize].replace(obj)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Object> {
        self.equipment[slot as usize].take()
    }

    pub fn equipped(&self, slot: EquipSlot) -> Option<&Object> {
        self.equipment[slot as usize].as_ref()
    }

    pub fn equipped_mut(&mut self, slot: EquipSlot) -> Option<&mut Object> {
        self.equipment[slot as usize].as_mut()
    }

    /// Worn and wielded objects with their slots
    pub fn equipment(&self) -> impl Iterator<Item = (EquipSlot, &Object)> {
        EquipSlot::iter()
            .zip(self.equipment.iter())
            .filter_map(|(slot, o)| o.as_ref().map(|o| (slot, o)))
    }

    pub fn equipment_mut(&mut self) -> impl Iterator<Item = (EquipSlot, &mut Object)> {
        EquipSlot::iter()
            .zip(self.equipment.iter_mut())
            .filter_map(|(slot, o)| o.as_mut().map(|o| (slot, o)))
    }

    /// Find a carried object (pack or equipment) by id
    pub fn find(&self, id: ObjectId) -> Option<&Object> {
        self.pack
            .iter()
            .chain(self.equipment.iter().flatten())
            .find(|o| o.id == id)
    }
}
