//! Object kinds (object templates) and item categories

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::flag::{FlagSet, ObjectFlag};

/// Identifier of an object kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KindId(pub u16);

/// Item categories (tval)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ItemCategory {
    Skeleton,
    Chest,
    Shot,
    Arrow,
    Bolt,
    Bow,
    Digger,
    Hafted,
    Polearm,
    #[default]
    Sword,
    Boots,
    Gloves,
    Helm,
    Crown,
    Shield,
    Cloak,
    SoftArmor,
    HardArmor,
    DragonArmor,
    Light,
    Amulet,
    Ring,
    Staff,
    Wand,
    Rod,
    Scroll,
    Potion,
    Flask,
    Food,
    MagicBook,
    PrayerBook,
    Spike,
    Gold,
}

impl ItemCategory {
    /// Melee weapons
    pub const fn is_melee_weapon(&self) -> bool {
        matches!(
            self,
            ItemCategory::Digger | ItemCategory::Hafted | ItemCategory::Polearm | ItemCategory::Sword
        )
    }

    pub const fn is_launcher(&self) -> bool {
        matches!(self, ItemCategory::Bow)
    }

    pub const fn is_ammo(&self) -> bool {
        matches!(self, ItemCategory::Shot | ItemCategory::Arrow | ItemCategory::Bolt)
    }

    pub const fn is_armour(&self) -> bool {
        matches!(
            self,
            ItemCategory::Boots
                | ItemCategory::Gloves
                | ItemCategory::Helm
                | ItemCategory::Crown
                | ItemCategory::Shield
                | ItemCategory::Cloak
                | ItemCategory::SoftArmor
                | ItemCategory::HardArmor
                | ItemCategory::DragonArmor
        )
    }

    pub const fn is_jewelry(&self) -> bool {
        matches!(self, ItemCategory::Amulet | ItemCategory::Ring)
    }

    pub const fn is_light(&self) -> bool {
        matches!(self, ItemCategory::Light)
    }

    /// Categories that give off a pseudo-identification feeling
    pub const fn can_be_sensed(&self) -> bool {
        self.is_melee_weapon()
            || self.is_launcher()
            || self.is_ammo()
            || self.is_armour()
            || self.is_light()
            || self.is_jewelry()
    }

    /// Categories whose identity is always apparent once the kind is aware
    pub const fn is_always_obvious(&self) -> bool {
        matches!(
            self,
            ItemCategory::Skeleton
                | ItemCategory::Flask
                | ItemCategory::Spike
                | ItemCategory::Gold
                | ItemCategory::MagicBook
                | ItemCategory::PrayerBook
                | ItemCategory::Chest
        )
    }
}

/// Range a bonus may be rolled in when an object of a kind is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusRange {
    pub min: i16,
    pub max: i16,
}

impl BonusRange {
    /// A bonus that never varies
    pub const fn fixed(value: i16) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    /// True if objects of the kind can differ in this bonus
    pub const fn varies(&self) -> bool {
        self.min != self.max
    }
}

/// Object kind template (object.txt entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectKind {
    pub id: KindId,
    /// True name
    pub name: String,
    /// Flavor description shown until the kind is aware (None = unflavored)
    pub flavor: Option<String>,
    pub category: ItemCategory,
    /// Flags every object of this kind has
    pub flags: FlagSet,
    pub to_h: BonusRange,
    pub to_d: BonusRange,
    pub to_a: BonusRange,
    /// Has an activation or use effect
    pub has_effect: bool,
}

impl ObjectKind {
    /// Create an unflavored kind with no flags or bonuses
    pub fn new(id: KindId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            flavor: None,
            category,
            flags: FlagSet::new(),
            to_h: BonusRange::default(),
            to_d: BonusRange::default(),
            to_a: BonusRange::default(),
            has_effect: false,
        }
    }

    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn with_flags(mut self, flags: &[ObjectFlag]) -> Self {
        self.flags.union_with(FlagSet::from_flags(flags));
        self
    }

    pub fn with_bonuses(mut self, to_h: BonusRange, to_d: BonusRange, to_a: BonusRange) -> Self {
        self.to_h = to_h;
        self.to_d = to_d;
        self.to_a = to_a;
        self
    }

    pub fn with_effect(mut self) -> Self {
        self.has_effect = true;
        self
    }

    /// True if the kind has a randomized flavor to learn
    pub fn is_flavored(&self) -> bool {
        self.flavor.is_some()
    }
}

/// All object kinds known to the game, keyed by [`KindId`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindTable {
    kinds: HashMap<KindId, ObjectKind>,
}

impl KindTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind, replacing any previous kind with the same id
    pub fn insert(&mut self, kind: ObjectKind) {
        self.kinds.insert(kind.id, kind);
    }

    /// Look up a kind
    ///
    /// # Panics
    /// Panics if the kind was never registered: an object cannot exist
    /// without its kind.
    pub fn get(&self, id: KindId) -> &ObjectKind {
        match self.kinds.get(&id) {
            Some(kind) => kind,
            None => panic!("unknown object kind {}", id.0),
        }
    }

    pub fn contains(&self, id: KindId) -> bool {
        self.kinds.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl FromIterator<ObjectKind> for KindTable {
    fn from_iter<I: IntoIterator<Item = ObjectKind>>(iter: I) -> Self {
        let mut table = KindTable::new();
        for kind in iter {
            table.insert(kind);
        }
        table
    }
}
