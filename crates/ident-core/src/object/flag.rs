//! Object property flags and flag sets
//!
//! Every magical property an object can carry is one [`ObjectFlag`]. Sets of
//! flags (the flags an object really has, the flags the player has learnt)
//! are stored in a [`FlagSet`].

use core::fmt;
use core::ops::{BitAnd, BitOr, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumCount, EnumIter, FromRepr, IntoEnumIterator};

/// Object property flags (list-object-flags)
///
/// Discriminants are bit positions inside a [`FlagSet`] and must stay stable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    FromRepr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ObjectFlag {
    // Stat bonuses (pval)
    Str,
    Int,
    Wis,
    Dex,
    Con,
    Chr,

    // Other pval modifiers
    Stealth,
    Search,
    Infra,
    Tunnel,
    Speed,
    Blows,
    Shots,
    Might,

    // Sustains
    SustStr,
    SustInt,
    SustWis,
    SustDex,
    SustCon,
    SustChr,

    // Immunities
    ImAcid,
    ImElec,
    ImFire,
    ImCold,

    // Base resistances
    ResAcid,
    ResElec,
    ResFire,
    ResCold,

    // High resistances
    ResPois,
    ResLight,
    ResDark,
    ResSound,
    ResShard,
    ResNexus,
    ResNether,
    ResChaos,
    ResDisen,

    // Protections
    ProtFear,
    ProtBlind,
    ProtConf,
    ProtStun,

    // Miscellaneous abilities
    SlowDigest,
    Feather,
    Light,
    Regen,
    Telepathy,
    SeeInvis,
    FreeAct,
    HoldLife,
    Impact,
    Blessed,
    SpellsOk,

    // Curses
    LightCurse,
    HeavyCurse,
    PermaCurse,
    Teleport,
    DrainExp,
    Aggravate,
    ImpairHp,
    ImpairMana,
    Afraid,
    NoTeleport,

    // Elemental immunity of the object itself
    IgnoreAcid,
    IgnoreElec,
    IgnoreFire,
    IgnoreCold,

    // Elemental vulnerability of the object itself
    HatesAcid,
    HatesElec,
    HatesFire,
    HatesCold,

    // Slays
    SlayAnimal,
    SlayEvil,
    SlayUndead,
    SlayDemon,
    SlayOrc,
    SlayTroll,
    SlayGiant,
    SlayDragon,
    KillDragon,
    KillDemon,
    KillUndead,

    // Brands
    BrandPois,
    BrandAcid,
    BrandElec,
    BrandFire,
    BrandCold,

    // Interface hints, never learnt
    Activate,
    InstaArt,
    EasyKnow,
    HideType,
    ShowMods,
}

/// Broad category of an object flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum FlagType {
    Pval,
    Sustain,
    Immunity,
    LowResist,
    HighResist,
    Protection,
    Misc,
    Curse,
    Ignore,
    Hates,
    Slay,
    Brand,
    Interface,
}

/// How the player normally learns a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum IdMethod {
    /// Learnt when a specific event exercises it
    Normal,
    /// Obvious as soon as the object is wielded or worn
    Wield,
    /// Noticed after the object has been worn for a while
    Timed,
    /// Only learnt by full identification
    Never,
}

impl ObjectFlag {
    /// Look a flag up by its raw index
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// Raw index (bit position) of this flag
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category of this flag
    pub const fn flag_type(self) -> FlagType {
        use ObjectFlag::*;
        match self {
            Str | Int | Wis | Dex | Con | Chr | Stealth | Search | Infra | Tunnel | Speed
            | Blows | Shots | Might => FlagType::Pval,
            SustStr | SustInt | SustWis | SustDex | SustCon | SustChr => FlagType::Sustain,
            ImAcid | ImElec | ImFire | ImCold => FlagType::Immunity,
            ResAcid | ResElec | ResFire | ResCold => FlagType::LowResist,
            ResPois | ResLight | ResDark | ResSound | ResShard | ResNexus | ResNether
            | ResChaos | ResDisen => FlagType::HighResist,
            ProtFear | ProtBlind | ProtConf | ProtStun => FlagType::Protection,
            SlowDigest | Feather | Light | Regen | Telepathy | SeeInvis | FreeAct | HoldLife
            | Impact | Blessed | SpellsOk => FlagType::Misc,
            LightCurse | HeavyCurse | PermaCurse | Teleport | DrainExp | Aggravate | ImpairHp
            | ImpairMana | Afraid | NoTeleport => FlagType::Curse,
            IgnoreAcid | IgnoreElec | IgnoreFire | IgnoreCold => FlagType::Ignore,
            HatesAcid | HatesElec | HatesFire | HatesCold => FlagType::Hates,
            SlayAnimal | SlayEvil | SlayUndead | SlayDemon | SlayOrc | SlayTroll | SlayGiant
            | SlayDragon | KillDragon | KillDemon | KillUndead => FlagType::Slay,
            BrandPois | BrandAcid | BrandElec | BrandFire | BrandCold => FlagType::Brand,
            Activate | InstaArt | EasyKnow | HideType | ShowMods => FlagType::Interface,
        }
    }

    /// How this flag is normally learnt
    pub const fn id_method(self) -> IdMethod {
        use ObjectFlag::*;
        match self {
            Str | Int | Wis | Dex | Con | Chr | Stealth | Search | Infra | Tunnel | Speed
            | Blows | Shots | Might => IdMethod::Wield,
            Light | Telepathy | SeeInvis | Blessed | Afraid => IdMethod::Wield,
            BrandPois | BrandAcid | BrandElec | BrandFire | BrandCold => IdMethod::Wield,
            SlowDigest | Regen | DrainExp | ImpairHp | ImpairMana | Aggravate => IdMethod::Timed,
            Activate | InstaArt | EasyKnow | HideType | ShowMods => IdMethod::Never,
            _ => IdMethod::Normal,
        }
    }

    pub const fn is_curse(self) -> bool {
        matches!(self.flag_type(), FlagType::Curse)
    }

    pub const fn is_high_resist(self) -> bool {
        matches!(self.flag_type(), FlagType::HighResist)
    }

    /// Stat flags whose pval changes a player statistic
    pub const fn is_stat(self) -> bool {
        use ObjectFlag::*;
        matches!(self, Str | Int | Wis | Dex | Con | Chr)
    }

    /// Message shown when the player notices this flag on a worn item.
    ///
    /// `{}` is replaced by the object's name.
    pub const fn notice_message(self) -> &'static str {
        use ObjectFlag::*;
        match self {
            SlowDigest => "You feel your {} slow your metabolism.",
            Regen => "You feel your {} speed up your recovery.",
            Feather => "Your {} slows your fall.",
            Teleport => "Your {} teleports you.",
            DrainExp => "You feel your {} drain your life.",
            Aggravate => "You feel your {} aggravate things around you.",
            ImpairHp => "You feel your {} slow your recovery.",
            ImpairMana => "You feel your {} slow your mana recovery.",
            NoTeleport => "Your {} prevents you from teleporting.",
            FreeAct => "Your {} keeps you moving.",
            HoldLife => "Your {} keeps your life force in place.",
            SustStr | SustInt | SustWis | SustDex | SustCon | SustChr => {
                "Your {} protects you from harm."
            }
            _ => "Your {} glows.",
        }
    }
}

/// Fixed-capacity set of [`ObjectFlag`]s
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagSet(u128);

// Every flag must have a bit.
const _: () = assert!(ObjectFlag::COUNT <= u128::BITS as usize);

impl FlagSet {
    /// The empty set
    pub const EMPTY: FlagSet = FlagSet(0);

    /// Create an empty set
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Every defined flag
    pub const fn full() -> Self {
        if ObjectFlag::COUNT == u128::BITS as usize {
            FlagSet(u128::MAX)
        } else {
            FlagSet((1u128 << ObjectFlag::COUNT) - 1)
        }
    }

    /// Build a set from a list of flags
    pub fn from_flags(flags: &[ObjectFlag]) -> Self {
        flags.iter().copied().collect()
    }

    /// All flags of one category
    pub fn of_type(flag_type: FlagType) -> Self {
        ObjectFlag::iter().filter(|f| f.flag_type() == flag_type).collect()
    }

    /// All flags of several categories
    pub fn of_types(types: &[FlagType]) -> Self {
        ObjectFlag::iter()
            .filter(|f| types.contains(&f.flag_type()))
            .collect()
    }

    /// All flags learnt by the given method
    pub fn identified_by(method: IdMethod) -> Self {
        ObjectFlag::iter().filter(|f| f.id_method() == method).collect()
    }

    const fn bit(flag: ObjectFlag) -> u128 {
        1u128 << (flag as u32)
    }

    /// Check membership
    pub const fn test(&self, flag: ObjectFlag) -> bool {
        self.0 & Self::bit(flag) != 0
    }

    /// Check membership by raw index.
    ///
    /// # Panics
    /// Panics if `index` is not a valid flag index.
    pub fn test_index(&self, index: usize) -> bool {
        assert!(
            index < ObjectFlag::COUNT,
            "object flag index {index} out of range (max {})",
            ObjectFlag::COUNT - 1
        );
        self.0 & (1u128 << index) != 0
    }

    /// Add a flag, returning true if it was not already present
    pub fn insert(&mut self, flag: ObjectFlag) -> bool {
        let added = !self.test(flag);
        self.0 |= Self::bit(flag);
        added
    }

    /// Remove a flag, returning true if it was present
    pub fn remove(&mut self, flag: ObjectFlag) -> bool {
        let present = self.test(flag);
        self.0 &= !Self::bit(flag);
        present
    }

    /// Add every flag of `other`
    pub fn union_with(&mut self, other: FlagSet) {
        self.0 |= other.0;
    }

    pub const fn union(self, other: FlagSet) -> FlagSet {
        FlagSet(self.0 | other.0)
    }

    pub const fn intersection(self, other: FlagSet) -> FlagSet {
        FlagSet(self.0 & other.0)
    }

    /// Flags in `self` but not in `other`
    pub const fn difference(self, other: FlagSet) -> FlagSet {
        FlagSet(self.0 & !other.0)
    }

    /// Every defined flag not in `self`
    pub const fn complement(self) -> FlagSet {
        FlagSet(!self.0 & Self::full().0)
    }

    /// True if `self` and `mask` share at least one flag
    pub const fn contains_any_of(&self, mask: FlagSet) -> bool {
        self.0 & mask.0 != 0
    }

    /// True if every flag of `self` is in `other`
    pub const fn is_subset(&self, other: FlagSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the flags in the set, in index order
    pub fn iter(&self) -> impl Iterator<Item = ObjectFlag> + '_ {
        ObjectFlag::iter().filter(move |f| self.test(*f))
    }
}

impl FromIterator<ObjectFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = ObjectFlag>>(iter: I) -> Self {
        let mut set = FlagSet::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl From<ObjectFlag> for FlagSet {
    fn from(flag: ObjectFlag) -> Self {
        FlagSet(Self::bit(flag))
    }
}

impl BitOr for FlagSet {
    type Output = FlagSet;

    fn bitor(self, rhs: FlagSet) -> FlagSet {
        self.union(rhs)
    }
}

impl BitAnd for FlagSet {
    type Output = FlagSet;

    fn bitand(self, rhs: FlagSet) -> FlagSet {
        self.intersection(rhs)
    }
}

impl Sub for FlagSet {
    type Output = FlagSet;

    fn sub(self, rhs: FlagSet) -> FlagSet {
        self.difference(rhs)
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// Serialized as the list of flag names so saved data survives reordering
impl Serialize for FlagSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for FlagSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let flags = Vec::<ObjectFlag>::deserialize(deserializer)?;
        Ok(flags.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_test() {
        let mut set = FlagSet::new();
        assert!(!set.test(ObjectFlag::ResFire));
        assert!(set.insert(ObjectFlag::ResFire));
        assert!(!set.insert(ObjectFlag::ResFire));
        assert!(set.test(ObjectFlag::ResFire));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_union_and_intersection() {
        let a = FlagSet::from_flags(&[ObjectFlag::ResFire, ObjectFlag::Teleport]);
        let b = FlagSet::from_flags(&[ObjectFlag::Teleport, ObjectFlag::Speed]);

        assert_eq!((a | b).len(), 3);
        assert_eq!(a & b, FlagSet::from(ObjectFlag::Teleport));
        assert_eq!(a - b, FlagSet::from(ObjectFlag::ResFire));
        assert!(a.contains_any_of(b));
        assert!(!a.contains_any_of(FlagSet::from(ObjectFlag::Speed)));
    }

    #[test]
    fn test_full_covers_every_flag() {
        let full = FlagSet::full();
        assert_eq!(full.len(), ObjectFlag::COUNT);
        assert!(ObjectFlag::iter().all(|f| full.test(f)));
        assert!(FlagSet::EMPTY.complement() == full);
    }

    #[test]
    fn test_iter_in_index_order() {
        let set = FlagSet::from_flags(&[ObjectFlag::KillDragon, ObjectFlag::Str]);
        let flags: Vec<_> = set.iter().collect();
        assert_eq!(flags, vec![ObjectFlag::Str, ObjectFlag::KillDragon]);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(ObjectFlag::from_index(0), Some(ObjectFlag::Str));
        assert_eq!(
            ObjectFlag::from_index(ObjectFlag::ResFire.index()),
            Some(ObjectFlag::ResFire)
        );
        assert_eq!(ObjectFlag::from_index(ObjectFlag::COUNT), None);
        assert_eq!(ObjectFlag::from_index(10_000), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        FlagSet::full().test_index(ObjectFlag::COUNT);
    }

    #[test]
    fn test_masks_by_type() {
        let curses = FlagSet::of_type(FlagType::Curse);
        assert!(curses.test(ObjectFlag::Teleport));
        assert!(curses.test(ObjectFlag::PermaCurse));
        assert!(!curses.test(ObjectFlag::ResFire));

        let high = FlagSet::of_type(FlagType::HighResist);
        assert!(high.iter().all(ObjectFlag::is_high_resist));
        assert_eq!(high.len(), 9);
    }

    #[test]
    fn test_identified_by_wield() {
        let wield = FlagSet::identified_by(IdMethod::Wield);
        assert!(wield.test(ObjectFlag::Str));
        assert!(wield.test(ObjectFlag::SeeInvis));
        assert!(!wield.test(ObjectFlag::ResFire));
        assert!(!wield.test(ObjectFlag::Regen));
    }

    #[test]
    fn test_serde_as_names() {
        let set = FlagSet::from_flags(&[ObjectFlag::ResFire, ObjectFlag::Teleport]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["res_fire","teleport"]"#);
        let back: FlagSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
