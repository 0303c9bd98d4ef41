//! Per-object knowledge record
//!
//! The record only ever grows: ident bits are added, the ident state moves
//! forward and learnt flags are never forgotten. Mutation is restricted to
//! the crate so the transition engine is the only writer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::object::FlagSet;

bitflags! {
    /// What the player has learnt about one object, and how
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct IdentFlags: u16 {
        /// Pseudo-identified by sensing
        const SENSE = 0x0001;
        /// Has been wielded or worn
        const WORN = 0x0002;
        /// Has been fired or thrown
        const FIRED = 0x0004;
        /// Ego or artifact name is visible
        const NAME = 0x0008;
        /// Survived destruction, so it is an artifact
        const INDESTRUCT = 0x0010;
        /// Known not to be an artifact
        const NOT_ARTIFACT = 0x0020;
        /// To-hit and to-dam bonuses are visible
        const ATTACK = 0x0040;
        /// Armour class bonus is visible
        const DEFENCE = 0x0080;
        /// Use/activation effect is known
        const EFFECT = 0x0100;
        /// Fully identified
        const KNOWN = 0x0200;
        /// Offered for sale; everything is shown
        const STORE = 0x0400;

        /// Bits set by full identification
        const EVERYTHING = Self::SENSE.bits()
            | Self::WORN.bits()
            | Self::NAME.bits()
            | Self::ATTACK.bits()
            | Self::DEFENCE.bits()
            | Self::EFFECT.bits()
            | Self::KNOWN.bits();
    }
}

// Manual serde impl for IdentFlags
impl Serialize for IdentFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IdentFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(IdentFlags::from_bits_truncate(bits))
    }
}

/// Coarse identification level of one object
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum IdentState {
    #[default]
    Unknown,
    Sensed,
    FlavorAware,
    FullyKnown,
}

/// Knowledge the player has about one object instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectKnowledge {
    ident: IdentFlags,
    state: IdentState,
    /// Flags the player has seen on the object (subset of its true flags)
    known_flags: FlagSet,
    /// Flags the player knows the object does not have
    ruled_out: FlagSet,
}

impl ObjectKnowledge {
    /// Fresh record with nothing known
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ident(&self) -> IdentFlags {
        self.ident
    }

    pub fn has(&self, bits: IdentFlags) -> bool {
        self.ident.contains(bits)
    }

    pub fn state(&self) -> IdentState {
        self.state
    }

    /// Flags revealed as present
    pub fn known_flags(&self) -> FlagSet {
        self.known_flags
    }

    /// Flags known to be absent
    pub fn ruled_out(&self) -> FlagSet {
        self.ruled_out
    }

    /// Flags whose presence or absence is known
    pub fn settled(&self) -> FlagSet {
        self.known_flags | self.ruled_out
    }

    /// Add ident bits, returning true if any was new
    pub(crate) fn add_ident(&mut self, bits: IdentFlags) -> bool {
        let new = !self.ident.contains(bits);
        self.ident.insert(bits);
        new
    }

    /// Move the ident state forward to at least `state`
    pub(crate) fn advance(&mut self, state: IdentState) -> bool {
        if state > self.state {
            self.state = state;
            true
        } else {
            false
        }
    }

    /// Settle every flag in `mask` against the object's true flags.
    ///
    /// Returns the flags that were newly revealed as present.
    pub(crate) fn learn(&mut self, mask: FlagSet, true_flags: FlagSet) -> FlagSet {
        let present = mask & true_flags;
        let revealed = present - self.known_flags;
        self.known_flags.union_with(present);
        self.ruled_out.union_with(mask - true_flags);
        revealed
    }
}
