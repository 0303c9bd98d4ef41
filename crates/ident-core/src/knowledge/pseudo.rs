//! Pseudo-identification
//!
//! A sensed object gives the player a coarse feeling about its quality
//! before it is fully identified.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::query::KnowledgeView;
use crate::object::{FlagSet, FlagType, IdMethod};

/// Coarse quality feeling for a partially known object
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Feeling {
    /// No feeling yet
    #[default]
    Unknown,
    /// Bonuses are the kind's base values
    Average,
    Magical,
    /// Mixed bonuses, or a bad ego
    Strange,
    /// Ego item
    Excellent,
    /// Obviously magical properties beyond the kind
    Splendid,
    /// Artifact
    Special,
}

impl Feeling {
    /// Relative strength for display ordering
    pub const fn strength(&self) -> u8 {
        match self {
            Feeling::Unknown => 0,
            Feeling::Average => 1,
            Feeling::Magical => 2,
            Feeling::Strange => 3,
            Feeling::Excellent => 4,
            Feeling::Splendid => 5,
            Feeling::Special => 6,
        }
    }

    /// True if the feeling says something about the object
    pub const fn is_known(&self) -> bool {
        !matches!(self, Feeling::Unknown)
    }
}

/// Classify an object from what the player knows of it.
///
/// `extra_obvious` adds flags that are obvious to this particular player on
/// top of those every wielder notices.
pub(crate) fn classify(view: &KnowledgeView<'_>, extra_obvious: FlagSet) -> Feeling {
    let obj = view.object();
    let kind = view.kind();

    // Known, obvious, non-curse flags the kind does not explain
    let obvious_mask = FlagSet::identified_by(IdMethod::Wield) | extra_obvious;
    let obvious =
        (view.known_flags() & obvious_mask) - FlagSet::of_type(FlagType::Curse) - kind.flags;

    if view.is_known_artifact()
        || (obj.is_artifact() && (view.was_sensed() || view.was_worn()))
    {
        return Feeling::Special;
    }

    if obj.is_jewelry() {
        return Feeling::Unknown;
    }

    if !obvious.is_empty() {
        return Feeling::Splendid;
    }

    if !view.is_known() && !view.was_sensed() {
        return Feeling::Unknown;
    }

    if let Some(ego) = &obj.ego {
        return if ego.is_cursed() {
            Feeling::Strange
        } else {
            Feeling::Excellent
        };
    }

    let bonuses = [
        (obj.to_a, kind.to_a.min),
        (obj.to_h, kind.to_h.min),
        (obj.to_d, kind.to_d.min),
    ];
    if bonuses.iter().all(|(val, min)| val == min) {
        Feeling::Average
    } else if bonuses.iter().all(|(val, min)| val >= min)
        || bonuses.iter().all(|(val, min)| val <= min)
    {
        Feeling::Magical
    } else {
        Feeling::Strange
    }
}
