//! Object instances
//!
//! An [`Object`] carries its true properties and the player's knowledge of
//! them. Only the knowledge engine writes the knowledge record.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::flag::{FlagSet, FlagType, ObjectFlag};
use super::kind::{ItemCategory, KindId, ObjectKind};
use crate::knowledge::ObjectKnowledge;

/// Unique identifier for object instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Artifact index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub u16);

/// Ego type index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EgoId(pub u16);

/// Extra random ability an ego type grants on top of its fixed flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum RandomAbility {
    Sustain,
    HighResist,
    Power,
}

impl RandomAbility {
    /// Flags the random ability may have been drawn from
    pub fn candidates(self) -> FlagSet {
        match self {
            RandomAbility::Sustain => FlagSet::of_type(FlagType::Sustain),
            RandomAbility::HighResist => FlagSet::of_type(FlagType::HighResist),
            RandomAbility::Power => FlagSet::of_types(&[FlagType::Misc, FlagType::Protection]),
        }
    }
}

/// Ego type an object was made with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgoRef {
    pub id: EgoId,
    /// Fixed flags of the ego type
    pub flags: FlagSet,
    pub random_ability: Option<RandomAbility>,
}

impl EgoRef {
    pub fn new(id: EgoId, flags: &[ObjectFlag]) -> Self {
        Self {
            id,
            flags: FlagSet::from_flags(flags),
            random_ability: None,
        }
    }

    pub fn with_random_ability(mut self, ability: RandomAbility) -> Self {
        self.random_ability = Some(ability);
        self
    }

    /// Egos with curse flags are bad egos
    pub fn is_cursed(&self) -> bool {
        self.flags.contains_any_of(FlagSet::of_type(FlagType::Curse))
    }
}

/// Object instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier
    pub id: ObjectId,

    /// Object kind
    pub kind: KindId,

    /// Item category (cached from kind)
    pub category: ItemCategory,

    /// Every flag the object really has (kind, ego, artifact and random)
    pub flags: FlagSet,

    /// Combat bonuses
    pub to_h: i16,
    pub to_d: i16,
    pub to_a: i16,

    /// Base armour class
    pub ac: i16,

    /// Magnitude of the pval flags
    pub pval: i16,

    pub ego: Option<EgoRef>,
    pub artifact: Option<ArtifactId>,

    knowledge: ObjectKnowledge,
}

impl Object {
    /// Create a plain object of the given kind
    pub fn new(id: ObjectId, kind: &ObjectKind) -> Self {
        Self {
            id,
            kind: kind.id,
            category: kind.category,
            flags: kind.flags,
            to_h: 0,
            to_d: 0,
            to_a: 0,
            ac: 0,
            pval: 0,
            ego: None,
            artifact: None,
            knowledge: ObjectKnowledge::new(),
        }
    }

    /// Give the object extra true flags
    pub fn with_flags(mut self, flags: &[ObjectFlag]) -> Self {
        self.flags.union_with(FlagSet::from_flags(flags));
        self
    }

    pub fn with_plusses(mut self, to_h: i16, to_d: i16, to_a: i16) -> Self {
        self.to_h = to_h;
        self.to_d = to_d;
        self.to_a = to_a;
        self
    }

    pub fn with_ac(mut self, ac: i16) -> Self {
        self.ac = ac;
        self
    }

    pub fn with_pval(mut self, pval: i16) -> Self {
        self.pval = pval;
        self
    }

    /// Make this an ego item; the ego's fixed flags become true flags
    pub fn with_ego(mut self, ego: EgoRef) -> Self {
        self.flags.union_with(ego.flags);
        self.ego = Some(ego);
        self
    }

    /// Make this an artifact with the given extra flags
    pub fn with_artifact(mut self, artifact: ArtifactId, flags: &[ObjectFlag]) -> Self {
        self.flags.union_with(FlagSet::from_flags(flags));
        self.artifact = Some(artifact);
        self
    }

    /// Player knowledge of this object
    pub fn knowledge(&self) -> &ObjectKnowledge {
        &self.knowledge
    }

    pub(crate) fn knowledge_mut(&mut self) -> &mut ObjectKnowledge {
        &mut self.knowledge
    }

    /// Replace the knowledge record with one restored from saved data.
    ///
    /// Restored records are not trusted: run
    /// [`KnowledgeBase::repair_knowledge`](crate::knowledge::KnowledgeBase::repair_knowledge)
    /// afterwards.
    pub fn restore_knowledge(&mut self, knowledge: ObjectKnowledge) {
        self.knowledge = knowledge;
    }

    /// Check if object has a flag (regardless of player knowledge)
    pub const fn has_flag(&self, flag: ObjectFlag) -> bool {
        self.flags.test(flag)
    }

    pub const fn is_artifact(&self) -> bool {
        self.artifact.is_some()
    }

    pub const fn is_ego(&self) -> bool {
        self.ego.is_some()
    }

    pub const fn is_jewelry(&self) -> bool {
        self.category.is_jewelry()
    }
}
