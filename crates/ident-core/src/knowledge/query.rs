//! Read-only knowledge queries
//!
//! Everything the rest of the game asks about player knowledge goes through
//! a [`KnowledgeView`]. None of these predicates change state.

use super::pseudo::{self, Feeling};
use super::record::{IdentFlags, IdentState, ObjectKnowledge};
use super::KnowledgeBase;
use crate::object::{FlagSet, FlagType, ItemCategory, Object, ObjectFlag, ObjectKind};
use crate::player::PlayerTraits;

/// Ways a knowledge record can contradict itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Inconsistency {
    /// Marked fully known while some part of it is still hidden
    pub incomplete_known: bool,
    /// Ego name shown while the flavor is unknown
    pub name_without_flavor: bool,
    /// Record claims flavor awareness the flavor table does not have
    pub flavor_mismatch: bool,
}

impl Inconsistency {
    pub fn any(&self) -> bool {
        self.incomplete_known || self.name_without_flavor || self.flavor_mismatch
    }
}

/// Player knowledge of one object, as seen through the knowledge base
#[derive(Clone, Copy)]
pub struct KnowledgeView<'a> {
    kb: &'a KnowledgeBase,
    obj: &'a Object,
}

impl<'a> KnowledgeView<'a> {
    pub(crate) fn new(kb: &'a KnowledgeBase, obj: &'a Object) -> Self {
        Self { kb, obj }
    }

    pub fn object(&self) -> &'a Object {
        self.obj
    }

    pub fn kind(&self) -> &'a ObjectKind {
        self.kb.kind_of(self.obj)
    }

    pub fn record(&self) -> &'a ObjectKnowledge {
        self.obj.knowledge()
    }

    fn has(&self, bits: IdentFlags) -> bool {
        self.record().has(bits)
    }

    /// Identification state, counting flavor awareness of the kind
    pub fn ident_state(&self) -> IdentState {
        let state = self.record().state();
        if self.kind().is_flavored() && self.flavor_is_aware() {
            state.max(IdentState::FlavorAware)
        } else {
            state
        }
    }

    /// Fully identified, or shown in full by a store
    pub fn is_known(&self) -> bool {
        self.record()
            .ident()
            .intersects(IdentFlags::KNOWN | IdentFlags::STORE)
    }

    pub fn is_known_artifact(&self) -> bool {
        self.has(IdentFlags::INDESTRUCT) || (self.obj.is_artifact() && self.was_sensed())
    }

    pub fn is_known_not_artifact(&self) -> bool {
        self.has(IdentFlags::NOT_ARTIFACT)
    }

    pub fn is_known_cursed(&self) -> bool {
        self.known_flags()
            .contains_any_of(FlagSet::of_type(FlagType::Curse))
    }

    pub fn is_known_blessed(&self) -> bool {
        self.known_flags().test(ObjectFlag::Blessed)
    }

    pub fn was_worn(&self) -> bool {
        self.has(IdentFlags::WORN)
    }

    pub fn was_fired(&self) -> bool {
        self.has(IdentFlags::FIRED)
    }

    pub fn was_sensed(&self) -> bool {
        self.has(IdentFlags::SENSE)
    }

    pub fn flavor_is_aware(&self) -> bool {
        self.kb.kind_is_aware(self.obj.kind)
    }

    pub fn flavor_was_tried(&self) -> bool {
        self.kb.flavors().was_tried(self.obj.kind)
    }

    /// Identity is obvious as soon as the kind is known
    pub fn easy_know(&self) -> bool {
        let kind = self.kind();
        self.flavor_is_aware()
            && (kind.category.is_always_obvious() || kind.flags.test(ObjectFlag::EasyKnow))
    }

    pub fn effect_is_known(&self) -> bool {
        self.easy_know() || self.has(IdentFlags::EFFECT) || self.flavor_is_aware()
    }

    /// Ego names of light sources are always shown
    pub fn ego_is_visible(&self) -> bool {
        self.obj.is_ego()
            && (self
                .record()
                .ident()
                .intersects(IdentFlags::NAME | IdentFlags::STORE)
                || self.obj.category == ItemCategory::Light)
    }

    pub fn name_is_visible(&self) -> bool {
        self.has(IdentFlags::NAME)
    }

    pub fn attack_plusses_are_visible(&self) -> bool {
        if self
            .record()
            .ident()
            .intersects(IdentFlags::ATTACK | IdentFlags::STORE)
        {
            return true;
        }
        let kind = self.kind();
        self.obj.is_jewelry()
            && self.flavor_is_aware()
            && !kind.to_h.varies()
            && !kind.to_d.varies()
    }

    pub fn defence_plusses_are_visible(&self) -> bool {
        if self
            .record()
            .ident()
            .intersects(IdentFlags::DEFENCE | IdentFlags::STORE)
        {
            return true;
        }
        self.obj.is_jewelry() && self.flavor_is_aware() && !self.kind().to_a.varies()
    }

    /// Flags the player can see: revealed flags plus the kind's flags once
    /// the kind is aware
    pub fn known_flags(&self) -> FlagSet {
        let mut flags = self.record().known_flags();
        if self.flavor_is_aware() {
            flags.union_with(self.kind().flags & self.obj.flags);
        }
        flags
    }

    pub fn flag_is_known(&self, flag: ObjectFlag) -> bool {
        self.easy_know() || self.has(IdentFlags::STORE) || self.known_flags().test(flag)
    }

    /// True unless the player has ruled out every high resist
    pub fn high_resist_is_possible(&self) -> bool {
        let high = FlagSet::of_type(FlagType::HighResist);
        if self.has(IdentFlags::STORE) {
            return self.obj.flags.contains_any_of(high);
        }
        self.known_flags().contains_any_of(high) || !high.is_subset(self.record().settled())
    }

    /// Free action on these gloves would be noticed at once by the wearer
    pub fn fa_would_be_obvious(&self, traits: &PlayerTraits) -> bool {
        traits.cumbered_by_gloves
            && self.obj.category == ItemCategory::Gloves
            && !self.obj.has_flag(ObjectFlag::Dex)
            && !self.obj.has_flag(ObjectFlag::SpellsOk)
    }

    /// Pseudo-identification feeling
    pub fn pseudo(&self) -> Feeling {
        pseudo::classify(self, FlagSet::EMPTY)
    }

    /// Pseudo-identification feeling as perceived by a given player
    pub fn pseudo_for(&self, traits: &PlayerTraits) -> Feeling {
        let extra = if self.fa_would_be_obvious(traits) {
            FlagSet::from(ObjectFlag::FreeAct)
        } else {
            FlagSet::EMPTY
        };
        pseudo::classify(self, extra)
    }

    pub(crate) fn inconsistency(&self) -> Inconsistency {
        if self.easy_know() {
            return Inconsistency::default();
        }
        let record = self.record();
        let flavored = self.kind().is_flavored();
        let aware = self.flavor_is_aware();

        let claims_known =
            record.has(IdentFlags::KNOWN) || record.state() == IdentState::FullyKnown;
        let complete = record.has(IdentFlags::ATTACK | IdentFlags::DEFENCE | IdentFlags::EFFECT)
            && record.settled() == FlagSet::full();

        Inconsistency {
            incomplete_known: claims_known && !complete,
            name_without_flavor: flavored
                && !aware
                && self.obj.is_ego()
                && record.has(IdentFlags::NAME),
            flavor_mismatch: flavored && !aware && record.state() >= IdentState::FlavorAware,
        }
    }

    /// Record contradicts itself or the flavor table
    pub fn is_not_known_consistently(&self) -> bool {
        self.inconsistency().any()
    }
}
