//! Knowledge transitions for a single object
//!
//! Each `notice_*` method records something the player has just learnt.
//! Transitions are unions: they never forget a flag, clear an ident bit or
//! move the ident state backwards, so calling one twice is the same as
//! calling it once.

use tracing::{debug, trace};

use super::record::{IdentFlags, IdentState};
use super::KnowledgeBase;
use crate::object::{FlagSet, FlagType, Object, ObjectFlag};

impl KnowledgeBase {
    /// The player now knows what every object of this kind is
    pub fn flavor_aware(&mut self, obj: &mut Object) {
        if self.flavors.set_aware(obj.kind) {
            debug!(kind = obj.kind.0, "flavor became aware");
        }
        obj.knowledge_mut().advance(IdentState::FlavorAware);
    }

    /// The player has tried an object of this kind
    pub fn flavor_tried(&mut self, obj: &mut Object) {
        self.flavors.set_tried(obj.kind);
    }

    /// Learn everything about the object
    pub fn notice_everything(&mut self, obj: &mut Object) {
        let true_flags = obj.flags;
        let record = obj.knowledge_mut();
        let promoted = record.advance(IdentState::FullyKnown);
        record.add_ident(IdentFlags::EVERYTHING);
        record.learn(FlagSet::full(), true_flags);

        match obj.artifact {
            Some(artifact) => {
                self.flavors.see_artifact(artifact);
                obj.knowledge_mut().add_ident(IdentFlags::INDESTRUCT);
            }
            None => {
                obj.knowledge_mut().add_ident(IdentFlags::NOT_ARTIFACT);
            }
        }
        self.flavor_aware(obj);

        if promoted {
            debug!(object = obj.id.0, kind = obj.kind.0, "object fully known");
        }
    }

    /// The object survived something that destroys ordinary objects
    pub fn notice_indestructible(&mut self, obj: &mut Object) {
        if !obj.is_artifact() {
            return;
        }
        let true_flags = obj.flags;
        let record = obj.knowledge_mut();
        record.add_ident(IdentFlags::INDESTRUCT);
        record.learn(FlagSet::of_type(FlagType::Ignore), true_flags);
        self.check_for_ident(obj);
    }

    /// Learn the ego type of an object.
    ///
    /// Every flag is settled except those the ego's random ability could
    /// have been drawn from. Flavor awareness is left alone: an ego on an
    /// unaware flavored kind is never deduced into full identification here.
    pub fn notice_ego(&mut self, obj: &mut Object) {
        let Some(ego) = obj.ego else {
            return;
        };

        let mut mask = FlagSet::full();
        if let Some(ability) = ego.random_ability {
            mask = mask - ability.candidates();
        }
        mask.union_with(ego.flags);

        let true_flags = obj.flags;
        let revealed = obj.knowledge_mut().learn(mask, true_flags);
        if !revealed.is_empty() {
            trace!(object = obj.id.0, flags = ?revealed, "ego flags revealed");
        }

        if !obj.knowledge_mut().add_ident(IdentFlags::NAME) {
            return;
        }
        debug!(object = obj.id.0, ego = ego.id.0, "ego noticed");
        if self.view(obj).flavor_is_aware() {
            self.notice_sensing(obj);
            self.check_for_ident(obj);
        } else {
            self.record_sensing(obj);
        }
    }

    /// Pseudo-identify the object: curses and artifact names show up
    pub fn notice_sensing(&mut self, obj: &mut Object) {
        if self.record_sensing(obj) {
            self.check_for_ident(obj);
        }
    }

    /// Sensing without deduction. Returns false if already sensed.
    fn record_sensing(&mut self, obj: &mut Object) -> bool {
        if obj.knowledge().has(IdentFlags::SENSE) {
            return false;
        }

        let true_flags = obj.flags;
        let record = obj.knowledge_mut();
        record.add_ident(IdentFlags::SENSE);
        record.advance(IdentState::Sensed);
        let curses = record.learn(FlagSet::of_type(FlagType::Curse), true_flags);
        if !curses.is_empty() {
            trace!(object = obj.id.0, flags = ?curses, "curses revealed");
        }

        if let Some(artifact) = obj.artifact {
            self.flavors.see_artifact(artifact);
            obj.knowledge_mut().add_ident(IdentFlags::NAME);
        }
        true
    }

    /// Sense the object if it is an artifact, otherwise learn that it is not
    pub fn sense_artifact(&mut self, obj: &mut Object) {
        if obj.is_artifact() {
            self.notice_sensing(obj);
        } else {
            obj.knowledge_mut().add_ident(IdentFlags::NOT_ARTIFACT);
        }
    }

    /// The object's use effect has been seen
    pub fn notice_effect(&mut self, obj: &mut Object) {
        if obj.knowledge_mut().add_ident(IdentFlags::EFFECT) {
            self.check_for_ident(obj);
        }
        self.flavor_aware(obj);
    }

    /// Returns true if the attack bonuses were not already visible
    pub fn notice_attack_plusses(&mut self, obj: &mut Object) -> bool {
        if !obj.knowledge_mut().add_ident(IdentFlags::ATTACK) {
            return false;
        }
        trace!(object = obj.id.0, to_h = obj.to_h, to_d = obj.to_d, "attack plusses noticed");
        self.check_for_ident(obj);
        true
    }

    /// Returns true if the armour bonus was not already visible
    pub fn notice_defence_plusses(&mut self, obj: &mut Object) -> bool {
        if !obj.knowledge_mut().add_ident(IdentFlags::DEFENCE) {
            return false;
        }
        trace!(object = obj.id.0, to_a = obj.to_a, "defence plusses noticed");
        self.check_for_ident(obj);
        true
    }

    /// Learn whether the object has `flag`.
    ///
    /// Returns true if the player did not already know whether the object
    /// has the flag. A missing flag is recorded as ruled out.
    pub fn notice_flag(&mut self, obj: &mut Object, flag: ObjectFlag) -> bool {
        let unsettled = !obj.knowledge().settled().test(flag);
        self.notice_flags(obj, FlagSet::from(flag));
        unsettled
    }

    /// Learn whether the object has each flag in `flags`.
    ///
    /// Returns true if at least one present flag was newly revealed.
    pub fn notice_flags(&mut self, obj: &mut Object, flags: FlagSet) -> bool {
        let unsettled = flags - obj.knowledge().settled();
        if unsettled.is_empty() {
            return false;
        }

        let true_flags = obj.flags;
        let revealed = obj.knowledge_mut().learn(unsettled, true_flags);
        if !revealed.is_empty() {
            trace!(object = obj.id.0, flags = ?revealed, "flags revealed");
        }
        self.check_for_ident(obj);
        !revealed.is_empty()
    }

    /// Learn which curses the object carries.
    ///
    /// Returns true if a curse was newly revealed.
    pub fn notice_curses(&mut self, obj: &mut Object) -> bool {
        self.notice_flags(obj, FlagSet::of_type(FlagType::Curse))
    }

    /// Settle every flag without changing the ident state
    pub fn know_all_flags(&mut self, obj: &mut Object) {
        let true_flags = obj.flags;
        obj.knowledge_mut().learn(FlagSet::full(), true_flags);
    }

    /// The object is offered for sale and shown in full
    pub fn mark_store_item(&mut self, obj: &mut Object) {
        obj.knowledge_mut().add_ident(IdentFlags::STORE);
    }

    /// The object has been fired or thrown
    pub fn notice_on_firing(&mut self, obj: &mut Object) {
        if self.view(obj).is_known() {
            return;
        }
        if obj.knowledge_mut().add_ident(IdentFlags::FIRED) {
            self.check_for_ident(obj);
        }
    }

    /// Promote the object to fully known if nothing about it is hidden.
    ///
    /// An object whose relevant flags are all known, and whose bonuses and
    /// effect are known or provably trivial, is fully identified. A worn ego
    /// item with all flags known at least shows its ego.
    pub fn check_for_ident(&mut self, obj: &mut Object) -> bool {
        let view = self.view(obj);
        if view.is_known() {
            return false;
        }

        let ignored = FlagSet::of_types(&[FlagType::Interface, FlagType::Ignore, FlagType::Hates]);
        let relevant = obj.flags - ignored;
        if !relevant.is_subset(view.known_flags()) {
            return false;
        }

        let sensed = view.was_sensed();
        let attack_known =
            view.attack_plusses_are_visible() || (sensed && obj.to_h == 0 && obj.to_d == 0);
        let defence_known = view.defence_plusses_are_visible() || (sensed && obj.to_a == 0);
        let effect_known = view.effect_is_known() || !view.kind().has_effect;
        let worn_ego = obj.is_ego() && view.was_worn();

        if attack_known && defence_known && effect_known {
            self.notice_everything(obj);
            return true;
        }
        if worn_ego {
            self.notice_ego(obj);
        }
        false
    }

    /// Fix contradictions in a record, only ever adding knowledge.
    ///
    /// Returns true if anything had to be repaired.
    pub fn repair_knowledge(&mut self, obj: &mut Object) -> bool {
        let found = self.view(obj).inconsistency();
        if !found.any() {
            return false;
        }

        debug!(object = obj.id.0, problems = ?found, "repairing object knowledge");
        if found.incomplete_known {
            self.notice_everything(obj);
        }
        if found.name_without_flavor || found.flavor_mismatch {
            self.flavor_aware(obj);
        }
        self.check_for_ident(obj);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{
        ArtifactId, BonusRange, EgoId, EgoRef, ItemCategory, KindId, KindTable, ObjectId,
        ObjectKind, RandomAbility,
    };

    const SWORD: KindId = KindId(1);
    const AMULET: KindId = KindId(2);
    const WAND: KindId = KindId(3);

    fn kb() -> KnowledgeBase {
        let kinds: KindTable = [
            ObjectKind::new(SWORD, "Broad Sword", ItemCategory::Sword)
                .with_flags(&[ObjectFlag::HatesAcid]),
            ObjectKind::new(AMULET, "Amulet of Slow Digestion", ItemCategory::Amulet)
                .with_flavor("Bone")
                .with_flags(&[ObjectFlag::SlowDigest]),
            ObjectKind::new(WAND, "Wand of Stinking Cloud", ItemCategory::Wand)
                .with_flavor("Aluminium")
                .with_effect(),
        ]
        .into_iter()
        .collect();
        KnowledgeBase::new(kinds)
    }

    fn make(kb: &KnowledgeBase, kind: KindId) -> Object {
        Object::new(ObjectId(1), kb.kinds().get(kind))
    }

    #[test]
    fn test_notice_flag_reveals_only_true_flags() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_flags(&[ObjectFlag::ResFire, ObjectFlag::Teleport]);

        assert!(kb.notice_flag(&mut obj, ObjectFlag::ResFire));
        assert!(kb.view(&obj).flag_is_known(ObjectFlag::ResFire));
        assert!(!kb.view(&obj).flag_is_known(ObjectFlag::Teleport));
        assert!(!kb.notice_flag(&mut obj, ObjectFlag::ResFire));

        // Absent flags are ruled out, not revealed
        assert!(kb.notice_flag(&mut obj, ObjectFlag::ResCold));
        assert!(obj.knowledge().ruled_out().test(ObjectFlag::ResCold));
        assert!(!obj.knowledge().known_flags().test(ObjectFlag::ResCold));
        assert!(!kb.notice_flag(&mut obj, ObjectFlag::ResCold));
    }

    #[test]
    fn test_notice_flags_batch() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_flags(&[ObjectFlag::SeeInvis]);
        let mask = FlagSet::from_flags(&[ObjectFlag::SeeInvis, ObjectFlag::Telepathy]);
        assert!(kb.notice_flags(&mut obj, mask));
        assert!(!kb.notice_flags(&mut obj, mask));
        assert!(obj.knowledge().settled().is_subset(FlagSet::full()));
        assert!(mask.is_subset(obj.knowledge().settled()));
    }

    #[test]
    fn test_notice_curses() {
        let mut kb = kb();
        let mut cursed = make(&kb, SWORD).with_flags(&[ObjectFlag::Aggravate]);
        assert!(kb.notice_curses(&mut cursed));
        assert!(kb.view(&cursed).is_known_cursed());
        assert!(!kb.notice_curses(&mut cursed));

        let mut clean = make(&kb, SWORD);
        assert!(!kb.notice_curses(&mut clean));
        assert!(!kb.view(&clean).is_known_cursed());
    }

    #[test]
    fn test_notice_everything() {
        let mut kb = kb();
        let mut obj = make(&kb, AMULET).with_flags(&[ObjectFlag::ResPois]);
        kb.notice_everything(&mut obj);

        let view = kb.view(&obj);
        assert!(view.is_known());
        assert!(view.flavor_is_aware());
        assert!(view.is_known_not_artifact());
        assert_eq!(view.ident_state(), IdentState::FullyKnown);
        assert_eq!(obj.knowledge().known_flags(), obj.flags);
        assert_eq!(obj.knowledge().settled(), FlagSet::full());
        assert!(!view.is_not_known_consistently());

        let before = obj.knowledge().clone();
        kb.notice_everything(&mut obj);
        kb.notice_sensing(&mut obj);
        kb.notice_ego(&mut obj);
        assert_eq!(obj.knowledge(), &before);
    }

    #[test]
    fn test_notice_everything_records_artifact() {
        let mut kb = kb();
        let mut art = make(&kb, SWORD).with_artifact(ArtifactId(7), &[ObjectFlag::Speed]);
        kb.notice_everything(&mut art);
        assert!(kb.flavors().artifact_seen(ArtifactId(7)));
        assert!(!kb.view(&art).is_known_not_artifact());
    }

    #[test]
    fn test_notice_indestructible_only_for_artifacts() {
        let mut kb = kb();
        let mut plain = make(&kb, SWORD);
        kb.notice_indestructible(&mut plain);
        assert!(!plain.knowledge().has(IdentFlags::INDESTRUCT));

        let mut art = make(&kb, SWORD)
            .with_artifact(ArtifactId(1), &[ObjectFlag::IgnoreFire, ObjectFlag::ResElec]);
        kb.notice_indestructible(&mut art);
        let view = kb.view(&art);
        assert!(view.is_known_artifact());
        assert!(art.knowledge().known_flags().test(ObjectFlag::IgnoreFire));
        assert!(art.knowledge().ruled_out().test(ObjectFlag::IgnoreAcid));
        assert!(!art.knowledge().settled().test(ObjectFlag::ResElec));
    }

    #[test]
    fn test_notice_ego_keeps_random_ability_hidden() {
        let mut kb = kb();
        let ego = EgoRef::new(EgoId(4), &[ObjectFlag::ResFire, ObjectFlag::ResCold])
            .with_random_ability(RandomAbility::HighResist);
        let mut obj = make(&kb, SWORD)
            .with_ego(ego)
            .with_flags(&[ObjectFlag::ResNether])
            .with_plusses(3, 2, 0);

        kb.notice_ego(&mut obj);
        let view = kb.view(&obj);
        assert!(view.ego_is_visible());
        assert!(view.was_sensed());
        assert!(view.flag_is_known(ObjectFlag::ResFire));
        assert!(!view.flag_is_known(ObjectFlag::ResNether));
        assert!(view.high_resist_is_possible());
        assert!(obj.knowledge().ruled_out().test(ObjectFlag::Speed));
        assert!(!view.is_known());
    }

    #[test]
    fn test_notice_ego_leaves_flavor_unaware() {
        let mut kb = kb();
        let ego = EgoRef::new(EgoId(6), &[ObjectFlag::ResFire]);
        let mut amulet = make(&kb, AMULET).with_ego(ego);
        assert!(!kb.view(&amulet).flavor_is_aware());

        kb.notice_ego(&mut amulet);
        let view = kb.view(&amulet);
        assert!(view.name_is_visible());
        assert!(view.was_sensed());
        assert!(!view.flavor_is_aware());
        assert!(!view.is_known());

        assert!(kb.repair_knowledge(&mut amulet));
        assert!(kb.view(&amulet).flavor_is_aware());
        assert!(kb.view(&amulet).is_known());
    }

    #[test]
    fn test_notice_sensing_is_idempotent() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_plusses(1, 1, 0).with_flags(&[ObjectFlag::DrainExp]);
        kb.notice_sensing(&mut obj);
        assert_eq!(obj.knowledge().state(), IdentState::Sensed);
        assert!(kb.view(&obj).is_known_cursed());

        let before = obj.knowledge().clone();
        kb.notice_sensing(&mut obj);
        assert_eq!(obj.knowledge(), &before);
    }

    #[test]
    fn test_sense_artifact() {
        let mut kb = kb();
        let mut plain = make(&kb, SWORD);
        kb.sense_artifact(&mut plain);
        assert!(kb.view(&plain).is_known_not_artifact());
        assert!(!kb.view(&plain).was_sensed());

        let mut art = make(&kb, SWORD).with_artifact(ArtifactId(2), &[ObjectFlag::Blows]);
        kb.sense_artifact(&mut art);
        assert!(kb.view(&art).is_known_artifact());
        assert!(kb.view(&art).name_is_visible());
    }

    #[test]
    fn test_notice_effect_makes_flavor_aware() {
        let mut kb = kb();
        let mut wand = make(&kb, WAND);
        assert!(!kb.view(&wand).effect_is_known());
        kb.notice_effect(&mut wand);
        let view = kb.view(&wand);
        assert!(view.effect_is_known());
        assert!(view.flavor_is_aware());
        assert_eq!(view.ident_state(), IdentState::FlavorAware);
    }

    #[test]
    fn test_plusses_notice_once() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_plusses(4, 5, 0);
        assert!(kb.notice_attack_plusses(&mut obj));
        assert!(!kb.notice_attack_plusses(&mut obj));
        assert!(kb.view(&obj).attack_plusses_are_visible());

        assert!(kb.notice_defence_plusses(&mut obj));
        assert!(!kb.notice_defence_plusses(&mut obj));
    }

    #[test]
    fn test_check_for_ident_needs_plusses() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_plusses(2, 3, 0);
        kb.know_all_flags(&mut obj);
        assert!(!kb.check_for_ident(&mut obj));

        kb.notice_attack_plusses(&mut obj);
        assert!(!kb.view(&obj).is_known());
        // Sensing shows the armour bonus is zero
        kb.notice_sensing(&mut obj);
        assert!(kb.view(&obj).is_known());
    }

    #[test]
    fn test_check_for_ident_ignores_hates_flags() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD);
        assert!(obj.has_flag(ObjectFlag::HatesAcid));
        kb.notice_sensing(&mut obj);
        assert!(kb.view(&obj).is_known());
    }

    #[test]
    fn test_worn_ego_with_known_flags_shows_name() {
        let mut kb = kb();
        let ego = EgoRef::new(EgoId(5), &[ObjectFlag::SlayOrc]);
        let mut obj = make(&kb, SWORD).with_ego(ego).with_plusses(5, 5, 0);
        obj.knowledge_mut().add_ident(IdentFlags::WORN);

        kb.notice_flag(&mut obj, ObjectFlag::SlayOrc);
        assert!(kb.view(&obj).ego_is_visible());
        assert!(!kb.view(&obj).is_known());
    }

    #[test]
    fn test_know_all_flags_keeps_state() {
        let mut kb = kb();
        let mut obj = make(&kb, AMULET);
        kb.know_all_flags(&mut obj);
        assert_eq!(obj.knowledge().state(), IdentState::Unknown);
        assert_eq!(obj.knowledge().settled(), FlagSet::full());
    }

    #[test]
    fn test_notice_on_firing() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_plusses(1, 1, 0);
        kb.notice_on_firing(&mut obj);
        assert!(kb.view(&obj).was_fired());
    }

    #[test]
    fn test_repair_fully_known_without_flags() {
        let mut kb = kb();
        let mut obj = make(&kb, SWORD).with_flags(&[ObjectFlag::ResAcid]);
        obj.knowledge_mut().add_ident(IdentFlags::KNOWN);
        assert!(kb.view(&obj).is_not_known_consistently());

        assert!(kb.repair_knowledge(&mut obj));
        assert!(!kb.view(&obj).is_not_known_consistently());
        assert!(kb.view(&obj).flag_is_known(ObjectFlag::ResAcid));
        assert!(!kb.repair_knowledge(&mut obj));
    }

    #[test]
    fn test_repair_flavor_mismatch() {
        let mut kb = kb();
        let mut amulet = make(&kb, AMULET);
        amulet.knowledge_mut().advance(IdentState::FlavorAware);
        assert!(kb.view(&amulet).is_not_known_consistently());

        assert!(kb.repair_knowledge(&mut amulet));
        assert!(kb.view(&amulet).flavor_is_aware());
        assert!(!kb.view(&amulet).is_not_known_consistently());
    }

    #[test]
    fn test_easy_know_objects_are_consistent() {
        let kinds: KindTable = [ObjectKind::new(KindId(0), "Iron Spike", ItemCategory::Spike)
            .with_bonuses(BonusRange::fixed(0), BonusRange::fixed(0), BonusRange::fixed(0))]
        .into_iter()
        .collect();
        let kb = KnowledgeBase::new(kinds);
        let mut spike = Object::new(ObjectId(9), kb.kinds().get(KindId(0)));
        spike.knowledge_mut().add_ident(IdentFlags::KNOWN);
        assert!(!kb.view(&spike).is_not_known_consistently());
    }
}
