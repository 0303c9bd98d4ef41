//! Player-level knowledge events
//!
//! These hooks are called by the game when something happens to the player
//! or their equipment. Each returns a [`NoticeReport`] with the messages to
//! show and the objects that became fully known.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::IdentFlags;
use super::{Feeling, KnowledgeBase};
use crate::object::{FlagSet, FlagType, IdMethod, Object, ObjectFlag, ObjectId};
use crate::player::{EquipSlot, Player, PlayerTraits};
use crate::rng::RandomSource;
use crate::world::TurnContext;

/// What the player learnt from one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeReport {
    /// Messages for the player, in order
    pub messages: Vec<String>,
    /// Objects that became fully known
    pub identified: Vec<ObjectId>,
}

impl NoticeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.identified.is_empty()
    }

    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    /// Append another report to this one
    pub fn merge(&mut self, other: NoticeReport) {
        self.messages.extend(other.messages);
        self.identified.extend(other.identified);
    }
}

/// Message for an obvious flag noticed on wielding
fn wield_message(flag: ObjectFlag, pval: i16) -> Option<String> {
    use ObjectFlag::*;
    let good = pval > 0;
    let msg = match flag {
        Str => format!("You feel {}!", if good { "stronger" } else { "weaker" }),
        Int => format!("You feel {}!", if good { "smarter" } else { "more stupid" }),
        Wis => format!("You feel {}!", if good { "wiser" } else { "more naive" }),
        Dex => format!("You feel {}!", if good { "more dextrous" } else { "clumsier" }),
        Con => format!("You feel {}!", if good { "healthier" } else { "sicklier" }),
        Chr => format!("You feel {}!", if good { "cuter" } else { "uglier" }),
        Stealth => format!("You feel {} stealthy.", if good { "more" } else { "less" }),
        Search => format!("You feel {} perceptive.", if good { "more" } else { "less" }),
        Infra => "Your eyes tingle.".to_string(),
        Tunnel => format!("You feel {} at digging.", if good { "better" } else { "worse" }),
        Speed => format!("You feel strangely {}.", if good { "quick" } else { "sluggish" }),
        Blows => "Your weapon tingles in your hands.".to_string(),
        Shots => "Your missile launcher vibrates in your hands.".to_string(),
        Might => "You feel your missile launcher grow more powerful.".to_string(),
        Light => "It glows!".to_string(),
        Telepathy => "Your mind feels strangely sharper!".to_string(),
        SeeInvis => "Your eyes feel very sharp.".to_string(),
        Blessed => "You feel a holy aura around you.".to_string(),
        FreeAct => "Your hands feel unhindered.".to_string(),
        BrandAcid => "Your weapon is coated in acid.".to_string(),
        BrandElec => "Your weapon crackles with electricity.".to_string(),
        BrandFire => "Your weapon is wreathed in flame.".to_string(),
        BrandCold => "Your weapon is covered in frost.".to_string(),
        BrandPois => "Your weapon drips with venom.".to_string(),
        _ => return None,
    };
    Some(msg)
}

impl KnowledgeBase {
    /// Record a newly identified object in the report
    fn note_identified(&self, obj: &Object, was_known: bool, report: &mut NoticeReport) {
        if !was_known && self.view(obj).is_known() {
            report.identified.push(obj.id);
        }
    }

    /// Notice `flag` on a worn object and tell the player about it
    fn notice_worn_flag(&mut self, obj: &mut Object, flag: ObjectFlag, report: &mut NoticeReport) {
        let name = self.object_name(obj);
        report.message(flag.notice_message().replacen("{}", &name, 1));
        self.notice_flag(obj, flag);

        // Jewelry with anything noticeable is obvious, unless its
        // activation is still to be learnt
        let effect_pending = self.kind_of(obj).has_effect && !self.view(obj).effect_is_known();
        if obj.is_jewelry() && !effect_pending {
            self.flavor_aware(obj);
            self.check_for_ident(obj);
        }
    }

    fn notice_plusses_message(slot: EquipSlot, name: &str, report: &mut NoticeReport) {
        report.message(format!("You know more about the {} {}.", name, slot.describe()));
    }

    /// The player has wielded or worn `obj`
    pub fn notice_on_wield(
        &mut self,
        obj: &mut Object,
        traits: &PlayerTraits,
        turn: &mut TurnContext,
    ) -> NoticeReport {
        let mut report = NoticeReport::new();
        turn.record_wield();
        let newly_worn = obj.knowledge_mut().add_ident(IdentFlags::WORN);

        if self.view(obj).is_known() {
            return report;
        }

        self.flavor_tried(obj);
        if newly_worn {
            self.check_for_ident(obj);
        }

        // Light sources show their ego as soon as they are lit
        if obj.category.is_light() && obj.is_ego() {
            self.notice_ego(obj);
        }

        let view = self.view(obj);
        if view.flavor_is_aware() && view.easy_know() {
            self.notice_everything(obj);
            self.note_identified(obj, false, &mut report);
            return report;
        }

        self.sense_artifact(obj);

        let mut mask = FlagSet::identified_by(IdMethod::Wield);
        if self.view(obj).fa_would_be_obvious(traits) {
            mask.insert(ObjectFlag::FreeAct);
        }
        let obvious = (obj.flags - FlagSet::of_type(FlagType::Curse)) & mask;
        self.notice_flags(obj, mask);

        if obj.is_jewelry() {
            if self.options.easy_learn && !obvious.is_empty() {
                self.flavor_aware(obj);
            }
            if self.view(obj).flavor_is_aware() && !obj.is_artifact() {
                self.know_all_flags(obj);
            }
        }

        self.check_for_ident(obj);
        self.note_identified(obj, false, &mut report);

        for flag in obvious.iter() {
            if let Some(msg) = wield_message(flag, obj.pval) {
                report.message(msg);
            }
        }
        report
    }

    /// The player was attacked: worn items may show their armour bonus
    pub fn notice_on_defend<R: RandomSource>(
        &mut self,
        player: &mut Player,
        rng: &mut R,
    ) -> NoticeReport {
        let mut report = NoticeReport::new();
        let chance = self.options.defend_notice_one_in;

        for (slot, obj) in player.equipment_mut() {
            if !rng.one_in(chance) {
                continue;
            }
            let was_known = self.view(obj).is_known();
            if self.notice_defence_plusses(obj) && (obj.ac != 0 || obj.to_a != 0) {
                let name = self.object_name(obj);
                Self::notice_plusses_message(slot, &name, &mut report);
            }
            self.note_identified(obj, was_known, &mut report);
        }
        report
    }

    /// Every equipped item learns whether it has `flag`; those that have it
    /// reveal it to the player
    pub fn wieldeds_notice_flag(&mut self, player: &mut Player, flag: ObjectFlag) -> NoticeReport {
        let mut report = NoticeReport::new();

        for (_, obj) in player.equipment_mut() {
            let was_known = self.view(obj).is_known();
            if obj.has_flag(flag) && !obj.knowledge().known_flags().test(flag) {
                self.notice_worn_flag(obj, flag, &mut report);
            } else {
                self.notice_flag(obj, flag);
            }
            self.note_identified(obj, was_known, &mut report);
        }
        report
    }

    fn wieldeds_notice_attack<F>(&mut self, player: &mut Player, applies: F) -> NoticeReport
    where
        F: Fn(EquipSlot, &Object) -> bool,
    {
        let mut report = NoticeReport::new();

        for (slot, obj) in player.equipment_mut() {
            if !applies(slot, &*obj) {
                continue;
            }
            let was_known = self.view(obj).is_known();
            if self.notice_attack_plusses(obj) {
                let name = self.object_name(obj);
                Self::notice_plusses_message(slot, &name, &mut report);
            }
            self.note_identified(obj, was_known, &mut report);
        }
        report
    }

    /// The player hit something: the weapon and any other worn item that
    /// changes to-hit reveal their attack bonuses
    pub fn wieldeds_notice_to_hit_on_attack(&mut self, player: &mut Player) -> NoticeReport {
        self.wieldeds_notice_attack(player, |slot, obj| {
            slot == EquipSlot::Weapon || (slot.adds_to_melee() && obj.to_h != 0)
        })
    }

    /// The player attacked: the weapon and every other worn item that adds
    /// to melee reveal their attack bonuses
    pub fn wieldeds_notice_on_attack(&mut self, player: &mut Player) -> NoticeReport {
        self.wieldeds_notice_attack(player, |slot, _| {
            slot == EquipSlot::Weapon || slot.adds_to_melee()
        })
    }

    /// Notice flags that only show themselves after an item is worn for a
    /// while
    pub fn notice_after_time(&mut self, player: &mut Player) -> NoticeReport {
        let mut report = NoticeReport::new();
        let timed = FlagSet::identified_by(IdMethod::Timed);

        for (_, obj) in player.equipment_mut() {
            if self.view(obj).is_known() {
                continue;
            }

            let pending = (obj.flags & timed) - obj.knowledge().known_flags();
            for flag in pending.iter() {
                self.notice_worn_flag(obj, flag, &mut report);
            }

            // Anything timed that has not shown up by now is absent
            self.notice_flags(obj, timed);
            self.check_for_ident(obj);
            self.note_identified(obj, false, &mut report);
        }
        report
    }

    /// Periodic passive sensing of the player's belongings
    pub fn sense_inventory<R: RandomSource>(
        &mut self,
        player: &mut Player,
        turn: &mut TurnContext,
        rng: &mut R,
    ) -> NoticeReport {
        let mut report = NoticeReport::new();
        if player.confused {
            return report;
        }

        if turn.turns_since_wield() >= self.options.timed_notice_delay {
            report.merge(self.notice_after_time(player));
            turn.last_wield = 0;
        }

        let traits = player.traits;
        let rate = traits.sense.rate(traits.level);
        if !rng.one_in(rate) {
            return report;
        }
        debug!(turn = turn.turn, rate, "sensing inventory");

        for obj in player.pack.iter_mut() {
            self.sense_object(obj, None, &traits, rng, &mut report);
        }
        for (slot, obj) in player.equipment_mut() {
            self.sense_object(obj, Some(slot), &traits, rng, &mut report);
        }
        report
    }

    fn sense_object<R: RandomSource>(
        &mut self,
        obj: &mut Object,
        slot: Option<EquipSlot>,
        traits: &PlayerTraits,
        rng: &mut R,
        report: &mut NoticeReport,
    ) {
        if !obj.category.can_be_sensed() || self.view(obj).is_known() {
            return;
        }

        if obj.knowledge().has(IdentFlags::SENSE) {
            // Small chance of wielded, sensed items getting complete ID
            if let Some(slot) = slot {
                if !obj.is_artifact() && rng.one_in(self.options.sensed_ident_one_in) {
                    self.notice_everything(obj);
                    let name = self.object_name(obj);
                    report.message(format!("You have identified the {} {}.", name, slot.describe()));
                    report.identified.push(obj.id);
                }
            }
            return;
        }

        // Occasional failure on pack items
        if slot.is_none() && rng.one_in(self.options.pack_sense_fail_one_in) {
            return;
        }

        self.notice_sensing(obj);
        let feeling = self.view(obj).pseudo_for(traits);
        if feeling == Feeling::Average {
            self.notice_everything(obj);
        }
        self.note_identified(obj, false, report);

        if feeling.is_known() {
            let name = self.object_name(obj);
            let msg = match slot {
                Some(slot) => format!("You feel the {} {} is {}...", name, slot.describe(), feeling),
                None => format!("You feel the {} in your pack is {}...", name, feeling),
            };
            report.message(msg);
        }
    }
}
