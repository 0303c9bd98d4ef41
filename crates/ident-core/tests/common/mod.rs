//! Shared fixtures for integration tests

#![allow(dead_code)]

use ident_core::object::*;
use ident_core::KnowledgeBase;

pub const LONG_SWORD: KindId = KindId(1);
pub const RING_OF_SPEED: KindId = KindId(2);
pub const RING_OF_TELEPORT: KindId = KindId(3);
pub const AMULET_OF_ESP: KindId = KindId(4);
pub const LEATHER_GLOVES: KindId = KindId(5);
pub const LANTERN: KindId = KindId(6);
pub const SMALL_SHIELD: KindId = KindId(7);
pub const FLASK_OF_OIL: KindId = KindId(8);
pub const ARROW: KindId = KindId(9);
pub const LONG_BOW: KindId = KindId(10);

/// A small object table covering every knowledge path
pub fn kind_table() -> KindTable {
    [
        ObjectKind::new(LONG_SWORD, "Long Sword", ItemCategory::Sword)
            .with_flags(&[ObjectFlag::HatesAcid, ObjectFlag::HatesFire]),
        ObjectKind::new(RING_OF_SPEED, "Ring of Speed", ItemCategory::Ring)
            .with_flavor("Moonstone")
            .with_flags(&[ObjectFlag::Speed]),
        ObjectKind::new(RING_OF_TELEPORT, "Ring of Teleportation", ItemCategory::Ring)
            .with_flavor("Bloodstone")
            .with_flags(&[ObjectFlag::Teleport, ObjectFlag::Speed]),
        ObjectKind::new(AMULET_OF_ESP, "Amulet of ESP", ItemCategory::Amulet)
            .with_flavor("Crystal")
            .with_flags(&[ObjectFlag::Telepathy])
            .with_effect(),
        ObjectKind::new(LEATHER_GLOVES, "Set of Leather Gloves", ItemCategory::Gloves)
            .with_bonuses(BonusRange::fixed(0), BonusRange::fixed(0), BonusRange::new(0, 5)),
        ObjectKind::new(LANTERN, "Lantern", ItemCategory::Light)
            .with_flags(&[ObjectFlag::Light, ObjectFlag::IgnoreFire]),
        ObjectKind::new(SMALL_SHIELD, "Small Metal Shield", ItemCategory::Shield)
            .with_bonuses(BonusRange::fixed(0), BonusRange::fixed(0), BonusRange::new(0, 8)),
        ObjectKind::new(FLASK_OF_OIL, "Flask of Oil", ItemCategory::Flask)
            .with_flags(&[ObjectFlag::HatesCold]),
        ObjectKind::new(ARROW, "Arrow", ItemCategory::Arrow),
        ObjectKind::new(LONG_BOW, "Long Bow", ItemCategory::Bow)
            .with_flags(&[ObjectFlag::Might]),
    ]
    .into_iter()
    .collect()
}

pub fn knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(kind_table())
}

/// Plain object of a kind from the fixture table
pub fn object(kb: &KnowledgeBase, id: u32, kind: KindId) -> Object {
    Object::new(ObjectId(id), kb.kinds().get(kind))
}

/// Every fixture kind
pub fn all_kinds() -> Vec<KindId> {
    vec![
        LONG_SWORD,
        RING_OF_SPEED,
        RING_OF_TELEPORT,
        AMULET_OF_ESP,
        LEATHER_GLOVES,
        LANTERN,
        SMALL_SHIELD,
        FLASK_OF_OIL,
        ARROW,
        LONG_BOW,
    ]
}
