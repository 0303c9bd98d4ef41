//! ident-core: Object knowledge and identification for a roguelike
//!
//! Tracks what the player knows about each object: its flavor, its magical
//! flags, ego and artifact status, and whether that knowledge was learnt or
//! merely sensed. Knowledge only ever moves forward, driven by game events
//! such as wielding, firing, being attacked and the passage of time.
//!
//! Rendering, combat, item generation and save files live elsewhere; this
//! crate has no I/O beyond reading and writing its option file.

pub mod knowledge;
pub mod object;
pub mod player;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use knowledge::{
    Feeling, FlavorTable, IdentFlags, IdentState, KnowledgeBase, KnowledgeView, NoticeReport,
    ObjectKnowledge,
};
pub use rng::{GameRng, RandomSource};
