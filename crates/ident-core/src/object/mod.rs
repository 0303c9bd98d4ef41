//! Object system
//!
//! Object flags, kinds (templates) and instances.

mod flag;
mod kind;
mod obj;

pub use flag::{FlagSet, FlagType, IdMethod, ObjectFlag};
pub use kind::{BonusRange, ItemCategory, KindId, KindTable, ObjectKind};
pub use obj::{ArtifactId, EgoId, EgoRef, Object, ObjectId, RandomAbility};
