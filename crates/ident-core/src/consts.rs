//! Identification tuning constants
//!
//! Defaults for [`IdentifyOptions`](crate::world::IdentifyOptions).

/// Game turns an item must be worn before its timed flags are noticed
pub const TIMED_NOTICE_DELAY: i64 = 3000;

/// Chance (1 in N) per sensing pass that a sensed, worn item is fully identified
pub const SENSED_IDENT_ONE_IN: u32 = 1000;

/// Chance (1 in N) that sensing skips an item carried in the pack
pub const PACK_SENSE_FAIL_ONE_IN: u32 = 5;

/// Chance (1 in N) that being attacked reveals a worn item's armour bonus
pub const DEFEND_NOTICE_ONE_IN: u32 = 1;
