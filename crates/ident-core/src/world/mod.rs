//! World state
//!
//! Turn bookkeeping shared by the identification hooks, and options.

pub mod options;

use serde::{Deserialize, Serialize};

pub use options::{IdentifyOptions, OptionsError};

/// Turn information shared by knowledge hooks
///
/// `last_wield` is written when anything is wielded and read by the timed
/// notice pass of inventory sensing. Hooks run one after another within a
/// turn, so a wield is always recorded before later hooks of the same turn
/// look at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    /// Current game turn
    pub turn: i64,
    /// Turn at which an item was last wielded (0 = none pending)
    pub last_wield: i64,
}

impl TurnContext {
    pub fn new(turn: i64) -> Self {
        Self {
            turn,
            last_wield: 0,
        }
    }

    /// Advance the game clock
    pub fn advance(&mut self, turns: i64) {
        self.turn = self.turn.saturating_add(turns);
    }

    /// Record that something was wielded this turn
    pub fn record_wield(&mut self) {
        self.last_wield = self.turn;
    }

    /// Turns elapsed since the last recorded wield
    pub fn turns_since_wield(&self) -> i64 {
        self.turn.saturating_sub(self.last_wield)
    }
}
