//! Flavor knowledge
//!
//! Flavors are learnt per kind, not per object: once the player knows what
//! a "jade ring" is, every jade ring shows its true name. Seen artifacts are
//! tracked here too since they are also game-wide discoveries.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::object::{ArtifactId, KindId};

/// Knowledge of one flavor class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorState {
    /// The player knows what objects of this flavor are
    pub aware: bool,
    /// The player has used an object of this flavor at least once
    pub tried: bool,
}

/// Game-wide discoveries keyed by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlavorTable {
    flavors: HashMap<KindId, FlavorState>,
    artifacts_seen: HashSet<ArtifactId>,
}

impl FlavorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge recorded for a kind
    pub fn get(&self, kind: KindId) -> FlavorState {
        self.flavors.get(&kind).copied().unwrap_or_default()
    }

    pub fn is_aware(&self, kind: KindId) -> bool {
        self.get(kind).aware
    }

    pub fn was_tried(&self, kind: KindId) -> bool {
        self.get(kind).tried
    }

    /// Mark a flavor as aware, returning true if it was not already
    pub fn set_aware(&mut self, kind: KindId) -> bool {
        let state = self.flavors.entry(kind).or_default();
        let new = !state.aware;
        state.aware = true;
        new
    }

    /// Mark a flavor as tried, returning true if it was not already
    pub fn set_tried(&mut self, kind: KindId) -> bool {
        let state = self.flavors.entry(kind).or_default();
        let new = !state.tried;
        state.tried = true;
        new
    }

    /// Record an artifact as seen, returning true the first time
    pub fn see_artifact(&mut self, artifact: ArtifactId) -> bool {
        self.artifacts_seen.insert(artifact)
    }

    pub fn artifact_seen(&self, artifact: ArtifactId) -> bool {
        self.artifacts_seen.contains(&artifact)
    }

    /// Number of flavors the player knows
    pub fn count_aware(&self) -> usize {
        self.flavors.values().filter(|s| s.aware).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_defaults() {
        let table = FlavorTable::new();
        assert_eq!(table.get(KindId(4)), FlavorState::default());
        assert!(!table.is_aware(KindId(4)));
        assert!(!table.was_tried(KindId(4)));
    }

    #[test]
    fn test_aware_and_tried_are_independent() {
        let mut table = FlavorTable::new();
        assert!(table.set_tried(KindId(2)));
        assert!(!table.set_tried(KindId(2)));
        assert!(table.was_tried(KindId(2)));
        assert!(!table.is_aware(KindId(2)));

        assert!(table.set_aware(KindId(2)));
        assert!(!table.set_aware(KindId(2)));
        assert_eq!(table.count_aware(), 1);
    }

    #[test]
    fn test_artifact_seen_once() {
        let mut table = FlavorTable::new();
        assert!(table.see_artifact(ArtifactId(12)));
        assert!(!table.see_artifact(ArtifactId(12)));
        assert!(table.artifact_seen(ArtifactId(12)));
    }
}
