//! Movement results and skip-empty phase traversal.
//!
//! A retreat phase is only worth visiting when the movement phase before it
//! dislodged something. Navigation helpers step past retreat phases whose
//! movement phase has no recorded [`MvmtInfo`] or no pending retreats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::game_phase::GamePhase;
use crate::board::StationedUnit;
use crate::map::{FleetLoc, ProvinceKey};

/// A dislodged unit and the places it may retreat to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetreatOptions {
    pub src: StationedUnit,
    pub dest: Vec<FleetLoc>,
}

impl RetreatOptions {
    /// Returns true if `dest` is one of the legal destinations.
    pub fn allows(&self, dest: &FleetLoc) -> bool {
        self.dest.contains(dest)
    }
}

/// Outcome of one resolved movement phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MvmtInfo {
    /// Ordered unit's province -> whether its order succeeded.
    pub order_status: BTreeMap<ProvinceKey, bool>,
    /// Dislodged unit's province -> its retreat options.
    pub retreats: BTreeMap<ProvinceKey, RetreatOptions>,
}

impl MvmtInfo {
    pub fn has_pending_retreats(&self) -> bool {
        !self.retreats.is_empty()
    }
}

/// Movement results keyed by the movement phase they resolved.
pub type History = BTreeMap<GamePhase, MvmtInfo>;

/// Returns true if `phase` should be skipped: a retreat phase whose movement
/// phase has no recorded results or an empty retreat set.
pub fn is_vacuous(phase: GamePhase, history: &History) -> bool {
    phase.is_retreat()
        && !history
            .get(&phase.movement_phase())
            .is_some_and(MvmtInfo::has_pending_retreats)
}

/// Steps forward from `phase`, skipping vacuous retreat phases.
pub fn next_nonempty_phase(phase: GamePhase, history: &History) -> GamePhase {
    let mut next = phase.next();
    while is_vacuous(next, history) {
        next = next.next();
    }
    next
}

/// Steps backward from `phase`, skipping vacuous retreat phases.
pub fn prev_nonempty_phase(phase: GamePhase, history: &History) -> GamePhase {
    let mut prev = phase.prev();
    while is_vacuous(prev, history) {
        prev = prev.prev();
    }
    prev
}
