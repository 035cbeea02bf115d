//! Order types.
//!
//! Orders are keyed by the province of the issuing unit, so the variants carry
//! only the data beyond that. A move names a fleet-style destination; convoys
//! and supports name plain provinces. Retreat orders reuse `Move`. The JSON
//! form is internally tagged: `{"type": "move", "dest": ["bul", "sc"]}`,
//! `{"type": "support_hold", "target": "vie"}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::map::{FleetLoc, ProvinceKey};

/// A single order for the unit in the keying province.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Order {
    /// Hold: `A vie H`
    Hold,

    /// Move (or retreat): `A bud - rum`, `F nwg - stp-nc`
    Move { dest: FleetLoc },

    /// Convoy: `F mao C A bre - spa`
    Convoy { src: ProvinceKey, dest: ProvinceKey },

    /// Support move: `A gal S A bud - rum`
    SupportMove { src: ProvinceKey, dest: ProvinceKey },

    /// Support hold: `A tyr S vie`
    SupportHold { target: ProvinceKey },

    /// Core: `A mun core`. Variant-specific; resolvers may treat it as a hold.
    Core,
}

impl Order {
    /// Creates a move to `dest`.
    pub fn move_to(dest: FleetLoc) -> Self {
        Order::Move { dest }
    }

    /// Returns the move destination, if this is a move.
    pub fn dest(&self) -> Option<&FleetLoc> {
        match self {
            Order::Move { dest } => Some(dest),
            _ => None,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Hold => f.write_str("H"),
            Order::Move { dest } => write!(f, "- {}", dest),
            Order::Convoy { src, dest } => write!(f, "C {} - {}", src, dest),
            Order::SupportMove { src, dest } => write!(f, "S {} - {}", src, dest),
            Order::SupportHold { target } => write!(f, "S {}", target),
            Order::Core => f.write_str("core"),
        }
    }
}

/// One phase's orders, keyed by the ordered unit's province.
pub type Orders = BTreeMap<ProvinceKey, Order>;
