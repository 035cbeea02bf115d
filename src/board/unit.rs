//! Unit types and ownership.
//!
//! A unit is an army or a fleet together with where it stands. Ownership is
//! not part of the unit value; the map state pairs each unit with its nation.

use serde::{Deserialize, Serialize};

use crate::map::{ArmyLoc, FleetLoc};

/// Name of a great power, e.g. `"france"`.
pub type Nation = String;

/// A military unit and its location.
///
/// Serialized as `{"type": "army", "data": "par"}` or
/// `{"type": "fleet", "data": ["stp", "sc"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Unit {
    Army(ArmyLoc),
    Fleet(FleetLoc),
}

impl Unit {
    /// Creates an army in `province`.
    pub fn army(province: impl Into<String>) -> Self {
        Unit::Army(province.into())
    }

    /// Creates a fleet at `loc`.
    pub fn fleet(loc: FleetLoc) -> Self {
        Unit::Fleet(loc)
    }

    /// Returns the province the unit stands in, whatever its type.
    pub fn province(&self) -> &str {
        match self {
            Unit::Army(p) => p,
            Unit::Fleet(loc) => &loc.province,
        }
    }

    /// Returns the same kind of unit standing at `dest`.
    ///
    /// An army drops any coast on the destination.
    pub fn moved_to(&self, dest: &FleetLoc) -> Unit {
        match self {
            Unit::Army(_) => Unit::Army(dest.province.clone()),
            Unit::Fleet(_) => Unit::Fleet(dest.clone()),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Army(p) => write!(f, "A {}", p),
            Unit::Fleet(loc) => write!(f, "F {}", loc),
        }
    }
}

/// A unit together with the nation that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationedUnit {
    pub nation: Nation,
    pub unit: Unit,
}

impl StationedUnit {
    pub fn new(nation: impl Into<String>, unit: Unit) -> Self {
        Self {
            nation: nation.into(),
            unit,
        }
    }
}
