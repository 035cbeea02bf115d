//! Board state representation.
//!
//! Holds a snapshot of the board at one phase: which unit stands in which
//! province and who controls each supply center.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::unit::{Nation, StationedUnit, Unit};
use crate::map::ProvinceKey;

/// Unit positions and supply-center ownership at one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapState {
    /// Unit in each occupied province.
    pub units: BTreeMap<ProvinceKey, StationedUnit>,
    /// Controlling nation of each owned supply center.
    pub ownership: BTreeMap<ProvinceKey, Nation>,
}

impl MapState {
    /// Creates a state with no units or ownership.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Places a unit on the board. Returns false if the province is already occupied.
    pub fn place_unit(&mut self, nation: impl Into<String>, unit: Unit) -> bool {
        let province = unit.province().to_string();
        if self.units.contains_key(&province) {
            return false;
        }
        self.units.insert(province, StationedUnit::new(nation, unit));
        true
    }

    /// Returns the unit in `province`, if any.
    pub fn unit_at(&self, province: &str) -> Option<&StationedUnit> {
        self.units.get(province)
    }

    pub fn is_occupied(&self, province: &str) -> bool {
        self.units.contains_key(province)
    }

    /// Sets supply-center ownership for a province.
    pub fn set_owner(&mut self, province: impl Into<String>, owner: Option<Nation>) {
        let province = province.into();
        match owner {
            Some(n) => {
                self.ownership.insert(province, n);
            }
            None => {
                self.ownership.remove(&province);
            }
        }
    }

    /// Returns the controller of `province`, if any.
    pub fn owner(&self, province: &str) -> Option<&str> {
        self.ownership.get(province).map(String::as_str)
    }

    /// Iterates over the units belonging to `nation`.
    pub fn units_of<'a>(&'a self, nation: &'a str) -> impl Iterator<Item = (&'a str, &'a Unit)> {
        self.units
            .iter()
            .filter(move |(_, s)| s.nation == nation)
            .map(|(p, s)| (p.as_str(), &s.unit))
    }

    /// Number of supply centers controlled by `nation`.
    pub fn center_count(&self, nation: &str) -> usize {
        self.ownership.values().filter(|n| *n == nation).count()
    }
}
