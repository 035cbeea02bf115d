//! The compiled adjacency graph.
//!
//! A `CompiledMap` is built once per variant and is read-only afterwards, so
//! it can be shared across threads without locking. Both adjacency relations
//! are ordered sets, which makes serialization deterministic and lets the
//! neighbor queries below use range scans instead of full walks.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::location::{ArmyLoc, FleetLoc, ProvinceKey};
use super::province::Province;

/// A directed fleet move `(from, to)`.
pub type FleetEdge = (FleetLoc, FleetLoc);

/// A directed army move `(from, to)`.
pub type ArmyEdge = (ArmyLoc, ArmyLoc);

/// Normalized map graph: province records plus army and fleet adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledMap {
    pub provinces: BTreeMap<ProvinceKey, Province>,
    pub fleet_adj: BTreeSet<FleetEdge>,
    pub army_adj: BTreeSet<ArmyEdge>,
    /// Lowercase alias -> canonical province key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, ProvinceKey>,
}

impl CompiledMap {
    /// Looks up a province record by key.
    pub fn province(&self, key: &str) -> Option<&Province> {
        self.provinces.get(key)
    }

    /// Returns true if `key` names a sea province.
    pub fn is_sea(&self, key: &str) -> bool {
        self.province(key).is_some_and(|p| p.is_sea)
    }

    /// Returns true if `key` is a land province that fleets can reach.
    pub fn is_coastal(&self, key: &str) -> bool {
        !self.is_sea(key) && !self.fleet_neighbors(&FleetLoc::new(key)).is_empty()
    }

    /// Resolves a canonical key or alias (case-insensitive) to the canonical key.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        let lower = name.trim().to_lowercase();
        if let Some((key, _)) = self.provinces.get_key_value(lower.as_str()) {
            return Some(key);
        }
        self.aliases.get(&lower).map(String::as_str)
    }

    /// Returns true if an army in `from` may move to `to`.
    pub fn army_can_move(&self, from: &str, to: &str) -> bool {
        self.army_adj.contains(&(from.to_string(), to.to_string()))
    }

    /// Returns true if a fleet at `from` may move to `to`.
    ///
    /// Either side may leave the coast unspecified.
    pub fn fleet_can_move(&self, from: &FleetLoc, to: &FleetLoc) -> bool {
        self.fleet_adj.contains(&(from.clone(), to.clone()))
    }

    /// Returns the provinces an army in `from` may move to, in key order.
    pub fn army_neighbors(&self, from: &str) -> Vec<&str> {
        let start = (from.to_string(), String::new());
        self.army_adj
            .range(start..)
            .take_while(|(a, _)| a == from)
            .map(|(_, b)| b.as_str())
            .collect()
    }

    /// Returns every fleet location reachable from exactly `from`, including
    /// the coast-unspecified variants.
    pub fn fleet_neighbors(&self, from: &FleetLoc) -> Vec<&FleetLoc> {
        let start = (from.clone(), FleetLoc::new(String::new()));
        self.fleet_adj
            .range(start..)
            .take_while(|(a, _)| a == from)
            .map(|(_, b)| b)
            .collect()
    }

    /// Returns the concrete positions a fleet at `from` could occupy after a
    /// move: split-coast destinations carry their coast, all others carry none.
    pub fn fleet_destinations(&self, from: &FleetLoc) -> BTreeSet<FleetLoc> {
        self.fleet_neighbors(from)
            .into_iter()
            .filter(|to| match self.province(&to.province) {
                Some(p) if p.has_coasts() => to.coast.is_some(),
                _ => to.coast.is_none(),
            })
            .cloned()
            .collect()
    }
}
