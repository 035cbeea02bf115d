//! Build-phase resolution.
//!
//! Validates build requests against the winter board and lands them at the
//! end of the build phase.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::{MapState, Nation, StationedUnit};
use crate::game::GameError;
use crate::map::ProvinceKey;

/// One nation's build requests, keyed by the build site.
pub type Builds = BTreeMap<ProvinceKey, StationedUnit>;

/// Number of units each nation may build (positive) or must remove (negative):
/// supply centers controlled minus units on the board.
pub fn adjustments(state: &MapState) -> BTreeMap<Nation, i64> {
    let nations: BTreeSet<&Nation> = state
        .ownership
        .values()
        .chain(state.units.values().map(|s| &s.nation))
        .collect();
    nations
        .into_iter()
        .map(|nation| {
            let centers = state.center_count(nation) as i64;
            let units = state.units_of(nation).count() as i64;
            (nation.clone(), centers - units)
        })
        .collect()
}

/// Checks one build request by `power` at `province`.
///
/// The site must be empty and controlled by `power`, and the unit must belong
/// to `power` and stand on the site.
pub fn validate_build(
    state: &MapState,
    power: &str,
    province: &str,
    build: &StationedUnit,
) -> Result<(), GameError> {
    if build.unit.province() != province {
        return Err(GameError::BuildMismatch {
            province: province.to_string(),
            unit: build.unit.to_string(),
        });
    }
    if state.is_occupied(province) {
        return Err(GameError::BuildOccupied(province.to_string()));
    }
    if state.owner(province) != Some(power) || build.nation != power {
        return Err(GameError::BuildNotOwned {
            province: province.to_string(),
            power: power.to_string(),
        });
    }
    Ok(())
}

/// Lands accepted builds on the board. Occupied sites are skipped.
pub fn apply_builds<'a>(state: &MapState, builds: impl IntoIterator<Item = &'a Builds>) -> MapState {
    let mut next = state.clone();
    for (province, build) in builds.into_iter().flatten() {
        if next.is_occupied(province) {
            log::warn!("skipping build at occupied {}", province);
            continue;
        }
        next.units.insert(province.clone(), build.clone());
    }
    next
}
