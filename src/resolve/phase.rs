//! Phase-boundary bookkeeping.

use std::collections::BTreeSet;

use crate::board::MapState;
use crate::map::ProvinceKey;

/// Updates supply-center ownership: each center is captured by the nation
/// whose unit occupies it. Empty centers keep their current owner.
///
/// Called when the game enters a build phase.
pub fn update_ownership(state: &mut MapState, supply_centers: &BTreeSet<ProvinceKey>) {
    let captures: Vec<_> = state
        .units
        .iter()
        .filter(|(prov, _)| supply_centers.contains(*prov))
        .map(|(prov, s)| (prov.clone(), s.nation.clone()))
        .collect();
    for (prov, nation) in captures {
        if state.owner(&prov) != Some(nation.as_str()) {
            log::info!("{} captures {}", nation, prov);
        }
        state.set_owner(prov, Some(nation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Unit;

    #[test]
    fn occupied_centers_change_hands() {
        let centers: BTreeSet<_> = ["bel", "hol", "mun"].map(String::from).into();
        let mut state = MapState::empty();
        state.set_owner("mun", Some("germany".into()));
        state.set_owner("hol", Some("germany".into()));
        state.place_unit("france", Unit::army("bel"));
        state.place_unit("france", Unit::army("mun"));
        state.place_unit("france", Unit::army("bur"));

        update_ownership(&mut state, &centers);
        assert_eq!(state.owner("bel"), Some("france"));
        assert_eq!(state.owner("mun"), Some("france"));
        // Empty centers keep their owner; non-centers are never owned.
        assert_eq!(state.owner("hol"), Some("germany"));
        assert_eq!(state.owner("bur"), None);
    }
}
