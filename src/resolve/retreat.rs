//! Retreat-phase resolution.
//!
//! Computes where a dislodged unit may go and resolves submitted retreats: a
//! retreat lands only if it is legal and no other unit retreats into the same
//! province. Every other dislodged unit is disbanded.

use std::collections::{BTreeMap, BTreeSet};

use super::movement::Retreats;
use crate::board::{MapState, Orders, StationedUnit, Unit};
use crate::map::{CompiledMap, FleetLoc};

/// Returns the legal retreat destinations of `unit`, in sorted order.
///
/// A dislodged unit may retreat to an adjacent province that is:
/// - reachable by its unit type (armies stay on land),
/// - unoccupied,
/// - not the province the attacker came from,
/// - not left empty by a standoff.
///
/// Fleets retreating onto a split-coast province must name the coast.
pub fn retreat_destinations(
    map: &CompiledMap,
    state: &MapState,
    unit: &Unit,
    attacker_from: &str,
    standoffs: &BTreeSet<&str>,
) -> Vec<FleetLoc> {
    let origin = unit.province();
    let open = |prov: &str| {
        prov != origin
            && prov != attacker_from
            && !state.is_occupied(prov)
            && !standoffs.contains(prov)
    };

    match unit {
        Unit::Army(from) => map
            .army_neighbors(from)
            .into_iter()
            .filter(|prov| !map.is_sea(prov) && open(prov))
            .map(FleetLoc::new)
            .collect(),
        Unit::Fleet(from) => map
            .fleet_destinations(from)
            .into_iter()
            .filter(|loc| open(&loc.province))
            .collect(),
    }
}

/// Applies retreat orders to the post-movement state.
///
/// Only `Move` orders from provinces with pending retreats count; a move to a
/// destination outside the unit's options is ignored and the unit disbands.
pub fn resolve_retreats(state: &MapState, retreats: &Retreats, orders: &Orders) -> MapState {
    let mut landing: BTreeMap<&str, Vec<StationedUnit>> = BTreeMap::new();
    for (prov, order) in orders {
        let Some(dest) = order.dest() else { continue };
        let Some(options) = retreats.get(prov) else {
            log::debug!("ignoring retreat from {}: nothing was dislodged there", prov);
            continue;
        };
        if !options.allows(dest) {
            log::debug!("ignoring illegal retreat {} -> {}", prov, dest);
            continue;
        }
        landing
            .entry(dest.province.as_str())
            .or_default()
            .push(StationedUnit {
                nation: options.src.nation.clone(),
                unit: options.src.unit.moved_to(dest),
            });
    }

    let mut next = state.clone();
    let mut landed = 0;
    for (prov, units) in landing {
        match units.as_slice() {
            [unit] if !next.is_occupied(prov) => {
                next.units.insert(prov.to_string(), unit.clone());
                landed += 1;
            }
            _ => log::debug!("{} retreat(s) into {} bounced", units.len(), prov),
        }
    }

    log::debug!(
        "{} of {} dislodged unit(s) retreated, the rest disbanded",
        landed,
        retreats.len()
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Order;
    use crate::map::{compile, MapDescription, ProvinceEntry};
    use crate::phase::RetreatOptions;

    fn coast_map() -> CompiledMap {
        compile(&MapDescription {
            provinces: vec![
                ProvinceEntry::new("bla", "Black Sea").adjacency("xc", "bul-ec con rum"),
                ProvinceEntry::new("aeg", "Aegean Sea").adjacency("xc", "bul-sc con"),
                ProvinceEntry::new("bul", "Bulgaria")
                    .adjacency("mv", "con rum ser")
                    .adjacency("ec", "bla con rum")
                    .adjacency("sc", "aeg con"),
                ProvinceEntry::new("con", "Constantinople")
                    .adjacency("mv", "bul")
                    .adjacency("xc", "bla aeg bul-ec bul-sc"),
                ProvinceEntry::new("rum", "Rumania")
                    .adjacency("mv", "bul ser")
                    .adjacency("xc", "bla bul-ec"),
                ProvinceEntry::new("ser", "Serbia").adjacency("mv", "bul rum"),
            ],
        })
        .unwrap()
    }

    fn none() -> BTreeSet<&'static str> {
        BTreeSet::new()
    }

    #[test]
    fn army_avoids_attacker_and_occupied() {
        let map = coast_map();
        let mut state = MapState::empty();
        state.place_unit("turkey", Unit::army("bul"));
        state.place_unit("russia", Unit::army("rum"));

        let dests = retreat_destinations(&map, &state, &Unit::army("bul"), "con", &none());
        assert_eq!(dests, vec![FleetLoc::new("ser")]);
    }

    #[test]
    fn army_cannot_return_to_attacker_origin() {
        let map = coast_map();
        let state = MapState::empty();
        let dests = retreat_destinations(&map, &state, &Unit::army("rum"), "ser", &none());
        assert_eq!(dests, vec![FleetLoc::new("bul")]);
    }

    #[test]
    fn fleet_retreat_names_coast() {
        let map = coast_map();
        let state = MapState::empty();
        let dests =
            retreat_destinations(&map, &state, &Unit::fleet(FleetLoc::new("bla")), "rum", &none());
        assert_eq!(
            dests,
            vec![FleetLoc::with_coast("bul", "ec"), FleetLoc::new("con")]
        );
    }

    #[test]
    fn fleet_on_coast_uses_that_coast() {
        let map = coast_map();
        let state = MapState::empty();
        let fleet = Unit::fleet(FleetLoc::with_coast("bul", "sc"));
        let dests = retreat_destinations(&map, &state, &fleet, "aeg", &none());
        assert_eq!(dests, vec![FleetLoc::new("con")]);

        let standoffs = BTreeSet::from(["con"]);
        assert!(retreat_destinations(&map, &state, &fleet, "aeg", &standoffs).is_empty());
    }

    fn pending(nation: &str, unit: Unit, dest: &[FleetLoc]) -> RetreatOptions {
        RetreatOptions {
            src: StationedUnit::new(nation, unit),
            dest: dest.to_vec(),
        }
    }

    #[test]
    fn lone_retreat_lands() {
        let retreats = Retreats::from([(
            "bul".to_string(),
            pending("turkey", Unit::fleet(FleetLoc::with_coast("bul", "sc")), &[FleetLoc::new("con")]),
        )]);
        let orders = Orders::from([("bul".to_string(), Order::move_to(FleetLoc::new("con")))]);
        let next = resolve_retreats(&MapState::empty(), &retreats, &orders);
        assert_eq!(
            next.unit_at("con"),
            Some(&StationedUnit::new("turkey", Unit::fleet(FleetLoc::new("con"))))
        );
    }

    #[test]
    fn colliding_retreats_both_disband() {
        let ser = FleetLoc::new("ser");
        let retreats = Retreats::from([
            ("bul".to_string(), pending("turkey", Unit::army("bul"), &[ser.clone()])),
            ("rum".to_string(), pending("russia", Unit::army("rum"), &[ser.clone()])),
        ]);
        let orders = Orders::from([
            ("bul".to_string(), Order::move_to(ser.clone())),
            ("rum".to_string(), Order::move_to(ser)),
        ]);
        let next = resolve_retreats(&MapState::empty(), &retreats, &orders);
        assert!(next.units.is_empty());
    }

    #[test]
    fn illegal_or_missing_retreats_disband() {
        let retreats = Retreats::from([
            ("bul".to_string(), pending("turkey", Unit::army("bul"), &[FleetLoc::new("ser")])),
            ("rum".to_string(), pending("russia", Unit::army("rum"), &[FleetLoc::new("ukr")])),
        ]);
        let orders = Orders::from([
            ("bul".to_string(), Order::move_to(FleetLoc::new("gre"))),
            ("con".to_string(), Order::move_to(FleetLoc::new("ser"))),
        ]);
        let next = resolve_retreats(&MapState::empty(), &retreats, &orders);
        assert!(next.units.is_empty());
    }
}
