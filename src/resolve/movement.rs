//! Movement-phase application.
//!
//! Applies an adjudicated movement phase to the board: successful movers are
//! relocated, units they displace are lifted off the board, and each dislodged
//! unit is paired with the provinces it may retreat to.

use std::collections::{BTreeMap, BTreeSet};

use super::retreat::retreat_destinations;
use super::OrderStatus;
use crate::board::{MapState, Orders, StationedUnit};
use crate::map::{CompiledMap, FleetLoc, ProvinceKey};
use crate::phase::RetreatOptions;

/// Pending retreats, keyed by the province the unit was dislodged from.
pub type Retreats = BTreeMap<ProvinceKey, RetreatOptions>;

struct Mover {
    origin: ProvinceKey,
    dest: FleetLoc,
    unit: StationedUnit,
}

/// Produces the post-movement state and the retreat options of every
/// dislodged unit.
///
/// A province is closed to retreats if it is occupied after movement, is the
/// attacker's origin, or is a standoff: left empty after two or more failed
/// moves into it.
pub fn apply_adjudication(
    map: &CompiledMap,
    state: &MapState,
    orders: &Orders,
    status: &OrderStatus,
) -> (MapState, Retreats) {
    let succeeded = |prov: &str| status.get(prov).copied().unwrap_or(false);
    let mut next = state.clone();

    // Lift every successful mover first so units moving out never block units moving in.
    let mut movers = Vec::new();
    for (prov, order) in orders {
        let Some(dest) = order.dest() else { continue };
        if !succeeded(prov) || dest.province == *prov {
            continue;
        }
        match next.units.remove(prov) {
            Some(unit) => movers.push(Mover {
                origin: prov.clone(),
                dest: dest.clone(),
                unit,
            }),
            None => log::warn!("move from {} succeeded but no unit stands there", prov),
        }
    }

    let mut arrived = BTreeSet::new();
    let mut dislodged = Vec::new();
    for Mover { origin, dest, unit } in movers {
        if !arrived.insert(dest.province.clone()) {
            log::warn!(
                "second successful move into {} (from {}); unit stays put",
                dest.province,
                origin
            );
            next.units.entry(origin).or_insert(unit);
            continue;
        }
        if let Some(displaced) = next.units.remove(&dest.province) {
            dislodged.push((dest.province.clone(), displaced, origin.clone()));
        }
        let moved = StationedUnit {
            unit: unit.unit.moved_to(&dest),
            nation: unit.nation,
        };
        next.units.insert(dest.province, moved);
    }

    let mut bounced: BTreeMap<&str, usize> = BTreeMap::new();
    for (prov, order) in orders {
        if let Some(dest) = order.dest().filter(|_| !succeeded(prov)) {
            *bounced.entry(dest.province.as_str()).or_default() += 1;
        }
    }
    let standoffs: BTreeSet<&str> = bounced
        .into_iter()
        .filter(|(prov, attempts)| *attempts >= 2 && !next.is_occupied(prov))
        .map(|(prov, _)| prov)
        .collect();

    let mut retreats = Retreats::new();
    for (province, src, attacker_from) in dislodged {
        let dest = retreat_destinations(map, &next, &src.unit, &attacker_from, &standoffs);
        log::debug!(
            "{} {} dislodged from {} by {}; {} retreat option(s)",
            src.nation,
            src.unit,
            province,
            attacker_from,
            dest.len()
        );
        retreats.insert(province, RetreatOptions { src, dest });
    }

    (next, retreats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Order, Unit};
    use crate::map::{compile, MapDescription, ProvinceEntry};

    /// Five provinces around Burgundy: bur borders par, pic, mun and mar;
    /// pic and par border each other.
    fn board() -> CompiledMap {
        compile(&MapDescription {
            provinces: vec![
                ProvinceEntry::new("bur", "Burgundy").adjacency("mv", "par pic mun mar"),
                ProvinceEntry::new("par", "Paris").adjacency("mv", "bur pic"),
                ProvinceEntry::new("pic", "Picardy").adjacency("mv", "bur par"),
                ProvinceEntry::new("mun", "Munich").adjacency("mv", "bur"),
                ProvinceEntry::new("mar", "Marseilles").adjacency("mv", "bur"),
            ],
        })
        .unwrap()
    }

    fn mv(dest: &str) -> Order {
        Order::move_to(FleetLoc::new(dest))
    }

    #[test]
    fn successful_move_relocates_unit() {
        let map = board();
        let mut state = MapState::empty();
        state.place_unit("france", Unit::army("par"));
        let orders = Orders::from([("par".to_string(), mv("bur"))]);
        let status = OrderStatus::from([("par".to_string(), true)]);

        let (next, retreats) = apply_adjudication(&map, &state, &orders, &status);
        assert!(!next.is_occupied("par"));
        assert_eq!(next.unit_at("bur").unwrap().unit, Unit::army("bur"));
        assert!(retreats.is_empty());
    }

    #[test]
    fn failed_move_stays_put() {
        let map = board();
        let mut state = MapState::empty();
        state.place_unit("france", Unit::army("par"));
        let orders = Orders::from([("par".to_string(), mv("bur"))]);
        let status = OrderStatus::from([("par".to_string(), false)]);

        let (next, _) = apply_adjudication(&map, &state, &orders, &status);
        assert_eq!(next, state);
    }

    #[test]
    fn dislodged_unit_gets_retreat_options() {
        let map = board();
        let mut state = MapState::empty();
        state.place_unit("germany", Unit::army("mun"));
        state.place_unit("france", Unit::army("bur"));
        state.place_unit("france", Unit::army("par"));
        let orders = Orders::from([
            ("mun".to_string(), mv("bur")),
            ("bur".to_string(), Order::Hold),
            ("par".to_string(), Order::Hold),
        ]);
        let status = OrderStatus::from([
            ("mun".to_string(), true),
            ("bur".to_string(), false),
            ("par".to_string(), true),
        ]);

        let (next, retreats) = apply_adjudication(&map, &state, &orders, &status);
        assert_eq!(next.unit_at("bur").unwrap().nation, "germany");
        assert!(!next.is_occupied("mun"));

        let options = &retreats["bur"];
        assert_eq!(options.src, StationedUnit::new("france", Unit::army("bur")));
        // par is occupied and mun is the attacker's origin.
        assert_eq!(options.dest, vec![FleetLoc::new("mar"), FleetLoc::new("pic")]);
    }

    #[test]
    fn standoff_province_is_closed_to_retreats() {
        let map = board();
        let mut state = MapState::empty();
        state.place_unit("germany", Unit::army("mun"));
        state.place_unit("france", Unit::army("bur"));
        state.place_unit("italy", Unit::army("mar"));
        state.place_unit("england", Unit::army("par"));
        let orders = Orders::from([
            ("mun".to_string(), mv("bur")),
            ("mar".to_string(), mv("pic")),
            ("par".to_string(), mv("pic")),
        ]);
        let status = OrderStatus::from([
            ("mun".to_string(), true),
            ("mar".to_string(), false),
            ("par".to_string(), false),
        ]);

        let (_, retreats) = apply_adjudication(&map, &state, &orders, &status);
        assert!(retreats["bur"].dest.is_empty());
    }

    #[test]
    fn single_failed_move_leaves_province_open() {
        let map = board();
        let mut state = MapState::empty();
        state.place_unit("germany", Unit::army("mun"));
        state.place_unit("france", Unit::army("bur"));
        state.place_unit("england", Unit::army("par"));
        let orders = Orders::from([
            ("mun".to_string(), mv("bur")),
            ("par".to_string(), mv("pic")),
        ]);
        let status = OrderStatus::from([("mun".to_string(), true), ("par".to_string(), false)]);

        let (_, retreats) = apply_adjudication(&map, &state, &orders, &status);
        assert_eq!(
            retreats["bur"].dest,
            vec![FleetLoc::new("mar"), FleetLoc::new("pic")]
        );
    }

    #[test]
    fn units_swapping_out_do_not_block() {
        let map = board();
        let mut state = MapState::empty();
        state.place_unit("france", Unit::army("par"));
        state.place_unit("france", Unit::army("pic"));
        let orders = Orders::from([
            ("par".to_string(), mv("pic")),
            ("pic".to_string(), mv("bur")),
        ]);
        let status = OrderStatus::from([("par".to_string(), true), ("pic".to_string(), true)]);

        let (next, retreats) = apply_adjudication(&map, &state, &orders, &status);
        assert!(retreats.is_empty());
        assert!(next.is_occupied("pic") && next.is_occupied("bur"));
        assert!(!next.is_occupied("par"));
    }
}
