//! Map compilation.
//!
//! Turns a [`MapDescription`] into a [`CompiledMap`]. Compilation is a pure
//! function of its input: it rejects descriptions it cannot parse but does not
//! check that referenced provinces exist. That is [`super::validate`]'s job.

use std::collections::BTreeSet;

use super::description::{AdjacencyKind, MapDescription};
use super::error::MapError;
use super::graph::{CompiledMap, FleetEdge};
use super::location::FleetLoc;
use super::province::Province;

/// Compiles a description into a normalized graph without graph validation.
pub fn compile(desc: &MapDescription) -> Result<CompiledMap, MapError> {
    let mut map = CompiledMap::default();

    for (idx, entry) in desc.provinces.iter().enumerate() {
        let key = entry.key.trim();
        if key.is_empty() {
            return Err(MapError::EmptyKey(idx));
        }
        if map.provinces.contains_key(key) {
            return Err(MapError::DuplicateProvince(key.to_string()));
        }

        let mut province = Province::new(entry.name.trim());

        for decl in &entry.adjacencies {
            let targets = decl
                .targets()
                .map(|t| {
                    t.parse::<FleetLoc>().map_err(|source| MapError::MalformedTarget {
                        province: key.to_string(),
                        target: t.to_string(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if targets.is_empty() {
                return Err(MapError::EmptyAdjacency {
                    province: key.to_string(),
                    kind: decl.kind.to_string(),
                });
            }

            match &decl.kind {
                AdjacencyKind::Army => {
                    province.is_sea = false;
                    for to in targets {
                        map.army_adj.insert((key.to_string(), to.province));
                    }
                }
                AdjacencyKind::Fleet | AdjacencyKind::Coast(_) => {
                    let from_coast = decl.kind.coast();
                    if let Some(c) = from_coast {
                        province.coasts.insert(c.to_string());
                    }
                    for to in &targets {
                        expand_fleet_edge(&mut map.fleet_adj, key, from_coast, to);
                    }
                }
            }
        }

        for alias in &entry.aliases {
            register_alias(&mut map, alias, key)?;
        }

        map.provinces.insert(key.to_string(), province);
    }

    log::debug!(
        "compiled map: {} provinces ({} sea), {} army edges, {} fleet edges, {} aliases",
        map.provinces.len(),
        map.provinces.values().filter(|p| p.is_sea).count(),
        map.army_adj.len(),
        map.fleet_adj.len(),
        map.aliases.len(),
    );

    Ok(map)
}

/// Inserts the four coast variants of one declared fleet adjacency.
///
/// Callers that only know a fleet's province still find the edge, whichever
/// side lacks the coast.
fn expand_fleet_edge(
    edges: &mut BTreeSet<FleetEdge>,
    from: &str,
    from_coast: Option<&str>,
    to: &FleetLoc,
) {
    let from_exact = FleetLoc {
        province: from.to_string(),
        coast: from_coast.map(str::to_string),
    };
    let from_any = FleetLoc::new(from);
    let to_any = to.without_coast();

    edges.insert((from_exact.clone(), to.clone()));
    edges.insert((from_exact, to_any.clone()));
    edges.insert((from_any.clone(), to.clone()));
    edges.insert((from_any, to_any));
}

fn register_alias(map: &mut CompiledMap, alias: &str, key: &str) -> Result<(), MapError> {
    let alias = alias.trim().to_lowercase();
    if alias.is_empty() {
        return Ok(());
    }
    match map.aliases.get(&alias) {
        Some(existing) if existing != key => Err(MapError::AmbiguousAlias {
            alias,
            first: existing.clone(),
            second: key.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            map.aliases.insert(alias, key.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::description::ProvinceEntry;

    fn desc(entries: Vec<ProvinceEntry>) -> MapDescription {
        MapDescription { provinces: entries }
    }

    #[test]
    fn two_province_end_to_end() {
        let map = compile(&desc(vec![
            ProvinceEntry::new("par", "Paris").adjacency("mv", "bre"),
            ProvinceEntry::new("mao", "Mid-Atlantic Ocean").adjacency("xc", "mao"),
        ]))
        .unwrap();

        assert_eq!(map.provinces.len(), 2);
        assert!(!map.provinces["par"].is_sea);
        assert!(map.provinces["par"].coasts.is_empty());
        assert!(map.provinces["mao"].is_sea);
        assert!(map.provinces["mao"].coasts.is_empty());
        assert!(map.army_adj.contains(&("par".to_string(), "bre".to_string())));

        let fleet: Vec<_> = map.fleet_adj.iter().collect();
        assert_eq!(fleet, vec![&(FleetLoc::new("mao"), FleetLoc::new("mao"))]);

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["army_adj"], serde_json::json!([["par", "bre"]]));
        assert_eq!(
            json["provinces"]["par"],
            serde_json::json!({"name": "Paris", "coasts": [], "is_sea": false})
        );
        assert!(json.get("aliases").is_none());
    }

    #[test]
    fn named_coast_expands_four_ways() {
        let map = compile(&desc(vec![
            ProvinceEntry::new("bul", "Bulgaria")
                .adjacency("mv", "con")
                .adjacency("sc", "con aeg"),
            ProvinceEntry::new("aeg", "Aegean Sea").adjacency("xc", "bul-sc"),
            ProvinceEntry::new("con", "Constantinople")
                .adjacency("mv", "bul")
                .adjacency("xc", "bul-sc aeg"),
        ]))
        .unwrap();

        let bul_sc = FleetLoc::with_coast("bul", "sc");
        let bul = FleetLoc::new("bul");
        let aeg = FleetLoc::new("aeg");

        // Declared at bul with a coast tag.
        assert!(map.fleet_can_move(&bul_sc, &aeg));
        assert!(map.fleet_can_move(&bul, &aeg));
        // Declared at aeg with a coast-suffixed target.
        assert!(map.fleet_can_move(&aeg, &bul_sc));
        assert!(map.fleet_can_move(&aeg, &bul));

        assert_eq!(
            map.provinces["bul"].coasts.iter().collect::<Vec<_>>(),
            vec!["sc"]
        );
        assert!(map.provinces["aeg"].coasts.is_empty());
    }

    #[test]
    fn coastal_province_is_land() {
        let map = compile(&desc(vec![ProvinceEntry::new("bre", "Brest")
            .adjacency("xc", "mao")
            .adjacency("mv", "par")]))
        .unwrap();
        assert!(!map.provinces["bre"].is_sea);
    }

    #[test]
    fn fleet_edges_deduplicate_and_sort() {
        let map = compile(&desc(vec![
            ProvinceEntry::new("nth", "North Sea").adjacency("xc", "lon eng lon"),
            ProvinceEntry::new("eng", "English Channel").adjacency("xc", "nth"),
        ]))
        .unwrap();
        let edges: Vec<_> = map.fleet_adj.iter().cloned().collect();
        let mut sorted = edges.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(edges, sorted);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn army_pairs_stay_directional() {
        let map = compile(&desc(vec![
            ProvinceEntry::new("a", "A").adjacency("mv", "b"),
            ProvinceEntry::new("b", "B").adjacency("mv", "c"),
        ]))
        .unwrap();
        assert!(map.army_can_move("a", "b"));
        assert!(!map.army_can_move("b", "a"));
    }

    #[test]
    fn unknown_references_are_not_dropped() {
        let map = compile(&desc(vec![
            ProvinceEntry::new("par", "Paris").adjacency("mv", "atlantis")
        ]))
        .unwrap();
        assert!(map.army_can_move("par", "atlantis"));
    }

    #[test]
    fn rejects_unparseable_descriptions() {
        let err = compile(&desc(vec![ProvinceEntry::new("", "Nowhere")])).unwrap_err();
        assert!(matches!(err, MapError::EmptyKey(0)));

        let err = compile(&desc(vec![
            ProvinceEntry::new("par", "Paris"),
            ProvinceEntry::new("par", "Paris again"),
        ]))
        .unwrap_err();
        assert!(matches!(err, MapError::DuplicateProvince(k) if k == "par"));

        let err = compile(&desc(vec![ProvinceEntry::new("par", "Paris").adjacency("mv", "  ")]))
            .unwrap_err();
        assert!(matches!(err, MapError::EmptyAdjacency { .. }));

        let err = compile(&desc(vec![ProvinceEntry::new("gas", "Gascony").adjacency("xc", "spa-")]))
            .unwrap_err();
        assert!(matches!(err, MapError::MalformedTarget { target, .. } if target == "spa-"));
    }

    #[test]
    fn aliases_are_many_to_one() {
        let map = compile(&desc(vec![
            ProvinceEntry::new("eng", "English Channel")
                .alias("ech")
                .alias("Channel")
                .adjacency("xc", "nth"),
            ProvinceEntry::new("nwy", "Norway").alias("nwy").adjacency("mv", "swe"),
        ]))
        .unwrap();
        assert_eq!(map.aliases["ech"], "eng");
        assert_eq!(map.aliases["channel"], "eng");
        assert_eq!(map.resolve_name("nwy"), Some("nwy"));
        // Aliases never add adjacency.
        assert_eq!(map.fleet_adj.len(), 1);
    }

    #[test]
    fn rejects_alias_claimed_twice() {
        let err = compile(&desc(vec![
            ProvinceEntry::new("eas", "Eastern Mediterranean").alias("med"),
            ProvinceEntry::new("wes", "Western Mediterranean").alias("med"),
        ]))
        .unwrap_err();
        assert!(matches!(err, MapError::AmbiguousAlias { alias, .. } if alias == "med"));
    }

    #[test]
    fn compilation_is_deterministic() {
        let d = desc(vec![
            ProvinceEntry::new("spa", "Spain")
                .adjacency("mv", "por gas")
                .adjacency("nc", "gas por mao")
                .adjacency("sc", "mao por wes"),
            ProvinceEntry::new("gas", "Gascony").adjacency("xc", "spa-nc"),
        ]);
        let a = serde_json::to_string(&compile(&d).unwrap()).unwrap();
        let b = serde_json::to_string(&compile(&d).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
