//! Graph validation.
//!
//! Runs after compilation and rejects graphs that reference provinces or
//! coasts the description never declared. Checks run in the graph's sorted
//! order, so the reported error is stable for a given input.

use super::error::MapError;
use super::graph::CompiledMap;

/// Checks every adjacency endpoint against the declared provinces and coasts.
pub fn validate(map: &CompiledMap) -> Result<(), MapError> {
    for (from, to) in &map.army_adj {
        if !map.provinces.contains_key(to) {
            log::warn!("army adjacency {} -> {} targets an unknown province", from, to);
            return Err(MapError::DanglingReference {
                from: from.clone(),
                to: to.clone(),
            });
        }
    }

    for (from, to) in &map.fleet_adj {
        let Some(target) = map.province(&to.province) else {
            log::warn!("fleet adjacency {} -> {} targets an unknown province", from, to);
            return Err(MapError::DanglingReference {
                from: from.province.clone(),
                to: to.province.clone(),
            });
        };
        if !target.accepts_coast(to.coast.as_deref()) {
            log::warn!("fleet adjacency {} -> {} names an undeclared coast", from, to);
            return Err(MapError::UnknownCoast {
                from: from.province.clone(),
                to: to.province.clone(),
                coast: to.coast_str().to_string(),
            });
        }
    }

    Ok(())
}
