//! Applying resolved orders to the board.
//!
//! Deciding which orders succeed is delegated to an [`Adjudicator`]. This
//! module takes its verdict and produces the next map state: movers relocated,
//! dislodged units lifted off the board with their retreat options, retreats
//! and builds landed, supply centers captured.

pub mod build;
pub mod movement;
pub mod phase;
pub mod retreat;

use std::collections::BTreeMap;

use crate::board::{MapState, Orders};
use crate::map::{CompiledMap, ProvinceKey};

pub use build::{adjustments, apply_builds, validate_build, Builds};
pub use movement::{apply_adjudication, Retreats};
pub use phase::update_ownership;
pub use retreat::{resolve_retreats, retreat_destinations};

/// Per-order success flags, keyed by the ordered unit's province.
pub type OrderStatus = BTreeMap<ProvinceKey, bool>;

/// Decides which orders of a movement phase succeed.
///
/// Implementations see every unit's order; units without an explicit order
/// have already been given a hold.
pub trait Adjudicator {
    fn adjudicate(&self, map: &CompiledMap, state: &MapState, orders: &Orders) -> OrderStatus;
}

impl<F> Adjudicator for F
where
    F: Fn(&CompiledMap, &MapState, &Orders) -> OrderStatus,
{
    fn adjudicate(&self, map: &CompiledMap, state: &MapState, orders: &Orders) -> OrderStatus {
        self(map, state, orders)
    }
}
