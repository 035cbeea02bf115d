//! Board vocabulary and game-state types.
//!
//! Contains units, orders, and the per-phase map state.

pub mod order;
pub mod state;
pub mod unit;

pub use order::{Order, Orders};
pub use state::MapState;
pub use unit::{Nation, StationedUnit, Unit};
