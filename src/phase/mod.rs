//! Phase automaton.
//!
//! The seasonal cycle spring -> spring_retreat -> fall -> fall_retreat ->
//! winter -> spring of the next year, plus navigation that skips retreat
//! phases with nothing to retreat.

pub mod error;
pub mod game_phase;
pub mod history;
pub mod kind;

pub use error::PhaseError;
pub use game_phase::GamePhase;
pub use history::{
    is_vacuous, next_nonempty_phase, prev_nonempty_phase, History, MvmtInfo, RetreatOptions,
};
pub use kind::PhaseKind;
