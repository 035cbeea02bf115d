//! dipcore library.
//!
//! Exposes the map compiler, the board vocabulary, the phase automaton, the
//! resolution helpers and the game ledger for use by integration tests and the
//! binary entry point.

pub mod board;
pub mod game;
pub mod map;
pub mod phase;
pub mod resolve;
