//! A phase kind paired with its year.
//!
//! `GamePhase` is the ledger's composite key. Its text form is
//! `"<tag>-<year>"`, e.g. `spring_retreat-1901`, and it serializes as that
//! string so it can key JSON maps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::PhaseError;
use super::kind::PhaseKind;

/// One phase of play. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GamePhase {
    pub year: i32,
    pub kind: PhaseKind,
}

impl GamePhase {
    pub const fn new(year: i32, kind: PhaseKind) -> Self {
        Self { year, kind }
    }

    /// Spring movement of `year`.
    pub const fn spring(year: i32) -> Self {
        Self::new(year, PhaseKind::Spring)
    }

    /// The phase that follows this one. Winter rolls into next year's spring.
    pub const fn next(self) -> Self {
        let (kind, rollover) = self.kind.next();
        let year = if rollover { self.year.wrapping_add(1) } else { self.year };
        Self { year, kind }
    }

    /// The phase that precedes this one. Spring rolls back to last year's winter.
    pub const fn prev(self) -> Self {
        let (kind, rollback) = self.kind.prev();
        let year = if rollback { self.year.wrapping_sub(1) } else { self.year };
        Self { year, kind }
    }

    /// The movement phase a retreat phase follows; other phases map to themselves.
    pub const fn movement_phase(self) -> Self {
        Self {
            year: self.year,
            kind: self.kind.movement(),
        }
    }

    pub const fn is_movement(self) -> bool {
        self.kind.is_movement()
    }

    pub const fn is_retreat(self) -> bool {
        self.kind.is_retreat()
    }

    pub const fn is_build(self) -> bool {
        self.kind.is_build()
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.year)
    }
}

impl FromStr for GamePhase {
    type Err = PhaseError;

    /// Parses `"<tag>-<year>"`. The year may be negative (`winter--1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, year) = s
            .split_once('-')
            .ok_or_else(|| PhaseError::Malformed(s.to_string()))?;
        let kind: PhaseKind = tag.parse()?;
        let year: i32 = year
            .parse()
            .map_err(|_| PhaseError::InvalidYear(year.to_string()))?;
        Ok(GamePhase { year, kind })
    }
}

impl Serialize for GamePhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GamePhase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
