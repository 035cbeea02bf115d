//! The five seasonal phase kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PhaseError;

/// A phase within a game year, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Spring,
    SpringRetreat,
    Fall,
    FallRetreat,
    Winter,
}

impl PhaseKind {
    /// All kinds in play order.
    pub const ALL: [PhaseKind; 5] = [
        PhaseKind::Spring,
        PhaseKind::SpringRetreat,
        PhaseKind::Fall,
        PhaseKind::FallRetreat,
        PhaseKind::Winter,
    ];

    /// Returns the following kind and whether the year rolls over.
    pub const fn next(self) -> (PhaseKind, bool) {
        match self {
            PhaseKind::Spring => (PhaseKind::SpringRetreat, false),
            PhaseKind::SpringRetreat => (PhaseKind::Fall, false),
            PhaseKind::Fall => (PhaseKind::FallRetreat, false),
            PhaseKind::FallRetreat => (PhaseKind::Winter, false),
            PhaseKind::Winter => (PhaseKind::Spring, true),
        }
    }

    /// Returns the preceding kind and whether the year rolls back.
    pub const fn prev(self) -> (PhaseKind, bool) {
        match self {
            PhaseKind::Spring => (PhaseKind::Winter, true),
            PhaseKind::SpringRetreat => (PhaseKind::Spring, false),
            PhaseKind::Fall => (PhaseKind::SpringRetreat, false),
            PhaseKind::FallRetreat => (PhaseKind::Fall, false),
            PhaseKind::Winter => (PhaseKind::FallRetreat, false),
        }
    }

    pub const fn is_movement(self) -> bool {
        matches!(self, PhaseKind::Spring | PhaseKind::Fall)
    }

    pub const fn is_retreat(self) -> bool {
        matches!(self, PhaseKind::SpringRetreat | PhaseKind::FallRetreat)
    }

    pub const fn is_build(self) -> bool {
        matches!(self, PhaseKind::Winter)
    }

    /// Maps a retreat kind to the movement kind it follows. Other kinds map to themselves.
    pub const fn movement(self) -> PhaseKind {
        match self {
            PhaseKind::Spring | PhaseKind::SpringRetreat => PhaseKind::Spring,
            PhaseKind::Fall | PhaseKind::FallRetreat => PhaseKind::Fall,
            PhaseKind::Winter => PhaseKind::Winter,
        }
    }

    /// Returns the snake_case tag used in text and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            PhaseKind::Spring => "spring",
            PhaseKind::SpringRetreat => "spring_retreat",
            PhaseKind::Fall => "fall",
            PhaseKind::FallRetreat => "fall_retreat",
            PhaseKind::Winter => "winter",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseKind {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhaseKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PhaseError::UnknownPhase(s.to_string()))
    }
}
