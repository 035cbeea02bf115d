//! Compiled province records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Province metadata produced by the map compiler.
///
/// A province with at least one army-movement declaration is land (coastal
/// provinces included); one with none is sea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub name: String,
    pub coasts: BTreeSet<String>,
    pub is_sea: bool,
}

impl Province {
    /// Creates a sea province with no coasts; the compiler flips `is_sea` on
    /// the first army declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coasts: BTreeSet::new(),
            is_sea: true,
        }
    }

    /// Returns true if this province exposes named coasts.
    pub fn has_coasts(&self) -> bool {
        !self.coasts.is_empty()
    }

    /// Returns true if `coast` is `None` or one of the declared coasts.
    pub fn accepts_coast(&self, coast: Option<&str>) -> bool {
        match coast {
            None => true,
            Some(c) => self.coasts.contains(c),
        }
    }
}
