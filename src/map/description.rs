//! Human-authored map descriptions.
//!
//! A description is a province catalogue: each entry carries its key, display
//! name, alias names, and one or more adjacency declarations. Descriptions
//! come from JSON (serde) or from the Judge-style catalogue parsed in
//! [`super::judge`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Movement kind tag of an adjacency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AdjacencyKind {
    /// `mv`: army movement.
    Army,
    /// `xc`: fleet movement from the province's only (or unspecified) coast.
    Fleet,
    /// Any other tag: fleet movement from the named coast.
    Coast(String),
}

impl AdjacencyKind {
    /// Parses a declaration tag.
    pub fn from_tag(tag: &str) -> AdjacencyKind {
        match tag {
            "mv" => AdjacencyKind::Army,
            "xc" | "" => AdjacencyKind::Fleet,
            coast => AdjacencyKind::Coast(coast.to_string()),
        }
    }

    /// Returns the declaration tag.
    pub fn tag(&self) -> &str {
        match self {
            AdjacencyKind::Army => "mv",
            AdjacencyKind::Fleet => "xc",
            AdjacencyKind::Coast(c) => c,
        }
    }

    /// Returns the coast this declaration moves from, if it names one.
    pub fn coast(&self) -> Option<&str> {
        match self {
            AdjacencyKind::Coast(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for AdjacencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for AdjacencyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for AdjacencyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(AdjacencyKind::from_tag(&tag))
    }
}

/// One adjacency declaration: a kind tag plus a whitespace-separated target list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyDecl {
    pub kind: AdjacencyKind,
    pub refs: String,
}

impl AdjacencyDecl {
    pub fn new(kind: AdjacencyKind, refs: impl Into<String>) -> Self {
        Self {
            kind,
            refs: refs.into(),
        }
    }

    /// Iterates over the raw target references.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.refs.split_whitespace()
    }
}

/// A catalogue entry for one province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceEntry {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub adjacencies: Vec<AdjacencyDecl>,
}

impl ProvinceEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            aliases: Vec::new(),
            adjacencies: Vec::new(),
        }
    }

    /// Adds an alias (builder style).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds an adjacency declaration (builder style).
    pub fn adjacency(mut self, tag: &str, refs: impl Into<String>) -> Self {
        self.adjacencies
            .push(AdjacencyDecl::new(AdjacencyKind::from_tag(tag), refs));
        self
    }
}

/// A full province catalogue, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescription {
    pub provinces: Vec<ProvinceEntry>,
}

impl MapDescription {
    /// Parses a JSON description.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
