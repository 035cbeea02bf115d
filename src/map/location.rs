//! Unit locations.
//!
//! An army stands on a province; a fleet stands on a province and, for
//! split-coast provinces, one of its named coasts. Locations are plain values.
//! The `"prov-coast"` string form and the `[prov, coast]` JSON pair exist only
//! at the serialization boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Short stable province key such as `"par"` or `"stp"`.
pub type ProvinceKey = String;

/// An army location is just a province key.
pub type ArmyLoc = ProvinceKey;

/// Separator between a province key and its coast in textual references.
pub const COAST_SEPARATOR: char = '-';

/// A fleet location: a province plus an optional named coast.
///
/// `coast == None` means "the province's only coast" for uniform coastlines,
/// and "coast unspecified" when referring to a split-coast province.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FleetLoc {
    pub province: ProvinceKey,
    pub coast: Option<String>,
}

impl FleetLoc {
    /// Creates a location without a coast.
    pub fn new(province: impl Into<String>) -> Self {
        Self {
            province: province.into(),
            coast: None,
        }
    }

    /// Creates a location on a named coast.
    pub fn with_coast(province: impl Into<String>, coast: impl Into<String>) -> Self {
        Self {
            province: province.into(),
            coast: Some(coast.into()),
        }
    }

    /// Builds a location from the boundary encoding where `""` means no coast.
    pub fn from_parts(province: impl Into<String>, coast: &str) -> Self {
        Self {
            province: province.into(),
            coast: if coast.is_empty() {
                None
            } else {
                Some(coast.to_string())
            },
        }
    }

    /// Returns the same province with the coast dropped.
    pub fn without_coast(&self) -> Self {
        Self::new(self.province.clone())
    }

    /// Returns the coast in boundary encoding (`""` for none).
    pub fn coast_str(&self) -> &str {
        self.coast.as_deref().unwrap_or("")
    }
}

/// Errors from splitting a `"prov-coast"` reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("empty location reference")]
    Empty,

    #[error("missing province in location reference '{0}'")]
    MissingProvince(String),

    #[error("missing coast after separator in location reference '{0}'")]
    MissingCoast(String),
}

impl FromStr for FleetLoc {
    type Err = LocationError;

    /// Parses `"bul"` or `"bul-sc"`. Only the first separator splits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(LocationError::Empty);
        }
        match s.split_once(COAST_SEPARATOR) {
            None => Ok(FleetLoc::new(s)),
            Some(("", _)) => Err(LocationError::MissingProvince(s.to_string())),
            Some((_, "")) => Err(LocationError::MissingCoast(s.to_string())),
            Some((prov, coast)) => Ok(FleetLoc::with_coast(prov, coast)),
        }
    }
}

impl fmt::Display for FleetLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coast {
            Some(c) => write!(f, "{}{}{}", self.province, COAST_SEPARATOR, c),
            None => f.write_str(&self.province),
        }
    }
}

impl Serialize for FleetLoc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.province, self.coast_str()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FleetLoc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (province, coast) = <(String, String)>::deserialize(deserializer)?;
        Ok(FleetLoc::from_parts(province, &coast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_province() {
        let loc: FleetLoc = "mao".parse().unwrap();
        assert_eq!(loc, FleetLoc::new("mao"));
        assert_eq!(loc.coast_str(), "");
    }

    #[test]
    fn parse_coast_suffix() {
        let loc: FleetLoc = "bul-sc".parse().unwrap();
        assert_eq!(loc.province, "bul");
        assert_eq!(loc.coast.as_deref(), Some("sc"));
        assert_eq!(loc.to_string(), "bul-sc");
    }

    #[test]
    fn parse_rejects_dangling_separator() {
        assert_eq!(
            "bul-".parse::<FleetLoc>(),
            Err(LocationError::MissingCoast("bul-".to_string()))
        );
        assert_eq!(
            "-sc".parse::<FleetLoc>(),
            Err(LocationError::MissingProvince("-sc".to_string()))
        );
        assert_eq!("".parse::<FleetLoc>(), Err(LocationError::Empty));
    }

    #[test]
    fn json_uses_empty_string_for_no_coast() {
        let json = serde_json::to_string(&FleetLoc::new("mao")).unwrap();
        assert_eq!(json, r#"["mao",""]"#);

        let back: FleetLoc = serde_json::from_str(r#"["stp","nc"]"#).unwrap();
        assert_eq!(back, FleetLoc::with_coast("stp", "nc"));

        let none: FleetLoc = serde_json::from_str(r#"["stp",""]"#).unwrap();
        assert_eq!(none.coast, None);
    }

    #[test]
    fn unspecified_coast_sorts_first() {
        let mut locs = vec![
            FleetLoc::with_coast("bul", "sc"),
            FleetLoc::new("bul"),
            FleetLoc::with_coast("bul", "ec"),
        ];
        locs.sort();
        assert_eq!(locs[0], FleetLoc::new("bul"));
        assert_eq!(locs[1].coast.as_deref(), Some("ec"));
    }
}
