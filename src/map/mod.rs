//! Map compiler.
//!
//! Reads a province catalogue (JSON or Judge format), expands it into army and
//! coast-aware fleet adjacency, and validates the result. The classic map is
//! bundled and available through [`CompiledMap::standard`].

pub mod compiler;
pub mod description;
pub mod error;
pub mod graph;
pub mod judge;
pub mod location;
pub mod province;
pub mod validate;

pub use compiler::compile;
pub use description::{AdjacencyDecl, AdjacencyKind, MapDescription, ProvinceEntry};
pub use error::MapError;
pub use graph::{ArmyEdge, CompiledMap, FleetEdge};
pub use judge::parse_judge;
pub use location::{ArmyLoc, FleetLoc, LocationError, ProvinceKey, COAST_SEPARATOR};
pub use province::Province;
pub use validate::validate;

/// The classic map as a Judge catalogue.
pub const STANDARD_MAP: &str = include_str!("../../data/standard.xml");

/// Source format of a map description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Judge,
}

impl SourceFormat {
    /// Guesses the format from the first non-blank character.
    pub fn detect(src: &str) -> SourceFormat {
        match src.trim_start().chars().next() {
            Some('{') => SourceFormat::Json,
            _ => SourceFormat::Judge,
        }
    }
}

/// Reads a description in the given format.
pub fn read_description(src: &str, format: SourceFormat) -> Result<MapDescription, MapError> {
    match format {
        SourceFormat::Json => Ok(MapDescription::from_json(src)?),
        SourceFormat::Judge => parse_judge(src),
    }
}

/// Compiles and validates a description.
pub fn compile_validated(desc: &MapDescription) -> Result<CompiledMap, MapError> {
    let map = compile(desc)?;
    validate(&map)?;
    Ok(map)
}

impl CompiledMap {
    /// Reads, compiles and validates a description from source text.
    pub fn from_source(src: &str, format: SourceFormat) -> Result<CompiledMap, MapError> {
        compile_validated(&read_description(src, format)?)
    }

    /// Compiles the bundled classic map.
    pub fn standard() -> Result<CompiledMap, MapError> {
        CompiledMap::from_source(STANDARD_MAP, SourceFormat::Judge)
    }
}
