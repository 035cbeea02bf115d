//! Map configuration errors.

use super::location::LocationError;

/// Errors raised while reading, compiling, or validating a map description.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("invalid JSON map description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("province entry {0} has an empty key")]
    EmptyKey(usize),

    #[error("duplicate province '{0}'")]
    DuplicateProvince(String),

    #[error("province '{province}' has an empty '{kind}' adjacency declaration")]
    EmptyAdjacency { province: String, kind: String },

    #[error("province '{province}': malformed target '{target}': {source}")]
    MalformedTarget {
        province: String,
        target: String,
        source: LocationError,
    },

    #[error("alias '{alias}' names both '{first}' and '{second}'")]
    AmbiguousAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("province '{from}' references unknown province '{to}'")]
    DanglingReference { from: String, to: String },

    #[error("province '{from}' references undeclared coast '{coast}' of '{to}'")]
    UnknownCoast {
        from: String,
        to: String,
        coast: String,
    },
}
