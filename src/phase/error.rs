/// Errors from parsing a phase identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("unknown phase tag '{0}'")]
    UnknownPhase(String),

    #[error("invalid year '{0}'")]
    InvalidYear(String),

    #[error("malformed phase '{0}', expected '<tag>-<year>'")]
    Malformed(String),
}
