use thiserror::Error;

/// Errors raised by the matching pipeline
///
/// The pipeline never recovers from these. They are surfaced to the caller,
/// which owns record retrieval and can correct the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Malformed input shape: empty or duplicate ids, a category present on
    /// only one side, a mapping that points at an unknown field, or scoring
    /// parameters out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input that is well-formed but breaks a pairing contract: field kinds
    /// that disagree, or a preference list naming unknown or repeated ids.
    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl MatchError {
    /// Short machine-readable code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::Validation(_) => "validation_error",
            MatchError::Precondition(_) => "precondition_failed",
        }
    }
}
