//! Crate-wide error type.
//!
//! Only *fatal* conditions live here: a snapshot that cannot be obtained, a
//! nonsense argument, or a post-validation join miss. Per-row validation
//! failures are not errors; they are counted and travel with the pipeline
//! output as a `DropTally`.

use thiserror::Error;

/// Fatal error for a whole pipeline invocation.
///
/// Each variant maps to a distinct process exit code so scripted callers can
/// tell an input problem from a bug:
///
/// - `2`: the caller asked for something invalid
/// - `3`: a source table could not be obtained
/// - `4`: an internal invariant was violated (report this as a bug)
#[derive(Debug, Error)]
pub enum PulseError {
    /// A CLI argument or option combination that cannot be acted on.
    #[error("{0}")]
    InvalidArgument(String),

    /// One of the three input tables could not be obtained.
    ///
    /// The pipeline never runs on partial master data; the caller gets no
    /// partial output.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// A sale that passed referential validation failed to join.
    ///
    /// This signals a bug in the validator, not bad input, and is raised
    /// loudly instead of producing a silent null.
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),
}

impl PulseError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PulseError::InvalidArgument(_) => 2,
            PulseError::SourceUnavailable(_) => 3,
            PulseError::InternalConsistency(_) => 4,
        }
    }
}
