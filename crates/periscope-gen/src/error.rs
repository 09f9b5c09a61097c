//! Generation pipeline errors

use periscope_model::ModelError;
use thiserror::Error;

/// Errors raised by the generation pipeline.
///
/// Note what is deliberately absent: a type with no hidden members, a
/// duplicate marker, and an unresolvable target are all silent non-events,
/// not errors.
#[derive(Debug, Error)]
pub enum GenError {
    /// Model construction failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Artifact or manifest could not be written
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Invalid source glob pattern
    #[error("{0}")]
    Pattern(#[from] glob::PatternError),

    /// Source file enumeration failed
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Manifest serialization failed
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}
