//! Model errors

use thiserror::Error;

/// Errors raised while building a type model from source.
#[derive(Debug, Error)]
pub enum ModelError {
    /// File could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Source file did not parse
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path of the offending file
        path: String,
        /// Parser message
        message: String,
    },

    /// A marker attribute carried no usable type argument
    #[error("Invalid marker on `{declared_by}`: {message}")]
    InvalidMarker {
        /// Item carrying the attribute
        declared_by: String,
        /// What was wrong
        message: String,
    },
}
