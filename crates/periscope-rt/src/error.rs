//! Invocation errors

use thiserror::Error;

/// Failure of the compile-or-invoke path for one member.
///
/// There is no "member not found" variant: every generated wrapper
/// corresponds to a member that existed in the type model at generation
/// time. A mismatch can only mean the target changed shape afterwards, and
/// surfaces on first invocation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The compile step panicked; carries the panic payload
    #[error("compiling invocation thunk for `{member}` failed: {cause}")]
    CompileFailed {
        /// Member name
        member: String,
        /// Rendered panic payload
        cause: String,
    },

    /// The cached thunk does not match the requested signature
    #[error(
        "cached thunk for `{member}` does not match the requested signature \
         (did the target type change shape after generation?)"
    )]
    ShapeMismatch {
        /// Member name
        member: String,
    },
}
