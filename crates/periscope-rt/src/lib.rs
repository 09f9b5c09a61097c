//! Periscope Invocation Thunk Engine
//!
//! Runtime support linked by generated accessors:
//! - Process-wide thunk cache keyed by member signature
//! - Typed instance/static thunks, compiled once on first use
//! - Uncached fallback path for member shapes that cannot be keyed
//!
//! Generated wrapper bodies declare a `static MemberKey` as their cache-slot
//! identity and forward through [`ThunkCache::instance`] or
//! [`ThunkCache::static_member`]. The first call compiles and stores the
//! thunk; every later call for the same signature, from any accessor
//! instance, invokes the stored thunk directly.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cache;
pub mod error;
pub mod key;
pub mod thunk;

pub use cache::ThunkCache;
pub use error::InvokeError;
pub use key::{MemberKey, MemberKind, ThunkKey};
pub use thunk::{InstanceThunk, StaticThunk};

/// Shorthand used by generated code for [`ThunkCache::global`].
pub fn cache() -> &'static ThunkCache {
    ThunkCache::global()
}
