//! Periscope Type Model
//!
//! Language-independent descriptors for target types and their members,
//! consumed by the generation pipeline. The model is a closed, read-only
//! snapshot: it is populated once (by a scanner or by hand) and then only
//! queried.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod marker;
pub mod member;
pub mod ty;

pub use error::ModelError;
pub use marker::MarkerRelation;
pub use member::{Accessibility, MemberInfo, MemberKind, Param};
pub use ty::{TypeInfo, TypeModel, TypeName};
