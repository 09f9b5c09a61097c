//! Periscope Generation Pipeline
//!
//! Build-time synthesis of typed accessors for the hidden members of marked
//! target types. One pass, no iteration:
//!
//! scan -> resolve targets -> classify members -> resolve overloads ->
//! render wrappers -> emit artifacts
//!
//! The pipeline is deterministic: the same source snapshot produces
//! byte-identical artifacts in the same order.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod classify;
pub mod emit;
pub mod error;
pub mod overloads;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod templates;

pub use classify::{ClassifiedMembers, MemberClassifier};
pub use emit::{Emitter, MANIFEST_FILE};
pub use error::GenError;
pub use overloads::{OverloadResolver, ResolvedSurface, Wrapper, WrapperRole, CREATE_INSTANCE};
pub use render::{AccessorArtifact, WrapperSynthesizer};
pub use resolve::TargetResolver;
pub use scan::SourceScanner;

use periscope_model::{MarkerRelation, TypeModel};
use std::path::{Path, PathBuf};

/// Render accessor artifacts for every marked target in `model`.
///
/// Types without hidden members are skipped; unresolvable markers are
/// dropped. The result is ordered by qualified target name.
pub fn generate(model: &TypeModel, markers: &[MarkerRelation]) -> Vec<AccessorArtifact> {
    TargetResolver::resolve(markers, model)
        .into_iter()
        .filter_map(WrapperSynthesizer::synthesize)
        .collect()
}

/// Scan a source tree, generate, and emit into `out_dir`.
///
/// Returns the emitted artifact paths; the manifest is written alongside.
pub fn generate_tree(src_root: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, GenError> {
    let mut scanner = SourceScanner::new();
    scanner.scan_dir(src_root)?;
    let (model, markers) = scanner.finish();
    let artifacts = generate(&model, &markers);
    Emitter::new(out_dir).emit_all(&artifacts)
}
