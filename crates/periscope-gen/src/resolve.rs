//! Target resolution
//!
//! Turns the raw marker relations into a de-duplicated, deterministically
//! ordered set of target type descriptors. Unresolved references are
//! dropped, and the accessor machinery excludes itself so a marker pointing
//! at a generated accessor can never trigger self-referential generation.

use periscope_model::{MarkerRelation, TypeInfo, TypeModel};
use rustc_hash::FxHashSet;

/// Resolves marker relations against a type model.
pub struct TargetResolver;

impl TargetResolver {
    /// Resolve every marked target exactly once, sorted by qualified name.
    pub fn resolve<'a>(markers: &[MarkerRelation], model: &'a TypeModel) -> Vec<&'a TypeInfo> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut targets: Vec<&'a TypeInfo> = Vec::new();

        for marker in markers {
            if !seen.insert(marker.target.as_str()) {
                continue;
            }
            let Some(info) = model.get(&marker.target) else {
                continue;
            };
            if Self::is_self_referential(info) {
                continue;
            }
            targets.push(info);
        }

        targets.sort_by_key(|t| t.name.qualified());
        targets
    }

    fn is_self_referential(info: &TypeInfo) -> bool {
        let name = info.name.name.as_str();
        let ns = info.name.namespace.as_str();
        name.ends_with("_Privates")
            || name.ends_with("_Privates_Static")
            || ns == "periscope"
            || ns.starts_with("periscope::")
    }
}
