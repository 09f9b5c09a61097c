//! Target type descriptors and the read-only type model

use crate::member::MemberInfo;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a target type: namespace, simple name, and generic arity.
///
/// The namespace is a `::`-separated module path, empty for the crate root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Module path, `::`-separated, empty for the crate root
    pub namespace: String,
    /// Simple type name
    pub name: String,
    /// Number of generic type parameters
    pub arity: usize,
}

impl TypeName {
    /// Create a type name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, arity: usize) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            arity,
        }
    }

    /// Fully qualified `ns::Name` form, or just `Name` at the crate root.
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// Collision-free artifact identity: `<Name>_<namespace with :: -> _>`.
    /// The crate root normalizes to `crate`.
    pub fn artifact_id(&self) -> String {
        let ns = if self.namespace.is_empty() {
            "crate".to_string()
        } else {
            self.namespace.replace("::", "_")
        };
        format!("{}_{}", self.name, ns)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

/// Descriptor for one target type: identity, generic parameters, and the
/// full member list (all accessibilities; the classifier filters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Type identity
    pub name: TypeName,
    /// Generic type parameters with bounds, as written (`T`, `K: Hash`)
    pub type_params: Vec<String>,
    /// Lifetime parameters, as written (`'a`). A type with lifetimes has no
    /// `'static` identity, so its wrappers take the uncached path.
    pub lifetimes: Vec<String>,
    /// All members in declaration order
    pub members: Vec<MemberInfo>,
}

impl TypeInfo {
    /// Create a descriptor with no members.
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            type_params: Vec::new(),
            lifetimes: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Whether the target type is generic.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Whether the target type declares lifetime parameters.
    pub fn has_lifetimes(&self) -> bool {
        !self.lifetimes.is_empty()
    }

    /// Bare parameter idents, bounds stripped (`K: Hash` -> `K`).
    pub fn type_param_idents(&self) -> Vec<String> {
        self.type_params
            .iter()
            .map(|p| p.split(':').next().unwrap_or(p).trim().to_string())
            .collect()
    }
}

/// Read-only lookup of target type descriptors keyed by qualified name.
///
/// First insertion wins; re-inserting the same identity is not an error.
#[derive(Debug, Default, Clone)]
pub struct TypeModel {
    types: FxHashMap<String, TypeInfo>,
}

impl TypeModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor unless one with the same qualified name exists.
    pub fn insert(&mut self, info: TypeInfo) {
        self.types.entry(info.name.qualified()).or_insert(info);
    }

    /// Look up a descriptor by qualified name.
    pub fn get(&self, qualified: &str) -> Option<&TypeInfo> {
        self.types.get(qualified)
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the model is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Descriptors sorted by qualified name, for deterministic iteration.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &TypeInfo> {
        let mut keys: Vec<&String> = self.types.keys().collect();
        keys.sort();
        keys.into_iter().map(move |k| &self.types[k])
    }
}
