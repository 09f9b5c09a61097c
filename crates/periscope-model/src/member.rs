//! Member descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accessibility tier of a member or type, collapsed to the only distinction
/// the generator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessibility {
    /// Not visible outside the declaring type's module (`Visibility::Inherited`).
    Hidden,
    /// Anything with a `pub`/`pub(...)` qualifier.
    Visible,
}

/// Kind of a classified member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Ordinary function with or without a receiver
    Method,
    /// Getter/setter pair projected as a single member
    Property,
    /// Struct field or associated const
    Field,
    /// Associated function producing an instance of the declaring type
    Constructor,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Property => write!(f, "property"),
            MemberKind::Field => write!(f, "field"),
            MemberKind::Constructor => write!(f, "constructor"),
        }
    }
}

/// A single named parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as declared
    pub name: String,
    /// Parameter type as written in source
    pub ty: String,
}

impl Param {
    /// Create a parameter descriptor.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Descriptor for one member of a target type.
///
/// `value_type` is the return type for methods and constructors and the
/// declared type for properties and fields; `()` stands for void.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// What kind of member this is
    pub kind: MemberKind,
    /// Declared name. For constructors this is the underlying associated-fn
    /// name (`new`, `with_parts`, ...); the generated creation functions are
    /// named uniformly regardless.
    pub name: String,
    /// Accessibility tier
    pub accessibility: Accessibility,
    /// Whether the member is static (no receiver)
    pub is_static: bool,
    /// Ordered parameter list
    pub params: Vec<Param>,
    /// Return type / declared type
    pub value_type: String,
    /// Fields only: no setter is generated when set
    pub is_read_only: bool,
    /// Properties only
    pub has_getter: bool,
    /// Properties only
    pub has_setter: bool,
    /// Implementation artifact (property accessor method, backing storage);
    /// excluded by the classifier
    pub is_synthesized: bool,
    /// Method-level generic parameters, with bounds, as written
    pub type_params: Vec<String>,
    /// Whether the member is an `async fn`
    pub is_async: bool,
    /// Whether the signature mentions borrowed or unnameable types
    /// (`&str`, `impl Trait`, lifetime-carrying types)
    pub has_borrows: bool,
}

impl MemberInfo {
    /// Descriptor for a method.
    pub fn method(
        name: impl Into<String>,
        accessibility: Accessibility,
        is_static: bool,
        params: Vec<Param>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            accessibility,
            is_static,
            params,
            value_type: value_type.into(),
            is_read_only: false,
            has_getter: false,
            has_setter: false,
            is_synthesized: false,
            type_params: Vec::new(),
            is_async: false,
            has_borrows: false,
        }
    }

    /// Descriptor for a field.
    pub fn field(
        name: impl Into<String>,
        accessibility: Accessibility,
        is_static: bool,
        value_type: impl Into<String>,
        is_read_only: bool,
    ) -> Self {
        Self {
            kind: MemberKind::Field,
            name: name.into(),
            accessibility,
            is_static,
            params: Vec::new(),
            value_type: value_type.into(),
            is_read_only,
            has_getter: false,
            has_setter: false,
            is_synthesized: false,
            type_params: Vec::new(),
            is_async: false,
            has_borrows: false,
        }
    }

    /// Descriptor for a property with the given accessor availability.
    pub fn property(
        name: impl Into<String>,
        accessibility: Accessibility,
        is_static: bool,
        value_type: impl Into<String>,
        has_getter: bool,
        has_setter: bool,
    ) -> Self {
        Self {
            kind: MemberKind::Property,
            name: name.into(),
            accessibility,
            is_static,
            params: Vec::new(),
            value_type: value_type.into(),
            is_read_only: false,
            has_getter,
            has_setter,
            is_synthesized: false,
            type_params: Vec::new(),
            is_async: false,
            has_borrows: false,
        }
    }

    /// Descriptor for a constructor. `name` is the underlying associated fn.
    pub fn constructor(
        name: impl Into<String>,
        accessibility: Accessibility,
        params: Vec<Param>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: MemberKind::Constructor,
            name: name.into(),
            accessibility,
            is_static: true,
            params,
            value_type: value_type.into(),
            is_read_only: false,
            has_getter: false,
            has_setter: false,
            is_synthesized: false,
            type_params: Vec::new(),
            is_async: false,
            has_borrows: false,
        }
    }

    /// Mark this member as an implementation artifact.
    pub fn synthesized(mut self) -> Self {
        self.is_synthesized = true;
        self
    }

    /// Comma-joined parameter-type sequence, the signature part of a thunk
    /// cache key.
    pub fn params_signature(&self) -> String {
        self.params
            .iter()
            .map(|p| p.ty.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the member returns nothing.
    pub fn is_void(&self) -> bool {
        self.value_type == "()"
    }

    /// Whether a compiled thunk can be keyed for this member. Method-level
    /// generics, async bodies, and borrowed signatures have no `'static`
    /// monomorphic signature at the wrapper's cache slot, so they take the
    /// uncached path.
    pub fn is_cacheable(&self) -> bool {
        self.type_params.is_empty() && !self.is_async && !self.has_borrows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_signature() {
        let m = MemberInfo::method(
            "bar",
            Accessibility::Hidden,
            false,
            vec![Param::new("a", "i32"), Param::new("b", "i32")],
            "i32",
        );
        assert_eq!(m.params_signature(), "i32, i32");
    }

    #[test]
    fn test_void_detection() {
        let m = MemberInfo::method("tick", Accessibility::Hidden, false, vec![], "()");
        assert!(m.is_void());
        assert_eq!(m.params_signature(), "");
    }

    #[test]
    fn test_generic_method_is_not_cacheable() {
        let mut m = MemberInfo::method("convert", Accessibility::Hidden, false, vec![], "String");
        assert!(m.is_cacheable());
        m.type_params.push("U: std::fmt::Display".to_string());
        assert!(!m.is_cacheable());
    }
}
