//! Thunk cache keys

use std::any::TypeId;
use std::fmt;

/// Kind of a wrapped member, as recorded in cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Ordinary function
    Method,
    /// Getter/setter pair
    Property,
    /// Field access
    Field,
    /// Instance creation
    Constructor,
}

/// Static identity of one wrapped member, declared as a `static` in the
/// generated wrapper body. Together with the declaring type's `TypeId` it
/// forms the full cache key.
///
/// `params` is the comma-joined parameter-type sequence; getters use `""`
/// and setters the value type, which keeps the two sides of a property or
/// field distinct.
#[derive(Debug)]
pub struct MemberKey {
    /// Member kind
    pub kind: MemberKind,
    /// Member name as declared on the target
    pub name: &'static str,
    /// Comma-joined parameter-type sequence
    pub params: &'static str,
    /// Static vs. instance dispatch
    pub is_static: bool,
}

impl MemberKey {
    /// Const constructor, usable in `static` position.
    pub const fn new(
        kind: MemberKind,
        name: &'static str,
        params: &'static str,
        is_static: bool,
    ) -> Self {
        Self {
            kind,
            name,
            params,
            is_static,
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params)
    }
}

/// Full cache key: declaring type identity plus member identity.
///
/// Using `TypeId` keeps distinct generic instantiations of one target type
/// in distinct slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThunkKey {
    declaring: TypeId,
    kind: MemberKind,
    name: &'static str,
    params: &'static str,
    is_static: bool,
}

impl ThunkKey {
    /// Key for a member of declaring type `T`.
    pub fn of<T: ?Sized + 'static>(member: &MemberKey) -> Self {
        Self {
            declaring: TypeId::of::<T>(),
            kind: member.kind,
            name: member.name,
            params: member.params,
            is_static: member.is_static,
        }
    }
}
