//! Overload and identifier resolution
//!
//! Rust has no call-site overload resolution, so every colliding generated
//! identifier carries an ordinal suffix: the first occurrence in a name
//! group keeps the bare name, the n-th gets `{name}{n}`. The group map
//! spans the whole surface of one accessor (methods, property and field
//! accessors, creation functions), so wrappers of different kinds can never
//! collide either.

use crate::classify::ClassifiedMembers;
use periscope_model::MemberInfo;
use rustc_hash::FxHashMap;

/// Base name of every generated constructor-creation function.
pub const CREATE_INSTANCE: &str = "create_instance";

/// What a single generated wrapper function does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperRole {
    /// Forward a method call
    Call,
    /// Invoke a constructor
    Create,
    /// Read a field or property
    Get,
    /// Write a field or property
    Set,
}

/// One generated wrapper function: the member it forwards to, its role,
/// and its collision-free generated name.
#[derive(Debug)]
pub struct Wrapper<'a> {
    /// Wrapped member
    pub member: &'a MemberInfo,
    /// Wrapper role
    pub role: WrapperRole,
    /// Generated function name, ordinal-suffixed where needed
    pub name: String,
}

/// The fully resolved wrapper surface of one target type.
#[derive(Debug, Default)]
pub struct ResolvedSurface<'a> {
    /// Wrappers on the instance accessor
    pub instance: Vec<Wrapper<'a>>,
    /// Wrappers on the static accessor, creation functions last
    pub statics: Vec<Wrapper<'a>>,
}

impl<'a> ResolvedSurface<'a> {
    /// Total number of generated wrapper functions.
    pub fn len(&self) -> usize {
        self.instance.len() + self.statics.len()
    }

    /// Whether the surface is empty.
    pub fn is_empty(&self) -> bool {
        self.instance.is_empty() && self.statics.is_empty()
    }
}

/// Assigns collision-free generated names across one accessor surface.
pub struct OverloadResolver;

impl OverloadResolver {
    /// Resolve the classified members into named wrappers, declaration
    /// order preserved within each collection.
    pub fn resolve<'a>(classified: &ClassifiedMembers<'a>) -> ResolvedSurface<'a> {
        let mut surface = ResolvedSurface::default();

        let mut instance_names = NameAllocator::default();
        for member in &classified.instance_methods {
            surface.instance.push(Wrapper {
                member,
                role: WrapperRole::Call,
                name: instance_names.allocate(&member.name),
            });
        }
        Self::push_accessors(
            &mut surface.instance,
            &classified.instance_properties,
            &mut instance_names,
        );
        Self::push_accessors(
            &mut surface.instance,
            &classified.instance_fields,
            &mut instance_names,
        );

        let mut static_names = NameAllocator::default();
        for member in &classified.static_methods {
            surface.statics.push(Wrapper {
                member,
                role: WrapperRole::Call,
                name: static_names.allocate(&member.name),
            });
        }
        Self::push_accessors(
            &mut surface.statics,
            &classified.static_properties,
            &mut static_names,
        );
        Self::push_accessors(
            &mut surface.statics,
            &classified.static_fields,
            &mut static_names,
        );
        for member in &classified.constructors {
            surface.statics.push(Wrapper {
                member,
                role: WrapperRole::Create,
                name: static_names.allocate(CREATE_INSTANCE),
            });
        }

        surface
    }

    fn push_accessors<'a>(
        out: &mut Vec<Wrapper<'a>>,
        members: &[&'a MemberInfo],
        names: &mut NameAllocator,
    ) {
        for member in members {
            let (wants_getter, wants_setter) = match member.kind {
                periscope_model::MemberKind::Property => (member.has_getter, member.has_setter),
                _ => (true, !member.is_read_only),
            };
            if wants_getter {
                out.push(Wrapper {
                    member,
                    role: WrapperRole::Get,
                    name: names.allocate(&member.name),
                });
            }
            if wants_setter {
                out.push(Wrapper {
                    member,
                    role: WrapperRole::Set,
                    name: names.allocate(&format!("set_{}", member.name)),
                });
            }
        }
    }
}

#[derive(Default)]
struct NameAllocator {
    counts: FxHashMap<String, usize>,
}

impl NameAllocator {
    /// First occurrence keeps the bare name; the n-th gets `{base}{n}`.
    fn allocate(&mut self, base: &str) -> String {
        let n = self.counts.entry(base.to_string()).or_insert(0);
        *n += 1;
        if *n == 1 {
            base.to_string()
        } else {
            format!("{base}{n}")
        }
    }
}
