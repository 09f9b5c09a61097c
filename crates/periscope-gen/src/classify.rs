//! Member classification
//!
//! Partitions a target type's member list into the seven collections the
//! synthesizer renders from. Only hidden members survive, and
//! implementation-synthesized artifacts (property accessor methods, backing
//! storage) are filtered out.

use periscope_model::{Accessibility, MemberInfo, MemberKind, TypeInfo};

/// The classified member collections of one target type.
#[derive(Debug, Default)]
pub struct ClassifiedMembers<'a> {
    /// Hidden instance methods
    pub instance_methods: Vec<&'a MemberInfo>,
    /// Hidden instance properties
    pub instance_properties: Vec<&'a MemberInfo>,
    /// Hidden instance fields
    pub instance_fields: Vec<&'a MemberInfo>,
    /// Hidden static methods
    pub static_methods: Vec<&'a MemberInfo>,
    /// Hidden static properties
    pub static_properties: Vec<&'a MemberInfo>,
    /// Hidden static fields
    pub static_fields: Vec<&'a MemberInfo>,
    /// Hidden constructors, any parameter count
    pub constructors: Vec<&'a MemberInfo>,
}

impl<'a> ClassifiedMembers<'a> {
    /// Whether every collection is empty; such a type produces no artifact.
    pub fn is_empty(&self) -> bool {
        self.instance_methods.is_empty()
            && self.instance_properties.is_empty()
            && self.instance_fields.is_empty()
            && self.static_methods.is_empty()
            && self.static_properties.is_empty()
            && self.static_fields.is_empty()
            && self.constructors.is_empty()
    }

    /// Total number of classified members.
    pub fn len(&self) -> usize {
        self.instance_methods.len()
            + self.instance_properties.len()
            + self.instance_fields.len()
            + self.static_methods.len()
            + self.static_properties.len()
            + self.static_fields.len()
            + self.constructors.len()
    }
}

/// Classifies the members of a target type.
pub struct MemberClassifier;

impl MemberClassifier {
    /// Partition `target`'s members, keeping declaration order within each
    /// collection.
    pub fn classify(target: &TypeInfo) -> ClassifiedMembers<'_> {
        let mut out = ClassifiedMembers::default();

        for member in &target.members {
            if member.accessibility != Accessibility::Hidden || member.is_synthesized {
                continue;
            }
            match (member.kind, member.is_static) {
                (MemberKind::Constructor, _) => out.constructors.push(member),
                (MemberKind::Method, false) => out.instance_methods.push(member),
                (MemberKind::Method, true) => out.static_methods.push(member),
                (MemberKind::Property, false) => out.instance_properties.push(member),
                (MemberKind::Property, true) => out.static_properties.push(member),
                (MemberKind::Field, false) => out.instance_fields.push(member),
                (MemberKind::Field, true) => out.static_fields.push(member),
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use periscope_model::{Param, TypeName};

    fn target() -> TypeInfo {
        let mut t = TypeInfo::new(TypeName::new("m", "Widget", 0));
        t.members = vec![
            MemberInfo::method(
                "bar",
                Accessibility::Hidden,
                false,
                vec![Param::new("a", "i32")],
                "i32",
            ),
            MemberInfo::method("visible", Accessibility::Visible, false, vec![], "()"),
            MemberInfo::method("helper", Accessibility::Hidden, true, vec![], "u32"),
            MemberInfo::property("secret", Accessibility::Hidden, false, "String", true, true),
            MemberInfo::method("secret", Accessibility::Hidden, false, vec![], "String")
                .synthesized(),
            MemberInfo::method(
                "set_secret",
                Accessibility::Hidden,
                false,
                vec![Param::new("value", "String")],
                "()",
            )
            .synthesized(),
            MemberInfo::field("_value", Accessibility::Hidden, false, "i32", false),
            MemberInfo::field("MAX", Accessibility::Hidden, true, "u32", true),
            MemberInfo::constructor("new", Accessibility::Hidden, vec![], "Widget"),
        ];
        t
    }

    #[test]
    fn test_partitions_into_collections() {
        let t = target();
        let c = MemberClassifier::classify(&t);
        assert_eq!(c.instance_methods.len(), 1);
        assert_eq!(c.static_methods.len(), 1);
        assert_eq!(c.instance_properties.len(), 1);
        assert_eq!(c.instance_fields.len(), 1);
        assert_eq!(c.static_fields.len(), 1);
        assert_eq!(c.constructors.len(), 1);
        assert_eq!(c.len(), 6);
    }

    #[test]
    fn test_visible_members_are_dropped() {
        let t = target();
        let c = MemberClassifier::classify(&t);
        assert!(c.instance_methods.iter().all(|m| m.name != "visible"));
    }

    #[test]
    fn test_synthesized_accessor_methods_are_dropped() {
        let t = target();
        let c = MemberClassifier::classify(&t);
        assert!(c
            .instance_methods
            .iter()
            .all(|m| m.name != "secret" && m.name != "set_secret"));
    }

    #[test]
    fn test_type_with_no_hidden_members_is_empty() {
        let mut t = TypeInfo::new(TypeName::new("m", "Open", 0));
        t.members = vec![MemberInfo::method(
            "run",
            Accessibility::Visible,
            false,
            vec![],
            "()",
        )];
        assert!(MemberClassifier::classify(&t).is_empty());
    }
}
