//! Source templates for the wrapper synthesizer
//!
//! Rendering is plain placeholder substitution; every dynamic part comes in
//! through a `{{NAME}}` slot. Generated locals carry a `__` prefix so they
//! cannot shadow wrapped parameter names.

/// Header of every generated file.
pub const FILE_HEADER: &str = "\
// Generated by periscope-gen. Do not edit by hand.
// Target: {{QUALIFIED}}

";

/// Instance accessor struct and impl shell.
pub const INSTANCE_ACCESSOR: &str = "\
#[allow(non_camel_case_types)]
pub struct {{TYPE_NAME}}_Privates{{GENERICS_DECL}} {
    target: {{TARGET_TY}},
}

#[allow(non_snake_case)]
impl{{GENERICS_DECL}} {{TYPE_NAME}}_Privates{{GENERICS_ARGS}} {
    /// Wrap an owned instance of `{{QUALIFIED}}`.
    pub fn new(target: {{TARGET_TY}}) -> Self {
        Self { target }
    }

    /// Unwrap, returning the underlying instance.
    pub fn into_inner(self) -> {{TARGET_TY}} {
        self.target
    }
{{MEMBERS}}}
";

/// Static accessor struct and impl shell.
pub const STATIC_ACCESSOR: &str = "\
#[allow(non_camel_case_types)]
pub struct {{TYPE_NAME}}_Privates_Static{{GENERICS_DECL}}{{STATIC_BODY}}

#[allow(non_snake_case)]
impl{{GENERICS_DECL}} {{TYPE_NAME}}_Privates_Static{{GENERICS_ARGS}} {{{MEMBERS}}}
";

/// Body of a generic static accessor struct; never constructed, the marker
/// only ties the type parameters down.
pub const STATIC_ACCESSOR_PHANTOM_BODY: &str = " {
    _marker: std::marker::PhantomData<({{PHANTOM}})>,
}";

/// Cache-slot declaration shared by all cached wrappers.
pub const KEY_DECL: &str = "\
        static KEY: periscope_rt::MemberKey = periscope_rt::MemberKey::new(
            periscope_rt::MemberKind::{{KIND}},
            \"{{MEMBER_NAME}}\",
            \"{{PARAM_SIG}}\",
            {{IS_STATIC}},
        );";

/// Cached wrapper for an instance member.
pub const INSTANCE_CACHED: &str = "
    pub fn {{GEN_NAME}}(&mut self{{PARAM_DECLS}}){{RET_ARROW}} {
{{KEY_DECL}}
        let __thunk = match periscope_rt::cache().instance::<{{TARGET_TY}}, {{ARG_TUPLE_TY}}, {{VALUE_TY}}, _>(&KEY, || {
            Box::new({{COMPILE_BODY}})
        }) {
            Ok(__thunk) => __thunk,
            Err(__err) => panic!(\"invocation of `{{QUALIFIED}}::{{MEMBER_NAME}}` failed: {__err}\"),
        };
        __thunk.call(&mut self.target, {{ARG_TUPLE}}){{TAIL}}
    }
";

/// Cached wrapper for a static member or constructor.
pub const STATIC_CACHED: &str = "
    pub fn {{GEN_NAME}}({{PARAM_DECLS}}){{RET_ARROW}} {
{{KEY_DECL}}
        let __thunk = match periscope_rt::cache().static_member::<{{TARGET_TY}}, {{ARG_TUPLE_TY}}, {{VALUE_TY}}, _>(&KEY, || {
            Box::new({{COMPILE_BODY}})
        }) {
            Ok(__thunk) => __thunk,
            Err(__err) => panic!(\"invocation of `{{QUALIFIED}}::{{MEMBER_NAME}}` failed: {__err}\"),
        };
        __thunk.call({{ARG_TUPLE}}){{TAIL}}
    }
";

/// Uncached wrapper for an instance member (open generics, lifetimes).
pub const INSTANCE_UNCACHED: &str = "
    pub fn {{GEN_NAME}}{{METHOD_GENERICS}}(&mut self{{PARAM_DECLS}}){{RET_ARROW}} {
        periscope_rt::cache().invoke_uncached(|| {{ACCESS}}){{TAIL}}
    }
";

/// Uncached wrapper for a static member or constructor.
pub const STATIC_UNCACHED: &str = "
    pub fn {{GEN_NAME}}{{METHOD_GENERICS}}({{PARAM_DECLS}}){{RET_ARROW}} {
        periscope_rt::cache().invoke_uncached(|| {{ACCESS}}){{TAIL}}
    }
";

/// Uncached wrapper for an async instance method; the body cannot run
/// inside a closure handed to the engine, so the call is only counted.
pub const INSTANCE_ASYNC: &str = "
    pub async fn {{GEN_NAME}}{{METHOD_GENERICS}}(&mut self{{PARAM_DECLS}}){{RET_ARROW}} {
        periscope_rt::cache().note_uncached();
        {{ACCESS}}.await{{TAIL}}
    }
";

/// Uncached wrapper for an async static method.
pub const STATIC_ASYNC: &str = "
    pub async fn {{GEN_NAME}}{{METHOD_GENERICS}}({{PARAM_DECLS}}){{RET_ARROW}} {
        periscope_rt::cache().note_uncached();
        {{ACCESS}}.await{{TAIL}}
    }
";

/// Substitute every `{{NAME}}` slot in `template`.
pub fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in substitutions {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}
