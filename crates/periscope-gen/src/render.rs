//! Wrapper synthesis
//!
//! Renders one instance accessor and one static accessor per target type by
//! template substitution over the classified, overload-resolved member
//! list. Output is deterministic: same input, byte-identical output.

use crate::classify::MemberClassifier;
use crate::overloads::{OverloadResolver, Wrapper, WrapperRole};
use crate::templates;
use periscope_model::{MemberKind, Param, TypeInfo};
use serde::Serialize;

/// The synthesized output for one target type.
#[derive(Debug, Clone, Serialize)]
pub struct AccessorArtifact {
    /// Qualified target type name
    pub type_name: String,
    /// Collision-free output file name, `<TypeName>_<NormalizedNamespace>.rs`
    pub file_name: String,
    /// Generated source text
    #[serde(skip)]
    pub contents: String,
    /// Number of generated wrapper functions
    pub wrapper_count: usize,
}

/// Renders accessor artifacts from target type descriptors.
pub struct WrapperSynthesizer<'a> {
    target: &'a TypeInfo,
    qualified: String,
    target_ty: String,
    target_expr: String,
    generics_decl: String,
    generics_args: String,
}

impl<'a> WrapperSynthesizer<'a> {
    /// Render the accessor pair for `target`, or `None` when the type has
    /// no hidden member (silent skip).
    pub fn synthesize(target: &'a TypeInfo) -> Option<AccessorArtifact> {
        let classified = MemberClassifier::classify(target);
        if classified.is_empty() {
            return None;
        }
        let surface = OverloadResolver::resolve(&classified);
        let synth = Self::new(target);

        let instance_members: String = surface
            .instance
            .iter()
            .map(|w| synth.render_wrapper(w, true))
            .collect();
        let static_members: String = surface
            .statics
            .iter()
            .map(|w| synth.render_wrapper(w, false))
            .collect();

        let static_body = if synth.generics_args.is_empty() {
            ";".to_string()
        } else {
            templates::fill(
                templates::STATIC_ACCESSOR_PHANTOM_BODY,
                &[("PHANTOM", &synth.phantom_elems())],
            )
        };

        let mut contents =
            templates::fill(templates::FILE_HEADER, &[("QUALIFIED", &synth.qualified)]);
        contents.push_str(&templates::fill(
            templates::INSTANCE_ACCESSOR,
            &[
                ("TYPE_NAME", target.name.name.as_str()),
                ("QUALIFIED", &synth.qualified),
                ("TARGET_TY", &synth.target_ty),
                ("GENERICS_DECL", &synth.generics_decl),
                ("GENERICS_ARGS", &synth.generics_args),
                ("MEMBERS", &instance_members),
            ],
        ));
        contents.push('\n');
        contents.push_str(&templates::fill(
            templates::STATIC_ACCESSOR,
            &[
                ("TYPE_NAME", target.name.name.as_str()),
                ("GENERICS_DECL", &synth.generics_decl),
                ("GENERICS_ARGS", &synth.generics_args),
                ("STATIC_BODY", &static_body),
                ("MEMBERS", &static_members),
            ],
        ));

        Some(AccessorArtifact {
            type_name: synth.qualified,
            file_name: format!("{}.rs", target.name.artifact_id()),
            contents,
            wrapper_count: surface.len(),
        })
    }

    fn new(target: &'a TypeInfo) -> Self {
        let idents = target.type_param_idents();
        let args: Vec<String> = target
            .lifetimes
            .iter()
            .cloned()
            .chain(idents.iter().cloned())
            .collect();
        let generics_args = if args.is_empty() {
            String::new()
        } else {
            format!("<{}>", args.join(", "))
        };

        let decl: Vec<String> = target
            .lifetimes
            .iter()
            .cloned()
            .chain(
                target
                    .type_params
                    .iter()
                    .map(|p| Self::declared_param(p, target.has_lifetimes())),
            )
            .collect();
        let generics_decl = if decl.is_empty() {
            String::new()
        } else {
            format!("<{}>", decl.join(", "))
        };

        let name = target.name.name.clone();
        let target_ty = format!("{name}{generics_args}");
        let target_expr = if generics_args.is_empty() {
            name
        } else {
            format!("{}::{}", target.name.name, generics_args)
        };

        Self {
            target,
            qualified: target.name.qualified(),
            target_ty,
            target_expr,
            generics_decl,
            generics_args,
        }
    }

    /// A type parameter as it appears on the accessor. Cached dispatch keys
    /// by `TypeId`, so plain type parameters pick up a `'static` bound;
    /// lifetime-carrying targets dispatch uncached and keep their bounds as
    /// written.
    fn declared_param(param: &str, target_has_lifetimes: bool) -> String {
        if target_has_lifetimes || param.starts_with("const ") {
            param.to_string()
        } else if param.contains(':') {
            format!("{param} + 'static")
        } else {
            format!("{param}: 'static")
        }
    }

    fn phantom_elems(&self) -> String {
        let elems: Vec<String> = self
            .target
            .lifetimes
            .iter()
            .map(|lt| format!("&{lt} ()"))
            .chain(self.target.type_param_idents())
            .collect();
        if elems.len() == 1 {
            format!("{},", elems[0])
        } else {
            elems.join(", ")
        }
    }

    fn render_wrapper(&self, wrapper: &Wrapper<'_>, instance_surface: bool) -> String {
        let member = wrapper.member;
        let params = self.wrapper_params(wrapper);
        let value_ty = self.wrapper_value_type(wrapper);
        let ret_arrow = match value_ty.as_str() {
            "()" => String::new(),
            ty => format!(" -> {ty}"),
        };
        let tail = if value_ty == "()" { ";" } else { "" };

        let param_decls = Self::param_decls(&params, instance_surface);
        let arg_names = Self::arg_names(&params);
        let access = self.access_expr(wrapper, instance_surface, &arg_names);

        let cacheable = !self.target.has_lifetimes() && member.is_cacheable();
        if member.is_async || !cacheable {
            let template = match (member.is_async, instance_surface) {
                (true, true) => templates::INSTANCE_ASYNC,
                (true, false) => templates::STATIC_ASYNC,
                (false, true) => templates::INSTANCE_UNCACHED,
                (false, false) => templates::STATIC_UNCACHED,
            };
            let method_generics = if member.type_params.is_empty() {
                String::new()
            } else {
                format!("<{}>", member.type_params.join(", "))
            };
            return templates::fill(
                template,
                &[
                    ("GEN_NAME", wrapper.name.as_str()),
                    ("METHOD_GENERICS", &method_generics),
                    ("PARAM_DECLS", &param_decls),
                    ("RET_ARROW", &ret_arrow),
                    ("ACCESS", &access),
                    ("TAIL", tail),
                ],
            );
        }

        let key_decl = templates::fill(
            templates::KEY_DECL,
            &[
                ("KIND", Self::kind_name(member.kind)),
                ("MEMBER_NAME", member.name.as_str()),
                ("PARAM_SIG", &self.member_signature(wrapper)),
                ("IS_STATIC", if instance_surface { "false" } else { "true" }),
            ],
        );
        let tuple_pat = Self::tuple_text(&params, |p| p.name.clone());
        let compile_body = if instance_surface {
            format!("|__target, {tuple_pat}| {}", self.compiled_access(wrapper, &arg_names))
        } else {
            format!("|{tuple_pat}| {}", self.compiled_access(wrapper, &arg_names))
        };

        let template = if instance_surface {
            templates::INSTANCE_CACHED
        } else {
            templates::STATIC_CACHED
        };
        templates::fill(
            template,
            &[
                ("GEN_NAME", wrapper.name.as_str()),
                ("PARAM_DECLS", &param_decls),
                ("RET_ARROW", &ret_arrow),
                ("KEY_DECL", &key_decl),
                ("TARGET_TY", &self.target_ty),
                ("ARG_TUPLE_TY", &Self::tuple_text(&params, |p| p.ty.clone())),
                ("VALUE_TY", &value_ty),
                ("COMPILE_BODY", &compile_body),
                ("QUALIFIED", &self.qualified),
                ("MEMBER_NAME", member.name.as_str()),
                ("ARG_TUPLE", &tuple_pat),
                ("TAIL", tail),
            ],
        )
    }

    fn wrapper_params(&self, wrapper: &Wrapper<'_>) -> Vec<Param> {
        match wrapper.role {
            WrapperRole::Call | WrapperRole::Create => wrapper.member.params.clone(),
            WrapperRole::Get => Vec::new(),
            WrapperRole::Set => vec![Param::new("value", wrapper.member.value_type.clone())],
        }
    }

    fn wrapper_value_type(&self, wrapper: &Wrapper<'_>) -> String {
        match wrapper.role {
            WrapperRole::Call => wrapper.member.value_type.clone(),
            WrapperRole::Get => wrapper.member.value_type.clone(),
            WrapperRole::Set => "()".to_string(),
            WrapperRole::Create => self.target_ty.clone(),
        }
    }

    /// The parameter-type sequence recorded in the cache key. Getters use
    /// the empty sequence and setters the value type, keeping the two sides
    /// of a member in distinct slots.
    fn member_signature(&self, wrapper: &Wrapper<'_>) -> String {
        match wrapper.role {
            WrapperRole::Call | WrapperRole::Create => wrapper.member.params_signature(),
            WrapperRole::Get => String::new(),
            WrapperRole::Set => wrapper.member.value_type.clone(),
        }
    }

    /// Access expression for uncached and async wrappers, running against
    /// `self.target` directly.
    fn access_expr(&self, wrapper: &Wrapper<'_>, instance_surface: bool, args: &str) -> String {
        let name = wrapper.member.name.as_str();
        if instance_surface {
            match (wrapper.role, wrapper.member.kind) {
                (WrapperRole::Call, _) => format!("self.target.{name}({args})"),
                (WrapperRole::Get, MemberKind::Field) => format!("self.target.{name}.clone()"),
                (WrapperRole::Get, _) => format!("self.target.{name}()"),
                (WrapperRole::Set, MemberKind::Field) => format!("self.target.{name} = value"),
                (WrapperRole::Set, _) => format!("self.target.set_{name}(value)"),
                (WrapperRole::Create, _) => unreachable!("constructors live on the static surface"),
            }
        } else {
            let target = &self.target_expr;
            match (wrapper.role, wrapper.member.kind) {
                (WrapperRole::Call | WrapperRole::Create, _) => {
                    format!("{target}::{name}({args})")
                }
                (WrapperRole::Get, MemberKind::Field) if wrapper.member.is_read_only => {
                    format!("{target}::{name}")
                }
                (WrapperRole::Get, _) => format!("{target}::{name}()"),
                (WrapperRole::Set, _) => format!("{target}::set_{name}(value)"),
            }
        }
    }

    /// Access expression compiled into a thunk body; instance access runs
    /// against the thunk's `__target` receiver.
    fn compiled_access(&self, wrapper: &Wrapper<'_>, args: &str) -> String {
        let name = wrapper.member.name.as_str();
        match (wrapper.role, wrapper.member.kind) {
            (WrapperRole::Call, _) if !wrapper.member.is_static => {
                format!("__target.{name}({args})")
            }
            (WrapperRole::Get, MemberKind::Field) if !wrapper.member.is_static => {
                format!("__target.{name}.clone()")
            }
            (WrapperRole::Get, _) if !wrapper.member.is_static => format!("__target.{name}()"),
            (WrapperRole::Set, MemberKind::Field) if !wrapper.member.is_static => {
                format!("__target.{name} = value")
            }
            (WrapperRole::Set, _) if !wrapper.member.is_static => {
                format!("__target.set_{name}(value)")
            }
            _ => self.static_access(wrapper, args),
        }
    }

    fn static_access(&self, wrapper: &Wrapper<'_>, args: &str) -> String {
        let name = wrapper.member.name.as_str();
        let target = &self.target_expr;
        match (wrapper.role, wrapper.member.kind) {
            (WrapperRole::Call | WrapperRole::Create, _) => format!("{target}::{name}({args})"),
            (WrapperRole::Get, MemberKind::Field) if wrapper.member.is_read_only => {
                format!("{target}::{name}")
            }
            (WrapperRole::Get, _) => format!("{target}::{name}()"),
            (WrapperRole::Set, _) => format!("{target}::set_{name}(value)"),
        }
    }

    fn kind_name(kind: MemberKind) -> &'static str {
        match kind {
            MemberKind::Method => "Method",
            MemberKind::Property => "Property",
            MemberKind::Field => "Field",
            MemberKind::Constructor => "Constructor",
        }
    }

    fn param_decls(params: &[Param], instance_surface: bool) -> String {
        let joined = params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        if instance_surface && !joined.is_empty() {
            format!(", {joined}")
        } else {
            joined
        }
    }

    fn arg_names(params: &[Param]) -> String {
        params
            .iter()
            .map(|p| p.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `()` for zero elements, `(x,)` for one, `(x, y)` otherwise.
    fn tuple_text(params: &[Param], part: impl Fn(&Param) -> String) -> String {
        match params.len() {
            0 => "()".to_string(),
            1 => format!("({},)", part(&params[0])),
            _ => format!(
                "({})",
                params.iter().map(part).collect::<Vec<_>>().join(", ")
            ),
        }
    }
}
