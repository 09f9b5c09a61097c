//! Source scanning
//!
//! Parses a Rust source tree with `syn` and produces the read-only type
//! model plus the marker relations found on the way. Namespaces are module
//! paths derived from file location and inline `mod` nesting.
//!
//! Projection rules: a hidden getter/setter method pair `x()`/`set_x(v)` is
//! promoted to a property; an associated `const` becomes a read-only static
//! field; an associated fn returning `Self` becomes a constructor.

use crate::error::GenError;
use periscope_model::{
    Accessibility, MarkerRelation, MemberInfo, MemberKind, ModelError, Param, TypeInfo, TypeModel,
    TypeName,
};
use proc_macro2::TokenStream;
use quote::ToTokens;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Component, Path, PathBuf};

/// Name of the marker attribute the scanner recognizes.
const MARKER_ATTR: &str = "privates_available";

/// Accumulates type descriptors and marker relations across source files.
#[derive(Default)]
pub struct SourceScanner {
    types: FxHashMap<String, TypeInfo>,
    markers: Vec<MarkerRelation>,
}

impl SourceScanner {
    /// Create an empty scanner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every `.rs` file under `root`, in sorted path order.
    pub fn scan_dir(&mut self, root: &Path) -> Result<(), GenError> {
        let pattern = root.join("**").join("*.rs");
        let mut paths: Vec<PathBuf> =
            glob::glob(&pattern.to_string_lossy())?.collect::<Result<_, _>>()?;
        paths.sort();
        for path in paths {
            let namespace = namespace_for(root, &path);
            self.scan_file(&path, &namespace)?;
        }
        Ok(())
    }

    /// Scan one file, placing its items under `namespace`.
    pub fn scan_file(&mut self, path: &Path, namespace: &str) -> Result<(), GenError> {
        let source = std::fs::read_to_string(path).map_err(ModelError::Io)?;
        self.scan_source_at(&source, namespace, &path.to_string_lossy())
    }

    /// Scan source text, placing its items under `namespace`.
    pub fn scan_source(&mut self, source: &str, namespace: &str) -> Result<(), GenError> {
        self.scan_source_at(source, namespace, "<memory>")
    }

    /// Finish scanning: promote property pairs and freeze the model.
    pub fn finish(self) -> (TypeModel, Vec<MarkerRelation>) {
        let mut model = TypeModel::new();
        for (_, mut info) in self.types {
            promote_properties(&mut info);
            model.insert(info);
        }
        (model, self.markers)
    }

    fn scan_source_at(
        &mut self,
        source: &str,
        namespace: &str,
        origin: &str,
    ) -> Result<(), GenError> {
        let file = syn::parse_file(source).map_err(|e| ModelError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        self.collect_items(&file.items, namespace)
    }

    fn collect_items(&mut self, items: &[syn::Item], namespace: &str) -> Result<(), GenError> {
        for item in items {
            match item {
                syn::Item::Struct(s) => {
                    self.collect_markers(&s.attrs, namespace, &s.ident.to_string())?;
                    self.collect_struct(s, namespace);
                }
                syn::Item::Impl(i) if i.trait_.is_none() => {
                    if let Some(ident) = impl_self_ident(i) {
                        self.collect_markers(&i.attrs, namespace, &ident)?;
                        self.collect_impl(i, namespace, &ident);
                    }
                }
                syn::Item::Fn(f) => {
                    self.collect_markers(&f.attrs, namespace, &f.sig.ident.to_string())?;
                }
                syn::Item::Mod(m) => {
                    let name = m.ident.to_string();
                    self.collect_markers(&m.attrs, namespace, &name)?;
                    if let Some((_, items)) = &m.content {
                        let child = join_namespace(namespace, &name);
                        self.collect_items(items, &child)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_markers(
        &mut self,
        attrs: &[syn::Attribute],
        namespace: &str,
        item_name: &str,
    ) -> Result<(), GenError> {
        for attr in attrs {
            let is_marker = attr
                .path()
                .segments
                .last()
                .is_some_and(|s| s.ident == MARKER_ATTR);
            if !is_marker {
                continue;
            }
            let declared_by = join_namespace(namespace, item_name);
            let target: syn::Path =
                attr.parse_args()
                    .map_err(|e| ModelError::InvalidMarker {
                        declared_by: declared_by.clone(),
                        message: e.to_string(),
                    })?;
            self.markers.push(MarkerRelation::new(
                declared_by,
                tokens_to_string(&target.to_token_stream()),
            ));
        }
        Ok(())
    }

    fn collect_struct(&mut self, s: &syn::ItemStruct, namespace: &str) {
        let ident = s.ident.to_string();
        let (type_params, lifetimes) = generics_strings(&s.generics);
        let info = self.ensure_type(namespace, &ident);
        info.name.arity = type_params.len();
        info.type_params = type_params;
        info.lifetimes = lifetimes;
        if let syn::Fields::Named(fields) = &s.fields {
            for field in &fields.named {
                let Some(fid) = &field.ident else { continue };
                let ty = tokens_to_string(&field.ty.to_token_stream());
                let mut member = MemberInfo::field(
                    fid.to_string(),
                    accessibility(&field.vis),
                    false,
                    ty.clone(),
                    false,
                );
                member.has_borrows = is_borrowed(&ty);
                info.members.push(member);
            }
        }
    }

    fn collect_impl(&mut self, i: &syn::ItemImpl, namespace: &str, ident: &str) {
        let mut members = Vec::new();
        for item in &i.items {
            match item {
                syn::ImplItem::Fn(f) => members.push(impl_fn_member(f, ident)),
                syn::ImplItem::Const(c) => {
                    members.push(MemberInfo::field(
                        c.ident.to_string(),
                        accessibility(&c.vis),
                        true,
                        tokens_to_string(&c.ty.to_token_stream()),
                        true,
                    ));
                }
                _ => {}
            }
        }
        let info = self.ensure_type(namespace, ident);
        info.members.extend(members);
    }

    fn ensure_type(&mut self, namespace: &str, ident: &str) -> &mut TypeInfo {
        let key = join_namespace(namespace, ident);
        self.types
            .entry(key)
            .or_insert_with(|| TypeInfo::new(TypeName::new(namespace, ident, 0)))
    }
}

fn impl_fn_member(f: &syn::ImplItemFn, type_ident: &str) -> MemberInfo {
    let sig = &f.sig;
    let name = sig.ident.to_string();
    let acc = accessibility(&f.vis);
    let has_receiver = sig.receiver().is_some();
    let (type_params, _) = generics_strings(&sig.generics);

    let mut params = Vec::new();
    let mut has_borrows = false;
    for (idx, arg) in sig.inputs.iter().enumerate() {
        if let syn::FnArg::Typed(t) = arg {
            let pname = match &*t.pat {
                syn::Pat::Ident(p) => p.ident.to_string(),
                _ => format!("arg{idx}"),
            };
            let ty = tokens_to_string(&t.ty.to_token_stream());
            has_borrows |= is_borrowed(&ty);
            params.push(Param::new(pname, ty));
        }
    }
    let value_type = match &sig.output {
        syn::ReturnType::Default => "()".to_string(),
        syn::ReturnType::Type(_, ty) => tokens_to_string(&ty.to_token_stream()),
    };
    has_borrows |= is_borrowed(&value_type);

    let is_constructor = !has_receiver && is_self_return(&value_type, type_ident);
    let mut member = if is_constructor {
        MemberInfo::constructor(name, acc, params, value_type)
    } else {
        MemberInfo::method(name, acc, !has_receiver, params, value_type)
    };
    member.type_params = type_params;
    member.is_async = sig.asyncness.is_some();
    member.has_borrows = has_borrows;
    member
}

/// Promote hidden `x()`/`set_x(v)` method pairs to properties, keeping the
/// methods in the model flagged as implementation artifacts.
fn promote_properties(info: &mut TypeInfo) {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (gi, getter) in info.members.iter().enumerate() {
        if getter.kind != MemberKind::Method
            || getter.accessibility != Accessibility::Hidden
            || !getter.params.is_empty()
            || getter.is_void()
            || !getter.is_cacheable()
        {
            continue;
        }
        let setter_name = format!("set_{}", getter.name);
        let setter = info.members.iter().position(|s| {
            s.kind == MemberKind::Method
                && s.accessibility == Accessibility::Hidden
                && s.name == setter_name
                && s.is_static == getter.is_static
                && s.params.len() == 1
                && s.params[0].ty == getter.value_type
                && s.is_void()
                && s.is_cacheable()
        });
        if let Some(si) = setter {
            pairs.push((gi, si));
        }
    }
    if pairs.is_empty() {
        return;
    }

    let getters: FxHashSet<usize> = pairs.iter().map(|(g, _)| *g).collect();
    let setters: FxHashSet<usize> = pairs.iter().map(|(_, s)| *s).collect();
    let members: Vec<MemberInfo> = info.members.drain(..).collect();
    for (idx, member) in members.into_iter().enumerate() {
        if getters.contains(&idx) {
            info.members.push(MemberInfo::property(
                member.name.clone(),
                Accessibility::Hidden,
                member.is_static,
                member.value_type.clone(),
                true,
                true,
            ));
            info.members.push(member.synthesized());
        } else if setters.contains(&idx) {
            info.members.push(member.synthesized());
        } else {
            info.members.push(member);
        }
    }
}

fn accessibility(vis: &syn::Visibility) -> Accessibility {
    match vis {
        syn::Visibility::Inherited => Accessibility::Hidden,
        _ => Accessibility::Visible,
    }
}

fn is_self_return(value_type: &str, type_ident: &str) -> bool {
    value_type == "Self"
        || value_type == type_ident
        || value_type.starts_with(&format!("{type_ident}<"))
}

/// A borrowed or unnameable type cannot be part of a `'static` thunk
/// signature.
fn is_borrowed(ty: &str) -> bool {
    ty.contains('&') || ty.contains('\'') || ty.contains("impl ")
}

fn impl_self_ident(i: &syn::ItemImpl) -> Option<String> {
    if let syn::Type::Path(p) = &*i.self_ty {
        p.path.segments.last().map(|s| s.ident.to_string())
    } else {
        None
    }
}

fn generics_strings(generics: &syn::Generics) -> (Vec<String>, Vec<String>) {
    let mut type_params = Vec::new();
    let mut lifetimes = Vec::new();
    for param in &generics.params {
        match param {
            syn::GenericParam::Type(t) => {
                let s = tokens_to_string(&t.to_token_stream());
                // strip defaults: `T: Clone = i32` declares, accessors re-declare
                let s = s.split(" =").next().unwrap_or(&s).trim_end().to_string();
                type_params.push(s);
            }
            syn::GenericParam::Const(c) => {
                type_params.push(tokens_to_string(&c.to_token_stream()));
            }
            syn::GenericParam::Lifetime(l) => {
                lifetimes.push(format!("'{}", l.lifetime.ident));
            }
        }
    }
    (type_params, lifetimes)
}

fn join_namespace(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}::{name}")
    }
}

/// Module path for a file relative to the scanned root; `lib.rs`, `main.rs`
/// and `mod.rs` map to their directory's path.
fn namespace_for(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let Some(file) = parts.pop() else {
        return String::new();
    };
    let stem = file.trim_end_matches(".rs");
    if stem != "lib" && stem != "main" && stem != "mod" {
        parts.push(stem.to_string());
    }
    parts.join("::")
}

/// Token stream to source text, with `syn`'s token spacing collapsed.
fn tokens_to_string(tokens: &TokenStream) -> String {
    let s = tokens.to_string();
    let s = s.replace(" :: ", "::");
    let s = s.replace("< ", "<").replace(" <", "<");
    let s = s.replace(" >", ">");
    let s = s.replace("& '", "&'");
    let s = s.replace("& mut ", "&mut ");
    let s = s.replace("& ", "&");
    let s = s.replace(" : ", ": ");
    s.replace(" ,", ",")
}
