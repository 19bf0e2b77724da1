//! Rust source parser that turns declared types into [`TypeInfo`].
//!
//! Fieldless enums become exportable enums. Attributes and derives become
//! annotations, variants become members and `#[repr(..)]` picks the
//! underlying integer type.
//!
//! ## Use-item analysis
//!
//! `use` statements in each file (and each inline module) are collected into
//! a map from local names to fully-qualified paths, so annotation names are
//! reported under their real name:
//!
//! - `use enum_js::JsEnum` maps `"JsEnum"` to `"enum_js::JsEnum"`
//! - `use enum_js::JsEnum as Exported` maps `"Exported"` to `"enum_js::JsEnum"`,
//!   so `#[derive(Exported)]` is reported as the annotation `JsEnum`.

use crate::error::{Error, Result};
use crate::source::TypeSource;
use crate::types::{
    AnnotationInfo, DESCRIPTION_ANNOTATION, RawEnumMember, TypeInfo, TypeKind, UnderlyingKind,
};
use quote::ToTokens;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use syn::ext::IdentExt;
use syn::{Attribute, BinOp, Expr, ExprLit, Fields, Item, Lit, LitInt, Meta, UnOp, UseTree};
use tracing::debug;
use walkdir::WalkDir;

/// Attributes that never act as annotations.
const IGNORED_ATTRIBUTES: &[&str] = &[
    "doc", "repr", "cfg", "cfg_attr", "allow", "warn", "deny", "expect", "non_exhaustive",
];

/// Per-module context built from `use` items.
struct SourceContext {
    /// Maps local name -> fully-qualified path.
    ///
    /// Populated for both plain imports (`use foo::Bar` -> `"Bar" => "foo::Bar"`)
    /// and renames (`use foo::Bar as Baz` -> `"Baz" => "foo::Bar"`).
    /// Glob imports are not tracked since they can't be resolved statically.
    imports: HashMap<String, String>,
}

/// Recursively flatten a `UseTree` into import entries.
fn collect_imports(tree: &UseTree, prefix: &[String], imports: &mut HashMap<String, String>) {
    match tree {
        UseTree::Path(p) => {
            let mut new_prefix = prefix.to_vec();
            new_prefix.push(p.ident.to_string());
            collect_imports(&p.tree, &new_prefix, imports);
        }
        UseTree::Name(n) => {
            let name = n.ident.to_string();
            let full_path = make_full_path(prefix, &name);
            imports.insert(name, full_path);
        }
        UseTree::Rename(r) => {
            let full_path = make_full_path(prefix, &r.ident.to_string());
            imports.insert(r.rename.to_string(), full_path);
        }
        UseTree::Glob(_) => {}
        UseTree::Group(g) => {
            for item in &g.items {
                collect_imports(item, prefix, imports);
            }
        }
    }
}

fn make_full_path(prefix: &[String], name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), name)
    }
}

fn build_source_context(items: &[Item]) -> SourceContext {
    let mut imports = HashMap::new();
    for item in items {
        if let Item::Use(item_use) = item {
            collect_imports(&item_use.tree, &[], &mut imports);
        }
    }
    SourceContext { imports }
}

/// The bare annotation name for an attribute or derive path.
///
/// Single-segment paths are resolved through the import map first, so a
/// renamed import reports the name it was imported under originally.
fn annotation_name(path: &syn::Path, ctx: &SourceContext) -> Option<String> {
    let last = path.segments.last()?.ident.unraw().to_string();
    if path.segments.len() > 1 {
        return Some(last);
    }
    let resolved = ctx
        .imports
        .get(&last)
        .and_then(|full| full.rsplit("::").next())
        .map(str::to_string);
    Some(resolved.unwrap_or(last))
}

/// The string argument of `#[name = "..."]` or `#[name("...")]`, if any.
fn literal_value(meta: &Meta) -> Option<String> {
    match meta {
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(expr_lit) => match &expr_lit.lit {
                Lit::Str(s) => Some(s.value()),
                _ => None,
            },
            _ => None,
        },
        Meta::List(list) => list.parse_args::<syn::LitStr>().ok().map(|s| s.value()),
        Meta::Path(_) => None,
    }
}

/// Collect annotations from outer attributes.
///
/// Every path inside `#[derive(..)]` is one annotation; every other attribute
/// not in [`IGNORED_ATTRIBUTES`] is one annotation.
fn collect_annotations(attrs: &[Attribute], ctx: &SourceContext) -> Vec<AnnotationInfo> {
    let mut annotations = Vec::new();
    for attr in attrs {
        let path = attr.path();
        if path.is_ident("derive") {
            if let Ok(nested) = attr.parse_args_with(
                syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
            ) {
                for derive in &nested {
                    if let Some(name) = annotation_name(derive, ctx) {
                        annotations.push(AnnotationInfo::new(name));
                    }
                }
            }
            continue;
        }
        if IGNORED_ATTRIBUTES.iter().any(|ignored| path.is_ident(ignored)) {
            continue;
        }
        if let Some(name) = annotation_name(path, ctx) {
            annotations.push(AnnotationInfo {
                name,
                value: literal_value(&attr.meta),
            });
        }
    }
    annotations
}

/// Underlying integer type from `#[repr(..)]`.
///
/// `#[repr(C)]` maps to `i32`; no integer repr maps to `isize`.
fn underlying_kind(attrs: &[Attribute]) -> UnderlyingKind {
    let mut kind = UnderlyingKind::Isize;
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let Ok(nested) = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        ) else {
            continue;
        };
        for meta in &nested {
            let Meta::Path(path) = meta else { continue };
            let Some(ident) = path.get_ident() else {
                continue;
            };
            let ident = ident.to_string();
            if let Some(int) = UnderlyingKind::from_primitive(&ident) {
                return int;
            }
            if ident == "C" {
                kind = UnderlyingKind::I32;
            }
        }
    }
    kind
}

/// Why a discriminant expression has no value.
enum EvalError {
    /// Not a constant expression this parser understands, or ill-typed.
    Unsupported,
    /// The value does not fit the type it is computed in.
    Overflow(i128),
}

type Eval = std::result::Result<i128, EvalError>;

fn checked(value: Option<i128>, kind: UnderlyingKind) -> Eval {
    let value = value.ok_or(EvalError::Unsupported)?;
    if kind.contains(value) {
        Ok(value)
    } else {
        Err(EvalError::Overflow(value))
    }
}

/// Integer type named by a cast target such as `u8` in `x as u8`.
fn cast_target(ty: &syn::Type) -> Option<UnderlyingKind> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => {
            UnderlyingKind::from_primitive(&p.path.get_ident()?.to_string())
        }
        syn::Type::Paren(p) => cast_target(&p.elem),
        syn::Type::Group(g) => cast_target(&g.elem),
        _ => None,
    }
}

/// The type an expression has on its own, from literal suffixes and casts.
///
/// `None` means the type comes from context.
fn expr_kind(expr: &Expr) -> Option<UnderlyingKind> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => UnderlyingKind::from_primitive(int.suffix()),
        Expr::Cast(cast) => cast_target(&cast.ty),
        Expr::Paren(paren) => expr_kind(&paren.expr),
        Expr::Group(group) => expr_kind(&group.expr),
        Expr::Unary(unary) => expr_kind(&unary.expr),
        Expr::Binary(binary) => match binary.op {
            BinOp::Shl(_) | BinOp::Shr(_) => expr_kind(&binary.left),
            _ => expr_kind(&binary.left).or_else(|| expr_kind(&binary.right)),
        },
        _ => None,
    }
}

fn eval_literal(int: &LitInt, kind: UnderlyingKind, negative: bool) -> Eval {
    if !int.suffix().is_empty() && UnderlyingKind::from_primitive(int.suffix()) != Some(kind) {
        return Err(EvalError::Unsupported);
    }
    let value = int
        .base10_parse::<i128>()
        .map_err(|_| EvalError::Unsupported)?;
    checked(Some(if negative { -value } else { value }), kind)
}

/// Evaluate a constant discriminant expression of type `kind`.
///
/// Supports integer literals, unary minus and `!`, parentheses, integer
/// casts and the arithmetic/bitwise operators commonly used for flag values.
/// Every subexpression is computed at the width of its own type, so casts
/// truncate or sign-extend and `!` flips only that many bits.
fn eval_discriminant(expr: &Expr, kind: UnderlyingKind) -> Eval {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => eval_literal(int, kind, false),
        Expr::Unary(unary) => match unary.op {
            UnOp::Neg(_) if kind.is_signed() => {
                // `-128i8` is in range even though `128i8` is not.
                if let Expr::Lit(ExprLit {
                    lit: Lit::Int(int), ..
                }) = &*unary.expr
                {
                    return eval_literal(int, kind, true);
                }
                checked(eval_discriminant(&unary.expr, kind)?.checked_neg(), kind)
            }
            UnOp::Not(_) => Ok(kind.wrap(!eval_discriminant(&unary.expr, kind)?)),
            _ => Err(EvalError::Unsupported),
        },
        Expr::Paren(paren) => eval_discriminant(&paren.expr, kind),
        Expr::Group(group) => eval_discriminant(&group.expr, kind),
        Expr::Cast(cast) => {
            if cast_target(&cast.ty) != Some(kind) {
                return Err(EvalError::Unsupported);
            }
            // Unconstrained literals under a cast default to i32.
            let source = expr_kind(&cast.expr).unwrap_or(UnderlyingKind::I32);
            Ok(kind.wrap(eval_discriminant(&cast.expr, source)?))
        }
        Expr::Binary(binary) => {
            let left = eval_discriminant(&binary.left, kind)?;
            match binary.op {
                BinOp::Shl(_) | BinOp::Shr(_) => {
                    let amount_kind = expr_kind(&binary.right).unwrap_or(UnderlyingKind::I32);
                    let amount = eval_discriminant(&binary.right, amount_kind)?;
                    let amount = u32::try_from(amount)
                        .ok()
                        .filter(|amount| *amount < kind.bits())
                        .ok_or(EvalError::Unsupported)?;
                    if matches!(binary.op, BinOp::Shl(_)) {
                        Ok(kind.wrap(left << amount))
                    } else {
                        Ok(left >> amount)
                    }
                }
                _ => {
                    let right = eval_discriminant(&binary.right, kind)?;
                    let value = match binary.op {
                        BinOp::Add(_) => left.checked_add(right),
                        BinOp::Sub(_) => left.checked_sub(right),
                        BinOp::Mul(_) => left.checked_mul(right),
                        BinOp::BitOr(_) => Some(left | right),
                        BinOp::BitAnd(_) => Some(left & right),
                        BinOp::BitXor(_) => Some(left ^ right),
                        _ => return Err(EvalError::Unsupported),
                    };
                    checked(value, kind)
                }
            }
        }
        _ => Err(EvalError::Unsupported),
    }
}

/// Build the member list of a fieldless enum.
///
/// Implicit discriminants continue from the previous value, starting at 0.
fn extract_members(
    type_name: &str,
    variants: &syn::punctuated::Punctuated<syn::Variant, syn::token::Comma>,
    kind: UnderlyingKind,
    ctx: &SourceContext,
) -> Result<Vec<RawEnumMember>> {
    let mut members = Vec::with_capacity(variants.len());
    let mut next: i128 = 0;
    for variant in variants {
        let name = variant.ident.unraw().to_string();
        let value = match &variant.discriminant {
            Some((_, expr)) => match eval_discriminant(expr, kind) {
                Ok(value) => value,
                Err(EvalError::Overflow(value)) => {
                    return Err(Error::DiscriminantOverflow {
                        type_name: type_name.to_string(),
                        member: name,
                        value,
                        kind,
                    });
                }
                Err(EvalError::Unsupported) => {
                    return Err(Error::UnsupportedDiscriminant {
                        type_name: type_name.to_string(),
                        member: name,
                        expr: expr.to_token_stream().to_string(),
                    });
                }
            },
            None => next,
        };
        if !kind.contains(value) {
            return Err(Error::DiscriminantOverflow {
                type_name: type_name.to_string(),
                member: name,
                value,
                kind,
            });
        }
        next = value + 1;

        let annotations = collect_annotations(&variant.attrs, ctx)
            .into_iter()
            .filter(|a| a.name == DESCRIPTION_ANNOTATION)
            .collect();
        members.push(RawEnumMember {
            name,
            value,
            annotations,
        });
    }
    Ok(members)
}

fn extract_enum(item: &syn::ItemEnum, ctx: &SourceContext) -> Result<TypeInfo> {
    let name = item.ident.unraw().to_string();
    let annotations = collect_annotations(&item.attrs, ctx);
    let underlying_kind = underlying_kind(&item.attrs);

    let fieldless = item
        .variants
        .iter()
        .all(|v| matches!(v.fields, Fields::Unit));
    if !fieldless {
        return Ok(TypeInfo {
            name,
            kind: TypeKind::DataEnum,
            underlying_kind,
            annotations,
            members: Vec::new(),
        });
    }

    // Unmarked enums are still parsed so a bad discriminant anywhere in the
    // module fails the load, matching how a compiler would reject it.
    let members = extract_members(&name, &item.variants, underlying_kind, ctx)?;
    Ok(TypeInfo {
        name,
        kind: TypeKind::Enum,
        underlying_kind,
        annotations,
        members,
    })
}

fn collect_types(items: &[Item], types: &mut Vec<TypeInfo>) -> Result<()> {
    let ctx = build_source_context(items);
    for item in items {
        match item {
            Item::Enum(e) => types.push(extract_enum(e, &ctx)?),
            Item::Struct(s) => types.push(TypeInfo {
                annotations: collect_annotations(&s.attrs, &ctx),
                ..TypeInfo::new_other(s.ident.unraw().to_string(), TypeKind::Struct)
            }),
            Item::Union(u) => types.push(TypeInfo {
                annotations: collect_annotations(&u.attrs, &ctx),
                ..TypeInfo::new_other(u.ident.unraw().to_string(), TypeKind::Union)
            }),
            Item::Mod(m) => {
                if let Some((_, nested)) = &m.content {
                    collect_types(nested, types)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_source(source: &str, origin: &str) -> Result<Vec<TypeInfo>> {
    let file = syn::parse_file(source).map_err(|source| Error::Parse {
        origin: origin.to_string(),
        source,
    })?;
    let mut types = Vec::new();
    collect_types(&file.items, &mut types)?;
    debug!("{}: found {} types", origin, types.len());
    Ok(types)
}

/// Parse Rust source from a string.
///
/// Types are returned in declaration order, with the contents of inline
/// modules in place of the module item.
pub fn parse_rust_source(source: &str) -> Result<Vec<TypeInfo>> {
    parse_source(source, "<source>")
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A Rust source file or a directory tree of `.rs` files.
#[derive(Debug, Clone)]
pub enum RustSource {
    File(PathBuf),
    Dir(PathBuf),
}

impl RustSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        RustSource::File(path.into())
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        RustSource::Dir(path.into())
    }
}

impl TypeSource for RustSource {
    fn load(&self) -> Result<Vec<TypeInfo>> {
        match self {
            RustSource::File(path) => {
                let source = read_source(path)?;
                parse_source(&source, &path.display().to_string())
            }
            RustSource::Dir(root) => {
                let mut types = Vec::new();
                // Sorted so the output order does not depend on the filesystem.
                for entry in WalkDir::new(root).sort_by_file_name() {
                    let entry = entry.map_err(|err| Error::Io {
                        path: err.path().unwrap_or(root.as_path()).to_path_buf(),
                        source: err.into(),
                    })?;
                    let path = entry.path();
                    if entry.file_type().is_file()
                        && path.extension().is_some_and(|ext| ext == "rs")
                    {
                        let source = read_source(path)?;
                        types.extend(parse_source(&source, &path.display().to_string())?);
                    }
                }
                Ok(types)
            }
        }
    }
}
