//! Serde data model: one flat `pub struct` per composite.
//!
//! Rust has no inner types, so nested composites are emitted after their
//! owner in pre-order. Colliding composite names therefore collide here too;
//! callers are expected to check `TypeTree::duplicate_names` and warn.
//! Field identifiers are unique per struct, and struct names never shadow
//! the prelude types the model itself refers to.
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Renderer;
use crate::ir::{CompositeType, ScalarKind, TypeRef, TypeTree};

static RUST_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{XID_Start}_][\p{XID_Continue}]*$").expect("identifier regex"));

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super"];

/// Names the generated module already uses unqualified; a struct named like
/// one of these would shadow it.
const RESERVED_TYPE_NAMES: &[&str] = &["Option", "String", "Vec", "Serialize", "Deserialize"];

#[derive(Debug, Clone, Default)]
pub struct RustCodegen;

impl RustCodegen {
    pub fn new() -> Self {
        Self
    }

    fn type_name(ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(kind) => Self::scalar_name(*kind).to_owned(),
            TypeRef::ListOf(item) => format!("Vec<{}>", Self::type_name(item)),
            TypeRef::Named(name) => type_ident(name),
        }
    }

    fn scalar_name(kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::Integer => "i32",
            ScalarKind::Long => "i64",
            ScalarKind::Boolean => "bool",
            ScalarKind::Double => "f64",
            ScalarKind::String => "String",
            ScalarKind::AnyObject => "serde_json::Value",
        }
    }

    fn emit_struct(out: &mut String, ty: &CompositeType) {
        out.push_str("\n#[derive(Debug, Clone, Serialize, Deserialize)]\n");
        out.push_str(&format!("pub struct {} {{\n", type_ident(&ty.name)));
        let mut taken: Vec<String> = Vec::with_capacity(ty.fields.len());
        for field in &ty.fields {
            let (ident, needs_rename) = unique_field_ident(&field.name, &taken);
            if needs_rename {
                out.push_str(&format!("    #[serde(rename = {:?})]\n", field.name));
            }
            out.push_str(&format!("    pub {ident}: Option<{}>,\n", Self::type_name(&field.ty)));
            taken.push(ident);
        }
        out.push_str("}\n");
    }
}

impl Renderer for RustCodegen {
    fn render(&self, tree: &TypeTree) -> String {
        let mut out = String::from("use serde::{Deserialize, Serialize};\n");
        for composite in tree.composites() {
            Self::emit_struct(&mut out, composite);
        }
        out
    }

    fn file_path(&self, tree: &TypeTree) -> PathBuf {
        let (ident, _) = field_ident(&tree.root.name);
        PathBuf::from(format!("{}.rs", ident.trim_start_matches("r#")))
    }
}

/// `firstName` → `first_name`, `first-name` → `first_name`.
pub fn snake_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev: Option<char> = None;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() {
                if matches!(prev, Some(p) if p.is_lowercase() || p.is_numeric()) {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
        prev = Some(c);
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Field identifier for a JSON key, and whether serde needs a rename.
fn field_ident(key: &str) -> (String, bool) {
    let mut ident = snake_case(key);
    if ident.is_empty() {
        ident.push_str("field");
    }
    if ident.starts_with(|c: char| c.is_numeric()) {
        ident.insert(0, '_');
    }
    if !RUST_IDENT.is_match(&ident) {
        ident = ident.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    }
    let needs_rename = ident != key;
    if NOT_RAW.contains(&ident.as_str()) {
        ident.push('_');
        return (ident, true);
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    (ident, needs_rename)
}

/// `field_ident`, with a numeric suffix when two keys in one struct map to
/// the same identifier. A suffixed field always carries a rename.
fn unique_field_ident(key: &str, taken: &[String]) -> (String, bool) {
    let (ident, needs_rename) = field_ident(key);
    if !taken.contains(&ident) {
        return (ident, needs_rename);
    }
    let base = ident.trim_start_matches("r#");
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken.contains(&candidate) {
            let needs_rename = candidate != key;
            return (candidate, needs_rename);
        }
        n += 1;
    }
}

/// Struct identifier for a composite name; legal names pass through.
pub fn type_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    // `_` alone is not an identifier
    if ident.chars().all(|c| c == '_') {
        ident.push_str("Type");
    } else if ident.starts_with(|c: char| c.is_numeric()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) || RESERVED_TYPE_NAMES.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}
