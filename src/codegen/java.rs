//! Java classes: a public root class with `public static` inner classes.
//!
//! Layout follows what JavaPoet produces for the same tree: two-space indent,
//! a blank line between members, fields before inner classes, boxed scalars.
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Renderer;
use crate::ir::{CompositeType, ScalarKind, TypeRef, TypeTree};

pub const DEFAULT_PACKAGE: &str = "com.example";

const INDENT: &str = "  ";

static JAVA_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").expect("identifier regex"));

const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

#[derive(Debug, Clone)]
pub struct JavaCodegen {
    package: String,
}

impl Default for JavaCodegen {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE)
    }
}

impl JavaCodegen {
    /// An empty package renders without a `package` line.
    pub fn new(package: impl Into<String>) -> Self {
        Self { package: package.into() }
    }

    /// Type as written inside a class whose visible class names are `scope`.
    /// A `java.lang`/`java.util` name shadowed by a class in scope is
    /// written fully qualified, as JavaPoet does.
    fn type_name(ty: &TypeRef, scope: &[String], imports_list: &mut bool) -> String {
        match ty {
            TypeRef::Scalar(kind) => {
                let simple = Self::scalar_name(*kind);
                qualify_if_shadowed("java.lang", simple, scope)
            }
            TypeRef::ListOf(item) => {
                let item = Self::type_name(item, scope, imports_list);
                let list = qualify_if_shadowed("java.util", "List", scope);
                if list == "List" {
                    *imports_list = true;
                }
                format!("{list}<{item}>")
            }
            TypeRef::Named(name) => java_ident(name),
        }
    }

    fn scalar_name(kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::Integer => "Integer",
            ScalarKind::Long => "Long",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Double => "Double",
            ScalarKind::String => "String",
            ScalarKind::AnyObject => "Object",
        }
    }

    /// `scope` holds the root class name and the inner class names of every
    /// enclosing class; it is restored before returning.
    fn emit_type(
        &self,
        out: &mut String,
        ty: &CompositeType,
        depth: usize,
        scope: &mut Vec<String>,
        imports_list: &mut bool,
    ) {
        let pad = INDENT.repeat(depth);
        let modifiers = if depth == 0 { "public class" } else { "public static class" };
        out.push_str(&format!("{pad}{modifiers} {} {{\n", java_ident(&ty.name)));

        let visible_before = scope.len();
        scope.extend(ty.nested_types.iter().map(|nested| java_ident(&nested.name)));

        let mut taken: Vec<String> = Vec::with_capacity(ty.fields.len());
        let mut first = true;
        for field in &ty.fields {
            if !first {
                out.push('\n');
            }
            first = false;
            let ident = unique_ident(java_ident(&field.name), &taken);
            out.push_str(&format!(
                "{pad}{INDENT}{} {ident};\n",
                Self::type_name(&field.ty, scope, imports_list)
            ));
            taken.push(ident);
        }
        for nested in &ty.nested_types {
            if !first {
                out.push('\n');
            }
            first = false;
            self.emit_type(out, nested, depth + 1, scope, imports_list);
        }
        scope.truncate(visible_before);
        out.push_str(&format!("{pad}}}\n"));
    }
}

impl Renderer for JavaCodegen {
    fn render(&self, tree: &TypeTree) -> String {
        let mut body = String::new();
        let mut scope = vec![java_ident(&tree.root.name)];
        let mut imports_list = false;
        self.emit_type(&mut body, &tree.root, 0, &mut scope, &mut imports_list);

        let mut out = String::new();
        if !self.package.is_empty() {
            out.push_str(&format!("package {};\n\n", self.package));
        }
        if imports_list {
            out.push_str("import java.util.List;\n\n");
        }
        out.push_str(&body);
        out
    }

    fn file_path(&self, tree: &TypeTree) -> PathBuf {
        let mut path: PathBuf =
            self.package.split('.').filter(|s| !s.is_empty()).map(java_ident).collect();
        path.push(format!("{}.java", java_ident(&tree.root.name)));
        path
    }
}

fn qualify_if_shadowed(package: &str, simple: &str, scope: &[String]) -> String {
    if scope.iter().any(|name| name == simple) {
        format!("{package}.{simple}")
    } else {
        simple.to_owned()
    }
}

/// `ident`, or `ident_2`, `ident_3`, .. when a sibling field already took it.
fn unique_ident(ident: String, taken: &[String]) -> String {
    if !taken.contains(&ident) {
        return ident;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{ident}_{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Make `raw` a legal Java identifier, leaving legal ones untouched.
pub fn java_ident(raw: &str) -> String {
    if JAVA_IDENT.is_match(raw) && !JAVA_KEYWORDS.contains(&raw) {
        return raw.to_owned();
    }
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_numeric()) {
        out.insert(0, '_');
    }
    if JAVA_KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}
