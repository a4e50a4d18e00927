// Strongly-typed output of inference. No JsonValue here.
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarKind {
    Integer,
    Long,
    Boolean,
    Double,
    String,
    /// null, empty lists, anything with no usable evidence
    AnyObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeRef {
    Scalar(ScalarKind),
    ListOf(Box<TypeRef>),
    /// Refers to a `CompositeType` in the owning composite's `nested_types`.
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeType {
    pub name: String,
    pub fields: Vec<FieldDef>,      // JSON key order
    pub nested_types: Vec<CompositeType>, // first-discovery order
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeTree {
    pub root: CompositeType,
}

impl TypeRef {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeRef::Scalar(kind)
    }

    pub fn list_of(item: TypeRef) -> Self {
        TypeRef::ListOf(Box::new(item))
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScalarKind::Integer => "Integer",
            ScalarKind::Long => "Long",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Double => "Double",
            ScalarKind::String => "String",
            ScalarKind::AnyObject => "Object",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => write!(f, "{kind}"),
            TypeRef::ListOf(item) => write!(f, "List<{item}>"),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

impl CompositeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new(), nested_types: Vec::new() }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn nested(&self, name: &str) -> Option<&CompositeType> {
        self.nested_types.iter().find(|t| t.name == name)
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a CompositeType>) {
        out.push(self);
        for nested in &self.nested_types {
            nested.collect(out);
        }
    }
}

impl TypeTree {
    pub fn new(root: CompositeType) -> Self {
        Self { root }
    }

    /// Every composite in pre-order: a type always precedes its nested types.
    pub fn composites(&self) -> Vec<&CompositeType> {
        let mut out = Vec::new();
        self.root.collect(&mut out);
        out
    }

    /// Composite names that occur more than once anywhere in the tree,
    /// in first-seen order. Inference never renames; this is for diagnostics.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut dups: Vec<String> = Vec::new();
        for c in self.composites() {
            if seen.contains(&c.name.as_str()) {
                if !dups.contains(&c.name) {
                    dups.push(c.name.clone());
                }
            } else {
                seen.push(&c.name);
            }
        }
        dups
    }
}
