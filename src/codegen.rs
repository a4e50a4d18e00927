//! Source renderers for an inferred `TypeTree`.
//!
//! A renderer is handed a finished tree and never re-inspects JSON. Each one
//! owns its host-language naming rules; the tree keeps the raw JSON keys and
//! derived names so every target can sanitize them its own way.
pub mod java;
pub mod rust;

use std::path::PathBuf;

use crate::ir::TypeTree;

pub use java::JavaCodegen;
pub use rust::RustCodegen;

pub trait Renderer {
    /// Full source text for the tree, one top-level type per root.
    fn render(&self, tree: &TypeTree) -> String;

    /// Where the source belongs, relative to an output directory.
    fn file_path(&self, tree: &TypeTree) -> PathBuf;
}

/// JSON dump of the tree itself (the `schema` view).
pub fn schema_json(tree: &TypeTree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tree)
}

/// `<Root>.json`, with anything but letters, digits, `_` and `-` replaced so
/// the root name can never leave the output directory.
pub fn schema_file_path(tree: &TypeTree) -> PathBuf {
    let stem: String = tree
        .root
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    PathBuf::from(format!("{stem}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{CompositeType, FieldDef, ScalarKind, TypeRef};

    #[test]
    fn schema_json_is_externally_tagged() {
        let mut root = CompositeType::new("Root");
        root.fields.push(FieldDef {
            name: "xs".into(),
            ty: TypeRef::list_of(TypeRef::Scalar(ScalarKind::Long)),
        });
        let src = schema_json(&TypeTree::new(root)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&src).unwrap();
        assert_eq!(v["root"]["name"], "Root");
        assert_eq!(v["root"]["fields"][0]["ty"], serde_json::json!({"ListOf": {"Scalar": "Long"}}));
        assert_eq!(v["root"]["nested_types"], serde_json::json!([]));
    }

    #[test]
    fn schema_file_path_stays_in_place() {
        let path = |name: &str| schema_file_path(&TypeTree::new(CompositeType::new(name)));
        assert_eq!(path("Person"), PathBuf::from("Person.json"));
        assert_eq!(path("order-line_v2"), PathBuf::from("order-line_v2.json"));
        assert_eq!(path("../x"), PathBuf::from("___x.json"));
        assert_eq!(path("/etc/passwd"), PathBuf::from("_etc_passwd.json"));
        assert_eq!(path(".."), PathBuf::from("__.json"));
    }
}
