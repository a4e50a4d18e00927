//! Infer a class hierarchy from one example JSON object.
//!
//! ```
//! use json_classgen::{Inferencer, JsonValue, TypeTree};
//! use json_classgen::codegen::{JavaCodegen, Renderer};
//!
//! let doc: JsonValue = json_classgen::path_de::parse_document(
//!     r#"{"name": "Ann", "address": {"city": "NY"}, "items": [{"id": 1}]}"#,
//! ).unwrap();
//! let tree: TypeTree = Inferencer::new().infer_tree(&doc, "Person").unwrap();
//!
//! assert_eq!(tree.root.field("address").unwrap().ty.to_string(), "Address");
//! assert_eq!(tree.root.field("items").unwrap().ty.to_string(), "List<ItemsElem>");
//!
//! let java = JavaCodegen::default().render(&tree);
//! assert!(java.contains("public static class ItemsElem {"));
//! ```
pub mod cli;
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod path_de;
pub mod value;

pub use error::InferError;
pub use inference::{Inferencer, infer};
pub use ir::{CompositeType, FieldDef, ScalarKind, TypeRef, TypeTree};
pub use value::JsonValue;
