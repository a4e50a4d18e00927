//! Single-sample type inference.
//!
//! Walk one JSON object and derive a tree of named composite types, giving
//! every field a concrete type reference.
//!
//! Policy:
//! - Scalars map 1:1 to a `ScalarKind`; `null` is `AnyObject`.
//! - An object field becomes a nested composite named after its key
//!   (`address` → `Address`).
//! - A list is typed from its first element only; an object element becomes
//!   a composite named `<Key>Elem`; an empty list is `List<AnyObject>`.
//! - Blank keys are dropped silently. Blank follows `naming::is_blank`:
//!   only code points up to U+0020 are trimmed.
//! - Names are never deduplicated. Two `address` fields at different depths
//!   both yield `Address`.
//!
//! Field inference and list inference recurse into each other; every call
//! returns the composite it derived and the caller registers it.
pub mod arr;
pub mod naming;
pub mod obj;
pub mod scalar;
mod trail;

use tracing::{debug, trace};

use crate::error::{InferError, Result};
use crate::ir::{CompositeType, FieldDef, TypeRef, TypeTree};
use crate::value::JsonValue;
use scalar::{Shape, shape_of};
use trail::Trail;

// ------------------------------- Policy ---------------------------------- //

/// Containers deeper than this fail with `DepthExceeded` instead of blowing
/// the stack. Matches serde_json's own parse recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

// ------------------------------ Front API -------------------------------- //

#[derive(Debug, Clone)]
pub struct Inferencer {
    max_depth: usize,
}

impl Default for Inferencer {
    fn default() -> Self {
        Self::new()
    }
}

/// What one field contributes to its enclosing composite.
pub(crate) struct Inferred {
    pub field: FieldDef,
    pub nested: Option<CompositeType>,
}

impl Inferencer {
    pub fn new() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Infer the root composite. `root_name` is used verbatim.
    pub fn infer(&self, root: &JsonValue, root_name: &str) -> Result<CompositeType> {
        if naming::is_blank(root_name) {
            return Err(InferError::invalid("root type name is blank"));
        }
        let Some(members) = root.as_object() else {
            return Err(InferError::invalid(format!(
                "top-level value must be an object, found {}",
                root.kind_name()
            )));
        };
        debug!(root_name, max_depth = self.max_depth, "inferring");
        obj::derive_composite(self, &Trail::root(), root_name, members)
    }

    pub fn infer_tree(&self, root: &JsonValue, root_name: &str) -> Result<TypeTree> {
        self.infer(root, root_name).map(TypeTree::new)
    }

    /// Type one member of an object. `None` means the key was blank.
    pub(crate) fn infer_field(
        &self,
        parent: &Trail<'_>,
        key: &str,
        value: &JsonValue,
    ) -> Result<Option<Inferred>> {
        if naming::is_blank(key) {
            trace!(path = %parent, "skipping blank key");
            return Ok(None);
        }
        let here = parent.key(key);
        let (ty, nested) = match shape_of(value) {
            Shape::Scalar(kind) => (TypeRef::scalar(kind), None),
            Shape::List(items) => arr::infer_list(self, &here, key, items)?,
            Shape::Composite(members) => {
                let name = naming::composite_name(key);
                let composite = obj::derive_composite(self, &here, &name, members)?;
                (TypeRef::Named(name), Some(composite))
            }
        };
        trace!(path = %here, ty = %ty, "field");
        Ok(Some(Inferred { field: FieldDef { name: key.to_owned(), ty }, nested }))
    }

    fn enter(&self, trail: &Trail<'_>) -> Result<()> {
        if trail.depth() > self.max_depth {
            return Err(InferError::DepthExceeded { limit: self.max_depth, path: trail.to_string() });
        }
        Ok(())
    }
}

/// Infer with default limits.
pub fn infer(root: &JsonValue, root_name: &str) -> Result<CompositeType> {
    Inferencer::new().infer(root, root_name)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ScalarKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn value(v: serde_json::Value) -> JsonValue {
        serde_json::from_value(v).unwrap()
    }

    fn infer_json(v: serde_json::Value, name: &str) -> CompositeType {
        infer(&value(v), name).unwrap()
    }

    fn field_ty(c: &CompositeType, name: &str) -> String {
        c.field(name).unwrap().ty.to_string()
    }

    fn field_names(c: &CompositeType) -> Vec<&str> {
        c.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn nested_names(c: &CompositeType) -> Vec<&str> {
        c.nested_types.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn person_end_to_end() {
        let person = infer_json(
            json!({
                "name": "Ann",
                "age": 30,
                "tags": ["x", "y"],
                "address": {"city": "NY"},
                "items": [{"id": 1}]
            }),
            "Person",
        );

        let expected = CompositeType {
            name: "Person".into(),
            fields: vec![
                FieldDef { name: "name".into(), ty: TypeRef::Scalar(ScalarKind::String) },
                FieldDef { name: "age".into(), ty: TypeRef::Scalar(ScalarKind::Integer) },
                FieldDef {
                    name: "tags".into(),
                    ty: TypeRef::list_of(TypeRef::Scalar(ScalarKind::String)),
                },
                FieldDef { name: "address".into(), ty: TypeRef::named("Address") },
                FieldDef { name: "items".into(), ty: TypeRef::list_of(TypeRef::named("ItemsElem")) },
            ],
            nested_types: vec![
                CompositeType {
                    fields: vec![FieldDef {
                        name: "city".into(),
                        ty: TypeRef::Scalar(ScalarKind::String),
                    }],
                    ..CompositeType::new("Address")
                },
                CompositeType {
                    fields: vec![FieldDef {
                        name: "id".into(),
                        ty: TypeRef::Scalar(ScalarKind::Integer),
                    }],
                    ..CompositeType::new("ItemsElem")
                },
            ],
        };
        assert_eq!(person, expected);
    }

    #[test]
    fn scalars_map_to_scalar_kinds() {
        let c = infer_json(
            json!({
                "i": 7,
                "neg": -7,
                "l": 3_000_000_000_i64,
                "b": true,
                "d": 1.25,
                "whole_double": 2.0,
                "s": "",
                "n": null
            }),
            "Scalars",
        );
        assert_eq!(field_ty(&c, "i"), "Integer");
        assert_eq!(field_ty(&c, "neg"), "Integer");
        assert_eq!(field_ty(&c, "l"), "Long");
        assert_eq!(field_ty(&c, "b"), "Boolean");
        assert_eq!(field_ty(&c, "d"), "Double");
        assert_eq!(field_ty(&c, "whole_double"), "Double");
        assert_eq!(field_ty(&c, "s"), "String");
        assert_eq!(c.field("n").unwrap().ty, TypeRef::Scalar(ScalarKind::AnyObject));
        assert!(c.nested_types.is_empty());
    }

    #[test]
    fn field_order_follows_keys_without_blank_ones() {
        let c = infer_json(
            json!({"zeta": 1, "": 2, "alpha": 3, "   ": {"x": 1}, "mid": [4], "\t": []}),
            "Ordered",
        );
        assert_eq!(field_names(&c), ["zeta", "alpha", "mid"]);
        // the blank-keyed object never became a composite
        assert!(c.nested_types.is_empty());
    }

    #[test]
    fn only_ascii_controls_and_spaces_count_as_blank() {
        let c = infer_json(json!({"\u{a0}": 1, "\u{1}": 2, "ok": 3, "\u{2003}": {"x": 1}}), "Root");
        assert_eq!(field_names(&c), ["\u{a0}", "ok", "\u{2003}"]);
        assert_eq!(nested_names(&c), ["\u{2003}"]);

        let c = infer_json(json!({"a": 1}), "\u{a0}");
        assert_eq!(c.name, "\u{a0}");
        let err = infer(&value(json!({"a": 1})), "\u{1} ").unwrap_err();
        assert_eq!(err, InferError::invalid("root type name is blank"));
    }

    #[test]
    fn empty_list_is_list_of_any() {
        let c = infer_json(json!({"xs": [], "deep": [[]]}), "Root");
        assert_eq!(field_ty(&c, "xs"), "List<Object>");
        assert_eq!(field_ty(&c, "deep"), "List<List<Object>>");
    }

    #[test]
    fn list_led_by_null_is_list_of_any() {
        let c = infer_json(json!({"xs": [null, {"a": 1}]}), "Root");
        assert_eq!(field_ty(&c, "xs"), "List<Object>");
        assert!(c.nested_types.is_empty());
    }

    /// Known blind spot: only the first element is consulted.
    #[test]
    fn list_element_comes_from_first_element_only() {
        let c = infer_json(json!({"mixed": [{"a": 1}, 2, "three"], "nums": [1, 2.5, "x"]}), "Root");
        assert_eq!(field_ty(&c, "mixed"), "List<MixedElem>");
        assert_eq!(field_ty(&c, "nums"), "List<Integer>");

        let elem = c.nested("MixedElem").unwrap();
        assert_eq!(field_names(elem), ["a"]);

        // divergent object shapes: later members are ignored too
        let c = infer_json(json!({"rows": [{"a": 1}, {"a": "x", "b": true}]}), "Root");
        let rows = c.nested("RowsElem").unwrap();
        assert_eq!(field_names(rows), ["a"]);
        assert_eq!(field_ty(rows, "a"), "Integer");
    }

    #[test]
    fn nested_lists_of_lists() {
        let c = infer_json(json!({"grid": [[1, 2], [3, 4]], "cube": [[["s"]]]}), "Root");
        assert_eq!(field_ty(&c, "grid"), "List<List<Integer>>");
        assert_eq!(field_ty(&c, "cube"), "List<List<List<String>>>");
    }

    #[test]
    fn list_of_lists_of_objects_names_element_after_key() {
        let c = infer_json(json!({"matrix": [[{"v": 1.5}]]}), "Root");
        assert_eq!(field_ty(&c, "matrix"), "List<List<MatrixElem>>");
        assert_eq!(nested_names(&c), ["MatrixElem"]);
        assert_eq!(field_ty(c.nested("MatrixElem").unwrap(), "v"), "Double");
    }

    #[test]
    fn nested_types_belong_to_their_owner() {
        let c = infer_json(
            json!({
                "owner": {
                    "address": {"geo": {"lat": 1.0}},
                    "pets": [{"toys": [{"name": "ball"}]}]
                },
                "count": 1
            }),
            "Root",
        );
        assert_eq!(nested_names(&c), ["Owner"]);
        let owner = c.nested("Owner").unwrap();
        assert_eq!(nested_names(owner), ["Address", "PetsElem"]);
        assert_eq!(nested_names(owner.nested("Address").unwrap()), ["Geo"]);
        let pets = owner.nested("PetsElem").unwrap();
        assert_eq!(field_ty(pets, "toys"), "List<ToysElem>");
        assert_eq!(nested_names(pets), ["ToysElem"]);
    }

    #[test]
    fn nested_type_order_is_discovery_order() {
        let c = infer_json(
            json!({"b": {"x": 1}, "s": 1, "a": [{"y": 2}], "c": {"z": 3}}),
            "Root",
        );
        assert_eq!(nested_names(&c), ["B", "AElem", "C"]);
    }

    #[test]
    fn empty_object_is_still_a_composite() {
        let c = infer_json(json!({"meta": {}}), "Root");
        assert_eq!(field_ty(&c, "meta"), "Meta");
        assert!(c.nested("Meta").unwrap().fields.is_empty());
    }

    #[test]
    fn colliding_names_are_kept() {
        let c = infer_json(
            json!({"address": {"city": "a"}, "owner": {"address": {"zip": "b"}}}),
            "Root",
        );
        let tree = TypeTree::new(c);
        assert_eq!(tree.duplicate_names(), ["Address"]);
        let inner = tree.root.nested("Owner").unwrap().nested("Address").unwrap();
        assert_eq!(field_names(inner), ["zip"]);
    }

    #[test]
    fn root_name_is_verbatim() {
        let c = infer_json(json!({"a": 1}), "person_record");
        assert_eq!(c.name, "person_record");
    }

    #[test]
    fn root_must_be_an_object() {
        for v in [json!([1]), json!("x"), json!(null), json!(3)] {
            let err = infer(&value(v), "Root").unwrap_err();
            assert!(matches!(err, InferError::InvalidInput { .. }), "{err}");
        }
        let err = infer(&value(json!([{"a": 1}])), "Root").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: top-level value must be an object, found array");
    }

    #[test]
    fn blank_root_name_is_rejected() {
        for name in ["", "  ", "\n"] {
            let err = infer(&value(json!({"a": 1})), name).unwrap_err();
            assert_eq!(err, InferError::invalid("root type name is blank"));
        }
    }

    #[test]
    fn depth_limit_fails_cleanly() {
        let v = value(json!({"a": {"b": [[{"c": 1}]]}}));
        // root=0, a=1, b=2, b[0]=3, b[0][0]=4
        assert!(Inferencer::new().with_max_depth(4).infer(&v, "Root").is_ok());

        let err = Inferencer::new().with_max_depth(3).infer(&v, "Root").unwrap_err();
        assert_eq!(err, InferError::DepthExceeded { limit: 3, path: "$.a.b[0][0]".into() });

        let err = Inferencer::new().with_max_depth(0).infer(&v, "Root").unwrap_err();
        assert_eq!(err, InferError::DepthExceeded { limit: 0, path: "$.a".into() });
    }

    #[test]
    fn scalars_only_fit_depth_zero() {
        let v = value(json!({"a": 1, "b": null}));
        assert!(Inferencer::new().with_max_depth(0).infer(&v, "Root").is_ok());
    }

    #[test]
    fn pathological_depth_is_an_error_not_a_crash() {
        let mut v = JsonValue::Int(1);
        for _ in 0..1_000 {
            let mut m = indexmap::IndexMap::new();
            m.insert("n".to_string(), v);
            v = JsonValue::Object(m);
        }
        let err = infer(&v, "Root").unwrap_err();
        assert!(matches!(err, InferError::DepthExceeded { limit: DEFAULT_MAX_DEPTH, .. }));
    }

    #[test]
    fn inference_is_deterministic() {
        let v = value(json!({
            "k": [{"a": [[{"b": null}]]}],
            "o": {"p": {"q": [1]}},
            "z": 1.5
        }));
        let first = Inferencer::new().infer_tree(&v, "Root").unwrap();
        for _ in 0..5 {
            assert_eq!(Inferencer::new().infer_tree(&v, "Root").unwrap(), first);
        }
    }

    #[test]
    fn odd_keys_show_up_in_depth_errors() {
        let v = value(json!({"a b": {"c": 1}}));
        let err = Inferencer::new().with_max_depth(0).infer(&v, "Root").unwrap_err();
        assert_eq!(err.to_string(), r#"nesting depth exceeds the limit of 0 at $["a b"]"#);
    }
}
