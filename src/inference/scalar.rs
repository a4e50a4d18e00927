use indexmap::IndexMap;

use crate::ir::ScalarKind;
use crate::value::JsonValue;

/// What the engine does with a value, decided by one closed match.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Scalar(ScalarKind),
    List(&'a [JsonValue]),
    Composite(&'a IndexMap<String, JsonValue>),
}

pub fn shape_of(value: &JsonValue) -> Shape<'_> {
    match value {
        // nulls never produce a nested composite
        JsonValue::Null => Shape::Scalar(ScalarKind::AnyObject),
        JsonValue::Bool(_) => Shape::Scalar(ScalarKind::Boolean),
        JsonValue::Int(_) => Shape::Scalar(ScalarKind::Integer),
        JsonValue::Long(_) => Shape::Scalar(ScalarKind::Long),
        JsonValue::Double(_) => Shape::Scalar(ScalarKind::Double),
        JsonValue::String(_) => Shape::Scalar(ScalarKind::String),
        JsonValue::Array(items) => Shape::List(items),
        JsonValue::Object(members) => Shape::Composite(members),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_kind(value: &JsonValue) -> Option<ScalarKind> {
        match shape_of(value) {
            Shape::Scalar(kind) => Some(kind),
            Shape::List(_) | Shape::Composite(_) => None,
        }
    }

    #[test]
    fn every_scalar_maps_to_a_scalar_kind() {
        let cases = [
            (JsonValue::Null, ScalarKind::AnyObject),
            (JsonValue::Bool(false), ScalarKind::Boolean),
            (JsonValue::Int(-1), ScalarKind::Integer),
            (JsonValue::Long(1 << 40), ScalarKind::Long),
            (JsonValue::Double(0.25), ScalarKind::Double),
            (JsonValue::String(String::new()), ScalarKind::String),
        ];
        for (value, kind) in cases {
            assert_eq!(scalar_kind(&value), Some(kind), "{value:?}");
        }
    }

    #[test]
    fn containers_are_not_scalars() {
        assert_eq!(scalar_kind(&JsonValue::Array(vec![])), None);
        assert_eq!(scalar_kind(&JsonValue::Object(IndexMap::new())), None);
    }
}
