use tracing::trace;

use super::scalar::{Shape, shape_of};
use super::{Inferencer, naming, obj, trail::Trail};
use crate::error::Result;
use crate::ir::{CompositeType, ScalarKind, TypeRef};
use crate::value::JsonValue;

/// Type a list from its first element only.
///
/// Later elements are never consulted, so `[{"a": 1}, 2]` types as a list of
/// the composite derived from `{"a": 1}`. Nested lists reuse `key` for naming
/// all the way down.
pub(crate) fn infer_list(
    inferencer: &Inferencer,
    trail: &Trail<'_>,
    key: &str,
    items: &[JsonValue],
) -> Result<(TypeRef, Option<CompositeType>)> {
    inferencer.enter(trail)?;
    let Some(first) = items.first() else {
        return Ok((TypeRef::list_of(TypeRef::Scalar(ScalarKind::AnyObject)), None));
    };
    if items.len() > 1 {
        trace!(path = %trail, skipped = items.len() - 1, "element type taken from first element");
    }

    let elem = trail.index(0);
    let (item, nested) = match shape_of(first) {
        Shape::Scalar(kind) => (TypeRef::Scalar(kind), None),
        Shape::List(inner) => infer_list(inferencer, &elem, key, inner)?,
        Shape::Composite(members) => {
            let name = naming::element_name(key);
            let composite = obj::derive_composite(inferencer, &elem, &name, members)?;
            (TypeRef::Named(name), Some(composite))
        }
    };
    Ok((TypeRef::list_of(item), nested))
}
