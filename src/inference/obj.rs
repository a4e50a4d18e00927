use indexmap::IndexMap;
use tracing::debug;

use super::{Inferencer, trail::Trail};
use crate::error::Result;
use crate::ir::CompositeType;
use crate::value::JsonValue;

/// Build a composite from an object's members, in key order.
///
/// Composites discovered below this one land in *its* `nested_types`; the
/// caller only registers the returned composite.
pub(crate) fn derive_composite(
    inferencer: &Inferencer,
    trail: &Trail<'_>,
    name: &str,
    members: &IndexMap<String, JsonValue>,
) -> Result<CompositeType> {
    inferencer.enter(trail)?;
    let mut composite = CompositeType::new(name);
    for (key, value) in members {
        let Some(inferred) = inferencer.infer_field(trail, key, value)? else {
            continue;
        };
        composite.fields.push(inferred.field);
        composite.nested_types.extend(inferred.nested);
    }
    debug!(
        path = %trail,
        name,
        fields = composite.fields.len(),
        nested = composite.nested_types.len(),
        "derived composite"
    );
    Ok(composite)
}
