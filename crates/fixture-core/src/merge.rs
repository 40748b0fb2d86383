//! Deep merge of resolved values.
//!
//! Merge semantics:
//! - Objects on both sides: deep-merge by key (recursive)
//! - Arrays: REPLACE (source wins entirely)
//! - Scalars and mixed pairings: source wins
//! - Keys only in the target are kept, keys only in the source are added

use crate::value::{Value, ValueMap};

/// Merge `source` into `target` in place.
///
/// `source` is consumed, so the merged target never shares structure with
/// anything the caller still holds.
pub fn merge_into(target: &mut ValueMap, source: ValueMap) {
    for (key, incoming) in source {
        match incoming {
            Value::Object(nested) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => merge_into(existing, nested),
                _ => {
                    target.insert(key, Value::Object(nested));
                }
            },
            other => {
                target.insert(key, other);
            }
        }
    }
}

/// Merge `source` into `target` and hand the merged map back.
pub fn deep_merge(mut target: ValueMap, source: ValueMap) -> ValueMap {
    tracing::trace!(
        target_keys = target.len(),
        source_keys = source.len(),
        "merging override"
    );
    merge_into(&mut target, source);
    target
}
