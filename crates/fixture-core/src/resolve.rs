//! Template resolution.
//!
//! Walks a template and returns its concrete form. Producers are invoked and
//! their result resolved again, arrays are resolved element-wise and nested
//! mappings field-wise. Every container in the output is newly allocated.

use crate::error::BuildError;
use crate::template::{Template, TemplateMap};
use crate::value::{Value, ValueMap};

/// Maximum nesting of producers, arrays and objects before resolution gives up.
pub const MAX_DEPTH: usize = 256;

/// Resolve a single template value.
pub fn resolve(template: &Template) -> Result<Value, BuildError> {
    resolve_at(template, 0)
}

/// Resolve every field of one mapping level into a fresh map.
pub fn resolve_fields(fields: &TemplateMap) -> Result<ValueMap, BuildError> {
    resolve_map(fields, 0)
}

fn resolve_at(template: &Template, depth: usize) -> Result<Value, BuildError> {
    if depth > MAX_DEPTH {
        return Err(BuildError::DepthExceeded { limit: MAX_DEPTH });
    }

    match template {
        Template::Literal(value) => Ok(value.clone()),

        Template::Producer(producer) => {
            let next = producer.call().map_err(BuildError::Producer)?;
            resolve_at(&next, depth + 1)
        }

        Template::Array(items) => items
            .iter()
            .map(|item| resolve_at(item, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),

        Template::Object(fields) => resolve_map(fields, depth + 1).map(Value::Object),
    }
}

fn resolve_map(fields: &TemplateMap, depth: usize) -> Result<ValueMap, BuildError> {
    fields
        .iter()
        .map(|(key, template)| resolve_at(template, depth).map(|value| (key.clone(), value)))
        .collect()
}
