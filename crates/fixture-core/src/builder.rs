//! Builder factory: validate a root template once, produce instances many times.

use crate::error::BuildError;
use crate::merge::merge_into;
use crate::resolve::resolve_fields;
use crate::template::{Template, TemplateMap};
use crate::value::ValueMap;
use std::sync::Arc;

/// A produced fixture instance.
pub type Instance = ValueMap;

/// Create a builder from a root template.
///
/// Fails with [`BuildError::InvalidTemplate`] unless the template is a plain
/// object. Nothing is resolved until [`Builder::produce`] is called.
pub fn build(template: impl Into<Template>) -> Result<Builder, BuildError> {
    let template = template.into();
    let found = template.shape();
    let fields = template
        .into_fields()
        .map_err(|_| BuildError::InvalidTemplate { found })?;

    tracing::debug!(fields = fields.len(), "built fixture template");

    Ok(Builder {
        template: Arc::new(fields),
    })
}

/// Captured root template plus the produce operation.
///
/// Cloning is cheap and clones share the same template. Producing never
/// mutates the template, so a builder may be used from several threads.
#[derive(Debug, Clone)]
pub struct Builder {
    template: Arc<TemplateMap>,
}

impl Builder {
    /// Produce a fresh instance from the template alone.
    pub fn produce(&self) -> Result<Instance, BuildError> {
        self.produce_opt(None)
    }

    /// Produce a fresh instance with `override_template` deep-merged on top.
    ///
    /// Fails with [`BuildError::InvalidOverride`] unless the override is a
    /// plain object.
    pub fn produce_with(
        &self,
        override_template: impl Into<Template>,
    ) -> Result<Instance, BuildError> {
        self.produce_opt(Some(override_template.into()))
    }

    /// Produce with an optional override.
    pub fn produce_opt(
        &self,
        override_template: Option<Template>,
    ) -> Result<Instance, BuildError> {
        // Reject a bad override before any producer runs
        let override_fields = match override_template {
            Some(template) => {
                let found = template.shape();
                Some(
                    template
                        .into_fields()
                        .map_err(|_| BuildError::InvalidOverride { found })?,
                )
            }
            None => None,
        };

        let mut result = resolve_fields(&self.template)?;

        if let Some(fields) = override_fields {
            let resolved = resolve_fields(&fields)?;
            tracing::trace!(override_fields = resolved.len(), "applying override");
            merge_into(&mut result, resolved);
        }

        Ok(result)
    }

    /// Lazily produce `count` instances.
    pub fn produce_many(&self, count: usize) -> InstanceIterator<'_> {
        InstanceIterator {
            builder: self,
            override_template: None,
            remaining: count,
        }
    }

    /// Lazily produce `count` instances, each with the same override applied.
    pub fn produce_many_with(
        &self,
        count: usize,
        override_template: impl Into<Template>,
    ) -> InstanceIterator<'_> {
        InstanceIterator {
            builder: self,
            override_template: Some(override_template.into()),
            remaining: count,
        }
    }

    /// The captured root template.
    pub fn template(&self) -> &TemplateMap {
        &self.template
    }
}

/// Iterator that lazily produces instances.
pub struct InstanceIterator<'a> {
    builder: &'a Builder,
    override_template: Option<Template>,
    remaining: usize,
}

impl Iterator for InstanceIterator<'_> {
    type Item = Result<Instance, BuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.builder.produce_opt(self.override_template.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InstanceIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::resolve::resolve;
    use crate::template::Producer;
    use crate::value::{Shape, Value};
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn to_json(instance: Instance) -> serde_json::Value {
        serde_json::Value::from(Value::Object(instance))
    }

    fn counter() -> Producer {
        let count = Arc::new(AtomicU64::new(0));
        Producer::new(move || count.fetch_add(1, Ordering::SeqCst) as i64 + 1)
    }

    #[test]
    fn test_builds_data() {
        let builder = build(fields! {
            "test1" => "hello",
            "test2" => 2,
            "test3" => vec!["happy", "halloween"],
            "test4" => Producer::new(|| "functional"),
            "test5" => vec![Template::producer(|| "aa"), Template::producer(|| "bb")],
            "test6" => fields! {
                "test7" => "foo",
                "test8" => vec!["foo", "bar"],
                "test9" => vec![Template::producer(|| "cc"), Template::producer(|| "dd")],
            },
        })
        .unwrap();

        assert_eq!(
            to_json(builder.produce().unwrap()),
            json!({
                "test1": "hello",
                "test2": 2,
                "test3": ["happy", "halloween"],
                "test4": "functional",
                "test5": ["aa", "bb"],
                "test6": {
                    "test7": "foo",
                    "test8": ["foo", "bar"],
                    "test9": ["cc", "dd"]
                }
            })
        );
    }

    #[test]
    fn test_literal_template_round_trips() {
        let template = fields! {
            "name" => "fixed",
            "count" => 3,
            "ratio" => 0.5,
            "flag" => false,
            "nothing" => Value::Null,
            "nested" => fields! { "list" => vec![1, 2, 3] },
        };
        let expected = resolve(&template).unwrap();

        let instance = build(template).unwrap().produce().unwrap();
        assert_eq!(Value::Object(instance), expected);
    }

    #[test]
    fn test_producer_is_transparent() {
        let wrapped = build(fields! { "a" => Producer::new(|| "v") }).unwrap();
        let direct = build(fields! { "a" => "v" }).unwrap();

        assert_eq!(wrapped.produce().unwrap(), direct.produce().unwrap());
    }

    #[test]
    fn test_array_elements_resolved() {
        let builder = build(fields! {
            "a" => vec![Template::producer(|| 1), Template::producer(|| 2)],
        })
        .unwrap();

        assert_eq!(to_json(builder.produce().unwrap()), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_override() {
        let builder = build(fields! {
            "test1" => "hello",
            "test2" => 2,
            "test3" => Producer::new(|| vec!["happy", "halloween"]),
            "test4" => Producer::new(|| "functional"),
            "test5" => "normal",
            "test6" => fields! {
                "test7" => Producer::new(|| "foo"),
                "test8" => Producer::new(|| vec!["foo", "bar"]),
            },
        })
        .unwrap();

        let instance = builder
            .produce_with(fields! {
                "test1" => "something",
                "test2" => 55,
                "test3" => vec![Template::producer(|| "nothing")],
                "test4" => Producer::new(|| "other value"),
                "test6" => fields! { "test7" => "harry potter" },
                "test9" => "over here",
            })
            .unwrap();

        assert_eq!(
            to_json(instance),
            json!({
                "test1": "something",
                "test2": 55,
                "test3": ["nothing"],
                "test4": "other value",
                "test5": "normal",
                "test6": {
                    "test7": "harry potter",
                    "test8": ["foo", "bar"]
                },
                "test9": "over here"
            })
        );
    }

    #[test]
    fn test_override_nested_merge_preserves_siblings() {
        let builder = build(fields! { "a" => fields! { "x" => 1, "y" => 2 } }).unwrap();
        let instance = builder.produce_with(fields! { "a" => fields! { "x" => 9 } }).unwrap();

        assert_eq!(to_json(instance), json!({"a": {"x": 9, "y": 2}}));
    }

    #[test]
    fn test_override_replaces_arrays() {
        let builder = build(fields! { "a" => vec![1, 2, 3] }).unwrap();
        let instance = builder.produce_with(fields! { "a" => vec![9] }).unwrap();

        assert_eq!(to_json(instance), json!({"a": [9]}));
    }

    #[test]
    fn test_override_injects_new_fields() {
        let builder = build(fields! { "a" => 1 }).unwrap();
        let instance = builder.produce_with(fields! { "b" => 2 }).unwrap();

        assert_eq!(to_json(instance), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_override_producer_yielding_object_merges() {
        let builder = build(fields! { "a" => fields! { "x" => 1, "y" => 2 } }).unwrap();
        let instance = builder
            .produce_with(fields! { "a" => Producer::new(|| fields! { "y" => 7 }) })
            .unwrap();

        assert_eq!(to_json(instance), json!({"a": {"x": 1, "y": 7}}));
    }

    #[test]
    fn test_independent_calls() {
        let builder = build(fields! { "id" => counter() }).unwrap();

        let first = builder.produce().unwrap();
        let second = builder.produce().unwrap();

        assert_eq!(first["id"], Value::Int(1));
        assert_eq!(second["id"], Value::Int(2));
    }

    #[test]
    fn test_instances_do_not_alias() {
        let builder = build(fields! { "nested" => fields! { "list" => vec![1] } }).unwrap();

        let mut first = builder.produce().unwrap();
        first.insert("extra".to_string(), Value::Bool(true));
        if let Some(Value::Object(nested)) = first.get_mut("nested") {
            nested.insert("list".to_string(), Value::Null);
        }

        let second = builder.produce().unwrap();
        assert_eq!(to_json(second), json!({"nested": {"list": [1]}}));
    }

    #[test]
    fn test_nested_builders() {
        let inner = build(fields! { "test3" => Producer::new(|| "there") }).unwrap();
        let outer = build(fields! {
            "test1" => "hello",
            "test2" => Producer::try_new(move || inner.produce()),
        })
        .unwrap();

        assert_eq!(
            to_json(outer.produce().unwrap()),
            json!({"test1": "hello", "test2": {"test3": "there"}})
        );
    }

    #[test]
    fn test_literal_object_value_is_accepted() {
        let builder = build(Value::from(json!({"a": {"b": 1}}))).unwrap();
        assert_eq!(to_json(builder.produce().unwrap()), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_invalid_templates() {
        let cases = [
            (Template::from(Value::Null), Shape::Primitive),
            (Template::from(vec![fields! { "hello" => "there" }]), Shape::Array),
            (Template::producer(|| "hi"), Shape::Producer),
            (Template::from(42), Shape::Primitive),
        ];

        for (template, shape) in cases {
            match build(template) {
                Err(BuildError::InvalidTemplate { found }) => assert_eq!(found, shape),
                other => panic!("Expected InvalidTemplate, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_overrides() {
        let builder = build(fields! { "test1" => "hello" }).unwrap();
        let cases = [
            (Template::producer(|| "hi"), Shape::Producer),
            (Template::from(vec![fields! { "hello" => "there" }]), Shape::Array),
            (Template::from(1), Shape::Primitive),
        ];

        for (template, shape) in cases {
            match builder.produce_with(template) {
                Err(BuildError::InvalidOverride { found }) => assert_eq!(found, shape),
                other => panic!("Expected InvalidOverride, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_override_runs_no_producers() {
        let calls = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&calls);
        let builder = build(fields! {
            "id" => Producer::new(move || seen.fetch_add(1, Ordering::SeqCst) as i64),
        })
        .unwrap();

        assert!(builder.produce_with(vec![1, 2]).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_produce_many() {
        let builder = build(fields! { "id" => counter(), "kind" => "user" }).unwrap();

        let instances: Vec<_> = builder
            .produce_many_with(3, fields! { "kind" => "admin" })
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(instances.len(), 3);
        for (i, instance) in instances.iter().enumerate() {
            assert_eq!(instance["id"], Value::Int(i as i64 + 1));
            assert_eq!(instance["kind"], Value::from("admin"));
        }
        assert_eq!(builder.produce_many(5).len(), 5);
    }

    #[test]
    fn test_builder_is_shareable_across_threads() {
        let builder = build(fields! { "id" => counter(), "name" => "shared" }).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let builder = builder.clone();
                std::thread::spawn(move || builder.produce().unwrap())
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .map(|h| h.join().unwrap()["id"].as_i64().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
