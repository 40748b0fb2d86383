//! Declarative templates describing the shape of a fixture.
//!
//! A [`Template`] is one of four things: a literal [`Value`], a zero-argument
//! [`Producer`], an array of templates, or a nested mapping of templates. The
//! variant is fixed when the template is constructed, so classification never
//! has to inspect values at runtime.

use crate::error::ProducerError;
use crate::value::{Shape, Value, ValueMap};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Field name to template, one object level.
pub type TemplateMap = BTreeMap<String, Template>;

type ProduceFn = dyn Fn() -> Result<Template, ProducerError> + Send + Sync;

/// Zero-argument value producer.
///
/// Cloning a producer shares the underlying closure, so any state the
/// closure holds (a counter, a seeded RNG) is shared by the clones too.
#[derive(Clone)]
pub struct Producer(Arc<ProduceFn>);

impl Producer {
    /// Wrap an infallible closure.
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Template>,
    {
        Self(Arc::new(move || Ok(f().into())))
    }

    /// Wrap a fallible closure. Its error surfaces from `produce` unmodified.
    pub fn try_new<F, T, E>(f: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: Into<Template>,
        E: Into<ProducerError>,
    {
        Self(Arc::new(move || f().map(Into::into).map_err(Into::into)))
    }

    /// Invoke the producer once.
    pub fn call(&self) -> Result<Template, ProducerError> {
        (self.0)()
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

/// A template value.
#[derive(Debug, Clone)]
pub enum Template {
    /// Concrete value, copied into every instance
    Literal(Value),

    /// Invoked on every resolution; its result is resolved again
    Producer(Producer),

    /// Resolved element-wise
    Array(Vec<Template>),

    /// Resolved field-wise
    Object(TemplateMap),
}

impl Template {
    /// Build an object template from field/template pairs.
    pub fn object<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Template>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array template.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Template>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Shorthand for `Template::Producer(Producer::new(f))`.
    pub fn producer<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Template>,
    {
        Self::Producer(Producer::new(f))
    }

    /// Classify this template.
    ///
    /// A literal object value counts as a mapping; a literal array as an array.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Literal(value) => value.shape(),
            Self::Producer(_) => Shape::Producer,
            Self::Array(_) => Shape::Array,
            Self::Object(_) => Shape::Mapping,
        }
    }

    /// Whether this template is a plain data object.
    pub fn is_plain_object(&self) -> bool {
        self.shape() == Shape::Mapping
    }

    /// Take the field map out of a mapping-shaped template.
    ///
    /// Literal object values are lifted into a map of literal templates.
    /// Returns the template back unchanged when it is not a mapping.
    pub fn into_fields(self) -> Result<TemplateMap, Template> {
        match self {
            Self::Object(map) => Ok(map),
            Self::Literal(Value::Object(map)) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Self::Literal(v)))
                .collect()),
            other => Err(other),
        }
    }
}

impl From<Value> for Template {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Producer> for Template {
    fn from(producer: Producer) -> Self {
        Self::Producer(producer)
    }
}

impl From<TemplateMap> for Template {
    fn from(map: TemplateMap) -> Self {
        Self::Object(map)
    }
}

impl From<ValueMap> for Template {
    fn from(map: ValueMap) -> Self {
        Self::Literal(Value::Object(map))
    }
}

impl<T: Into<Template>> From<Vec<T>> for Template {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}

impl<T: Into<Template>> From<Option<T>> for Template {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Literal(Value::Null), Into::into)
    }
}

impl From<serde_json::Value> for Template {
    fn from(json: serde_json::Value) -> Self {
        Self::Literal(Value::from(json))
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Template {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(bool, i32, i64, u32, f64, &str, String, Uuid, DateTime<Utc>);

/// Build an object [`Template`] from `key => value` pairs.
///
/// Values go through `Template::from`, so literals, producers, vectors and
/// nested `fields!` invocations all work.
///
/// ```rust
/// use fixture_core::{fields, Producer};
///
/// let template = fields! {
///     "name" => "widget",
///     "count" => Producer::new(|| 3),
///     "dimensions" => fields! { "w" => 2, "h" => 4 },
/// };
/// assert!(template.is_plain_object());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Template::Object($crate::TemplateMap::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::TemplateMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Template::from($value));
        )+
        $crate::Template::Object(map)
    }};
}
