//! Template resolution and deep-merge engine for fake-data-builder.
//!
//! A template describes the shape of a fixture: literal values, zero-argument
//! producers, arrays, and nested templates. [`build`] validates a root
//! template and returns a [`Builder`]; every call to [`Builder::produce`]
//! resolves the template into a fresh [`Instance`], optionally deep-merging
//! an override template on top.
//!
//! # Architecture
//!
//! ```text
//! Template ──build()──▶ Builder
//!                          │ produce(override?)
//!                          ▼
//!              resolve(template)   resolve(override)
//!                          │               │
//!                          └──merge_into───┘
//!                                  │
//!                                  ▼
//!                              Instance
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::{build, fields, Producer, Value};
//!
//! let builder = build(fields! {
//!     "name" => "widget",
//!     "size" => fields! { "w" => 2, "h" => Producer::new(|| 4) },
//! })
//! .unwrap();
//!
//! let instance = builder.produce_with(fields! { "size" => fields! { "w" => 3 } }).unwrap();
//! assert_eq!(instance["name"], Value::from("widget"));
//! assert_eq!(instance["size"].get("w"), Some(&Value::Int(3)));
//! assert_eq!(instance["size"].get("h"), Some(&Value::Int(4)));
//! ```

pub mod builder;
pub mod error;
pub mod merge;
pub mod resolve;
pub mod template;
pub mod value;

// Re-exports for convenience
pub use builder::{build, Builder, Instance, InstanceIterator};
pub use error::{BuildError, ProducerError};
pub use merge::{deep_merge, merge_into};
pub use resolve::{resolve, resolve_fields, MAX_DEPTH};
pub use template::{Producer, Template, TemplateMap};
pub use value::{Shape, Value, ValueMap};
