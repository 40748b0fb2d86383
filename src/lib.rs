//! fake-data-builder
//!
//! Declarative fake data for tests and fixtures: describe an entity once as a
//! template, then produce as many independent instances as needed, optionally
//! deep-merging an override into each one.
//!
//! # Crates
//!
//! - `fixture_core` - templates, producers, the resolver, deep merge and the
//!   [`Builder`] factory
//! - `fixture_generator` - random value generators, helpers and YAML
//!   template files
//! - this crate - JSON output and the `fake-data-builder` CLI
//!
//! # CLI Usage
//!
//! ```bash
//! # Ten users as JSON Lines
//! fake-data-builder generate --template users.yaml --count 10
//!
//! # Same data every run, with a named override applied
//! fake-data-builder generate --template users.yaml --override admin --seed 42
//!
//! # Validate a template file and all of its overrides
//! fake-data-builder check --template users.yaml
//! ```

pub mod args;
pub mod emit;

pub use args::{CheckArgs, GenerateArgs};
pub use emit::{EmitError, EmitMetrics, InstanceEmitter, OutputFormat};

pub use fixture_core::{
    build, deep_merge, fields, BuildError, Builder, Instance, Producer, Template, Value,
};
pub use fixture_generator::{RandomSource, SchemaError, TemplateFile};
