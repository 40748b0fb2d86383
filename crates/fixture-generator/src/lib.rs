//! Random value generators and YAML template files.
//!
//! Generators are factories that return [`fixture_core::Producer`]s, so they
//! can be dropped into any template and are re-run for every instance:
//!
//! ```
//! use fixture_core::{build, fields};
//! use fixture_generator::{rand_int, sequence, IntOptions};
//!
//! let users = build(fields! {
//!     "id" => sequence(),
//!     "age" => rand_int(IntOptions { min: 18, max: 80 }),
//! })
//! .unwrap();
//!
//! let user = users.produce().unwrap();
//! assert_eq!(user["id"].as_i64(), Some(1));
//! ```
//!
//! For reproducible output create the generators from a seeded
//! [`RandomSource`] instead of the free functions.
//!
//! Template files describe the same thing in YAML; see [`schema`].

pub mod data;
pub mod duration;
pub mod generators;
pub mod schema;
pub mod source;

pub use duration::{parse_duration, DurationError};
pub use generators::{
    array_of, one_of, pattern, rand_boolean, rand_date, rand_float, rand_int, rand_paragraph,
    rand_string, rand_uuid, rand_word, sequence, sequence_with, BooleanOptions, DateOptions,
    FloatOptions, IntOptions, ParagraphOptions, StringOptions, WordOptions,
};
pub use schema::{GeneratorConfig, SchemaError, TemplateFile};
pub use source::RandomSource;
