//! Individual value generators.
//!
//! Every generator is a factory returning a [`Producer`]. The factories are
//! methods on [`RandomSource`]; the free functions here draw from the
//! thread-local RNG, so each produce call sees fresh values.

pub mod boolean;
pub mod helpers;
pub mod numeric;
pub mod pattern;
pub mod text;
pub mod timestamp;
pub mod uuid;

use crate::source::RandomSource;
use fixture_core::{Producer, Template};

pub use boolean::BooleanOptions;
pub use helpers::{array_of, sequence, sequence_with};
pub use numeric::{FloatOptions, IntOptions};
pub use text::{ParagraphOptions, StringOptions, WordOptions};
pub use timestamp::DateOptions;

/// Random booleans from the thread RNG.
pub fn rand_boolean(opts: BooleanOptions) -> Producer {
    RandomSource::thread().boolean(opts)
}

/// Random timestamps from the thread RNG.
pub fn rand_date(opts: DateOptions) -> Producer {
    RandomSource::thread().date(opts)
}

/// Random floats from the thread RNG.
pub fn rand_float(opts: FloatOptions) -> Producer {
    RandomSource::thread().float(opts)
}

/// Random integers from the thread RNG.
pub fn rand_int(opts: IntOptions) -> Producer {
    RandomSource::thread().int(opts)
}

/// Random paragraphs from the thread RNG.
pub fn rand_paragraph(opts: ParagraphOptions) -> Producer {
    RandomSource::thread().paragraph(opts)
}

/// Random strings from the thread RNG.
pub fn rand_string(opts: StringOptions) -> Producer {
    RandomSource::thread().string(opts)
}

/// Random UUIDs from the thread RNG.
pub fn rand_uuid() -> Producer {
    RandomSource::thread().uuid()
}

/// Random words from the thread RNG.
pub fn rand_word(opts: WordOptions) -> Producer {
    RandomSource::thread().word(opts)
}

/// Pattern strings from the thread RNG.
pub fn pattern(pattern: impl Into<String>) -> Producer {
    RandomSource::thread().pattern(pattern)
}

/// Uniform choice from the thread RNG.
pub fn one_of<I, T>(values: I) -> Producer
where
    I: IntoIterator<Item = T>,
    T: Into<Template>,
{
    RandomSource::thread().one_of(values)
}
