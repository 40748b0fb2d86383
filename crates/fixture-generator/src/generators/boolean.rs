//! Boolean value generator.

use crate::source::RandomSource;
use fixture_core::{Producer, Value};
use rand::{Rng, RngCore};
use serde::Deserialize;

/// Options for [`RandomSource::boolean`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BooleanOptions {
    /// Probability of `true`, clamped to `[0, 1]`
    pub median: f64,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self { median: 0.5 }
    }
}

/// Generate `true` with probability `median`.
pub fn generate_weighted_bool(rng: &mut dyn RngCore, median: f64) -> bool {
    let p = if median.is_nan() {
        0.5
    } else {
        median.clamp(0.0, 1.0)
    };
    rng.gen_bool(p)
}

impl RandomSource {
    /// Random booleans.
    pub fn boolean(&self, opts: BooleanOptions) -> Producer {
        let source = self.clone();
        Producer::new(move || {
            Value::Bool(source.with_rng(|rng| generate_weighted_bool(rng, opts.median)))
        })
    }
}
