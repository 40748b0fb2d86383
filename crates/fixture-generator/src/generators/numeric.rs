//! Numeric value generators.

use crate::source::RandomSource;
use fixture_core::{Producer, Value};
use rand::{Rng, RngCore};
use serde::Deserialize;

/// Options for [`RandomSource::int`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntOptions {
    /// Minimum value (inclusive)
    pub min: i64,
    /// Maximum value (inclusive); raised to `min` when smaller
    pub max: i64,
}

impl Default for IntOptions {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

/// Options for [`RandomSource::float`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloatOptions {
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value; raised to `min` when smaller
    pub max: f64,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Generate a random integer in the given range (inclusive).
///
/// An inverted range collapses to `min`.
pub fn generate_int_range(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Generate a random float in the given range.
///
/// An empty or inverted range, or a non-finite bound, collapses to `min`.
pub fn generate_float_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return min;
    }

    if (max - min).is_finite() {
        rng.gen_range(min..=max)
    } else {
        // Span exceeds f64::MAX; interpolate without forming it
        let t: f64 = rng.gen();
        min * (1.0 - t) + max * t
    }
}

impl FloatOptions {
    /// Check that both bounds are finite numbers.
    pub fn validate(&self) -> Result<(), String> {
        if self.min.is_finite() && self.max.is_finite() {
            Ok(())
        } else {
            Err(format!(
                "min and max must be finite, got min={} max={}",
                self.min, self.max
            ))
        }
    }
}

impl RandomSource {
    /// Random integers between `min` and `max` inclusive.
    pub fn int(&self, opts: IntOptions) -> Producer {
        let source = self.clone();
        Producer::new(move || {
            Value::Int(source.with_rng(|rng| generate_int_range(rng, opts.min, opts.max)))
        })
    }

    /// Random floats between `min` and `max`.
    pub fn float(&self, opts: FloatOptions) -> Producer {
        let source = self.clone();
        Producer::new(move || {
            Value::Float(source.with_rng(|rng| generate_float_range(rng, opts.min, opts.max)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::resolve;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn next(producer: &Producer) -> Value {
        resolve(&producer.clone().into()).unwrap()
    }

    #[test]
    fn test_generate_int_range() {
        let source = RandomSource::seeded(42);
        let producer = source.int(IntOptions { min: 10, max: 20 });

        for _ in 0..100 {
            let v = next(&producer).as_i64().unwrap();
            assert!((10..=20).contains(&v));
        }
    }

    #[test]
    fn test_int_defaults() {
        let producer = RandomSource::seeded(1).int(IntOptions::default());
        for _ in 0..50 {
            let v = next(&producer).as_i64().unwrap();
            assert!((1..=10).contains(&v));
        }
    }

    #[test]
    fn test_int_absolute_and_inverted() {
        let source = RandomSource::seeded(42);
        assert_eq!(
            next(&source.int(IntOptions { min: 5, max: 5 })),
            Value::Int(5)
        );
        assert_eq!(
            next(&source.int(IntOptions { min: 5, max: 4 })),
            Value::Int(5)
        );
    }

    #[test]
    fn test_generate_float_range() {
        let producer = RandomSource::seeded(42).float(FloatOptions { min: 4.0, max: 5.0 });

        for _ in 0..100 {
            let v = next(&producer).as_f64().unwrap();
            assert!((4.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_float_span_wider_than_f64() {
        let producer = RandomSource::seeded(42).float(FloatOptions {
            min: -1.0e308,
            max: 1.0e308,
        });

        for _ in 0..100 {
            let v = next(&producer).as_f64().unwrap();
            assert!(v.is_finite());
            assert!((-1.0e308..=1.0e308).contains(&v));
        }
    }

    #[test]
    fn test_float_non_finite_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_float_range(&mut rng, 1.0, f64::INFINITY), 1.0);
        assert_eq!(generate_float_range(&mut rng, 1.0, f64::NAN), 1.0);
        assert!(generate_float_range(&mut rng, f64::NAN, 1.0).is_nan());

        assert!(FloatOptions::default().validate().is_ok());
        assert!(FloatOptions { min: f64::NAN, max: 1.0 }.validate().is_err());
        assert!(FloatOptions { min: 0.0, max: f64::INFINITY }.validate().is_err());
    }

    #[test]
    fn test_float_absolute_and_inverted() {
        let source = RandomSource::seeded(42);
        assert_eq!(
            next(&source.float(FloatOptions { min: 5.0, max: 5.0 })),
            Value::Float(5.0)
        );
        assert_eq!(
            next(&source.float(FloatOptions { min: 5.0, max: 4.0 })),
            Value::Float(5.0)
        );
    }

    #[test]
    fn test_generates_different_numbers() {
        let producer = RandomSource::thread().int(IntOptions { min: 0, max: 1_000_000_000 });
        assert_ne!(next(&producer), next(&producer));
    }

    #[test]
    fn test_deterministic_generation() {
        let a = RandomSource::seeded(42).float(FloatOptions::default());
        let b = RandomSource::seeded(42).float(FloatOptions::default());

        assert_eq!(next(&a), next(&b));
    }
}
