//! Helper factories: sequences, random choice and repeated arrays.

use crate::source::RandomSource;
use fixture_core::{Producer, Template, Value};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Consecutive integers starting at 1, saturating at `i64::MAX`.
///
/// The counter lives in the producer, so it keeps counting across produce
/// calls and across every field that shares this producer.
pub fn sequence() -> Producer {
    sequence_with(|i| Value::Int(saturating_i64(i)))
}

/// Convert a counter to `i64`, saturating at `i64::MAX`.
pub fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Feed consecutive integers starting at 1 into `f`.
///
/// Whatever `f` returns is resolved further, so it may be another producer
/// or a nested template.
pub fn sequence_with<F, T>(f: F) -> Producer
where
    F: Fn(u64) -> T + Send + Sync + 'static,
    T: Into<Template>,
{
    let count = Arc::new(AtomicU64::new(0));
    Producer::new(move || f(count.fetch_add(1, Ordering::SeqCst) + 1))
}

/// Array of `count` copies of `value`; each copy is resolved on its own.
pub fn array_of(value: impl Into<Template>, count: usize) -> Producer {
    let value = value.into();
    Producer::new(move || Template::Array(vec![value.clone(); count]))
}

impl RandomSource {
    /// Pick one of `values` uniformly; an empty list yields null.
    pub fn one_of<I, T>(&self, values: I) -> Producer
    where
        I: IntoIterator<Item = T>,
        T: Into<Template>,
    {
        let values: Vec<Template> = values.into_iter().map(Into::into).collect();
        let source = self.clone();

        Producer::new(move || {
            if values.is_empty() {
                return Template::Literal(Value::Null);
            }
            let idx = source.with_rng(|rng| rng.gen_range(0..values.len()));
            values[idx].clone()
        })
    }
}
