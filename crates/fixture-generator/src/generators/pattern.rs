//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - call counter of the producer, starting at 1
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number, N at most [`MAX_RAND_DIGITS`]

use crate::generators::uuid::generate_uuid_v4;
use crate::source::RandomSource;
use fixture_core::{Producer, Value};
use rand::{Rng, RngCore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Largest digit count accepted by `{rand:N}`.
pub const MAX_RAND_DIGITS: usize = 64;

/// Digit count of a `{rand:N}` body, when it is a valid placeholder.
fn rand_digits(body: &str) -> Option<usize> {
    body.parse::<usize>()
        .ok()
        .filter(|digits| *digits <= MAX_RAND_DIGITS)
}

/// Check every `{rand:N}` placeholder in `pattern`.
///
/// Bodies that are not numbers are left alone when rendering; numeric bodies
/// above [`MAX_RAND_DIGITS`] are rejected.
pub fn validate_pattern(pattern: &str) -> Result<(), String> {
    let mut rest = pattern;
    while let Some(offset) = rest.find("{rand:") {
        let after = &rest[offset + 6..];
        let Some(end) = after.find('}') else {
            break;
        };
        let body = &after[..end];
        if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) && rand_digits(body).is_none()
        {
            return Err(format!(
                "{{rand:{body}}} exceeds the limit of {MAX_RAND_DIGITS} digits"
            ));
        }
        rest = &rest[offset + 1..];
    }
    Ok(())
}

/// Render a pattern, substituting every placeholder.
pub fn render_pattern(pattern: &str, rng: &mut dyn RngCore, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &generate_uuid_v4(rng).to_string(), 1);
    }

    // Replace {rand:N} patterns
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;

        match rand_digits(&result[start + 6..end]) {
            Some(digits) => {
                let random_num = generate_random_digits(rng, digits);
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
                search_from = start + random_num.len();
            }
            // Not a placeholder, leave it as written; a nested one may follow
            None => search_from = start + 1,
        }
    }

    result
}

/// Generate a random number with exactly N digits.
fn generate_random_digits(rng: &mut dyn RngCore, digits: usize) -> String {
    (0..digits)
        .map(|i| {
            // First digit should be 1-9 to avoid leading zeros
            let low = if i == 0 { 1 } else { 0 };
            char::from(b'0' + rng.gen_range(low..10u8))
        })
        .collect()
}

impl RandomSource {
    /// Strings rendered from `pattern`; `{index}` counts calls from 1.
    pub fn pattern(&self, pattern: impl Into<String>) -> Producer {
        let pattern = pattern.into();
        let count = Arc::new(AtomicU64::new(0));
        let source = self.clone();

        Producer::new(move || {
            let index = count.fetch_add(1, Ordering::SeqCst) + 1;
            Value::String(source.with_rng(|rng| render_pattern(&pattern, rng, index)))
        })
    }
}
