//! Timestamp value generators.

use crate::source::RandomSource;
use chrono::{DateTime, Duration, Utc};
use fixture_core::{Producer, Value};
use rand::{Rng, RngCore};

/// Options for [`RandomSource::date`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateOptions {
    /// How far before "now" the window starts
    pub time_ago: Duration,
    /// How far after "now" the window ends; may be negative
    pub from_now: Duration,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            time_ago: Duration::days(730),
            from_now: Duration::zero(),
        }
    }
}

impl DateOptions {
    /// The `[now - time_ago, now + from_now]` window, or `None` when either
    /// end falls outside the representable date range.
    pub fn window(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((
            now.checked_sub_signed(self.time_ago)?,
            now.checked_add_signed(self.from_now)?,
        ))
    }
}

/// Shift `now` by `delta`, saturating at the representable date range.
fn saturating_shift(now: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    now.checked_add_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Generate a random timestamp between `start` and `end` (millisecond precision).
///
/// An empty or inverted window yields `start`.
pub fn generate_timestamp_between(
    rng: &mut dyn RngCore,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ms = start.timestamp_millis();
    let end_ms = end.timestamp_millis();

    if start_ms >= end_ms {
        return start;
    }

    let random_ms = rng.gen_range(start_ms..=end_ms);
    DateTime::from_timestamp_millis(random_ms).unwrap_or(start)
}

/// Parse a timestamp string in various formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

impl RandomSource {
    /// Random timestamps in `[now - time_ago, now + from_now]`.
    ///
    /// "now" is captured when this method is called, not per produce call.
    /// Window ends beyond the representable date range are clamped to it.
    pub fn date(&self, opts: DateOptions) -> Producer {
        let now = Utc::now();
        let start = saturating_shift(now, -opts.time_ago);
        let end = saturating_shift(now, opts.from_now);
        let source = self.clone();

        Producer::new(move || {
            Value::DateTime(source.with_rng(|rng| generate_timestamp_between(rng, start, end)))
        })
    }
}
