//! Duration parsing for template files.

use chrono::Duration;

/// Error returned for unparseable duration strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid duration '{input}': {reason}")]
pub struct DurationError {
    pub input: String,
    pub reason: String,
}

impl DurationError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a duration string like "2d", "1h", "30m", "300s", "300".
///
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
/// - Days suffix: "2d"
///
/// A leading `-` gives a negative duration.
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(DurationError::new(s, "empty duration string"));
    }

    let (num_str, unit_secs) = if let Some(n) = trimmed.strip_suffix('d') {
        (n, 86_400)
    } else if let Some(n) = trimmed.strip_suffix('h') {
        (n, 3_600)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1)
    } else {
        // No suffix - treat as seconds
        (trimmed, 1)
    };

    let value: i64 = num_str
        .trim()
        .parse()
        .map_err(|_| DurationError::new(s, format!("'{num_str}' is not a whole number")))?;

    value
        .checked_mul(unit_secs)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| DurationError::new(s, "out of range"))
}
