// Manual time-offset parsing for the !set / !setall commands.
//
// Accepts `±HH:MM` or `±decimal-hours`. A leading `-` flips the sign of
// both components, so "-2:30" means two hours and thirty minutes ago.

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OffsetParseError {
    #[error("empty time offset")]
    Empty,
    #[error("'{0}' is not a valid hour count")]
    BadHours(String),
    #[error("'{0}' is not a valid minute count")]
    BadMinutes(String),
    #[error("minutes must be between 0 and 59, got {0}")]
    MinutesOutOfRange(i64),
    #[error("'{0}' is not a number of hours")]
    BadNumber(String),
}

/// Parse a user-supplied offset string into a signed duration.
///
/// Decimal form derives minutes from the fractional part:
/// `floor(fraction * 60)`, so "1.5" is ninety minutes.
pub fn parse_offset(input: &str) -> Result<Duration, OffsetParseError> {
    let trimmed = input.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if rest.is_empty() {
        return Err(OffsetParseError::Empty);
    }

    let total_minutes = if let Some((hours, minutes)) = rest.split_once(':') {
        let hours: i64 = hours
            .parse()
            .map_err(|_| OffsetParseError::BadHours(hours.to_string()))?;
        let minutes: i64 = minutes
            .parse()
            .map_err(|_| OffsetParseError::BadMinutes(minutes.to_string()))?;
        if !(0..60).contains(&minutes) {
            return Err(OffsetParseError::MinutesOutOfRange(minutes));
        }
        if hours < 0 {
            // Sign was already stripped; a second one inside is malformed
            return Err(OffsetParseError::BadHours(hours.to_string()));
        }
        hours * 60 + minutes
    } else {
        let hours: f64 = rest
            .parse()
            .map_err(|_| OffsetParseError::BadNumber(rest.to_string()))?;
        if !hours.is_finite() || hours < 0.0 || hours > 100_000.0 {
            return Err(OffsetParseError::BadNumber(rest.to_string()));
        }
        hours.trunc() as i64 * 60 + (hours.fract() * 60.0).floor() as i64
    };

    Ok(Duration::minutes(sign * total_minutes))
}
