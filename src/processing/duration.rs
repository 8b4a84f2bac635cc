//! Human-readable rendering of second counts ("1 day, 2 hours, 5 seconds").

use std::fmt;

use serde::Serialize;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// A whole number of seconds split into days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DurationParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    /// Decompose `total_seconds`, truncating any fraction of a second.
    ///
    /// Non-positive and NaN inputs decompose to all zeroes.
    pub fn from_seconds(total_seconds: f64) -> Self {
        if total_seconds.is_nan() || total_seconds <= 0.0 {
            return Self::default();
        }
        // `as` saturates, so huge or infinite inputs cannot wrap.
        let mut rest = total_seconds.floor() as u64;
        let days = rest / SECONDS_PER_DAY;
        rest -= days * SECONDS_PER_DAY;
        let hours = rest / SECONDS_PER_HOUR;
        rest -= hours * SECONDS_PER_HOUR;
        let minutes = rest / SECONDS_PER_MINUTE;
        rest -= minutes * SECONDS_PER_MINUTE;
        Self {
            days,
            hours,
            minutes,
            seconds: rest,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for DurationParts {
    /// Non-zero components only, largest unit first, joined with `", "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = [
            (self.days, "day"),
            (self.hours, "hour"),
            (self.minutes, "minute"),
            (self.seconds, "second"),
        ];
        let mut first = true;
        for (n, unit) in units {
            if n == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{n} {unit}{}", if n == 1 { "" } else { "s" })?;
        }
        Ok(())
    }
}

/// Render a second count such as a total or mean trip duration.
///
/// Returns an empty string when `total_seconds <= 0` (or is NaN).
pub fn format_duration(total_seconds: f64) -> String {
    DurationParts::from_seconds(total_seconds).to_string()
}
