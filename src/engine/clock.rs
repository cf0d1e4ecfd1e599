//! Clock-time model: minutes-since-midnight with 12-hour display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day in minutes since midnight, `[0, 1440)`.
///
/// Conversions are lossless at minute granularity; seconds are discarded
/// on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight (00:00).
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from minutes since midnight, wrapping at a full day.
    pub fn from_minutes(minutes: u16) -> Self {
        Self(minutes % MINUTES_PER_DAY)
    }

    /// Build from an hour/minute pair.
    pub fn from_hm(hour: u16, minute: u16) -> Self {
        Self::from_minutes(hour * 60 + minute)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Parse a clock-time string.
    ///
    /// Accepts `hh:mm AM/PM` or 24-hour `hh:mm[:ss]` (seconds stripped).
    /// Empty or unparsable input yields midnight; callers that need to
    /// distinguish "no time" from 00:00 must check for emptiness first.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::MIDNIGHT;
        }

        let (time_part, period) = match raw.split_once(' ') {
            Some((t, p)) => (t, Some(p.trim())),
            None => (raw, None),
        };

        let mut fields = time_part.split(':');
        let mut hours: u16 = fields.next().and_then(|h| h.trim().parse().ok()).unwrap_or(0);
        let minutes: u16 = fields.next().and_then(|m| m.trim().parse().ok()).unwrap_or(0);

        match period {
            Some(p) if p.eq_ignore_ascii_case("PM") => {
                if hours < 12 {
                    hours += 12;
                }
            }
            Some(p) if p.eq_ignore_ascii_case("AM") => {
                if hours == 12 {
                    hours = 0;
                }
            }
            _ => {}
        }

        Self::from_hm(hours, minutes)
    }

    /// Render as a zero-padded 12-hour string, e.g. `09:30 AM`.
    ///
    /// Midnight is `12:00 AM`, noon is `12:00 PM`.
    pub fn format_12h(self) -> String {
        let hours24 = self.0 / 60;
        let mins = self.0 % 60;
        let period = if hours24 >= 12 { "PM" } else { "AM" };
        let hours12 = match hours24 % 12 {
            0 => 12,
            h => h,
        };
        format!("{hours12:02}:{mins:02} {period}")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_12h())
    }
}

/// Elapsed whole minutes from entry to exit.
///
/// An exit earlier than the entry is taken to cross midnight; there is no
/// separate night-shift flag anywhere in the model.
pub fn elapsed_minutes(entry: ClockTime, exit: ClockTime) -> u16 {
    if exit >= entry {
        exit.0 - entry.0
    } else {
        (MINUTES_PER_DAY - entry.0) + exit.0
    }
}

/// Elapsed hours from entry to exit, rounded to 2 decimal places.
pub fn elapsed_hours(entry: ClockTime, exit: ClockTime) -> f64 {
    round2(f64::from(elapsed_minutes(entry, exit)) / 60.0)
}

/// Round to 2 decimal places (hour totals at the point of computation).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (aggregated/displayed hour figures).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
