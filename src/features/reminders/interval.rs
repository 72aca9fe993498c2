//! Reminder cadence grammar
//!
//! Canonical form is free text with a leading count and a unit word, e.g.
//! `30 minutes` or `2 hours please`. The older `/reminder` form (a bare count
//! of hours) is still accepted through [`ReminderInterval::parse_legacy_hours`]
//! but is deprecated.

use std::fmt;
use std::time::Duration;

use crate::core::HydrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderInterval {
    Minutes(u32),
    Hours(u32),
}

impl ReminderInterval {
    /// Parse free text: the first whitespace-delimited token must be a positive
    /// integer, and the text must contain "minute" or "hour" (any case).
    pub fn parse(text: &str) -> Result<Self, HydrationError> {
        let invalid = || HydrationError::InvalidInterval(text.trim().to_string());

        let count = text
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<u32>().ok())
            .filter(|&count| count > 0)
            .ok_or_else(invalid)?;

        let lower = text.to_lowercase();
        if lower.contains("minute") {
            Ok(ReminderInterval::Minutes(count))
        } else if lower.contains("hour") {
            Ok(ReminderInterval::Hours(count))
        } else {
            Err(invalid())
        }
    }

    /// Deprecated grammar: the whole text is a positive count of hours
    pub fn parse_legacy_hours(text: &str) -> Result<Self, HydrationError> {
        match text.trim().parse::<u32>() {
            Ok(hours) if hours > 0 => Ok(ReminderInterval::Hours(hours)),
            _ => Err(HydrationError::InvalidInterval(text.trim().to_string())),
        }
    }

    pub fn as_duration(&self) -> Duration {
        match *self {
            ReminderInterval::Minutes(m) => Duration::from_secs(u64::from(m) * 60),
            ReminderInterval::Hours(h) => Duration::from_secs(u64::from(h) * 60 * 60),
        }
    }
}

impl fmt::Display for ReminderInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (count, unit) = match *self {
            ReminderInterval::Minutes(m) => (m, "minute"),
            ReminderInterval::Hours(h) => (h, "hour"),
        };
        write!(f, "{} {}{}", count, unit, if count == 1 { "" } else { "s" })
    }
}
