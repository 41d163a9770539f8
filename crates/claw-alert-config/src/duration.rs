//! Durations written the way alerting configs write them: `30s`, `5m`, `1h30m`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: u64 = 7 * MILLIS_PER_DAY;
const MILLIS_PER_YEAR: u64 = 365 * MILLIS_PER_DAY;

/// Units in the order they must appear, with their size in milliseconds.
const UNITS: [(&str, u64); 7] = [
    ("y", MILLIS_PER_YEAR),
    ("w", MILLIS_PER_WEEK),
    ("d", MILLIS_PER_DAY),
    ("h", MILLIS_PER_HOUR),
    ("m", MILLIS_PER_MINUTE),
    ("s", MILLIS_PER_SECOND),
    ("ms", 1),
];

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:([0-9]+)y)?(?:([0-9]+)w)?(?:([0-9]+)d)?(?:([0-9]+)h)?(?:([0-9]+)m)?(?:([0-9]+)s)?(?:([0-9]+)ms)?$",
    )
    .unwrap_or_else(|_| unreachable!())
});

/// A non-negative duration with millisecond precision.
///
/// Parses and prints the compact unit form used throughout alerting configs.
/// Years and weeks are only used when printing if they divide the value
/// exactly, so `ConfigDuration::parse("14d")` prints as `2w`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigDuration(Duration);

impl ConfigDuration {
    /// A zero duration.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Creates a duration from whole minutes.
    #[must_use]
    pub const fn from_mins(mins: u64) -> Self {
        Self(Duration::from_secs(mins * 60))
    }

    /// Creates a duration from whole hours.
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self(Duration::from_secs(hours * 3600))
    }

    /// Parses a duration string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDuration` if the string is empty, uses
    /// units out of order, or overflows.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| ConfigError::InvalidDuration {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input == "0" {
            return Ok(Self::ZERO);
        }
        if input.is_empty() {
            return Err(invalid("empty duration string"));
        }

        let caps = DURATION_REGEX
            .captures(input)
            .ok_or_else(|| invalid("not a valid duration string"))?;

        let mut total: u64 = 0;
        for (idx, (_, unit_millis)) in UNITS.iter().enumerate() {
            let Some(m) = caps.get(idx + 1) else {
                continue;
            };
            let count: u64 = m
                .as_str()
                .parse()
                .map_err(|_| invalid("duration out of range"))?;
            total = count
                .checked_mul(*unit_millis)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(|| invalid("duration out of range"))?;
        }

        Ok(Self(Duration::from_millis(total)))
    }

    /// Returns the duration as a [`Duration`].
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Returns true if the duration is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Duration> for ConfigDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl From<ConfigDuration> for Duration {
    fn from(d: ConfigDuration) -> Self {
        d.0
    }
}

impl FromStr for ConfigDuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConfigDuration {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ConfigDuration> for String {
    fn from(d: ConfigDuration) -> Self {
        d.to_string()
    }
}

impl fmt::Display for ConfigDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut millis = u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 {
            return write!(f, "0s");
        }

        for (unit, unit_millis) in UNITS {
            let exact_only = unit == "y" || unit == "w";
            if exact_only && millis % unit_millis != 0 {
                continue;
            }
            let count = millis / unit_millis;
            if count > 0 {
                write!(f, "{count}{unit}")?;
                millis -= count * unit_millis;
            }
        }
        Ok(())
    }
}
