//! The fixed date-time textual contract shared by both wire formats.
//!
//! Date-time fields are local and naive: no timezone offset, seconds precision,
//! and a literal `T` separator (`yyyy-MM-dd'T'HH:mm:ss`). Parsing is strict; only
//! the exact canonical rendering is accepted, so every accepted literal re-encodes
//! to the identical string.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;

/// `chrono` form of `yyyy-MM-dd'T'HH:mm:ss`.
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// Error returned when text does not follow the date-time contract.
#[derive(Debug, Error)]
pub enum DateTimeParseError {
    /// The text could not be parsed with the pattern at all.
    #[error("`{value}` does not match yyyy-MM-dd'T'HH:mm:ss: {source}")]
    Pattern {
        /// The offending text.
        value: String,
        /// Underlying parser error.
        #[source]
        source: chrono::ParseError,
    },

    /// The text parsed, but is not the canonical rendering (e.g. `2024-1-5T10:30:00`).
    #[error("`{value}` is not written as yyyy-MM-dd'T'HH:mm:ss")]
    NotCanonical {
        /// The offending text.
        value: String,
    },
}

/// A naive local date-time with seconds precision.
///
/// Sub-second components are discarded on construction.
///
/// # Examples
///
/// ```
/// use twinform_model::LocalDateTime;
///
/// let dt = LocalDateTime::parse("2024-01-15T10:30:00").unwrap();
/// assert_eq!(dt, LocalDateTime::new(2024, 1, 15, 10, 30, 0).unwrap());
/// assert_eq!(dt.to_string(), "2024-01-15T10:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime(NaiveDateTime);

impl LocalDateTime {
    /// Builds a date-time from calendar parts, returning `None` for impossible dates.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)
            .map(Self)
    }

    /// Parses the canonical `yyyy-MM-dd'T'HH:mm:ss` rendering.
    pub fn parse(text: &str) -> Result<Self, DateTimeParseError> {
        let parsed = NaiveDateTime::parse_from_str(text, DATE_TIME_PATTERN).map_err(|source| {
            DateTimeParseError::Pattern {
                value: text.to_string(),
                source,
            }
        })?;

        let value = Self::from(parsed);
        if value.to_string() != text {
            return Err(DateTimeParseError::NotCanonical {
                value: text.to_string(),
            });
        }
        Ok(value)
    }

    /// Returns the underlying `chrono` value.
    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Consumes the wrapper.
    pub fn into_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for LocalDateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl From<LocalDateTime> for NaiveDateTime {
    fn from(value: LocalDateTime) -> Self {
        value.0
    }
}

impl FromStr for LocalDateTime {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_PATTERN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_literal() {
        let dt = LocalDateTime::parse("2024-01-15T10:30:00").unwrap();
        assert_eq!(dt.as_naive().to_string(), "2024-01-15 10:30:00");
        assert_eq!(dt.to_string(), "2024-01-15T10:30:00");
    }

    #[test]
    fn test_rejects_offsets_and_fractions() {
        assert!(LocalDateTime::parse("2024-01-15T10:30:00Z").is_err());
        assert!(LocalDateTime::parse("2024-01-15T10:30:00+02:00").is_err());
        assert!(LocalDateTime::parse("2024-01-15T10:30:00.250").is_err());
        assert!(LocalDateTime::parse("2024-01-15 10:30:00").is_err());
        assert!(LocalDateTime::parse("2024-01-15").is_err());
        assert!(LocalDateTime::parse("not a date").is_err());
    }

    #[test]
    fn test_rejects_non_canonical_padding() {
        let err = LocalDateTime::parse("2024-1-15T10:30:00").unwrap_err();
        assert!(matches!(err, DateTimeParseError::NotCanonical { .. }));
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(LocalDateTime::parse("2024-02-30T10:30:00").is_err());
        assert!(LocalDateTime::new(2024, 13, 1, 0, 0, 0).is_none());
    }

    #[test]
    fn test_sub_seconds_are_dropped() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_milli_opt(10, 30, 0, 750)
            .unwrap();
        let dt = LocalDateTime::from(naive);
        assert_eq!(dt, LocalDateTime::new(2024, 1, 15, 10, 30, 0).unwrap());
        assert_eq!(LocalDateTime::parse(&dt.to_string()).unwrap(), dt);
    }

    #[test]
    fn test_error_names_offending_value() {
        let err = LocalDateTime::parse("15/01/2024").unwrap_err();
        assert!(err.to_string().contains("15/01/2024"));
    }
}
