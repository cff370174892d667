//! Date patterns for the `%(date)s` template field

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How a record's creation time is rendered
///
/// # Examples
///
/// ```
/// use rust_hierarchical_logger::TimestampFormat;
///
/// // Apache log format
/// let format = TimestampFormat::custom("%d/%b/%Y:%H:%M:%S %z").unwrap();
/// assert!(!format.is_numeric());
/// assert!(TimestampFormat::custom("%Q").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "UncheckedTimestampFormat")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime pattern; an empty pattern falls back to ISO 8601
    Custom(String),
}

/// Wire shape of [`TimestampFormat`] before the custom pattern is checked
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum UncheckedTimestampFormat {
    Iso8601,
    Rfc3339,
    Unix,
    UnixMillis,
    Custom(String),
}

impl TryFrom<UncheckedTimestampFormat> for TimestampFormat {
    type Error = LoggerError;

    fn try_from(raw: UncheckedTimestampFormat) -> Result<Self> {
        match raw {
            UncheckedTimestampFormat::Iso8601 => Ok(TimestampFormat::Iso8601),
            UncheckedTimestampFormat::Rfc3339 => Ok(TimestampFormat::Rfc3339),
            UncheckedTimestampFormat::Unix => Ok(TimestampFormat::Unix),
            UncheckedTimestampFormat::UnixMillis => Ok(TimestampFormat::UnixMillis),
            UncheckedTimestampFormat::Custom(pattern) => TimestampFormat::custom(pattern),
        }
    }
}

impl TimestampFormat {
    /// A custom strftime pattern, rejected if chrono cannot render it
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let format = TimestampFormat::Custom(pattern.into());
        format.validate()?;
        Ok(format)
    }

    /// Fails for a custom pattern holding an unknown or truncated specifier
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(pattern)
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) =>
            {
                Err(LoggerError::config(
                    "date_format",
                    format!("invalid strftime pattern '{}'", pattern),
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        match self {
            TimestampFormat::Iso8601 => Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            TimestampFormat::Rfc3339 => Ok(datetime.to_rfc3339()),
            TimestampFormat::Unix => Ok(datetime.timestamp().to_string()),
            TimestampFormat::UnixMillis => Ok(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(pattern) if pattern.is_empty() => {
                TimestampFormat::Iso8601.format(datetime)
            }
            TimestampFormat::Custom(pattern) => {
                // chrono reports a bad specifier as a fmt::Error while writing
                let mut out = String::new();
                write!(out, "{}", datetime.format(pattern)).map_err(|_| {
                    LoggerError::config(
                        "date_format",
                        format!("invalid strftime pattern '{}'", pattern),
                    )
                })?;
                Ok(out)
            }
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

impl From<&str> for TimestampFormat {
    /// Unchecked; [`TimestampFormat::custom`] validates the pattern
    fn from(pattern: &str) -> Self {
        TimestampFormat::Custom(pattern.to_string())
    }
}
