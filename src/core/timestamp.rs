//! Timestamp formatting for log records
//!
//! Both built-in formats are fixed precision and carry the local offset (or
//! the implicit local day for the clock format), so records sort
//! lexically in emission order within a day.

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logops::core::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::ClockMillis;
/// let timestamp = format.format(&Local::now());
/// assert_eq!(timestamp.len(), "15:04:05.000".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with nanoseconds and offset: `2025-01-08T10:30:45.123456789+01:00`
    ///
    /// Default for JSON output.
    #[default]
    Rfc3339Nanos,

    /// Wall clock with milliseconds: `10:30:45.123`
    ///
    /// Default for text output.
    ClockMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use logops::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        let mut out = String::with_capacity(36);
        self.write(&mut out, datetime);
        out
    }

    /// Append the formatted timestamp to `out`
    pub fn write(&self, out: &mut String, datetime: &DateTime<Local>) {
        match self {
            TimestampFormat::Rfc3339Nanos => {
                out.push_str(&datetime.to_rfc3339_opts(SecondsFormat::Nanos, true))
            }
            TimestampFormat::ClockMillis => {
                let _ = write!(out, "{}", datetime.format("%H:%M:%S%.3f"));
            }
            TimestampFormat::Custom(format_str) => {
                // An invalid strftime string makes chrono's Display fail;
                // fall back to RFC 3339 rather than lose the record.
                let mark = out.len();
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    out.truncate(mark);
                    out.push_str(&datetime.to_rfc3339_opts(SecondsFormat::Nanos, true));
                }
            }
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Rfc3339Nanos => {
                "RFC 3339 with nanoseconds (2025-01-08T10:30:45.123456789+01:00)"
            }
            TimestampFormat::ClockMillis => "Clock time with milliseconds (10:30:45.123)",
            TimestampFormat::Custom(_) => "Custom strftime format",
        }
    }
}
