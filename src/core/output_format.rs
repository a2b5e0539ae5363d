//! Output format templates
//!
//! A record is rendered as a sequence of fragments: prefix (time and
//! level), zero or more fields, an optional error, then the message which
//! also closes the record and appends the newline.
//!
//! - Json: `{"time":"2025-01-08T10:30:45.123456789+01:00","lvl":"INFO","user":"ana","msg":"Request processed"}`
//! - Text: `10:30:45.123 INFO	 [user=ana] Request processed`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::LoggerError;
use super::log_level::Level;
use super::timestamp::TimestampFormat;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Single-line JSON object per record (default)
    #[default]
    Json,

    /// Human oriented line, not meant to be parsed
    Text,
}

impl OutputFormat {
    /// Map the raw value of the format selector. `"dev"` (any case) picks
    /// text output; anything else, including no value, picks JSON.
    pub fn from_selector(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("dev") => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "dev",
        }
    }

    /// Timestamp format matching this output format
    pub fn default_timestamp_format(&self) -> TimestampFormat {
        match self {
            OutputFormat::Json => TimestampFormat::Rfc3339Nanos,
            OutputFormat::Text => TimestampFormat::ClockMillis,
        }
    }

    pub(crate) fn write_prefix(&self, buf: &mut Vec<u8>, time: &str, level: Level, colors: bool) {
        match self {
            OutputFormat::Json => {
                buf.extend_from_slice(b"{\"time\":");
                write_json_str(buf, time);
                buf.extend_from_slice(b",\"lvl\":");
                write_json_str(buf, level.as_str());
            }
            OutputFormat::Text => {
                buf.extend_from_slice(time.as_bytes());
                buf.push(b' ');
                write_level_text(buf, level, colors);
                buf.push(b'\t');
            }
        }
    }

    pub(crate) fn write_field(&self, buf: &mut Vec<u8>, key: &str, value: &str) {
        match self {
            OutputFormat::Json => {
                buf.push(b',');
                write_json_str(buf, key);
                buf.push(b':');
                write_json_str(buf, value);
            }
            OutputFormat::Text => {
                buf.extend_from_slice(b" [");
                write_text(buf, key);
                buf.push(b'=');
                write_text(buf, value);
                buf.push(b']');
            }
        }
    }

    /// `err_json` must already be a JSON fragment (see `format_error`)
    pub(crate) fn write_error(&self, buf: &mut Vec<u8>, key: &str, err_json: &str) {
        match self {
            OutputFormat::Json => {
                buf.push(b',');
                write_json_str(buf, key);
                buf.push(b':');
                buf.extend_from_slice(err_json.as_bytes());
            }
            OutputFormat::Text => {
                buf.extend_from_slice(b" [");
                write_text(buf, key);
                buf.push(b'=');
                write_text(buf, err_json);
                buf.push(b']');
            }
        }
    }

    pub(crate) fn write_message(&self, buf: &mut Vec<u8>, message: &str) {
        match self {
            OutputFormat::Json => {
                buf.extend_from_slice(b",\"msg\":");
                write_json_str(buf, message);
                buf.extend_from_slice(b"}\n");
            }
            OutputFormat::Text => {
                buf.push(b' ');
                write_text(buf, message);
                buf.push(b'\n');
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "dev" | "text" => Ok(OutputFormat::Text),
            _ => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown format '{}'", s),
            )),
        }
    }
}

fn write_json_str(buf: &mut Vec<u8>, s: &str) {
    // Serializing a str into a Vec cannot fail.
    let _ = serde_json::to_writer(&mut *buf, s);
}

/// Text mode keeps one record per line: control characters that would
/// break the line are escaped.
fn write_text(buf: &mut Vec<u8>, s: &str) {
    for c in s.chars() {
        match c {
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c => {
                let mut tmp = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            }
        }
    }
}

#[cfg(feature = "console")]
fn write_level_text(buf: &mut Vec<u8>, level: Level, colors: bool) {
    use colored::Colorize;

    if colors {
        let painted = level.as_str().color(level.color()).to_string();
        buf.extend_from_slice(painted.as_bytes());
    } else {
        buf.extend_from_slice(level.as_str().as_bytes());
    }
}

#[cfg(not(feature = "console"))]
fn write_level_text(buf: &mut Vec<u8>, level: Level, _colors: bool) {
    buf.extend_from_slice(level.as_str().as_bytes());
}
