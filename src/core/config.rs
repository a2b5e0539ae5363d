//! Logger configuration
//!
//! The output format is chosen once per process from the `LOGOPS_FORMAT`
//! environment variable and handed to every logger as an immutable
//! [`LoggerConfig`]. Tests and embedders can build their own config instead
//! of going through the environment.

use std::sync::OnceLock;

use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;

/// Environment variable selecting the output format (`dev` → text)
pub const FORMAT_ENV_VAR: &str = "LOGOPS_FORMAT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    pub format: OutputFormat,
    pub timestamp_format: TimestampFormat,
    /// Colour the level name in text output (needs the `console` feature)
    pub use_colors: bool,
}

impl LoggerConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            timestamp_format: format.default_timestamp_format(),
            use_colors: false,
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn text() -> Self {
        Self::new(OutputFormat::Text)
    }

    /// Read the format selector from the environment
    pub fn from_env() -> Self {
        let selector = std::env::var(FORMAT_ENV_VAR).ok();
        Self::new(OutputFormat::from_selector(selector.as_deref()))
    }

    /// Process-wide configuration, read from the environment on first use
    /// and fixed from then on
    pub fn process() -> &'static LoggerConfig {
        static PROCESS: OnceLock<LoggerConfig> = OnceLock::new();
        PROCESS.get_or_init(Self::from_env)
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}
