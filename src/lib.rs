//! # logops
//!
//! Lightweight structured logging: leveled records with contextual
//! key/value fields and an optional attached error, rendered as one JSON
//! object or one human-readable line per record, and written to any byte
//! sink.
//!
//! ## Features
//!
//! - **Two formats**: JSON (default) or text, chosen once per process with
//!   `LOGOPS_FORMAT=dev`
//! - **Three contexts**: call-site, dynamic (a function run per record) and
//!   static, merged with call-site > dynamic > static precedence
//! - **Errors as data**: serializable errors are embedded as nested JSON
//! - **Thread safe**: records are formatted concurrently and written whole
//!
//! ```
//! use logops::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::with_config(LoggerConfig::json(), sink.clone());
//! logger.set_context(Context::new().with_field("service", "billing"));
//!
//! logger.infof("%d y %d son %d", &[2.into(), 2.into(), 4.into()]).unwrap();
//!
//! let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
//! assert_eq!(record["msg"], "2 y 2 son 4");
//! assert_eq!(record["service"], "billing");
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Context, ErrorValue, Level, LogLine, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        OutputFormat, Param, Result, Sink, Structured, TimestampFormat,
    };
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::sinks::{ConsoleSink, MemorySink};
}

pub use crate::core::{
    format_error, sprintf, BufferPool, Context, ContextFn, ErrorValue, Level, LogLine, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Param, Result, Sink,
    Structured, TimestampFormat, ERR_FIELD_NAME, FORMAT_ENV_VAR, LEVEL_FIELD_NAME, MSG_FIELD_NAME,
    RECORD_FIELD_NAMES, TIME_FIELD_NAME,
};
pub use global::{
    clear_context_fn, critical, critical_with_cause, critical_with_context, criticalf, debug,
    debug_with_context, debugf, default_logger, error, error_with_cause, error_with_context,
    errorf, flush, info, info_with_context, infof, log, set_context, set_context_fn, set_level,
    set_sink, warn, warn_with_context, warnf,
};
pub use sinks::{ConsoleSink, MemorySink};
#[cfg(feature = "file")]
pub use sinks::FileSink;
