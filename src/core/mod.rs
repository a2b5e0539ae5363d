//! Core logger types and traits

pub mod buffer_pool;
pub mod config;
pub mod error;
pub mod error_value;
pub mod log_context;
pub mod log_level;
pub mod log_line;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod param;
pub mod sink;
pub mod timestamp;

pub use buffer_pool::{BufferPool, PooledBuffer};
pub use config::{LoggerConfig, FORMAT_ENV_VAR};
pub use error::{LoggerError, Result};
pub use error_value::{format_error, ErrorValue, Structured};
pub use log_context::{
    merge_fields, Context, ContextFn, ERR_FIELD_NAME, LEVEL_FIELD_NAME, MSG_FIELD_NAME,
    RECORD_FIELD_NAMES, TIME_FIELD_NAME,
};
pub use log_level::Level;
pub use log_line::LogLine;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use param::{sprintf, write_sprintf, Param};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
