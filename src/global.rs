//! Process-wide default logger
//!
//! The free functions here forward to one shared [`Logger`], built on first
//! use with the process configuration and stdout as sink. They propagate
//! sink errors exactly like the instance methods.

use crate::core::{Context, ErrorValue, Level, LogLine, Logger, Param, Result, Sink};
use std::sync::OnceLock;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The shared logger behind the free functions
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

pub fn log(line: LogLine<'_>) -> Result<()> {
    default_logger().log(line)
}

pub fn set_level(level: Level) {
    default_logger().set_level(level);
}

pub fn set_context(context: Context) {
    default_logger().set_context(context);
}

pub fn set_context_fn<F>(f: F)
where
    F: Fn() -> Context + Send + Sync + 'static,
{
    default_logger().set_context_fn(f);
}

pub fn clear_context_fn() {
    default_logger().clear_context_fn();
}

/// Swap the default logger's sink, returning the previous one
pub fn set_sink<S: Sink + 'static>(sink: S) -> Box<dyn Sink> {
    default_logger().set_sink(sink)
}

pub fn flush() -> Result<()> {
    default_logger().flush()
}

pub fn error_with_cause(
    err: &dyn ErrorValue,
    context: &Context,
    message: &str,
    params: &[Param],
) -> Result<()> {
    default_logger().error_with_cause(err, context, message, params)
}

pub fn critical_with_cause(
    err: &dyn ErrorValue,
    context: &Context,
    message: &str,
    params: &[Param],
) -> Result<()> {
    default_logger().critical_with_cause(err, context, message, params)
}

macro_rules! global_level_fns {
    ($($plain:ident, $printf:ident, $with_context:ident;)+) => {
        $(
            #[inline]
            pub fn $plain(message: &str) -> Result<()> {
                default_logger().$plain(message)
            }

            #[inline]
            pub fn $printf(message: &str, params: &[Param]) -> Result<()> {
                default_logger().$printf(message, params)
            }

            #[inline]
            pub fn $with_context(context: &Context, message: &str, params: &[Param]) -> Result<()> {
                default_logger().$with_context(context, message, params)
            }
        )+
    };
}

global_level_fns! {
    debug, debugf, debug_with_context;
    info, infof, info_with_context;
    warn, warnf, warn_with_context;
    error, errorf, error_with_context;
    critical, criticalf, critical_with_context;
}
