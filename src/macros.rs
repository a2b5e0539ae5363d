//! Logging macros
//!
//! The level macros take a printf-style template and any values convertible
//! into [`Param`](crate::Param), and return the logger's `Result`.
//!
//! # Examples
//!
//! ```
//! use logops::prelude::*;
//! use logops::{context, info};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::with_config(LoggerConfig::json(), sink.clone());
//!
//! info!(logger, "Server started").unwrap();
//! info!(logger, "%d y %d son %d", 2, 2, 4).unwrap();
//!
//! let ctx = context! { "user" => "ana", "op" => "login" };
//! logger.info_with_context(&ctx, "User logged in", &[]).unwrap();
//!
//! assert_eq!(sink.lines().len(), 3);
//! ```

/// Log at an explicit level.
///
/// ```
/// # use logops::prelude::*;
/// # let logger = Logger::with_config(LoggerConfig::json(), MemorySink::new());
/// use logops::log;
/// log!(logger, Level::Warn, "disk at %d%%", 91).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:expr $(,)?) => {
        $logger.log($crate::LogLine::new($level, $fmt))
    };
    ($logger:expr, $level:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $logger.log(
            $crate::LogLine::new($level, $fmt)
                .with_params(&[$($crate::Param::from($arg)),+]),
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

/// Build a [`Context`](crate::Context) from `key => value` pairs.
///
/// ```
/// use logops::context;
///
/// let ctx = context! { "service" => "billing", "region" => "eu-west-1" };
/// assert_eq!(ctx.get("region"), Some("eu-west-1"));
///
/// let empty = context! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Context::new()$(.with_field($key, $value))+
    };
}
