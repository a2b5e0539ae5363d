//! Main logger implementation
//!
//! Level, static context, context function and sink are each swappable on
//! their own from any thread. They are not updated as a group: a call racing
//! with two setters may see the new level with the old context. Only the
//! sink write is serialized, so concurrent calls format in parallel and the
//! bytes of one record are never interleaved with another's.

use super::{
    buffer_pool::BufferPool,
    config::LoggerConfig,
    error::Result,
    error_value::{format_error, ErrorValue},
    log_context::{merge_fields, Context, ContextFn, ERR_FIELD_NAME},
    log_level::Level,
    log_line::LogLine,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    param::Param,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::ConsoleSink;
use chrono::{DateTime, Local};
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

pub struct Logger {
    level: AtomicU8,
    context: RwLock<Arc<Context>>,
    context_fn: RwLock<Option<ContextFn>>,
    sink: Mutex<Box<dyn Sink>>,
    config: LoggerConfig,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to stdout at [`Level::All`] with the process-wide
    /// configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink::stdout())
    }

    #[must_use]
    pub fn with_sink<S: Sink + 'static>(sink: S) -> Self {
        Self::with_config(LoggerConfig::process().clone(), sink)
    }

    #[must_use]
    pub fn with_config<S: Sink + 'static>(config: LoggerConfig, sink: S) -> Self {
        Self::from_parts(config, Box::new(sink))
    }

    fn from_parts(config: LoggerConfig, sink: Box<dyn Sink>) -> Self {
        Self {
            level: AtomicU8::new(Level::All as u8),
            context: RwLock::new(Arc::new(Context::new())),
            context_fn: RwLock::new(None),
            sink: Mutex::new(sink),
            config,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Whether a call at `level` would be written
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.level().admits(level)
    }

    /// Replace the static context as a whole
    pub fn set_context(&self, context: Context) {
        *self.context.write() = Arc::new(context);
    }

    pub fn context(&self) -> Arc<Context> {
        Arc::clone(&self.context.read())
    }

    /// Install the function producing the dynamic context. It runs once per
    /// emitted record, outside any lock.
    pub fn set_context_fn<F>(&self, f: F)
    where
        F: Fn() -> Context + Send + Sync + 'static,
    {
        *self.context_fn.write() = Some(Arc::new(f));
    }

    pub fn clear_context_fn(&self) {
        *self.context_fn.write() = None;
    }

    /// Swap the sink, returning the previous one. Writes in flight finish
    /// on the old sink.
    pub fn set_sink<S: Sink + 'static>(&self, sink: S) -> Box<dyn Sink> {
        std::mem::replace(&mut *self.sink.lock(), Box::new(sink))
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()?;
        Ok(())
    }

    /// Gate, render and write one record.
    ///
    /// Returns the sink's error unchanged if the write fails. A call below
    /// the threshold does nothing and returns `Ok`.
    pub fn log(&self, line: LogLine<'_>) -> Result<()> {
        if !self.enabled(line.level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let mut buf = BufferPool::shared().acquire();
        self.format_into(&mut buf, Local::now(), &line);

        let written = self.sink.lock().write_all(&buf);
        match written {
            Ok(()) => {
                self.metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_write_error();
                Err(e.into())
            }
        }
    }

    /// Render `line` as it would be written at instant `now`, ignoring the
    /// level threshold
    pub fn format_line(&self, line: &LogLine<'_>, now: DateTime<Local>) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        self.format_into(&mut buf, now, line);
        buf
    }

    fn format_into(&self, buf: &mut Vec<u8>, now: DateTime<Local>, line: &LogLine<'_>) {
        let format = self.config.format;

        let mut time = String::with_capacity(40);
        self.config.timestamp_format.write(&mut time, &now);
        format.write_prefix(buf, &time, line.level, self.config.use_colors);

        if let Some(err) = line.err {
            format.write_error(buf, ERR_FIELD_NAME, &format_error(err));
        }

        // Clone out of the lock first: the function must not run under it.
        let context_fn = self.context_fn.read().clone();
        let dynamic = context_fn.map(|f| f());
        let static_ctx = self.context();
        let empty = Context::new();
        let local = line.context.unwrap_or(&empty);

        merge_fields(
            local,
            dynamic.as_ref(),
            &static_ctx,
            line.err.is_some(),
            |k, v| format.write_field(buf, k, v),
        );

        format.write_message(buf, &line.render_message());
    }

    /// Log at `Error` with an attached error rendered into the `err` field
    pub fn error_with_cause(
        &self,
        err: &dyn ErrorValue,
        context: &Context,
        message: &str,
        params: &[Param],
    ) -> Result<()> {
        self.log(
            LogLine::new(Level::Error, message)
                .with_error(err)
                .with_context(context)
                .with_params(params),
        )
    }

    /// Log at `Critical` with an attached error rendered into the `err` field
    pub fn critical_with_cause(
        &self,
        err: &dyn ErrorValue,
        context: &Context,
        message: &str,
        params: &[Param],
    ) -> Result<()> {
        self.log(
            LogLine::new(Level::Critical, message)
                .with_error(err)
                .with_context(context)
                .with_params(params),
        )
    }
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $printf:ident, $with_context:ident;)+) => {
        impl Logger {
            $(
                #[doc = concat!("Log `message` verbatim at `", stringify!($level), "`")]
                #[inline]
                pub fn $plain(&self, message: &str) -> Result<()> {
                    self.log(LogLine::new(Level::$level, message))
                }

                #[doc = concat!("Log at `", stringify!($level), "` with printf-style params")]
                #[inline]
                pub fn $printf(&self, message: &str, params: &[Param]) -> Result<()> {
                    self.log(LogLine::new(Level::$level, message).with_params(params))
                }

                #[doc = concat!("Log at `", stringify!($level), "` with call-site context")]
                #[inline]
                pub fn $with_context(
                    &self,
                    context: &Context,
                    message: &str,
                    params: &[Param],
                ) -> Result<()> {
                    self.log(
                        LogLine::new(Level::$level, message)
                            .with_context(context)
                            .with_params(params),
                    )
                }
            )+
        }
    };
}

level_methods! {
    Debug => debug, debugf, debug_with_context;
    Info => info, infof, info_with_context;
    Warn => warn, warnf, warn_with_context;
    Error => error, errorf, error_with_context;
    Critical => critical, criticalf, critical_with_context;
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.sink.get_mut().flush() {
            eprintln!("[LOGOPS ERROR] Failed to flush sink during drop: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logops::prelude::*;
///
/// let logger = Logger::builder()
///     .level(Level::Info)
///     .config(LoggerConfig::text())
///     .context(Context::new().with_field("service", "billing"))
///     .sink(MemorySink::new())
///     .build();
///
/// assert_eq!(logger.level(), Level::Info);
/// ```
pub struct LoggerBuilder {
    level: Level,
    config: Option<LoggerConfig>,
    context: Context,
    context_fn: Option<ContextFn>,
    sink: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: Level::All,
            config: None,
            context: Context::new(),
            context_fn: None,
            sink: None,
        }
    }

    /// Set the level threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Use `config` instead of the process-wide configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Output format, keeping the rest of the configuration. Also resets
    /// the timestamp format to the format's default.
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        let config = self.config.take().unwrap_or_else(|| LoggerConfig::process().clone());
        self.config = Some(LoggerConfig {
            format,
            timestamp_format: format.default_timestamp_format(),
            ..config
        });
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, timestamp_format: TimestampFormat) -> Self {
        let config = self.config.take().unwrap_or_else(|| LoggerConfig::process().clone());
        self.config = Some(config.with_timestamp_format(timestamp_format));
        self
    }

    /// Colour level names in text output
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        let config = self.config.take().unwrap_or_else(|| LoggerConfig::process().clone());
        self.config = Some(config.with_colors(use_colors));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context_fn<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Context + Send + Sync + 'static,
    {
        self.context_fn = Some(Arc::new(f));
        self
    }

    /// Output sink; stdout when not set
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Logger {
        let config = self
            .config
            .unwrap_or_else(|| LoggerConfig::process().clone());
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));

        let logger = Logger::from_parts(config, sink);
        logger.set_level(self.level);
        logger.set_context(self.context);
        *logger.context_fn.write() = self.context_fn;
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
