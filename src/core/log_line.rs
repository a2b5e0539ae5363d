//! A single log call, before rendering

use super::error_value::ErrorValue;
use super::log_context::Context;
use super::log_level::Level;
use super::param::{sprintf, Param};
use std::borrow::Cow;
use std::fmt;

/// Arguments of one log call. Borrowed from the caller, rendered
/// synchronously and then discarded.
#[derive(Clone, Copy)]
pub struct LogLine<'a> {
    pub level: Level,
    /// Call-site context, highest precedence
    pub context: Option<&'a Context>,
    pub message: &'a str,
    pub params: &'a [Param],
    pub err: Option<&'a dyn ErrorValue>,
}

impl<'a> LogLine<'a> {
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            context: None,
            message,
            params: &[],
            err: None,
        }
    }

    pub fn with_context(mut self, context: &'a Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_params(mut self, params: &'a [Param]) -> Self {
        self.params = params;
        self
    }

    pub fn with_error(mut self, err: &'a dyn ErrorValue) -> Self {
        self.err = Some(err);
        self
    }

    /// The message with params substituted; untouched when there are none
    pub fn render_message(&self) -> Cow<'a, str> {
        if self.params.is_empty() {
            Cow::Borrowed(self.message)
        } else {
            Cow::Owned(sprintf(self.message, self.params))
        }
    }
}

impl fmt::Debug for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogLine")
            .field("level", &self.level)
            .field("context", &self.context)
            .field("message", &self.message)
            .field("params", &self.params)
            .field("err", &self.err.map(|e| e.to_string()))
            .finish()
    }
}
