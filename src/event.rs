//! Event and log sink.
//!
//! The crate never configures a logger. Hosts that want diagnostics build a
//! [`Diagnostics`] with callbacks and hand it to the renderer, style resolver
//! and focus/hover managers; focus changes, hover transitions, theme swaps
//! and resizes are reported through it. Clones share the same callbacks.

use std::fmt;
use std::sync::Arc;

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type EventCallback = Arc<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Arc<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

/// Owned event and log callbacks. The default sink discards everything.
#[derive(Clone, Default)]
pub struct Diagnostics {
    on_event: Option<EventCallback>,
    on_log: Option<LogCallback>,
}

impl Diagnostics {
    /// A sink with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_event_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.set_event_callback(callback);
        self
    }

    #[must_use]
    pub fn with_log_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(LogLevel, &str) + Send + Sync + 'static,
    {
        self.set_log_callback(callback);
        self
    }

    pub fn set_event_callback<F>(&mut self, callback: F)
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.on_event = Some(Arc::new(callback));
    }

    pub fn clear_event_callback(&mut self) {
        self.on_event = None;
    }

    pub fn set_log_callback<F>(&mut self, callback: F)
    where
        F: Fn(LogLevel, &str) + Send + Sync + 'static,
    {
        self.on_log = Some(Arc::new(callback));
    }

    pub fn clear_log_callback(&mut self) {
        self.on_log = None;
    }

    /// Whether anything listens for logs. Lets callers skip formatting.
    #[must_use]
    pub fn logs_enabled(&self) -> bool {
        self.on_log.is_some()
    }

    pub fn emit_event(&self, name: &str, data: &str) {
        if let Some(callback) = &self.on_event {
            callback(name, data);
        }
    }

    pub fn emit_log(&self, level: LogLevel, message: &str) {
        if let Some(callback) = &self.on_log {
            callback(level, message);
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("on_event", &self.on_event.is_some())
            .field("on_log", &self.on_log.is_some())
            .finish()
    }
}
