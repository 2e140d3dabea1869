//! Severity-leveled logging capability.
//!
//! The client never logs through a global. A [`LogSink`] is handed to it at
//! construction; the default [`TracingSink`] forwards to `tracing`, which does
//! nothing until the application installs a subscriber.

use std::fmt;
use std::sync::Arc;

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Alert,
    Critical,
    Emergency,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Emergency => "emergency",
        };
        f.write_str(s)
    }
}

/// Destination for client log messages.
pub trait LogSink: Send + Sync {
    /// Record a message. Must not fail or block for long.
    fn log(&self, severity: Severity, message: &str);
}

/// Forwards messages to `tracing` under the `docatom` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(target: "docatom", "{}", message),
            Severity::Info => tracing::info!(target: "docatom", "{}", message),
            Severity::Warn => tracing::warn!(target: "docatom", "{}", message),
            Severity::Error | Severity::Alert | Severity::Critical | Severity::Emergency => {
                tracing::error!(target: "docatom", severity = %severity, "{}", message)
            }
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&self, _severity: Severity, _message: &str) {}
}

impl<F> LogSink for F
where
    F: Fn(Severity, &str) + Send + Sync,
{
    fn log(&self, severity: Severity, message: &str) {
        self(severity, message)
    }
}

/// Shared handle to a sink that drops empty messages.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Wrap a sink.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Log at the given severity. Empty messages are ignored.
    pub fn log(&self, severity: Severity, message: &str) {
        if message.is_empty() {
            return;
        }
        self.sink.log(severity, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
