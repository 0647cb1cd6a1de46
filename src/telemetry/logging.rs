//! Logging
//!
//! Observer channel for diagnostics. Non-fatal warnings (half-specified
//! device pair, ignored optional scopes, insecure jwt_secret use) are
//! emitted here and never abort a call; tests capture them with
//! [`InMemoryLogger`].

use std::collections::HashMap;
use std::sync::Mutex;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Context attached to a log event.
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    /// Operation name, e.g. `exchange_code`.
    pub operation: Option<String>,
    /// Client ID making the request.
    pub client_id: Option<String>,
    /// Additional fields.
    pub extra: HashMap<String, String>,
}

impl LogContext {
    /// Create new log context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set operation.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Add an extra field.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Logger interface.
pub trait Logger: Send + Sync {
    /// Log at debug level.
    fn debug(&self, message: &str, context: &LogContext);

    /// Log at info level.
    fn info(&self, message: &str, context: &LogContext);

    /// Log at warn level.
    fn warn(&self, message: &str, context: &LogContext);

    /// Log at error level.
    fn error(&self, message: &str, context: &LogContext);

    /// Check if a log level is enabled.
    fn is_enabled(&self, level: LogLevel) -> bool;
}

/// Default logger forwarding to `tracing` events.
#[derive(Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create new tracing logger.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str, context: &LogContext) {
        tracing::debug!(
            operation = context.operation.as_deref(),
            client_id = context.client_id.as_deref(),
            "{message}"
        );
    }

    fn info(&self, message: &str, context: &LogContext) {
        tracing::info!(
            operation = context.operation.as_deref(),
            client_id = context.client_id.as_deref(),
            "{message}"
        );
    }

    fn warn(&self, message: &str, context: &LogContext) {
        tracing::warn!(
            operation = context.operation.as_deref(),
            client_id = context.client_id.as_deref(),
            "{message}"
        );
    }

    fn error(&self, message: &str, context: &LogContext) {
        tracing::error!(
            operation = context.operation.as_deref(),
            client_id = context.client_id.as_deref(),
            "{message}"
        );
    }

    fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

/// No-op logger implementation.
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str, _context: &LogContext) {}
    fn info(&self, _message: &str, _context: &LogContext) {}
    fn warn(&self, _message: &str, _context: &LogContext) {}
    fn error(&self, _message: &str, _context: &LogContext) {}
    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Log entry captured by [`InMemoryLogger`].
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
}

/// In-memory logger for testing.
#[derive(Default)]
pub struct InMemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl InMemoryLogger {
    /// Create new in-memory logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all log entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Get entries at a given level.
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Get captured warning messages.
    pub fn warnings(&self) -> Vec<String> {
        self.entries_at(LogLevel::Warn)
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn push(&self, level: LogLevel, message: &str, context: &LogContext) {
        self.entries.lock().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
            context: context.clone(),
        });
    }
}

impl Logger for InMemoryLogger {
    fn debug(&self, message: &str, context: &LogContext) {
        self.push(LogLevel::Debug, message, context);
    }

    fn info(&self, message: &str, context: &LogContext) {
        self.push(LogLevel::Info, message, context);
    }

    fn warn(&self, message: &str, context: &LogContext) {
        self.push(LogLevel::Warn, message, context);
    }

    fn error(&self, message: &str, context: &LogContext) {
        self.push(LogLevel::Error, message, context);
    }

    fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }
}
