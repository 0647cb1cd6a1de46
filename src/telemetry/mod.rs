//! Telemetry
//!
//! Structured logging observer used by the clients for non-fatal
//! diagnostic warnings.

pub mod logging;

pub use logging::{
    InMemoryLogger, LogContext, LogEntry, LogLevel, Logger, NoOpLogger, TracingLogger,
};
