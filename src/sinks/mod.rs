//! Sink implementations for normalized log records

pub mod console;
pub mod file;
pub mod http;

pub use console::{ConsoleSink, LineFormat};
pub use file::FileSink;
pub use http::HttpSink;

use crate::core::{LogRecord, SinkError};
use async_trait::async_trait;

/// Asynchronous destination for structured log records.
///
/// The dispatcher calls `submit` from a spawned task and never awaits it
/// on the calling path; a rejection is caught there and reported
/// diagnostically. `drain` resolves once buffered submissions are
/// delivered and may hang when the backend is unreachable, which is why
/// the logger wraps it in its own flush timeout.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver a single record to the underlying backend.
    async fn submit(&self, record: &LogRecord) -> Result<(), SinkError>;

    /// Flush any records the backend has buffered locally.
    async fn drain(&self) -> Result<(), SinkError>;

    /// Get the sink name
    fn name(&self) -> &str;
}
