//! # Logship
//!
//! A logging facade for service applications: leveled calls write a
//! human-readable console line synchronously and ship structured
//! records to a remote ingestion sink asynchronously.
//!
//! ## Features
//!
//! - **Non-Blocking Delivery**: remote submission never waits on the caller
//! - **Bound Context**: derive loggers that stamp fixed metadata on every call
//! - **Best Effort**: every failure degrades to "log less", never to a crash
//! - **Drainable**: a bounded flush for clean shutdown
//!
//! ## Example
//!
//! ```no_run
//! use logship::{create_logger, LoggerConfig, DEFAULT_FLUSH_TIMEOUT};
//! use serde_json::json;
//!
//! # async fn run() {
//! let logger = create_logger(LoggerConfig::from_env().service("checkout"));
//!
//! logger.info("service started");
//! let request_logger = logger.with([("request_id", json!("r-17"))]);
//! request_logger.warn(("slow upstream", json!({"elapsed_ms": 412})));
//!
//! logger.flush(DEFAULT_FLUSH_TIMEOUT).await;
//! # }
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        create_logger, CallArg, DeliveryMetrics, ErrorDetail, IntoCallArgs, Level, LogRecord,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, Metadata, Result, ServiceIdentity,
        SinkError, TimestampFormat, DEFAULT_FLUSH_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, HttpSink, LineFormat, LogSink};
}

pub use crate::core::{
    create_logger, normalize, CallArg, DeliveryMetrics, ErrorDetail, IntoCallArgs, Level,
    LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, Metadata, NormalizedCall, Result,
    ServiceIdentity, SinkError, TimestampFormat, ARGS_KEY, DEFAULT_FLUSH_TIMEOUT, ERROR_KEY,
};
pub use crate::sinks::{ConsoleSink, FileSink, HttpSink, LineFormat, LogSink};
