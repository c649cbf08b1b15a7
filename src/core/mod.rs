//! Core logger types and traits

pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod timestamp;

pub use config::{normalize_endpoint, LoggerConfig, ServiceIdentity};
pub use error::{LoggerError, Result, SinkError};
pub use log_level::Level;
pub use logger::{create_logger, Logger, LoggerBuilder, DEFAULT_FLUSH_TIMEOUT};
pub use metrics::DeliveryMetrics;
pub use record::{
    normalize, CallArg, ErrorDetail, IntoCallArgs, LogRecord, Metadata, NormalizedCall, ARGS_KEY,
    ERROR_KEY,
};
pub use timestamp::TimestampFormat;
