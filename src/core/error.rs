//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Error type sinks report across the async boundary.
///
/// Sink implementations live outside this crate's error taxonomy, so the
/// trait surface uses a boxed error the dispatcher catches and reports
/// diagnostically.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Construction-time failures. Delivery failures travel as [`SinkError`]
/// and are never surfaced past the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }
}
