//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with
//! automatic string formatting, similar to `println!` and `format!`.
//! For structured calls (maps, errors, trailing arguments) use the
//! logger methods directly.
//!
//! # Examples
//!
//! ```
//! use logship::prelude::*;
//! use logship::info;
//!
//! let logger = Logger::builder().build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().build();
/// use logship::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.dispatch($level, format!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().build();
/// use logship::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().build();
/// use logship::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().build();
/// use logship::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log an http-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().min_level(Level::Http).build();
/// use logship::http;
/// http!(logger, "GET /health 200");
/// http!(logger, "{} {} {}", "POST", "/orders", 201);
/// ```
#[macro_export]
macro_rules! http {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Http, $($arg)+)
    };
}

/// Log a verbose-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().min_level(Level::Verbose).build();
/// use logship::verbose;
/// verbose!(logger, "Cache warmed");
/// verbose!(logger, "Loaded {} entries", 2048);
/// ```
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Verbose, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().min_level(Level::Debug).build();
/// use logship::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log a silly-level message.
///
/// # Examples
///
/// ```
/// # use logship::prelude::*;
/// # let logger = Logger::builder().min_level(Level::Silly).build();
/// use logship::silly;
/// silly!(logger, "Entering inner loop");
/// silly!(logger, "Iteration {}", 3);
/// ```
#[macro_export]
macro_rules! silly {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Silly, $($arg)+)
    };
}
