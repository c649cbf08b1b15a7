//! Main logger implementation

use super::config::{LoggerConfig, ServiceIdentity};
use super::log_level::Level;
use super::metrics::DeliveryMetrics;
use super::record::{normalize, IntoCallArgs, LogRecord, Metadata};
use super::timestamp::TimestampFormat;
use crate::sinks::{ConsoleSink, FileSink, HttpSink, LogSink};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;

/// Default flush timeout for shutdown (5 seconds)
///
/// Pass this to [`Logger::flush`] when no tighter shutdown budget
/// applies.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Counts submissions in flight so a flush can wait for them to settle.
#[derive(Debug)]
pub(crate) struct DeliveryTracker {
    pending: AtomicUsize,
    notify: Notify,
}

impl DeliveryTracker {
    fn new() -> Self {
        Self {
            pending: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    fn begin(&self) {
        self.pending.fetch_add(1, Ordering::AcqRel);
    }

    fn finish(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.notify.notify_waiters();
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Wait until no submissions are in flight.
    ///
    /// `finish` signals with `notify_waiters`, which stores no permit,
    /// so the notified future must be registered via `enable` before
    /// the counter is re-checked; otherwise a finish landing between
    /// the check and the await would wake nobody.
    async fn settled(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.pending() == 0 {
                return;
            }
            notified.as_mut().await;
        }
    }
}

/// A leveled logger: synchronous console output plus asynchronous,
/// best-effort delivery to a configured sink.
///
/// Loggers are values. [`Logger::with`] derives a new logger carrying
/// extra bound context; the parent is never mutated and the two share
/// only the sink connection (by reference) and its delivery tracking.
pub struct Logger {
    identity: ServiceIdentity,
    min_level: RwLock<Level>,
    bound: Metadata,
    console: ConsoleSink,
    sink: Option<Arc<dyn LogSink>>,
    tracker: Arc<DeliveryTracker>,
    metrics: Arc<DeliveryMetrics>,
}

/// Construct a logger from configuration.
///
/// This is the single place a sink connection is created: a credential
/// token selects the HTTP ingest sink, otherwise a file path selects
/// the file sink, otherwise the logger is console-only. Sink
/// construction failure degrades to console-only mode with one
/// diagnostic line; it is never surfaced to the caller and never
/// retried per call.
pub fn create_logger(config: LoggerConfig) -> Logger {
    let sink: Option<Arc<dyn LogSink>> = if let Some(token) = config.sink_token.as_deref() {
        match HttpSink::new(token, &config.endpoint_url()) {
            Ok(sink) => Some(Arc::new(sink)),
            Err(e) => {
                eprintln!("[LOGGER ERROR] remote delivery disabled: {}", e);
                None
            }
        }
    } else if let Some(path) = config.file_path.as_deref() {
        match FileSink::new(path) {
            Ok(sink) => Some(Arc::new(sink)),
            Err(e) => {
                eprintln!("[LOGGER ERROR] file delivery disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut builder = Logger::builder()
        .min_level(config.min_level)
        .identity(config.identity);
    if let Some(sink) = sink {
        builder = builder.shared_sink(sink);
    }
    builder.build()
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logship::prelude::*;
    ///
    /// let logger = Logger::builder().min_level(Level::Debug).build();
    /// logger.debug("starting up");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    pub fn min_level(&self) -> Level {
        *self.min_level.read()
    }

    /// Change the severity threshold for all subsequent calls.
    pub fn set_min_level(&self, level: Level) {
        *self.min_level.write() = level;
    }

    /// Bound context merged into every call from this logger.
    pub fn bound_context(&self) -> &Metadata {
        &self.bound
    }

    /// Delivery metrics, shared with derived loggers.
    pub fn metrics(&self) -> &DeliveryMetrics {
        &self.metrics
    }

    /// Derive a logger that merges `context` into every subsequent
    /// call. Per-call keys win over bound keys, and later binds win
    /// over earlier ones. Identity fields named in the context with
    /// string values override the derived logger's identity.
    ///
    /// The parent keeps its own context, identity and threshold; the
    /// sink connection is shared by reference.
    pub fn with<I, K, V>(&self, context: I) -> Logger
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let context: Metadata = context
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        let identity = self.identity.overridden_by(&context);
        let mut bound = self.bound.clone();
        for (key, value) in context {
            bound.insert(key, value);
        }

        Logger {
            identity,
            min_level: RwLock::new(*self.min_level.read()),
            bound,
            console: self.console.clone(),
            sink: self.sink.clone(),
            tracker: Arc::clone(&self.tracker),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Process one leveled call: filter, normalize, write the console
    /// line, then hand the record to the sink without waiting on it.
    pub fn dispatch(&self, level: Level, args: impl IntoCallArgs) {
        if !level.passes(*self.min_level.read()) {
            return;
        }

        let call = normalize(args.into_call_args());
        let mut record = LogRecord::new(level, call.message, self.merged_metadata(call.metadata));
        let delivered_at = record.timestamp;
        record
            .metadata
            .entry("timestamp".to_string())
            .or_insert_with(|| Value::String(TimestampFormat::Iso8601.format(&delivered_at)));

        self.console.write(&record);
        self.submit(record);
    }

    /// Identity fields first, then bound context, then per-call keys:
    /// rightmost wins.
    fn merged_metadata(&self, call: Metadata) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(
            "service".to_string(),
            Value::String(self.identity.service.clone()),
        );
        metadata.insert(
            "environment".to_string(),
            Value::String(self.identity.environment.clone()),
        );
        metadata.insert(
            "version".to_string(),
            Value::String(self.identity.version.clone()),
        );
        for (key, value) in self.bound.iter() {
            metadata.insert(key.clone(), value.clone());
        }
        for (key, value) in call {
            metadata.insert(key, value);
        }
        metadata
    }

    fn submit(&self, record: LogRecord) {
        let Some(sink) = &self.sink else { return };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                eprintln!(
                    "[LOGGER ERROR] no async runtime, record not delivered: {}",
                    record.message
                );
                return;
            }
        };

        let sink = Arc::clone(sink);
        let tracker = Arc::clone(&self.tracker);
        let metrics = Arc::clone(&self.metrics);

        tracker.begin();
        metrics.record_submitted();
        handle.spawn(async move {
            match sink.submit(&record).await {
                Ok(()) => {
                    metrics.record_delivered();
                }
                Err(e) => {
                    metrics.record_failed();
                    eprintln!("[LOGGER ERROR] {} sink rejected record: {}", sink.name(), e);
                }
            }
            tracker.finish();
        });
    }

    #[inline]
    pub fn error(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Error, args);
    }

    #[inline]
    pub fn warn(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Warn, args);
    }

    #[inline]
    pub fn info(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Info, args);
    }

    #[inline]
    pub fn http(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Http, args);
    }

    #[inline]
    pub fn verbose(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Verbose, args);
    }

    #[inline]
    pub fn debug(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Debug, args);
    }

    #[inline]
    pub fn silly(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Silly, args);
    }

    /// Alias for [`Logger::info`].
    #[inline]
    pub fn log(&self, args: impl IntoCallArgs) {
        self.dispatch(Level::Info, args);
    }

    /// Wait for outstanding submissions to settle and for the sink to
    /// drain, bounded by `timeout`.
    ///
    /// Always returns. With no sink configured this is immediate; when
    /// the timeout elapses first, records still in flight may be lost
    /// and a diagnostic line is the only report. Records submitted
    /// while the flush is waiting may or may not be captured by it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use logship::{create_logger, LoggerConfig, DEFAULT_FLUSH_TIMEOUT};
    ///
    /// # async fn shutdown() {
    /// let logger = create_logger(LoggerConfig::from_env());
    /// logger.info("shutting down");
    /// logger.flush(DEFAULT_FLUSH_TIMEOUT).await;
    /// # }
    /// ```
    pub async fn flush(&self, timeout: Duration) {
        let Some(sink) = &self.sink else { return };

        let wait = async {
            self.tracker.settled().await;
            if let Err(e) = sink.drain().await {
                eprintln!("[LOGGER ERROR] {} sink drain failed: {}", sink.name(), e);
            }
        };

        if tokio::time::timeout(timeout, wait).await.is_err() {
            eprintln!(
                "[LOGGER WARNING] flush timed out after {:?}, records still in flight may be lost",
                timeout
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use logship::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(Level::Debug)
///     .console(ConsoleSink::with_colors(false))
///     .build();
/// logger.info("ready");
/// ```
pub struct LoggerBuilder {
    min_level: Level,
    identity: ServiceIdentity,
    console: ConsoleSink,
    sink: Option<Arc<dyn LogSink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            identity: ServiceIdentity::default(),
            console: ConsoleSink::new(),
            sink: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Set the service identity
    #[must_use = "builder methods return a new value"]
    pub fn identity(mut self, identity: ServiceIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Configure the console sink
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: ConsoleSink) -> Self {
        self.console = console;
        self
    }

    /// Set the delivery sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Set an already-shared delivery sink
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            identity: self.identity,
            min_level: RwLock::new(self.min_level),
            bound: Metadata::new(),
            console: self.console,
            sink: self.sink,
            tracker: Arc::new(DeliveryTracker::new()),
            metrics: Arc::new(DeliveryMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SinkError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    struct RecordingSink {
        records: Mutex<Vec<LogRecord>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LogSink for RecordingSink {
        async fn submit(&self, record: &LogRecord) -> Result<(), SinkError> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        async fn drain(&self) -> Result<(), SinkError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn quiet_builder() -> LoggerBuilder {
        Logger::builder().console(ConsoleSink::with_colors(false))
    }

    #[test]
    fn test_builder_defaults() {
        let logger = quiet_builder().build();
        assert_eq!(logger.min_level(), Level::Info);
        assert!(logger.bound_context().is_empty());
        assert_eq!(logger.metrics().submitted(), 0);
    }

    #[test]
    fn test_set_min_level() {
        let logger = quiet_builder().build();
        logger.set_min_level(Level::Silly);
        assert_eq!(logger.min_level(), Level::Silly);
    }

    #[test]
    fn test_with_merges_context() {
        let logger = quiet_builder().build();
        let derived = logger.with([("a", json!(1))]).with([("a", json!(2)), ("b", json!(3))]);

        assert_eq!(derived.bound_context()["a"], 2);
        assert_eq!(derived.bound_context()["b"], 3);
        assert!(logger.bound_context().is_empty());
    }

    #[test]
    fn test_with_overrides_identity_fields() {
        let logger = quiet_builder().build();
        let derived = logger.with([("service", json!("billing"))]);

        assert_eq!(derived.identity().service, "billing");
        assert_eq!(logger.identity().service, ServiceIdentity::default().service);
        // The environment was not named, so it is inherited.
        assert_eq!(derived.identity().environment, logger.identity().environment);
    }

    #[test]
    fn test_derived_threshold_is_independent() {
        let logger = quiet_builder().min_level(Level::Warn).build();
        let derived = logger.with([("a", json!(1))]);
        assert_eq!(derived.min_level(), Level::Warn);

        derived.set_min_level(Level::Debug);
        assert_eq!(logger.min_level(), Level::Warn);
    }

    #[test]
    fn test_merged_metadata_precedence() {
        let logger = quiet_builder().build().with([("k", json!("bound")), ("x", json!(1))]);

        let mut call = Metadata::new();
        call.insert("k".to_string(), json!("call"));
        let merged = logger.merged_metadata(call);

        assert_eq!(merged["k"], "call");
        assert_eq!(merged["x"], 1);
        assert_eq!(merged["service"], ServiceIdentity::default().service);
        assert!(merged.contains_key("environment"));
        assert!(merged.contains_key("version"));
    }

    #[test]
    fn test_no_runtime_degrades_to_console_only() {
        let sink = RecordingSink::new();
        let logger = quiet_builder().shared_sink(sink.clone()).build();

        // Plain test thread: no tokio runtime to spawn onto.
        logger.info("x");

        assert_eq!(logger.metrics().submitted(), 0);
        assert!(sink.records.lock().is_empty());
    }

    #[tokio::test]
    async fn test_submission_reaches_sink() {
        let sink = RecordingSink::new();
        let logger = quiet_builder().shared_sink(sink.clone()).build();

        logger.info(("x", json!({"k": "v"})));
        logger.flush(DEFAULT_FLUSH_TIMEOUT).await;

        let records = sink.records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "x");
        assert_eq!(records[0].metadata["k"], "v");
        assert!(records[0].metadata.contains_key("timestamp"));
        drop(records);
        assert_eq!(logger.metrics().delivered(), 1);
    }

    #[tokio::test]
    async fn test_flush_without_sink_is_immediate() {
        let logger = quiet_builder().build();
        let started = std::time::Instant::now();
        logger.flush(DEFAULT_FLUSH_TIMEOUT).await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_tracker_settles() {
        let tracker = Arc::new(DeliveryTracker::new());
        tracker.begin();
        assert_eq!(tracker.pending(), 1);

        let waiter = {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.settled().await })
        };
        tracker.finish();
        waiter.await.expect("settled");
        assert_eq!(tracker.pending(), 0);
    }
}
