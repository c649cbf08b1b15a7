//! Delivery metrics for observability
//!
//! Counters for monitoring the asynchronous remote-delivery path:
//! how many records were submitted, how many the sink accepted, and
//! how many submissions were rejected.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the remote-delivery path.
///
/// Shared between a logger and its derived loggers, since they share
/// one sink.
///
/// # Example
///
/// ```
/// use logship::DeliveryMetrics;
///
/// let metrics = DeliveryMetrics::new();
///
/// metrics.record_submitted();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.failed(), 0);
/// ```
#[derive(Debug)]
pub struct DeliveryMetrics {
    /// Records handed to the sink for asynchronous delivery
    submitted: AtomicU64,

    /// Submissions the sink accepted
    delivered: AtomicU64,

    /// Submissions the sink rejected
    failed: AtomicU64,
}

impl DeliveryMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Record a submission handed to the sink
    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an accepted submission
    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a rejected submission
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been submitted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let submitted = self.submitted() as f64;
        if submitted == 0.0 {
            0.0
        } else {
            (failed / submitted) * 100.0
        }
    }
}

impl Default for DeliveryMetrics {
    fn default() -> Self {
        Self::new()
    }
}
