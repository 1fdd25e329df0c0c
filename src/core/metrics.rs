//! Logger metrics for observability
//!
//! Counters describing dispatch activity. Provider failures are counted,
//! never retained or surfaced to the caller of a log method.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use fanout_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_write();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.records_dispatched(), 1);
/// assert_eq!(metrics.failure_rate(), 100.0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records that entered the dispatch path
    records_dispatched: AtomicU64,

    /// Provider `write` calls attempted
    provider_writes: AtomicU64,

    /// Provider `write` calls that returned an error
    write_failures: AtomicU64,

    /// Provider `write` calls that panicked
    write_panics: AtomicU64,

    /// Provider visits skipped by the provider's level filter
    filtered: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_dispatched: AtomicU64::new(0),
            provider_writes: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            write_panics: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_dispatched(&self) -> u64 {
        self.records_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn provider_writes(&self) -> u64 {
        self.provider_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_panics(&self) -> u64 {
        self.write_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.records_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write(&self) -> u64 {
        self.provider_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_panic(&self) -> u64 {
        self.write_panics.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of provider writes that failed or panicked, as a percentage
    ///
    /// Returns 0.0 if no writes have been attempted.
    pub fn failure_rate(&self) -> f64 {
        let writes = self.provider_writes();
        if writes == 0 {
            return 0.0;
        }
        let failed = self.write_failures() + self.write_panics();
        (failed as f64 / writes as f64) * 100.0
    }
}
