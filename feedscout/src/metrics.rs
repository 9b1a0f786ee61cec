use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Counters describing one run. Shared between the orchestrator and its
/// workers; nothing in the run branches on them.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    feeds_dispatched: Arc<AtomicU64>,
    feeds_failed: Arc<AtomicU64>,
    results_sent: Arc<AtomicU64>,

    // Pattern cache metrics
    cache_hits: Arc<AtomicU64>,
    cache_misses: Arc<AtomicU64>,
}

impl RunMetrics {
    /// Creates a new RunMetrics instance
    pub fn new() -> Self {
        Self {
            feeds_dispatched: Arc::new(AtomicU64::new(0)),
            feeds_failed: Arc::new(AtomicU64::new(0)),
            results_sent: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            cache_misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_dispatch(&self) {
        self.feeds_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.feeds_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self, count: usize) {
        self.results_sent.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Records a pattern cache lookup
    pub fn record_cache_operation(&self, hit: bool) {
        if hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn get_stats(&self) -> RunStats {
        RunStats {
            feeds_dispatched: self.feeds_dispatched.load(Ordering::Relaxed),
            feeds_failed: self.feeds_failed.load(Ordering::Relaxed),
            results_sent: self.results_sent.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        debug!(
            "Run stats:\n\
             Feeds dispatched/failed: {}/{}\n\
             Results sent: {}\n\
             Pattern cache hits/misses: {}/{}",
            stats.feeds_dispatched,
            stats.feeds_failed,
            stats.results_sent,
            stats.cache_hits,
            stats.cache_misses
        );
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`RunMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub feeds_dispatched: u64,
    pub feeds_failed: u64,
    pub results_sent: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}
