use rayon::{ThreadPool, ThreadPoolBuilder};
use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

use super::display::display;
use super::latch::CountdownLatch;
use super::registry::MatcherRegistry;
use super::worker::match_feed;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::feeds::{FeedSource, JsonFeedFile};
use crate::metrics::RunMetrics;
use crate::results::{Match, RunSummary};

/// Searches every feed of a source concurrently and renders the results.
///
/// A run loads the feed list, starts one worker per feed, and renders results
/// on the calling thread until a watcher thread closes the result channel.
/// The watcher owns the original sender and drops it only after the last
/// worker has finished, so the channel closes exactly once and only when no
/// worker can send anymore.
pub struct SearchEngine<'r> {
    registry: &'r MatcherRegistry,
    worker_threads: Option<NonZeroUsize>,
    metrics: RunMetrics,
}

impl<'r> SearchEngine<'r> {
    pub fn new(registry: &'r MatcherRegistry) -> Self {
        Self {
            registry,
            worker_threads: None,
            metrics: RunMetrics::new(),
        }
    }

    /// Caps the worker pool. `None` gives every feed its own thread.
    pub fn with_worker_threads(mut self, worker_threads: Option<NonZeroUsize>) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    pub fn with_metrics(mut self, metrics: RunMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Runs one search. Returns once every worker has finished and every
    /// result has been written to `out`.
    ///
    /// Only a failure to load the feed list (or to start the workers) is an
    /// error; feeds whose search fails simply contribute no results.
    pub fn run<S, W>(&self, source: &S, search_term: &str, out: &mut W) -> SearchResult<RunSummary>
    where
        S: FeedSource + ?Sized,
        W: Write,
    {
        info!("Starting search for {:?}", search_term);

        let feeds = source.retrieve_feeds()?;
        let feed_count = feeds.len();
        debug!("Dispatching {} feeds", feed_count);

        let (results_tx, results_rx) = mpsc::sync_channel::<Match>(0);
        let latch = CountdownLatch::new();
        let pool = self.build_pool(feed_count)?;
        let search_term: Arc<str> = Arc::from(search_term);

        for feed in feeds {
            let matcher = self.registry.resolve(&feed.feed_type);
            info!(
                "Search Feed Type[{}] Site[{}] For Uri[{}]",
                feed.feed_type, feed.name, feed.uri
            );

            // Counted before the spawn so the watcher never sees a premature zero
            let ticket = latch.ticket();
            let results = results_tx.clone();
            let search_term = Arc::clone(&search_term);
            let metrics = self.metrics.clone();
            self.metrics.record_dispatch();

            pool.spawn(move || {
                let _ticket = ticket;
                match_feed(matcher.as_ref(), &feed, &search_term, &results, &metrics);
                drop(results);
            });
        }

        let watcher = thread::Builder::new()
            .name("feedscout-watcher".to_string())
            .spawn({
                let latch = latch.clone();
                move || {
                    latch.wait();
                    debug!("All workers finished, closing result channel");
                    drop(results_tx);
                }
            })?;

        let delivered = display(results_rx, out)?;

        watcher
            .join()
            .map_err(|_| SearchError::worker_pool("completion watcher panicked"))?;

        self.metrics.log_stats();
        info!(
            "Search complete. Rendered {} results from {} feeds",
            delivered, feed_count
        );

        Ok(RunSummary {
            feeds: feed_count,
            delivered,
        })
    }

    fn build_pool(&self, feed_count: usize) -> SearchResult<ThreadPool> {
        let threads = self
            .worker_threads
            .map(NonZeroUsize::get)
            .unwrap_or(feed_count)
            .max(1);

        ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("feedscout-worker-{}", i))
            .panic_handler(|_| error!("Feed worker panicked; its feed contributes no results"))
            .build()
            .map_err(|e| SearchError::worker_pool(e.to_string()))
    }
}

/// Searches the feeds listed at `config.feeds_path` for `config.search_term`
pub fn search<W: Write>(
    config: &SearchConfig,
    registry: &MatcherRegistry,
    out: &mut W,
) -> SearchResult<RunSummary> {
    SearchEngine::new(registry)
        .with_worker_threads(config.worker_threads)
        .run(
            &JsonFeedFile::new(&config.feeds_path),
            &config.search_term,
            out,
        )
}
