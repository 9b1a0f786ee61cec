use std::sync::mpsc::SyncSender;
use tracing::{trace, warn};

use super::matcher::Matcher;
use crate::feeds::Feed;
use crate::metrics::RunMetrics;
use crate::results::Match;

/// Runs one matcher against one feed and forwards its results.
///
/// A matcher error is logged and the feed contributes nothing; it never
/// reaches the caller. On success every result is sent in the order the
/// matcher produced it, blocking until the collector takes it. Returns the
/// number of results delivered.
pub fn match_feed(
    matcher: &dyn Matcher,
    feed: &Feed,
    search_term: &str,
    results: &SyncSender<Match>,
    metrics: &RunMetrics,
) -> usize {
    let matches = match matcher.search(feed, search_term) {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Search of feed {} ({}) failed: {}", feed.name, feed.uri, e);
            metrics.record_failure();
            return 0;
        }
    };

    trace!("Feed {} produced {} results", feed.name, matches.len());

    let mut delivered = 0;
    for result in matches {
        if results.send(result).is_err() {
            // Collector is gone; nobody is left to read the rest
            warn!("Result channel closed while sending results for {}", feed.name);
            break;
        }
        delivered += 1;
    }

    metrics.record_sent(delivered);
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{SearchError, SearchResult};
    use std::sync::mpsc;
    use std::thread;

    struct ListMatcher(Vec<Match>);

    impl Matcher for ListMatcher {
        fn search(&self, _feed: &Feed, _search_term: &str) -> SearchResult<Vec<Match>> {
            Ok(self.0.clone())
        }
    }

    struct FailingMatcher;

    impl Matcher for FailingMatcher {
        fn search(&self, feed: &Feed, _search_term: &str) -> SearchResult<Vec<Match>> {
            Err(SearchError::http_status(&feed.uri, 503))
        }
    }

    fn feed() -> Feed {
        Feed::new("test", "http://example.com/rss", "mock")
    }

    #[test]
    fn test_results_sent_in_order() {
        let matcher = ListMatcher(vec![
            Match::new("Title", "one"),
            Match::new("Description", "two"),
            Match::new("Title", "three"),
        ]);
        let metrics = RunMetrics::new();
        let (tx, rx) = mpsc::sync_channel(0);

        let handle = thread::spawn(move || match_feed(&matcher, &feed(), "x", &tx, &metrics));

        let received: Vec<String> = rx.iter().map(|m| m.content).collect();
        assert_eq!(received, vec!["one", "two", "three"]);
        assert_eq!(handle.join().unwrap(), 3);
    }

    #[test]
    fn test_error_sends_nothing() {
        let metrics = RunMetrics::new();
        let (tx, rx) = mpsc::sync_channel(0);

        let delivered = match_feed(&FailingMatcher, &feed(), "x", &tx, &metrics);
        drop(tx);

        assert_eq!(delivered, 0);
        assert!(rx.recv().is_err());
        assert_eq!(metrics.get_stats().feeds_failed, 1);
    }

    #[test]
    fn test_closed_channel_stops_worker() {
        let matcher = ListMatcher(vec![Match::new("Title", "lost")]);
        let metrics = RunMetrics::new();
        let (tx, rx) = mpsc::sync_channel(0);
        drop(rx);

        assert_eq!(match_feed(&matcher, &feed(), "x", &tx, &metrics), 0);
    }
}
