use crate::errors::SearchResult;
use crate::feeds::Feed;
use crate::results::Match;

/// A pluggable search over one kind of feed.
///
/// Implementations receive the feed and the raw search term and return every
/// result at once. A failed search returns an error and no partial results.
/// Matchers are shared across worker threads, so they must not keep
/// per-search state in `self`.
pub trait Matcher: Send + Sync {
    fn search(&self, feed: &Feed, search_term: &str) -> SearchResult<Vec<Match>>;
}

/// Fallback for feed types nobody registered. Matches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

impl Matcher for DefaultMatcher {
    fn search(&self, _feed: &Feed, _search_term: &str) -> SearchResult<Vec<Match>> {
        Ok(Vec::new())
    }
}
