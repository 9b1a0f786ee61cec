use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::matcher::{DefaultMatcher, Matcher};
use crate::errors::{SearchError, SearchResult};

/// Name under which the fallback matcher is registered
pub const DEFAULT_MATCHER: &str = "default";

/// Maps feed types to the matcher that searches them.
///
/// Built once at startup and only read afterwards, so workers resolve
/// matchers without any locking. A [`DefaultMatcher`] is always present
/// under [`DEFAULT_MATCHER`].
pub struct MatcherRegistry {
    matchers: HashMap<String, Arc<dyn Matcher>>,
}

impl MatcherRegistry {
    /// Creates a registry holding only the default matcher
    pub fn new() -> Self {
        let mut matchers: HashMap<String, Arc<dyn Matcher>> = HashMap::new();
        matchers.insert(DEFAULT_MATCHER.to_string(), Arc::new(DefaultMatcher));
        Self { matchers }
    }

    /// Registers `matcher` for `feed_type`. Registering a type twice is a
    /// configuration bug and callers should treat the error as fatal.
    pub fn register(
        &mut self,
        feed_type: impl Into<String>,
        matcher: Arc<dyn Matcher>,
    ) -> SearchResult<()> {
        let feed_type = feed_type.into();
        if self.matchers.contains_key(&feed_type) {
            return Err(SearchError::duplicate_matcher(feed_type));
        }

        info!("Register {} matcher", feed_type);
        self.matchers.insert(feed_type, matcher);
        Ok(())
    }

    /// Returns the matcher for `feed_type`, or the default matcher when the
    /// type is unknown
    pub fn resolve(&self, feed_type: &str) -> Arc<dyn Matcher> {
        match self.matchers.get(feed_type) {
            Some(matcher) => Arc::clone(matcher),
            None => {
                debug!("No matcher for feed type {}, using default", feed_type);
                Arc::clone(&self.matchers[DEFAULT_MATCHER])
            }
        }
    }

    pub fn contains(&self, feed_type: &str) -> bool {
        self.matchers.contains_key(feed_type)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Never true: the default matcher is always registered
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Registered feed types, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.matchers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherRegistry")
            .field("types", &self.types())
            .finish()
    }
}
