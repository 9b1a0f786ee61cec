use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::errors::{SearchError, SearchResult};
use crate::metrics::RunMetrics;

const SIMPLE_PATTERN_THRESHOLD: usize = 32;
const PATTERN_CACHE_LIMIT: usize = 1024;

static PATTERN_CACHE: Lazy<PatternCache> = Lazy::new(|| PatternCache::new(PATTERN_CACHE_LIMIT));

/// Compiled terms shared across searches. Holds at most `limit` entries:
/// inserting a new term into a full cache clears it first.
struct PatternCache {
    entries: DashMap<String, MatchStrategy>,
    limit: usize,
}

impl PatternCache {
    fn new(limit: usize) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
        }
    }

    fn get(&self, term: &str) -> Option<MatchStrategy> {
        self.entries.get(term).map(|entry| entry.value().clone())
    }

    fn insert(&self, term: &str, strategy: MatchStrategy) {
        if self.entries.len() >= self.limit && !self.entries.contains_key(term) {
            self.entries.clear();
        }
        self.entries.insert(term.to_string(), strategy);
    }
}

/// Strategy for pattern matching
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    Simple(String),
    Regex(Arc<Regex>),
}

/// A compiled search term.
///
/// Terms are always regular expressions, matched case-sensitively anywhere
/// in the text. A term with no regex metacharacters matches exactly the same
/// texts as its literal substring, so it skips the regex engine.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    strategy: MatchStrategy,
}

impl SearchPattern {
    /// Compiles `term`, reusing a cached compilation when one exists
    pub fn new(term: &str) -> SearchResult<Self> {
        Self::with_metrics(term, &RunMetrics::new())
    }

    pub fn with_metrics(term: &str, metrics: &RunMetrics) -> SearchResult<Self> {
        if let Some(strategy) = PATTERN_CACHE.get(term) {
            metrics.record_cache_operation(true);
            return Ok(Self { strategy });
        }

        let strategy = if Self::is_simple_pattern(term) {
            MatchStrategy::Simple(term.to_string())
        } else {
            let regex = Regex::new(term)
                .map_err(|e| SearchError::invalid_pattern(format!("{}: {}", term, e)))?;
            MatchStrategy::Regex(Arc::new(regex))
        };

        metrics.record_cache_operation(false);
        PATTERN_CACHE.insert(term, strategy.clone());
        Ok(Self { strategy })
    }

    /// Determines if a pattern can use simple string matching
    fn is_simple_pattern(pattern: &str) -> bool {
        pattern.len() < SIMPLE_PATTERN_THRESHOLD
            && !pattern.chars().any(is_regex_meta)
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.strategy {
            MatchStrategy::Simple(pattern) => text.contains(pattern.as_str()),
            MatchStrategy::Regex(regex) => regex.is_match(text),
        }
    }

    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }
}

fn is_regex_meta(c: char) -> bool {
    let mut buf = [0; 4];
    regex::escape(c.encode_utf8(&mut buf)).len() != c.len_utf8()
}
