//! Built-in matcher plugins.
//!
//! Each plugin implements [`Matcher`](crate::search::Matcher) and is made
//! available by registering it under its feed type before the first run.
pub mod rss;

pub use rss::{RssMatcher, RSS_FEED_TYPE};

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::metrics::RunMetrics;
use crate::search::MatcherRegistry;

/// Registers every built-in matcher, configured from `config`
pub fn register_builtin(
    registry: &mut MatcherRegistry,
    config: &SearchConfig,
    metrics: &RunMetrics,
) -> SearchResult<()> {
    let rss = RssMatcher::with_metrics(config.http_timeout()?, metrics.clone())?;
    registry.register(RSS_FEED_TYPE, Arc::new(rss))?;
    Ok(())
}
