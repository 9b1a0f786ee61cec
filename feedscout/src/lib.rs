pub mod config;
pub mod errors;
pub mod feeds;
pub mod matchers;
pub mod metrics;
pub mod results;
pub mod search;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use feeds::{Feed, FeedSource, JsonFeedFile};
pub use results::{Match, RunSummary};
pub use search::{search, Matcher, MatcherRegistry, SearchEngine};
