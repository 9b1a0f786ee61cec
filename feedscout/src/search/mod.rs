//! Concurrent fan-out/fan-in search over a list of feeds.
//!
//! A run has four phases:
//!
//! 1. **Loading**: the feed list comes from a [`FeedSource`](crate::feeds::FeedSource).
//!    Failure aborts the run.
//! 2. **Dispatching**: each feed's matcher is resolved through the
//!    [`MatcherRegistry`] and a worker is started for it on a rayon pool.
//!    The [`CountdownLatch`] is raised before every spawn.
//! 3. **Draining**: a watcher thread waits for the latch to reach zero and
//!    then drops the last sender, closing the result channel.
//! 4. **Done**: the collector on the calling thread sees the closed channel
//!    and returns.
//!
//! ```rust,ignore
//! let mut registry = MatcherRegistry::new();
//! registry.register("rss", Arc::new(RssMatcher::new(timeout)?))?;
//!
//! let summary = SearchEngine::new(&registry)
//!     .run(&JsonFeedFile::new("data/data.json"), "president", &mut io::stdout())?;
//! ```
//!
//! Results of one feed arrive in the order its matcher produced them;
//! results of different feeds interleave arbitrarily. There is no
//! cancellation: a matcher that never returns keeps the run open.
pub mod display;
pub mod engine;
pub mod latch;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod worker;

pub use display::display;
pub use engine::{search, SearchEngine};
pub use latch::{CountdownLatch, LatchTicket};
pub use matcher::{DefaultMatcher, Matcher};
pub use pattern::SearchPattern;
pub use registry::{MatcherRegistry, DEFAULT_MATCHER};
pub use worker::match_feed;
