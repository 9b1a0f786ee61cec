//! Error types shared by the registry, the feed loader, and the matchers.
//!
//! Errors fall into two groups. Startup errors (a duplicate matcher
//! registration, an unreadable feed list, a bad configuration) abort the
//! whole run and are handed back to the caller. Per-feed errors (network,
//! status code, malformed document, invalid pattern) never leave the worker
//! that produced them; they are logged and the feed contributes nothing.
//!
//! ```rust,ignore
//! match registry.register("rss", Arc::new(RssMatcher::new(timeout)?)) {
//!     Ok(()) => {}
//!     Err(SearchError::DuplicateMatcher(kind)) => // programmer error, abort
//!     Err(e) => // other startup failure
//! }
//! ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while loading feeds or searching them
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Matcher already registered: {0}")]
    DuplicateMatcher(String),
    #[error("Unable to read feed list {path}: {source}")]
    FeedSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid feed list: {0}")]
    FeedFormat(#[from] serde_json::Error),
    #[error("No rss URI provided for feed {0}")]
    MissingUri(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP Response Error {status} from {uri}")]
    HttpStatus { uri: String, status: u16 },
    #[error("Malformed feed document: {0}")]
    MalformedDocument(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn duplicate_matcher(feed_type: impl Into<String>) -> Self {
        Self::DuplicateMatcher(feed_type.into())
    }

    pub fn feed_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FeedSource {
            path: path.into(),
            source,
        }
    }

    pub fn missing_uri(feed_name: impl Into<String>) -> Self {
        Self::MissingUri(feed_name.into())
    }

    pub fn http_status(uri: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            uri: uri.into(),
            status,
        }
    }

    pub fn malformed_document(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern(pattern.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn worker_pool(msg: impl Into<String>) -> Self {
        Self::WorkerPool(msg.into())
    }
}

impl From<roxmltree::Error> for SearchError {
    fn from(e: roxmltree::Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(e: config::ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}
