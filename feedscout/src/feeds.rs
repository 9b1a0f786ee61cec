//! Feed descriptors and the sources that load them.
//!
//! The persisted feed list is a JSON array:
//! ```json
//! [
//!     { "site": "npr", "link": "http://www.npr.org/rss/rss.php?id=1001", "type": "rss" }
//! ]
//! ```
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// A named, typed, addressable content source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(rename = "site")]
    pub name: String,
    #[serde(rename = "link")]
    pub uri: String,
    #[serde(rename = "type")]
    pub feed_type: String,
}

impl Feed {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        feed_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            feed_type: feed_type.into(),
        }
    }
}

/// Anything that can produce the list of feeds for a run
pub trait FeedSource {
    fn retrieve_feeds(&self) -> SearchResult<Vec<Feed>>;
}

/// Loads feeds from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFeedFile {
    path: PathBuf,
}

impl JsonFeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for JsonFeedFile {
    fn retrieve_feeds(&self) -> SearchResult<Vec<Feed>> {
        let file =
            File::open(&self.path).map_err(|e| SearchError::feed_source(&self.path, e))?;
        let feeds: Vec<Feed> = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} feeds from {}", feeds.len(), self.path.display());
        Ok(feeds)
    }
}

impl FeedSource for Vec<Feed> {
    fn retrieve_feeds(&self) -> SearchResult<Vec<Feed>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_feed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"[
                {"site": "npr", "link": "http://www.npr.org/rss/rss.php?id=1001", "type": "rss"},
                {"site": "local", "link": "", "type": "unknown"}
            ]"#,
        )
        .unwrap();

        let feeds = JsonFeedFile::new(&path).retrieve_feeds().unwrap();
        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0].name, "npr");
        assert_eq!(feeds[0].uri, "http://www.npr.org/rss/rss.php?id=1001");
        assert_eq!(feeds[0].feed_type, "rss");
        assert_eq!(feeds[1].feed_type, "unknown");
    }

    #[test]
    fn test_empty_feed_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "[]").unwrap();

        let feeds = JsonFeedFile::new(&path).retrieve_feeds().unwrap();
        assert!(feeds.is_empty());
    }

    #[test]
    fn test_missing_feed_file() {
        let result = JsonFeedFile::new("nonexistent/data.json").retrieve_feeds();
        assert!(matches!(result, Err(SearchError::FeedSource { .. })));
    }

    #[test]
    fn test_invalid_feed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"site": 1}]"#).unwrap();

        let result = JsonFeedFile::new(&path).retrieve_feeds();
        assert!(matches!(result, Err(SearchError::FeedFormat(_))));
    }

    #[test]
    fn test_in_memory_source() {
        let feeds = vec![Feed::new("a", "http://a", "rss")];
        assert_eq!(feeds.retrieve_feeds().unwrap(), feeds);
    }
}
