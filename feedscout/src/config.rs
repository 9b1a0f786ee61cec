use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{SearchError, SearchResult};

/// Configuration for a feed search run.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.feedscout.yaml` in the current directory
/// 3. Global `$HOME/.config/feedscout/config.yaml`
///
/// # Configuration Format
///
/// ```yaml
/// # Term to search for (regular expression, case-sensitive)
/// search_term: "president"
///
/// # JSON file listing the feeds to search
/// feeds_path: "data/data.json"
///
/// # Worker threads (default: one per feed)
/// worker_threads: 8
///
/// # Per-request timeout for network matchers
/// http_timeout: "30s"
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// A search term given on the command line replaces the configured one,
/// see [`SearchConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The term every feed is searched for
    pub search_term: String,

    /// Location of the feed list
    pub feeds_path: PathBuf,

    /// Size of the worker pool. When unset, every feed gets its own thread.
    pub worker_threads: Option<NonZeroUsize>,

    /// Timeout applied to each feed fetch, in humantime syntax ("30s", "2m")
    pub http_timeout: String,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

pub const DEFAULT_SEARCH_TERM: &str = "president";
pub const DEFAULT_FEEDS_PATH: &str = "data/data.json";

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_term: DEFAULT_SEARCH_TERM.to_string(),
            feeds_path: PathBuf::from(DEFAULT_FEEDS_PATH),
            worker_threads: None,
            http_timeout: "30s".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an optional explicit file.
    /// The explicit file must exist.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            dirs::config_dir().map(|p| p.join("feedscout/config.yaml")),
            Some(PathBuf::from(".feedscout.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: SearchConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Merges CLI arguments with configuration file values. The merged
    /// configuration is validated again, since the CLI term replaces the
    /// one checked at load time.
    pub fn merge_with_cli(mut self, search_term: Option<String>) -> SearchResult<Self> {
        if let Some(term) = search_term {
            self.search_term = term;
        }
        self.validate()?;
        Ok(self)
    }

    /// The fetch timeout as a [`Duration`]
    pub fn http_timeout(&self) -> SearchResult<Duration> {
        humantime::parse_duration(&self.http_timeout).map_err(|e| {
            SearchError::config_error(format!("invalid http_timeout '{}': {}", self.http_timeout, e))
        })
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.search_term.is_empty() {
            return Err(SearchError::config_error("search_term must not be empty"));
        }
        self.http_timeout()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            search_term: "senate"
            feeds_path: "feeds/news.json"
            worker_threads: 4
            http_timeout: "5s"
            log_level: "debug"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.search_term, "senate");
        assert_eq!(config.feeds_path, PathBuf::from("feeds/news.json"));
        assert_eq!(config.worker_threads, NonZeroUsize::new(4));
        assert_eq!(config.http_timeout().unwrap(), Duration::from_secs(5));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_default_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"log_level: \"warn\"\n").unwrap();

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.search_term, DEFAULT_SEARCH_TERM);
        assert_eq!(config.feeds_path, PathBuf::from(DEFAULT_FEEDS_PATH));
        assert_eq!(config.worker_threads, None);
        assert_eq!(config.http_timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_merge_with_cli() {
        let config = SearchConfig::default()
            .merge_with_cli(Some("senate".to_string()))
            .unwrap();
        assert_eq!(config.search_term, "senate");

        let config = SearchConfig::default().merge_with_cli(None).unwrap();
        assert_eq!(config.search_term, DEFAULT_SEARCH_TERM);
    }

    #[test]
    fn test_merge_rejects_empty_cli_term() {
        let result = SearchConfig::default().merge_with_cli(Some(String::new()));
        assert!(matches!(result, Err(SearchError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_timeout() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"http_timeout: \"soon\"\n").unwrap();

        let result = SearchConfig::load_from(Some(&config_path));
        assert!(matches!(result, Err(SearchError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            search_term: []  # Should be string
            worker_threads: "invalid"  # Should be number
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = SearchConfig::load_from(Some(&config_path));
        assert!(result.is_err(), "Expected error loading invalid config");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = SearchConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(result.is_err());
    }
}
