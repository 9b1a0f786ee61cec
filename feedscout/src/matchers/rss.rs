use reqwest::blocking::Client;
use reqwest::StatusCode;
use roxmltree::{Document, Node, ParsingOptions};
use std::time::Duration;
use tracing::trace;

use crate::errors::{SearchError, SearchResult};
use crate::feeds::Feed;
use crate::metrics::RunMetrics;
use crate::results::Match;
use crate::search::matcher::Matcher;
use crate::search::pattern::SearchPattern;

/// Feed type this matcher is registered under
pub const RSS_FEED_TYPE: &str = "rss";

/// One `<item>` of an RSS channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub guid: String,
}

/// The `<channel>` of an RSS document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssChannel {
    pub title: String,
    pub description: String,
    pub link: String,
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssDocument {
    pub channel: RssChannel,
}

/// Fetches an RSS document over HTTP and searches item titles and
/// descriptions. Every fetch is a single attempt bounded by the client
/// timeout.
#[derive(Debug, Clone)]
pub struct RssMatcher {
    client: Client,
    metrics: RunMetrics,
}

impl RssMatcher {
    pub fn new(timeout: Duration) -> SearchResult<Self> {
        Self::with_metrics(timeout, RunMetrics::new())
    }

    pub fn with_metrics(timeout: Duration, metrics: RunMetrics) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feedscout/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, metrics))
    }

    /// Uses a preconfigured HTTP client, e.g. one with custom proxy or TLS settings
    pub fn with_client(client: Client, metrics: RunMetrics) -> Self {
        Self { client, metrics }
    }

    fn retrieve(&self, feed: &Feed) -> SearchResult<RssDocument> {
        if feed.uri.is_empty() {
            return Err(SearchError::missing_uri(&feed.name));
        }

        let response = self.client.get(&feed.uri).send()?;
        if response.status() != StatusCode::OK {
            return Err(SearchError::http_status(
                &feed.uri,
                response.status().as_u16(),
            ));
        }

        let body = response.text()?;
        trace!("Fetched {} bytes from {}", body.len(), feed.uri);
        parse_document(&body)
    }
}

impl Matcher for RssMatcher {
    fn search(&self, feed: &Feed, search_term: &str) -> SearchResult<Vec<Match>> {
        let pattern = SearchPattern::with_metrics(search_term, &self.metrics)?;
        let document = self.retrieve(feed)?;
        Ok(search_document(&document, &pattern))
    }
}

/// Parses an RSS 2.0 document
pub fn parse_document(xml: &str) -> SearchResult<RssDocument> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let root = doc.root_element();
    if root.tag_name().name() != "rss" {
        return Err(SearchError::malformed_document(format!(
            "expected root element 'rss', found '{}'",
            root.tag_name().name()
        )));
    }

    let channel_node = child_element(root, "channel")
        .ok_or_else(|| SearchError::malformed_document("missing <channel> element"))?;

    let mut channel = RssChannel::default();
    for child in channel_node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "title" => channel.title = element_text(child),
            "description" => channel.description = element_text(child),
            "link" => channel.link = element_text(child),
            "item" => channel.items.push(parse_item(child)),
            _ => {}
        }
    }

    Ok(RssDocument { channel })
}

fn parse_item(node: Node) -> RssItem {
    let mut item = RssItem::default();
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "title" => item.title = element_text(child),
            "description" => item.description = element_text(child),
            "link" => item.link = element_text(child),
            "pubDate" => item.pub_date = element_text(child),
            "guid" => item.guid = element_text(child),
            _ => {}
        }
    }
    item
}

/// Tests each item's title, then its description. Every matching field
/// becomes one result, in document order.
pub fn search_document(document: &RssDocument, pattern: &SearchPattern) -> Vec<Match> {
    let mut results = Vec::new();
    for item in &document.channel.items {
        if pattern.is_match(&item.title) {
            results.push(Match::new("Title", item.title.as_str()));
        }
        if pattern.is_match(&item.description) {
            results.push(Match::new("Description", item.description.as_str()));
        }
    }
    results
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

// Character data directly inside the element, untrimmed. CDATA sections are
// text nodes in roxmltree; text inside nested child elements is skipped.
fn element_text(node: Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
