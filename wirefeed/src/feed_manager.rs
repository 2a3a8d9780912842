use crate::rss_utils::url::is_valid_rss_url;
use crate::types::{AggregatorError, FeedDescriptor, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// The wire services polled when no registry file is given.
const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("Reuters", "https://p.feedblitz.com/t3/Reuters/worldNews.xml"),
    ("BBC World", "http://feeds.bbci.co.uk/news/world/rss.xml"),
    ("Al Jazeera", "https://www.aljazeera.com/xml/rss/all.xml"),
    ("AP News", "https://apnews.com/hub/ap-top-news.rss"),
    ("Deutsche Welle", "https://rss.dw.com/rdf/rss-en-all"),
    ("NPR", "https://feeds.npr.org/1001/rss.xml"),
];

/// Ordered, validated list of feed descriptors. Loaded once per run and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct FeedRegistry {
    feeds: Vec<FeedDescriptor>,
}

impl FeedRegistry {
    pub fn new(feeds: Vec<FeedDescriptor>) -> Result<Self> {
        let mut seen_urls = HashSet::new();

        for feed in &feeds {
            validate_descriptor(feed)?;
            if !seen_urls.insert(feed.url.as_str()) {
                warn!("Feed {} is registered more than once ({})", feed.source, feed.url);
            }
        }

        Ok(Self { feeds })
    }

    pub fn builtin() -> Self {
        Self {
            feeds: DEFAULT_FEEDS
                .iter()
                .map(|(source, url)| FeedDescriptor::new(*source, *url))
                .collect(),
        }
    }

    /// Parse a JSON array of `{"source": ..., "url": ...}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let feeds: Vec<FeedDescriptor> = serde_json::from_str(json)?;
        Self::new(feeds)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        let registry = Self::from_json(&json)?;
        info!("Loaded {} feeds from {}", registry.len(), path.display());
        Ok(registry)
    }

    pub fn feeds(&self) -> &[FeedDescriptor] {
        &self.feeds
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

fn validate_descriptor(feed: &FeedDescriptor) -> Result<()> {
    if feed.source.trim().is_empty() {
        return Err(AggregatorError::InvalidFeed {
            reason: format!("empty source label for {}", feed.url),
        });
    }
    if !is_valid_rss_url(&feed.url) {
        return Err(AggregatorError::InvalidFeed {
            reason: format!("{} has an unusable endpoint: {}", feed.source, feed.url),
        });
    }
    Ok(())
}
