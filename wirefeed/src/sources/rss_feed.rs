use crate::traits::FetchEntries;
use crate::types::{FetchConfig, RawEntry, Result};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use tracing::{debug, info};

/// Feed fetcher backed by HTTP and `feed-rs`.
pub struct RssFeedSource {
    fetcher: Fetcher,
    parser: FeedParser,
}

impl RssFeedSource {
    pub fn new(fetch_config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(fetch_config)?,
            parser: FeedParser::new(),
        })
    }
}

#[async_trait]
impl FetchEntries for RssFeedSource {
    async fn fetch_entries(&self, endpoint: &str) -> Result<Vec<RawEntry>> {
        debug!("Pulling feed: {}", endpoint);

        let content = self.fetcher.fetch_feed(endpoint).await?;
        let parsed = self.parser.parse_feed(content.as_bytes())?;

        info!(
            "Pulled {} entries from {} ({})",
            parsed.entries.len(),
            endpoint,
            parsed.title.as_deref().unwrap_or("untitled feed")
        );
        Ok(parsed.entries)
    }

    fn fetcher_name(&self) -> String {
        format!("http ({})", self.fetcher.config().user_agent)
    }
}
