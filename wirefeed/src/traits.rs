use crate::types::{RawEntry, Result};
use async_trait::async_trait;

/// Capability for turning a feed endpoint into raw entries.
///
/// Implementations fetch and parse whatever syndication format the endpoint
/// serves. An `Err` means the whole endpoint failed; an empty `Vec` means it
/// was reachable but had nothing in it.
#[async_trait]
pub trait FetchEntries: Send + Sync {
    async fn fetch_entries(&self, endpoint: &str) -> Result<Vec<RawEntry>>;

    /// Human-readable name for logs
    fn fetcher_name(&self) -> String {
        "fetcher".to_string()
    }
}
