use crate::normalizer::{classify_entry, NormalizeConfig};
use crate::rss_utils::url::extract_domain;
use crate::traits::FetchEntries;
use crate::types::{
    Article, EntryOutcome, FeedDescriptor, PipelineConfig, SourceFailure, SourceOutcome,
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Fetches and normalizes a single source. Every failure is reported through
/// the returned [`SourceOutcome`], never to the caller.
#[derive(Clone)]
pub struct SourceProcessor {
    fetcher: Arc<dyn FetchEntries>,
    normalize: NormalizeConfig,
    per_source_limit: usize,
    source_timeout: Duration,
}

impl SourceProcessor {
    pub fn new(fetcher: Arc<dyn FetchEntries>, config: &PipelineConfig) -> Self {
        Self {
            fetcher,
            normalize: NormalizeConfig::from(config),
            per_source_limit: config.per_source_limit,
            source_timeout: config.source_timeout(),
        }
    }

    pub async fn process(&self, descriptor: &FeedDescriptor) -> SourceOutcome {
        let host = extract_domain(&descriptor.url).unwrap_or_else(|| descriptor.url.clone());
        info!("Scanning {} ({})", descriptor.source, host);

        let fetched = timeout(
            self.source_timeout,
            self.fetcher.fetch_entries(&descriptor.url),
        )
        .await;
        let entries = match fetched {
            Ok(Ok(entries)) if entries.is_empty() => {
                return Self::failed(descriptor, SourceFailure::Empty);
            }
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => return Self::failed(descriptor, SourceFailure::Fetch(e.to_string())),
            Err(_) => return Self::failed(descriptor, SourceFailure::TimedOut(self.source_timeout)),
        };

        let mut articles = Vec::new();
        let mut skipped = 0;

        // Feed-native order; no sorting before the cap
        for entry in entries.iter().take(self.per_source_limit) {
            match classify_entry(&descriptor.source, entry, &self.normalize) {
                EntryOutcome::Normalized(article) => articles.push(article),
                EntryOutcome::Skipped { reason } => {
                    warn!("Skipped entry from {}: {}", descriptor.source, reason);
                    skipped += 1;
                }
            }
        }

        info!(
            "{}: {} articles from {} entries ({} skipped)",
            descriptor.source,
            articles.len(),
            entries.len(),
            skipped
        );

        SourceOutcome::Fetched {
            source: descriptor.source.clone(),
            articles,
            skipped,
        }
    }

    fn failed(descriptor: &FeedDescriptor, reason: SourceFailure) -> SourceOutcome {
        warn!("Failed to parse {}: {}", descriptor.source, reason);
        SourceOutcome::Failed {
            source: descriptor.source.clone(),
            reason,
        }
    }
}

/// Articles collected from every source, plus what went wrong on the way.
#[derive(Debug, Default)]
pub struct AggregationResult {
    pub articles: Vec<Article>,
    pub failed_sources: Vec<(String, SourceFailure)>,
    pub entries_skipped: usize,
    pub sources_total: usize,
}

impl AggregationResult {
    /// Merge per-source outcomes. This is the only place results from
    /// different sources meet.
    pub fn from_outcomes(outcomes: Vec<SourceOutcome>) -> Self {
        let mut result = AggregationResult {
            sources_total: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                SourceOutcome::Fetched { articles, skipped, .. } => {
                    result.entries_skipped += skipped;
                    result.articles.extend(articles);
                }
                SourceOutcome::Failed { source, reason } => {
                    result.failed_sources.push((source, reason));
                }
            }
        }

        result
    }
}

/// Runs the [`SourceProcessor`] over every registered feed.
pub struct Aggregator {
    processor: SourceProcessor,
    max_concurrent_sources: usize,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn FetchEntries>, config: &PipelineConfig) -> Self {
        Self {
            processor: SourceProcessor::new(fetcher, config),
            max_concurrent_sources: config.max_concurrent_sources.max(1),
        }
    }

    /// Process every descriptor, at most `max_concurrent_sources` at a time.
    ///
    /// Each source runs on its own task and hands back an owned outcome, so a
    /// panicking fetcher only loses its own source. Outcomes come back in
    /// registry order.
    pub async fn collect_outcomes(&self, descriptors: &[FeedDescriptor]) -> Vec<SourceOutcome> {
        info!(
            "Aggregating {} sources via {} ({} at a time)",
            descriptors.len(),
            self.processor.fetcher.fetcher_name(),
            self.max_concurrent_sources
        );

        stream::iter(descriptors.iter().cloned())
            .map(|descriptor| {
                let processor = self.processor.clone();
                async move {
                    let source = descriptor.source.clone();
                    match tokio::spawn(async move { processor.process(&descriptor).await }).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            error!("Source task for {} aborted: {}", source, e);
                            SourceOutcome::Failed {
                                source,
                                reason: SourceFailure::Fetch(format!("task aborted: {}", e)),
                            }
                        }
                    }
                }
            })
            .buffered(self.max_concurrent_sources)
            .collect()
            .await
    }

    pub async fn aggregate(&self, descriptors: &[FeedDescriptor]) -> AggregationResult {
        let outcomes = self.collect_outcomes(descriptors).await;
        for outcome in outcomes.iter().filter(|o| o.is_failed()) {
            debug!("Source {} contributed nothing", outcome.source());
        }

        let result = AggregationResult::from_outcomes(outcomes);
        info!(
            "Collected {} articles from {}/{} sources",
            result.articles.len(),
            result.sources_total - result.failed_sources.len(),
            result.sources_total
        );
        result
    }
}
