use crate::aggregator::Aggregator;
use crate::feed_manager::FeedRegistry;
use crate::ranking::rank_articles;
use crate::sources::RssFeedSource;
use crate::state::ArtifactWriter;
use crate::traits::FetchEntries;
use crate::types::{FetchConfig, PipelineConfig, Result, RunReport};
use std::sync::Arc;
use tracing::{error, info};

/// One ingestion pass: registry → aggregation → ranking → artifact.
pub struct IngestionPipeline {
    registry: FeedRegistry,
    aggregator: Aggregator,
    writer: ArtifactWriter,
    config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(
        registry: FeedRegistry,
        fetcher: Arc<dyn FetchEntries>,
        config: PipelineConfig,
    ) -> Self {
        let aggregator = Aggregator::new(fetcher, &config);
        let writer = ArtifactWriter::new(config.output_path.clone());

        Self {
            registry,
            aggregator,
            writer,
            config,
        }
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    /// Run every source, rank what came back and write the artifact.
    ///
    /// Source and entry failures are absorbed; the artifact is written even
    /// when nothing was collected. Only a failed write is returned as an
    /// error.
    pub async fn run(&self) -> Result<RunReport> {
        info!("Starting ingestion pipeline with {} sources", self.registry.len());

        let aggregated = self.aggregator.aggregate(self.registry.feeds()).await;
        let articles_collected = aggregated.articles.len();

        for (source, reason) in &aggregated.failed_sources {
            info!("No articles from {}: {}", source, reason);
        }

        let ranked = rank_articles(aggregated.articles, self.config.max_total);

        if let Err(e) = self.writer.write(&ranked).await {
            error!("Could not persist {} articles: {}", ranked.len(), e);
            return Err(e);
        }

        let report = RunReport {
            sources_total: aggregated.sources_total,
            sources_failed: aggregated.failed_sources.len(),
            entries_skipped: aggregated.entries_skipped,
            articles_collected,
            articles_written: ranked.len(),
            output_path: self.writer.path().to_path_buf(),
        };

        info!(
            "Successfully aggregated {} articles ({} collected, {}/{} sources failed)",
            report.articles_written,
            report.articles_collected,
            report.sources_failed,
            report.sources_total
        );
        Ok(report)
    }
}

/// Pipeline builder for easier configuration
pub struct PipelineBuilder {
    registry: Option<FeedRegistry>,
    fetcher: Option<Arc<dyn FetchEntries>>,
    fetch_config: FetchConfig,
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            fetcher: None,
            fetch_config: FetchConfig::default(),
            config: PipelineConfig::default(),
        }
    }

    pub fn registry(mut self, registry: FeedRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a custom fetcher instead of the HTTP one.
    pub fn fetcher(mut self, fetcher: Arc<dyn FetchEntries>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn fetch_config(mut self, fetch_config: FetchConfig) -> Self {
        self.fetch_config = fetch_config;
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<IngestionPipeline> {
        let registry = self.registry.unwrap_or_else(FeedRegistry::builtin);
        let fetcher: Arc<dyn FetchEntries> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(RssFeedSource::new(self.fetch_config)?),
        };

        Ok(IngestionPipeline::new(registry, fetcher, self.config))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
