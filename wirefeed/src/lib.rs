pub mod aggregator;
pub mod cli;
pub mod feed_manager;
pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod ranking;
pub mod rss_utils;
pub mod sources;
pub mod state;
pub mod traits;
pub mod types;

pub use aggregator::{AggregationResult, Aggregator, SourceProcessor};
pub use feed_manager::FeedRegistry;
pub use fetcher::Fetcher;
pub use normalizer::{classify_entry, normalize_entry, NormalizeConfig};
pub use parser::FeedParser;
pub use pipeline::{IngestionPipeline, PipelineBuilder};
pub use ranking::rank_articles;
pub use sources::RssFeedSource;
pub use state::ArtifactWriter;
pub use traits::FetchEntries;
pub use types::*;
