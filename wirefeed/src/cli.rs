//! Command-line interface for the `wirefeed` binary.

use crate::types::{FetchConfig, PipelineConfig};
use clap::Parser;
use std::path::PathBuf;

/// Aggregate wire-service feeds into one ranked JSON timeline.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Where the JSON artifact is written
    #[arg(short, long, env = "WIREFEED_OUTPUT", default_value = "news.json")]
    pub output: PathBuf,

    /// JSON file listing `{"source", "url"}` feeds; the built-in wire services otherwise
    #[arg(short, long, env = "WIREFEED_FEEDS")]
    pub feeds: Option<PathBuf>,

    /// Entries taken from the front of each feed
    #[arg(long, default_value_t = 15)]
    pub per_source_limit: usize,

    /// Articles kept after ranking
    #[arg(long, default_value_t = 300)]
    pub max_total: usize,

    /// Summary length before it is cut with "..."
    #[arg(
        long,
        default_value_t = 200,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub summary_max_chars: usize,

    /// Seconds a single source may take, retries included
    #[arg(long, default_value_t = 45)]
    pub source_timeout: u64,

    /// Sources fetched at the same time
    #[arg(long, default_value_t = 8)]
    pub max_concurrent: usize,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 20)]
    pub request_timeout: u64,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            per_source_limit: self.per_source_limit,
            max_total: self.max_total,
            summary_max_chars: self.summary_max_chars,
            source_timeout_seconds: self.source_timeout,
            max_concurrent_sources: self.max_concurrent,
            output_path: self.output.clone(),
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout_seconds: self.request_timeout,
            ..FetchConfig::default()
        }
    }
}
