use std::path::PathBuf;
use std::time::Duration;

// Use the interfaces crate for core types
pub use interfaces::defs::{Article, FeedDescriptor, ParsedTime, RawEntry};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "wirefeed/0.1".to_string(),
            timeout_seconds: 20,
            max_retries: 2,
            retry_delay_seconds: 1,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

/// Caps and limits for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Entries taken from the front of each feed.
    pub per_source_limit: usize,
    /// Articles kept after ranking.
    pub max_total: usize,
    /// Summary length in characters before the ellipsis is appended.
    pub summary_max_chars: usize,
    pub source_timeout_seconds: u64,
    pub max_concurrent_sources: usize,
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            per_source_limit: 15,
            max_total: 300,
            summary_max_chars: 200,
            source_timeout_seconds: 45,
            max_concurrent_sources: 8,
            output_path: PathBuf::from("news.json"),
        }
    }
}

impl PipelineConfig {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_seconds)
    }
}

/// Result of normalizing a single raw entry.
#[derive(Debug, Clone)]
pub enum EntryOutcome {
    Normalized(Article),
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceFailure {
    Fetch(String),
    Empty,
    TimedOut(Duration),
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFailure::Fetch(reason) => write!(f, "fetch failed: {}", reason),
            SourceFailure::Empty => write!(f, "feed returned no entries"),
            SourceFailure::TimedOut(after) => write!(f, "timed out after {:?}", after),
        }
    }
}

/// Result of processing one feed descriptor. Never an error: failures are
/// carried as data so sibling sources are unaffected.
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    Fetched {
        source: String,
        articles: Vec<Article>,
        skipped: usize,
    },
    Failed {
        source: String,
        reason: SourceFailure,
    },
}

impl SourceOutcome {
    pub fn source(&self) -> &str {
        match self {
            SourceOutcome::Fetched { source, .. } | SourceOutcome::Failed { source, .. } => source,
        }
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            SourceOutcome::Fetched { articles, .. } => articles,
            SourceOutcome::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed { .. })
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub sources_total: usize,
    pub sources_failed: usize,
    pub entries_skipped: usize,
    pub articles_collected: usize,
    pub articles_written: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid feed descriptor: {reason}")]
    InvalidFeed { reason: String },

    #[error("Impossible time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

impl From<ParsedTime> for AggregatorError {
    fn from(t: ParsedTime) -> Self {
        AggregatorError::InvalidTime {
            year: t.year,
            month: t.month,
            day: t.day,
            hour: t.hour,
            minute: t.minute,
            second: t.second,
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
