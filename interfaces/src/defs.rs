use serde::{Deserialize, Serialize};

/// A configured syndication source: the label shown on every article and the
/// endpoint its feed is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub source: String,
    pub url: String,
}

impl FeedDescriptor {
    pub fn new(source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            url: url.into(),
        }
    }
}

/// Broken-down UTC time as exposed by a feed parser.
///
/// Nothing guarantees the fields describe a real instant; a feed may carry a
/// month of 13 or a February 30th. Consumers validate on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// One entry as handed over by the fetcher, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub published_parsed: Option<ParsedTime>,
    pub updated_parsed: Option<ParsedTime>,
}

/// The canonical record written to the output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub timestamp: f64,
    pub date: String,
}

// Object style note:
// Fetchers and writers built on these types run inside a single short-lived
// pass. They hold configuration, never articles from a previous run; the
// artifact on disk is the only state that outlives the process.
