use crate::rss_utils::time;
use crate::types::{AggregatorError, RawEntry, Result};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

/// Turns a feed document (RSS, Atom or JSON Feed) into raw entries, leaving
/// every field optional the way the document had it.
#[derive(Debug, Default)]
pub struct FeedParser;

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_feed(&self, content: &[u8]) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::raw_entry).collect();

        debug!("Parsed feed {:?} with {} entries", title, entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn raw_entry(entry: feed_rs::model::Entry) -> RawEntry {
        let title = entry.title.map(|t| t.content);
        let link = entry.links.into_iter().next().map(|l| l.href);

        let summary = entry.summary.map(|s| s.content);
        // Full content stands in for a description when the feed has one
        let description = entry.content.and_then(|c| c.body);

        let published_parsed = entry.published.map(|dt| time::to_parsed(&dt.with_timezone(&Utc)));
        let updated_parsed = entry.updated.map(|dt| time::to_parsed(&dt.with_timezone(&Utc)));

        RawEntry {
            title,
            link,
            summary,
            description,
            published_parsed,
            updated_parsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>World News</title>
    <link>https://example.com</link>
    <description>Wire</description>
    <item>
      <title>Summit opens</title>
      <link>https://example.com/summit</link>
      <description>Leaders arrive &lt;img src="x"&gt;</description>
      <pubDate>Tue, 14 Nov 2023 22:13:20 GMT</pubDate>
    </item>
    <item>
      <description>Untitled and undated</description>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom wire</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2023-11-14T22:13:20Z</updated>
  <entry>
    <title>Only updated</title>
    <link href="https://example.com/atom/1"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2023-11-14T22:13:20Z</updated>
    <summary>Atom summary</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_entries() {
        let parsed = FeedParser::new().parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("World News"));
        assert_eq!(parsed.entries.len(), 2);

        let first = &parsed.entries[0];
        assert_eq!(first.title.as_deref(), Some("Summit opens"));
        assert_eq!(first.link.as_deref(), Some("https://example.com/summit"));
        assert!(first.summary.as_deref().unwrap_or("").starts_with("Leaders arrive"));
        let published = first.published_parsed.expect("pubDate should parse");
        assert_eq!(time::to_datetime(published).unwrap().timestamp(), 1_700_000_000);

        let second = &parsed.entries[1];
        assert_eq!(second.title, None);
        assert_eq!(second.link, None);
        assert_eq!(second.published_parsed, None);
    }

    #[test]
    fn test_parse_atom_updated_only() {
        let parsed = FeedParser::new().parse_feed(ATOM.as_bytes()).unwrap();
        assert_eq!(parsed.entries.len(), 1);

        let entry = &parsed.entries[0];
        assert_eq!(entry.published_parsed, None);
        assert!(entry.updated_parsed.is_some());
        assert_eq!(entry.summary.as_deref(), Some("Atom summary"));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let result = FeedParser::new().parse_feed(b"this is not a feed");
        assert!(matches!(result, Err(AggregatorError::Parse(_))));
    }
}
