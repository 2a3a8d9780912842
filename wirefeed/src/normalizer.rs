use crate::rss_utils::{feed, time};
use crate::types::{Article, EntryOutcome, PipelineConfig, RawEntry, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

pub const NO_TITLE: &str = "No Title";
pub const NO_LINK: &str = "#";

/// Settings the normalizer needs from the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeConfig {
    pub summary_max_chars: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            summary_max_chars: 200,
        }
    }
}

impl From<&PipelineConfig> for NormalizeConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            summary_max_chars: config.summary_max_chars,
        }
    }
}

/// Where an article's timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedTime {
    Published(DateTime<Utc>),
    Updated(DateTime<Utc>),
    Now(DateTime<Utc>),
}

impl ResolvedTime {
    pub fn instant(&self) -> &DateTime<Utc> {
        match self {
            ResolvedTime::Published(dt) | ResolvedTime::Updated(dt) | ResolvedTime::Now(dt) => dt,
        }
    }

    pub fn display(&self) -> String {
        match self {
            ResolvedTime::Now(_) => time::JUST_NOW.to_string(),
            other => time::format_display_date(other.instant()),
        }
    }
}

/// Pick the entry's timestamp: published, then updated, then the current
/// time. Entries without any time deliberately rank as newest.
///
/// A present but impossible time is an error rather than a reason to fall
/// through to the next candidate.
pub fn resolve_timestamp(entry: &RawEntry) -> Result<ResolvedTime> {
    if let Some(published) = entry.published_parsed {
        return Ok(ResolvedTime::Published(time::to_datetime(published)?));
    }
    if let Some(updated) = entry.updated_parsed {
        return Ok(ResolvedTime::Updated(time::to_datetime(updated)?));
    }
    Ok(ResolvedTime::Now(Utc::now()))
}

/// Summary text with tags cut off and the length capped.
pub fn sanitize_summary(entry: &RawEntry, max_chars: usize) -> String {
    let raw = entry
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(entry.description.as_deref())
        .unwrap_or("");

    feed::truncate_with_ellipsis(feed::strip_at_first_tag(raw), max_chars)
}

fn non_empty_or(value: Option<&str>, sentinel: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(sentinel)
        .to_string()
}

/// Convert one raw entry into an [`Article`].
pub fn normalize_entry(
    source: &str,
    entry: &RawEntry,
    config: &NormalizeConfig,
) -> Result<Article> {
    let resolved = resolve_timestamp(entry)?;

    Ok(Article {
        source: source.to_string(),
        title: non_empty_or(entry.title.as_deref(), NO_TITLE),
        link: non_empty_or(entry.link.as_deref(), NO_LINK),
        summary: sanitize_summary(entry, config.summary_max_chars),
        timestamp: time::epoch_seconds(resolved.instant()),
        date: resolved.display(),
    })
}

/// [`normalize_entry`], with failure turned into a skip.
pub fn classify_entry(source: &str, entry: &RawEntry, config: &NormalizeConfig) -> EntryOutcome {
    match normalize_entry(source, entry, config) {
        Ok(article) => EntryOutcome::Normalized(article),
        Err(e) => {
            debug!("Skipping entry {:?} from {}: {}", entry.title, source, e);
            EntryOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParsedTime;
    use chrono::TimeZone;

    fn at(secs: i64) -> ParsedTime {
        time::to_parsed(&Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn config() -> NormalizeConfig {
        NormalizeConfig::default()
    }

    #[test]
    fn test_published_time_wins() {
        let entry = RawEntry {
            title: Some("Summit opens".to_string()),
            link: Some("https://example.com/a".to_string()),
            published_parsed: Some(at(1_700_000_000)),
            ..Default::default()
        };

        let article = normalize_entry("Reuters", &entry, &config()).unwrap();
        assert_eq!(article.timestamp, 1_700_000_000.0);
        assert_eq!(article.date, "Nov 14, 22:13");
        assert_ne!(article.date, time::JUST_NOW);
        assert_eq!(article.source, "Reuters");
    }

    #[test]
    fn test_updated_time_used_when_published_missing() {
        let entry = RawEntry {
            updated_parsed: Some(at(1_600_000_000)),
            ..Default::default()
        };

        let article = normalize_entry("NPR", &entry, &config()).unwrap();
        assert_eq!(article.timestamp, 1_600_000_000.0);
        assert_ne!(article.date, time::JUST_NOW);
    }

    #[test]
    fn test_published_preferred_over_updated() {
        let entry = RawEntry {
            published_parsed: Some(at(1_000)),
            updated_parsed: Some(at(2_000)),
            ..Default::default()
        };

        let article = normalize_entry("NPR", &entry, &config()).unwrap();
        assert_eq!(article.timestamp, 1_000.0);
    }

    #[test]
    fn test_missing_times_fall_back_to_now() {
        let before = Utc::now().timestamp() as f64;
        let article = normalize_entry("BBC World", &RawEntry::default(), &config()).unwrap();
        let after = Utc::now().timestamp() as f64;

        assert_eq!(article.date, "Just now");
        assert!(article.timestamp.is_finite());
        assert!(article.timestamp >= before - 1.0 && article.timestamp <= after + 1.0);
    }

    #[test]
    fn test_impossible_published_time_is_an_error() {
        let entry = RawEntry {
            published_parsed: Some(ParsedTime {
                year: 2024,
                month: 2,
                day: 31,
                hour: 0,
                minute: 0,
                second: 0,
            }),
            updated_parsed: Some(at(1_000)),
            ..Default::default()
        };

        assert!(normalize_entry("AP News", &entry, &config()).is_err());
        assert!(matches!(
            classify_entry("AP News", &entry, &config()),
            EntryOutcome::Skipped { .. }
        ));
    }

    #[test]
    fn test_sentinels_for_missing_title_and_link() {
        let article = normalize_entry("DW", &RawEntry::default(), &config()).unwrap();
        assert_eq!(article.title, NO_TITLE);
        assert_eq!(article.link, NO_LINK);
        assert_eq!(article.summary, "");

        let empty = RawEntry {
            title: Some(String::new()),
            link: Some(String::new()),
            ..Default::default()
        };
        let article = normalize_entry("DW", &empty, &config()).unwrap();
        assert_eq!(article.title, NO_TITLE);
        assert_eq!(article.link, NO_LINK);
    }

    #[test]
    fn test_summary_strips_at_first_tag() {
        let entry = RawEntry {
            summary: Some("Breaking news happens <img src=x>".to_string()),
            ..Default::default()
        };
        assert_eq!(sanitize_summary(&entry, 200), "Breaking news happens ");
    }

    #[test]
    fn test_summary_falls_back_to_description() {
        let entry = RawEntry {
            summary: Some(String::new()),
            description: Some("From the description".to_string()),
            ..Default::default()
        };
        assert_eq!(sanitize_summary(&entry, 200), "From the description");

        let entry = RawEntry {
            description: Some("Only description".to_string()),
            ..Default::default()
        };
        assert_eq!(sanitize_summary(&entry, 200), "Only description");
    }

    #[test]
    fn test_summary_is_capped_with_ellipsis() {
        let long = "x".repeat(250);
        let entry = RawEntry {
            summary: Some(long),
            ..Default::default()
        };

        let summary = sanitize_summary(&entry, 200);
        assert_eq!(summary.chars().count(), 203);
        assert!(summary.ends_with("..."));

        let exact = RawEntry {
            summary: Some("y".repeat(200)),
            ..Default::default()
        };
        assert!(!sanitize_summary(&exact, 200).ends_with("..."));
    }

    #[test]
    fn test_tag_only_summary_has_no_ellipsis() {
        let entry = RawEntry {
            summary: Some("<p>all markup</p>".to_string()),
            ..Default::default()
        };
        assert_eq!(sanitize_summary(&entry, 200), "");
    }
}
