//! Feed-specific utility functions for the ingester

/// URL utilities for feed endpoints
pub mod url {
    use url::Url;

    /// Extract domain from URL
    pub fn extract_domain(url_str: &str) -> Option<String> {
        if let Ok(url) = Url::parse(url_str) {
            url.domain().map(|d| d.to_string())
        } else {
            None
        }
    }

    /// Validate feed URL format
    pub fn is_valid_rss_url(url_str: &str) -> bool {
        if let Ok(url) = Url::parse(url_str) {
            (url.scheme() == "http" || url.scheme() == "https") && url.host_str().is_some()
        } else {
            false
        }
    }
}

/// Time utilities for entry timestamps
pub mod time {
    use crate::types::{ParsedTime, Result};
    use chrono::{DateTime, Duration, NaiveDate, Utc};

    /// Display format for resolved timestamps, e.g. "Nov 14, 22:13".
    pub const DISPLAY_FORMAT: &str = "%b %d, %H:%M";

    /// Shown instead of a date when the entry carried no usable time.
    pub const JUST_NOW: &str = "Just now";

    /// Convert a broken-down UTC time into an instant.
    ///
    /// Fails on structurally impossible values. A leap second (`:60`) is
    /// carried into the next minute, the way `timegm` treats it.
    pub fn to_datetime(parsed: ParsedTime) -> Result<DateTime<Utc>> {
        let (second, carry) = if parsed.second == 60 { (59, 1) } else { (parsed.second, 0) };

        NaiveDate::from_ymd_opt(parsed.year, parsed.month, parsed.day)
            .and_then(|date| date.and_hms_opt(parsed.hour, parsed.minute, second))
            .map(|naive| naive.and_utc() + Duration::seconds(carry))
            .ok_or_else(|| parsed.into())
    }

    /// Break an instant down the way a feed parser exposes it.
    pub fn to_parsed(dt: &DateTime<Utc>) -> ParsedTime {
        use chrono::{Datelike, Timelike};

        ParsedTime {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// Seconds since the epoch with sub-second precision.
    pub fn epoch_seconds(dt: &DateTime<Utc>) -> f64 {
        dt.timestamp_millis() as f64 / 1000.0
    }

    pub fn format_display_date(dt: &DateTime<Utc>) -> String {
        dt.format(DISPLAY_FORMAT).to_string()
    }
}

/// Feed text utilities
pub mod feed {
    /// Appended to summaries cut at the length cap.
    pub const ELLIPSIS: &str = "...";

    /// Keep only the text before the first `<`.
    ///
    /// This is not markup parsing: anything after the first tag-looking
    /// boundary is dropped, including text between later tags.
    pub fn strip_at_first_tag(text: &str) -> &str {
        match text.find('<') {
            Some(idx) => &text[..idx],
            None => text,
        }
    }

    /// Cut `text` to `max_chars` characters, appending [`ELLIPSIS`] when
    /// anything was removed. A zero cap yields an empty string.
    pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
        if max_chars == 0 {
            return String::new();
        }
        match text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
            None => text.to_string(),
        }
    }
}
