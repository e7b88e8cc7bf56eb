//! Best-effort chronological ordering of aggregated news.
//!
//! Feeds publish dates in a zoo of formats, so [`parse_published`] tries a
//! sequence of layouts from strict to loose. Sorting is all-or-nothing: one
//! unparseable date abandons the sort and the caller keeps fetch order.
//!
//! # Accepted Layouts
//!
//! - RFC 2822, with or without weekday, named (`GMT`, `UT`, `EST`) or numeric zones
//! - RFC 3339 / ISO 8601 with `T` or a space, optional fraction, `Z` or numeric offset
//! - Naive date-times and bare `YYYY-MM-DD` dates, read as UTC

use crate::models::{MISSING_FIELD, NewsItem};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const OFFSET_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M %z",
    "%d %B %Y %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const UTC_ZONE_NAMES: &[&str] = &["GMT", "UTC", "UT", "Z"];

/// Parse a feed publication date in any of the supported layouts.
///
/// Returns `None` when no layout matches.
///
/// # Examples
///
/// ```ignore
/// assert!(parse_published("Wed, 01 Jan 2025 10:00:00 GMT").is_some());
/// assert!(parse_published("2025-01-01T10:00:00+03:00").is_some());
/// assert!(parse_published("yesterday").is_none());
/// ```
pub fn parse_published(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let zoned = normalize_zone(strip_weekday(s));
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

// "Tue, 01 Jan 2025 ..." -> "01 Jan 2025 ..."; covers feeds whose weekday
// disagrees with the date.
fn strip_weekday(s: &str) -> &str {
    match s.split_once(',') {
        Some((day, rest)) if !day.is_empty() && day.chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => s,
    }
}

fn normalize_zone(s: &str) -> String {
    match s.rsplit_once(' ') {
        Some((head, zone)) if UTC_ZONE_NAMES.contains(&zone.to_ascii_uppercase().as_str()) => {
            format!("{head} +0000")
        }
        _ => s.to_string(),
    }
}

/// Sort items newest first by their `published` date.
///
/// Items whose `published` is exactly `"N/A"` rank as the oldest possible
/// value. Equal dates keep their fetch order.
///
/// # Returns
///
/// `Ok(sorted)` when every other date parsed, or `Err(items)` with the input
/// untouched as soon as one date does not.
pub fn sort_by_published(items: Vec<NewsItem>) -> Result<Vec<NewsItem>, Vec<NewsItem>> {
    let keys: Option<Vec<Option<DateTime<FixedOffset>>>> = items
        .iter()
        .map(|item| {
            if item.published == MISSING_FIELD {
                Some(None)
            } else {
                parse_published(&item.published).map(Some)
            }
        })
        .collect();
    let Some(keys) = keys else {
        return Err(items);
    };

    let mut keyed: Vec<_> = keys.into_iter().zip(items).collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(title: &str, published: &str) -> NewsItem {
        NewsItem {
            source: "Test".to_string(),
            title: title.to_string(),
            link: "#".to_string(),
            published: published.to_string(),
            summary: "N/A".to_string(),
        }
    }

    fn titles(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_rfc2822_variants() {
        let expected = utc(2025, 1, 1, 10, 0, 0);
        for raw in [
            "Wed, 01 Jan 2025 10:00:00 GMT",
            "Wed, 01 Jan 2025 10:00:00 +0000",
            "Wed, 01 Jan 2025 13:00:00 +0300",
            "01 Jan 2025 10:00:00 GMT",
            "  Wed, 01 Jan 2025 10:00:00 GMT  ",
        ] {
            let parsed = parse_published(raw).unwrap_or_else(|| panic!("failed on {raw:?}"));
            assert_eq!(parsed.with_timezone(&Utc), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_tolerates_wrong_weekday() {
        let parsed = parse_published("Tue, 01 Jan 2025 10:00:00 GMT").unwrap();
        assert_eq!(parsed.with_timezone(&Utc), utc(2025, 1, 1, 10, 0, 0));
    }

    #[test]
    fn test_parse_iso8601_variants() {
        let expected = utc(2025, 1, 1, 10, 0, 0);
        for raw in [
            "2025-01-01T10:00:00Z",
            "2025-01-01T13:00:00+03:00",
            "2025-01-01T10:00:00.000Z",
            "2025-01-01 10:00:00",
            "2025-01-01T10:00:00",
            "2025-01-01 13:00:00 +0300",
        ] {
            let parsed = parse_published(raw).unwrap_or_else(|| panic!("failed on {raw:?}"));
            assert_eq!(parsed.with_timezone(&Utc), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_published("2025-01-01").unwrap();
        assert_eq!(parsed.with_timezone(&Utc), utc(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_published("").is_none());
        assert!(parse_published("yesterday").is_none());
        assert!(parse_published("N/A").is_none());
        assert!(parse_published("2025-13-45").is_none());
    }

    #[test]
    fn test_sort_newest_first() {
        let items = vec![
            item("nine", "Wed, 01 Jan 2025 09:00:00 GMT"),
            item("ten", "Wed, 01 Jan 2025 10:00:00 GMT"),
        ];
        let sorted = sort_by_published(items).unwrap();
        assert_eq!(titles(&sorted), vec!["ten", "nine"]);
    }

    #[test]
    fn test_sort_mixes_formats_and_offsets() {
        let items = vec![
            item("a", "2025-01-01T08:00:00Z"),
            item("b", "Wed, 01 Jan 2025 12:00:00 +0300"),
            item("c", "Wed, 01 Jan 2025 10:00:00 GMT"),
        ];
        let sorted = sort_by_published(items).unwrap();
        assert_eq!(titles(&sorted), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_missing_dates_sort_last() {
        let items = vec![
            item("missing", "N/A"),
            item("old", "Mon, 01 Jan 2001 00:00:00 GMT"),
            item("new", "Wed, 01 Jan 2025 10:00:00 GMT"),
        ];
        let sorted = sort_by_published(items).unwrap();
        assert_eq!(titles(&sorted), vec!["new", "old", "missing"]);
    }

    #[test]
    fn test_equal_dates_keep_fetch_order() {
        let items = vec![
            item("first", "N/A"),
            item("dated", "Wed, 01 Jan 2025 10:00:00 GMT"),
            item("second", "N/A"),
            item("third", "N/A"),
        ];
        let sorted = sort_by_published(items).unwrap();
        assert_eq!(titles(&sorted), vec!["dated", "first", "second", "third"]);
    }

    #[test]
    fn test_one_bad_date_keeps_original_order() {
        let items = vec![
            item("nine", "Wed, 01 Jan 2025 09:00:00 GMT"),
            item("bad", "sometime last week"),
            item("ten", "Wed, 01 Jan 2025 10:00:00 GMT"),
        ];
        let original = items.clone();
        let unsorted = sort_by_published(items).unwrap_err();
        assert_eq!(unsorted, original);
    }

    #[test]
    fn test_empty_list_sorts() {
        assert_eq!(sort_by_published(Vec::new()), Ok(Vec::new()));
    }
}
