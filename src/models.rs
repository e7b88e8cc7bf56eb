//! Data models for feed sources and the news items served by the API.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Language`]: The language a feed source publishes in
//! - [`LanguageFilter`]: The language selector accepted by the HTTP endpoint
//! - [`Source`]: One entry of the compiled-in feed registry
//! - [`NewsItem`]: A normalized feed entry, as returned to API clients

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Placeholder used for a missing title, publication date or summary.
pub const MISSING_FIELD: &str = "N/A";

/// Placeholder used for a missing link.
pub const MISSING_LINK: &str = "#";

/// Language a feed source publishes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Tr,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language selector for an aggregation request.
///
/// `All` selects every registered source; the other variants select only the
/// sources publishing in that language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFilter {
    En,
    Tr,
    All,
}

/// Returned when a language selector is not one of `tr`, `en` or `all`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language code. Use 'tr', 'en', or 'all'.")]
pub struct InvalidLanguage;

impl LanguageFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageFilter::En => "en",
            LanguageFilter::Tr => "tr",
            LanguageFilter::All => "all",
        }
    }

    /// Whether a source publishing in `language` belongs to this selection.
    pub fn matches(&self, language: Language) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::En => language == Language::En,
            LanguageFilter::Tr => language == Language::Tr,
        }
    }

    /// Key under which the aggregated result for this filter is cached.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(LanguageFilter::Tr.cache_key(), "news_tr");
    /// ```
    pub fn cache_key(&self) -> String {
        format!("news_{}", self.as_str())
    }
}

impl FromStr for LanguageFilter {
    type Err = InvalidLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(LanguageFilter::En),
            "tr" => Ok(LanguageFilter::Tr),
            "all" => Ok(LanguageFilter::All),
            _ => Err(InvalidLanguage),
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feed source from the compiled-in registry.
///
/// Sources are immutable and defined at build time; see [`crate::sources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// Human-readable source name, unique within the registry.
    pub name: &'static str,
    /// URL of the RSS or Atom document.
    pub feed_url: &'static str,
    /// Language the source publishes in.
    pub language: Language,
}

/// A single news entry normalized from an RSS or Atom feed.
///
/// Every field is a plain string. Fields absent from the source entry hold
/// [`MISSING_FIELD`] (or [`MISSING_LINK`] for `link`). `published` keeps the
/// raw value supplied by the feed, which may not be a parseable date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NewsItem {
    /// Name of the registry source the entry came from.
    pub source: String,
    /// Entry headline.
    pub title: String,
    /// Link to the full article.
    pub link: String,
    /// Publication date exactly as the feed provided it.
    pub published: String,
    /// Entry summary or description, often HTML.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_filter_parsing() {
        assert_eq!("en".parse::<LanguageFilter>(), Ok(LanguageFilter::En));
        assert_eq!("tr".parse::<LanguageFilter>(), Ok(LanguageFilter::Tr));
        assert_eq!("all".parse::<LanguageFilter>(), Ok(LanguageFilter::All));
    }

    #[test]
    fn test_language_filter_rejects_unknown_codes() {
        assert_eq!("xyz".parse::<LanguageFilter>(), Err(InvalidLanguage));
        assert_eq!("EN".parse::<LanguageFilter>(), Err(InvalidLanguage));
        assert_eq!("".parse::<LanguageFilter>(), Err(InvalidLanguage));
    }

    #[test]
    fn test_invalid_language_message() {
        assert_eq!(
            InvalidLanguage.to_string(),
            "Invalid language code. Use 'tr', 'en', or 'all'."
        );
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(LanguageFilter::En.cache_key(), "news_en");
        assert_eq!(LanguageFilter::Tr.cache_key(), "news_tr");
        assert_eq!(LanguageFilter::All.cache_key(), "news_all");
    }

    #[test]
    fn test_filter_matches() {
        assert!(LanguageFilter::All.matches(Language::En));
        assert!(LanguageFilter::All.matches(Language::Tr));
        assert!(LanguageFilter::En.matches(Language::En));
        assert!(!LanguageFilter::En.matches(Language::Tr));
        assert!(LanguageFilter::Tr.matches(Language::Tr));
        assert!(!LanguageFilter::Tr.matches(Language::En));
    }

    #[test]
    fn test_news_item_serialization() {
        let item = NewsItem {
            source: "Decrypt".to_string(),
            title: "Bitcoin tops $100k".to_string(),
            link: "https://decrypt.co/1".to_string(),
            published: "Wed, 01 Jan 2025 10:00:00 GMT".to_string(),
            summary: "N/A".to_string(),
        };

        let value = serde_json::to_value(&item).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object["source"], "Decrypt");
        assert_eq!(object["title"], "Bitcoin tops $100k");
        assert_eq!(object["link"], "https://decrypt.co/1");
        assert_eq!(object["published"], "Wed, 01 Jan 2025 10:00:00 GMT");
        assert_eq!(object["summary"], "N/A");
    }

    #[test]
    fn test_language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Tr).unwrap(), "\"tr\"");
        assert_eq!(Language::En.to_string(), "en");
    }
}
