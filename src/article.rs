//! The normalized article record produced by extraction and stored by the sink.
//!
//! Every field is always present. Fields that could not be extracted carry
//! the [`SENTINEL`] value (or `None` for the publication date) so that
//! downstream consumers never have to branch on missing keys.

use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder recorded for fields that could not be extracted.
pub const SENTINEL: &str = "N/A";

/// A single extracted news article, keyed by its canonical URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Canonical absolute URL. The unique identity key in storage.
    pub url: String,

    /// Article headline, or [`SENTINEL`] when unextractable.
    pub headline: String,

    /// Byline. Each source defines its own default for unknown authors.
    pub author: String,

    /// Normalized RFC 3339 timestamp, or `None` when absent or unparsable.
    pub publication_date: Option<String>,

    /// Concatenated body content, trimmed. [`SENTINEL`] when empty.
    pub body_text: String,

    /// Constant per source, identifies provenance (e.g. "NDTV").
    pub source_site: String,
}

impl Article {
    /// Checks the invariant that must hold before a record leaves the
    /// extractor: a non-empty, absolute http(s) URL.
    pub fn has_valid_url(&self) -> bool {
        match Url::parse(&self.url) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
            Err(_) => false,
        }
    }

    /// True when one or more optional fields fell back to a sentinel.
    ///
    /// Partial extraction is not an error, only a diagnostic count.
    pub fn is_partial(&self) -> bool {
        self.headline == SENTINEL
            || self.headline.is_empty()
            || self.publication_date.is_none()
            || self.body_text == SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str) -> Article {
        Article {
            url: url.to_string(),
            headline: "Headline".to_string(),
            author: "Reporter".to_string(),
            publication_date: Some("2023-01-02T10:00:00+00:00".to_string()),
            body_text: "Body".to_string(),
            source_site: "NDTV".to_string(),
        }
    }

    #[test]
    fn test_absolute_url_is_valid() {
        assert!(article("https://www.ndtv.com/world-news/story-123").has_valid_url());
    }

    #[test]
    fn test_relative_url_is_invalid() {
        assert!(!article("/world-news/story-123").has_valid_url());
    }

    #[test]
    fn test_empty_url_is_invalid() {
        assert!(!article("").has_valid_url());
    }

    #[test]
    fn test_non_http_scheme_is_invalid() {
        assert!(!article("ftp://example.com/story").has_valid_url());
    }

    #[test]
    fn test_complete_article_is_not_partial() {
        assert!(!article("https://example.com/a").is_partial());
    }

    #[test]
    fn test_missing_date_is_partial() {
        let mut a = article("https://example.com/a");
        a.publication_date = None;
        assert!(a.is_partial());
    }

    #[test]
    fn test_sentinel_headline_is_partial() {
        let mut a = article("https://example.com/a");
        a.headline = SENTINEL.to_string();
        assert!(a.is_partial());
    }
}
