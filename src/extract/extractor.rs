//! The layered article extractor.

use crate::article::{Article, SENTINEL};
use crate::extract::dates::normalize_date;
use crate::extract::rules::ExtractionRules;
use crate::extract::structured::StructuredMetadata;
use scraper::{Html, Selector};
use url::Url;

/// Errors that fail an extraction outright.
///
/// Missing optional fields never land here; they become sentinels.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("document could not be parsed: {url}")]
    Unparsable { url: String },

    #[error("article url is empty or not absolute: {url:?}")]
    InvalidUrl { url: String },
}

/// Runs a source's rule set against a rendered document.
///
/// Returns a complete [`Article`]: every field is either a meaningful value
/// or the source's sentinel. Fails only when `url` violates the identity
/// invariant or the document is empty.
pub fn extract(html: &str, url: &str, rules: &ExtractionRules) -> Result<Article, ExtractError> {
    let valid = Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !valid {
        return Err(ExtractError::InvalidUrl {
            url: url.to_string(),
        });
    }

    if html.trim().is_empty() {
        return Err(ExtractError::Unparsable {
            url: url.to_string(),
        });
    }
    let document = Html::parse_document(html);

    let structured = if rules.use_structured_data {
        StructuredMetadata::from_document(&document)
    } else {
        StructuredMetadata::default()
    };

    let headline = extract_headline(&document, rules);
    let publication_date = extract_date(&document, rules, &structured, url);
    let author = extract_author(&document, rules, &structured);
    let body_text = extract_body(&document, rules);

    Ok(Article {
        url: url.to_string(),
        headline,
        author,
        publication_date,
        body_text,
        source_site: rules.source_site.to_string(),
    })
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn extract_headline(document: &Html, rules: &ExtractionRules) -> String {
    for css in rules.headline_selectors {
        if let Some(text) = first_text(document, css) {
            return text;
        }
    }
    // Metadata fallback shared by every source.
    meta_content(document, r#"meta[property="og:title"]"#).unwrap_or_else(|| SENTINEL.to_string())
}

fn extract_date(
    document: &Html,
    rules: &ExtractionRules,
    structured: &StructuredMetadata,
    url: &str,
) -> Option<String> {
    let raw = structured.published.clone().or_else(|| {
        let rule = rules.date_rule?;
        let selector = Selector::parse(rule.selector).ok()?;
        document
            .select(&selector)
            .find_map(|el| el.value().attr(rule.attr))
            .map(str::to_string)
    })?;

    match normalize_date(&raw) {
        Some(normalized) => Some(normalized),
        None => {
            tracing::warn!(%url, raw = %raw, "could not parse publication date");
            None
        }
    }
}

fn extract_author(
    document: &Html,
    rules: &ExtractionRules,
    structured: &StructuredMetadata,
) -> String {
    if let Some(author) = &structured.author {
        return author.clone();
    }

    for css in rules.author_selectors {
        let selector = match Selector::parse(css) {
            Ok(sel) => sel,
            Err(_) => continue,
        };
        let names: Vec<String> = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            continue;
        }
        if rules.collect_all_authors {
            return names.join(", ");
        }
        return names.into_iter().next().unwrap_or_default();
    }

    rules.author_default.to_string()
}

fn extract_body(document: &Html, rules: &ExtractionRules) -> String {
    let selector = match Selector::parse(rules.body_selector) {
        Ok(sel) => sel,
        Err(_) => return SENTINEL.to_string(),
    };

    let fragments: Vec<String> = document
        .select(&selector)
        .flat_map(|el| el.text())
        .map(|fragment| fragment.trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect();

    let mut body = fragments.join(rules.body_join);

    if let Some(marker) = rules.disclaimer_marker {
        if let Some(index) = body.find(marker) {
            body.truncate(index);
            body = body.trim_end().to_string();
        }
    }

    if body.is_empty() {
        SENTINEL.to_string()
    } else {
        body
    }
}
