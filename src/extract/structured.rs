//! Structured metadata (JSON-LD) extraction.
//!
//! News pages commonly embed `script[type="application/ld+json"]` blocks
//! describing the article. The shapes vary: a single object, a list of
//! objects, or an object wrapping a `@graph` array; `author` can be an
//! object, a list of objects, or a bare string. Anything absent or
//! malformed falls through silently — the markup layers take over.

use scraper::{Html, Selector};
use serde_json::Value;

/// Date and author recovered from an embedded `NewsArticle` block.
#[derive(Debug, Default, Clone)]
pub struct StructuredMetadata {
    pub published: Option<String>,
    pub author: Option<String>,
}

impl StructuredMetadata {
    /// Scans every JSON-LD script in the document for a `NewsArticle` block.
    pub fn from_document(document: &Html) -> Self {
        let selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
            Ok(sel) => sel,
            Err(_) => return Self::default(),
        };

        let mut meta = Self::default();
        for script in document.select(&selector) {
            let text = script.text().collect::<String>();
            let value: Value = match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(_) => continue,
            };

            for item in candidates(&value) {
                if item.get("@type").and_then(Value::as_str) != Some("NewsArticle") {
                    continue;
                }
                if meta.published.is_none() {
                    meta.published = item
                        .get("datePublished")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                }
                if meta.author.is_none() {
                    meta.author = item.get("author").and_then(author_name);
                }
                if meta.published.is_some() && meta.author.is_some() {
                    return meta;
                }
            }
        }
        meta
    }
}

/// Expands the top-level JSON-LD value into candidate article objects.
fn candidates(value: &Value) -> Vec<&Value> {
    if let Some(graph) = value.get("@graph").and_then(Value::as_array) {
        return graph.iter().collect();
    }
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Pulls an author name out of the object / list / string shapes.
fn author_name(author: &Value) -> Option<String> {
    let name = match author {
        Value::Array(items) => items.first()?.get("name")?.as_str()?,
        Value::Object(_) => author.get("name")?.as_str()?,
        Value::String(name) => name.as_str(),
        _ => return None,
    };
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
