//! Per-source extraction rule sets.
//!
//! Each source contributes one [`ExtractionRules`] value: selector tables
//! and joining conventions, no control flow. The extractor interprets every
//! rule set through the same layered algorithm.

/// A selector paired with the attribute to read from the matched element.
#[derive(Debug, Clone, Copy)]
pub struct AttrRule {
    pub selector: &'static str,
    pub attr: &'static str,
}

/// Selector tables and conventions for one source.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Provenance constant stamped on every article (e.g. "The Hindu").
    pub source_site: &'static str,

    /// Ordered headline selectors; first non-empty match wins. The
    /// `og:title` meta tag is the shared fallback behind all of them.
    pub headline_selectors: &'static [&'static str],

    /// Whether to consult embedded JSON-LD for date and author first.
    pub use_structured_data: bool,

    /// Markup date rule, read when structured data yields nothing.
    pub date_rule: Option<AttrRule>,

    /// Ordered author selectors, tried after structured data.
    pub author_selectors: &'static [&'static str],

    /// Join every author match (", "-separated byline) instead of taking
    /// the first.
    pub collect_all_authors: bool,

    /// Default byline when no author can be extracted.
    pub author_default: &'static str,

    /// Content container (or paragraph) selector for the body text.
    pub body_selector: &'static str,

    /// Joiner between body text fragments (space or newline by source).
    pub body_join: &'static str,

    /// Inline boilerplate marker; body text is truncated at its first
    /// occurrence when present.
    pub disclaimer_marker: Option<&'static str>,
}
