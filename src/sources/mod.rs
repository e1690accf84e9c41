//! Built-in source profiles.
//!
//! A profile is the complete declarative description of one news source:
//! where to start, how to wait, what to block, which links count as
//! articles, how to page through listings, and how to extract fields.
//! Every source implements the same contract with different tables; there
//! is no per-source control flow anywhere in the crawler.

mod indian_express;
mod ndtv;
mod the_hindu;
mod times_of_india;

use crate::extract::ExtractionRules;
use crate::render::{NavigationMode, Readiness, RequestFilterPolicy};

/// How to find the "next page" link on a listing page.
#[derive(Debug, Clone)]
pub struct PaginationRule {
    /// CSS selector for candidate next-page anchors.
    pub selector: &'static str,

    /// Label the anchor text must contain (case-insensitive), for sources
    /// whose next button shares its class with other controls.
    pub required_label: Option<&'static str>,
}

/// Static configuration for one news source.
#[derive(Debug, Clone)]
pub struct SourceProfile {
    /// Config key and log identifier (e.g. "ndtv").
    pub name: &'static str,

    /// Hosts whose links are eligible for crawling (subdomains included).
    pub allowed_domains: &'static [&'static str],

    /// Listing pages a crawl of this source starts from.
    pub seeds: &'static [&'static str],

    pub listing_navigation: NavigationMode,
    pub article_navigation: NavigationMode,
    pub listing_readiness: Readiness,
    pub article_readiness: Readiness,
    pub request_filter: RequestFilterPolicy,

    /// Ordered selector rules yielding candidate article links.
    pub link_selectors: &'static [&'static str],

    /// Path substrings an article URL must contain (empty: no path filter).
    pub path_markers: &'static [&'static str],

    /// Next-page rule; `None` for single-listing sources.
    pub pagination: Option<PaginationRule>,

    pub rules: ExtractionRules,
}

impl SourceProfile {
    /// Provenance constant stamped on this source's articles.
    pub fn source_site(&self) -> &'static str {
        self.rules.source_site
    }
}

/// Every source the crawler knows how to run.
pub fn all() -> Vec<SourceProfile> {
    vec![
        ndtv::profile(),
        the_hindu::profile(),
        times_of_india::profile(),
        indian_express::profile(),
    ]
}

/// Looks up a profile by its config name.
pub fn profile_for(name: &str) -> Option<SourceProfile> {
    all().into_iter().find(|profile| profile.name == name)
}
