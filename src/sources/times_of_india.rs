//! The Times of India homepage.
//!
//! Infinite-scroll listing: the readiness condition scrolls to the bottom
//! and settles, twice, before link discovery runs. Article metadata lives
//! in JSON-LD; sponsored articles carry an inline disclaimer that gets
//! truncated from the body.

use crate::extract::ExtractionRules;
use crate::render::{
    NavigationMode, Readiness, RequestFilterPolicy, ResourceKind, CORE_TRACKER_HOSTS,
};
use crate::sources::SourceProfile;
use std::time::Duration;

pub fn profile() -> SourceProfile {
    SourceProfile {
        name: "times-of-india",
        allowed_domains: &["timesofindia.indiatimes.com"],
        seeds: &["https://timesofindia.indiatimes.com/"],
        listing_navigation: NavigationMode::DomContentLoaded,
        article_navigation: NavigationMode::Full,
        listing_readiness: Readiness::ScrollSettle {
            scrolls: 2,
            settle: Duration::from_secs(3),
        },
        article_readiness: Readiness::Immediate,
        request_filter: RequestFilterPolicy::new(
            &[
                ResourceKind::Image,
                ResourceKind::Stylesheet,
                ResourceKind::Font,
                ResourceKind::Media,
            ],
            CORE_TRACKER_HOSTS,
        ),
        // The homepage mixes several list layouts; each gets its own rule.
        link_selectors: &[
            "li.BxDma > a.VeCXM",
            "span.w_tle a",
            "a.linktype1",
            "a.linktype2",
            "figure._YVis a.Hn2z7",
        ],
        path_markers: &["/articleshow/", "/liveblog/"],
        pagination: None,
        rules: ExtractionRules {
            source_site: "The Times of India",
            headline_selectors: &["h1.HNMDR"],
            use_structured_data: true,
            date_rule: None,
            author_selectors: &["div.byline a"],
            collect_all_authors: false,
            author_default: "N/A",
            body_selector: r#"div[data-articlebody="1"]"#,
            body_join: " ",
            disclaimer_marker: Some("Disclaimer: This article is produced on behalf of"),
        },
    }
}
