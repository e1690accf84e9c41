//! The Hindu latest-news timeline.
//!
//! Classic paginated listing with a dedicated next link. Dates come from
//! the `article:published_time` meta tag, already ISO formatted.

use crate::extract::{AttrRule, ExtractionRules};
use crate::render::{
    NavigationMode, Readiness, RequestFilterPolicy, ResourceKind, CORE_TRACKER_HOSTS,
};
use crate::sources::{PaginationRule, SourceProfile};

pub fn profile() -> SourceProfile {
    SourceProfile {
        name: "the-hindu",
        allowed_domains: &["thehindu.com"],
        seeds: &["https://www.thehindu.com/latest-news/"],
        listing_navigation: NavigationMode::Full,
        article_navigation: NavigationMode::Full,
        listing_readiness: Readiness::Selector("ul.timeline-with-img"),
        article_readiness: Readiness::Selector("h1.title"),
        request_filter: RequestFilterPolicy::new(
            &[
                ResourceKind::Image,
                ResourceKind::Stylesheet,
                ResourceKind::Font,
            ],
            CORE_TRACKER_HOSTS,
        ),
        link_selectors: &["ul.timeline-with-img h3.title > a"],
        path_markers: &[],
        pagination: Some(PaginationRule {
            selector: "a.page-link.next",
            required_label: None,
        }),
        rules: ExtractionRules {
            source_site: "The Hindu",
            headline_selectors: &["h1.title"],
            use_structured_data: false,
            date_rule: Some(AttrRule {
                selector: r#"meta[property="article:published_time"]"#,
                attr: "content",
            }),
            author_selectors: &["div.author-details a.person-name"],
            collect_all_authors: false,
            author_default: "N/A",
            body_selector: r#"div[id*="content-body-"] p"#,
            body_join: " ",
            disclaimer_marker: None,
        },
    }
}
