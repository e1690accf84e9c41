//! NDTV world-news section.
//!
//! Paginated listing with a `NEXT` button. Article dates arrive as
//! RFC 2822-style strings on an itemprop attribute; multi-author bylines
//! are joined into one field.

use crate::extract::{AttrRule, ExtractionRules};
use crate::render::{
    NavigationMode, Readiness, RequestFilterPolicy, ResourceKind, EXTENDED_TRACKER_HOSTS,
};
use crate::sources::{PaginationRule, SourceProfile};

pub fn profile() -> SourceProfile {
    SourceProfile {
        name: "ndtv",
        allowed_domains: &["ndtv.com"],
        seeds: &["https://www.ndtv.com/world-news"],
        listing_navigation: NavigationMode::Commit,
        article_navigation: NavigationMode::Commit,
        listing_readiness: Readiness::Selector("div.news_Itm"),
        article_readiness: Readiness::Selector("div.sp-cn"),
        request_filter: RequestFilterPolicy::new(
            &[
                ResourceKind::Image,
                ResourceKind::Stylesheet,
                ResourceKind::Font,
                ResourceKind::Media,
            ],
            EXTENDED_TRACKER_HOSTS,
        ),
        link_selectors: &["div.news_Itm_img a"],
        path_markers: &[],
        pagination: Some(PaginationRule {
            selector: "a.btn_np",
            required_label: Some("NEXT"),
        }),
        rules: ExtractionRules {
            source_site: "NDTV",
            headline_selectors: &["h1.sp-ttl"],
            use_structured_data: false,
            date_rule: Some(AttrRule {
                selector: r#"span[itemprop="dateModified"]"#,
                attr: "content",
            }),
            author_selectors: &["nav.pst-by a.pst-by_lnk"],
            collect_all_authors: true,
            author_default: "NDTV Correspondent",
            body_selector: r#"div[itemprop="articleBody"] p"#,
            body_join: "\n",
            disclaimer_marker: None,
        },
    }
}
