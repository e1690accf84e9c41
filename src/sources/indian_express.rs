//! The Indian Express homepage.
//!
//! Article pages are light, so they use the fastest navigation mode and no
//! readiness wait. Metadata lives in a `@graph`-wrapped JSON-LD block.

use crate::extract::ExtractionRules;
use crate::render::{
    NavigationMode, Readiness, RequestFilterPolicy, ResourceKind, CORE_TRACKER_HOSTS,
};
use crate::sources::SourceProfile;

pub fn profile() -> SourceProfile {
    SourceProfile {
        name: "indian-express",
        allowed_domains: &["indianexpress.com"],
        seeds: &["https://indianexpress.com/"],
        listing_navigation: NavigationMode::DomContentLoaded,
        article_navigation: NavigationMode::Commit,
        listing_readiness: Readiness::Immediate,
        article_readiness: Readiness::Selector("h1.native_story_title"),
        request_filter: RequestFilterPolicy::new(
            &[
                ResourceKind::Image,
                ResourceKind::Stylesheet,
                ResourceKind::Font,
            ],
            CORE_TRACKER_HOSTS,
        ),
        link_selectors: &[
            "div.lead-stories a",
            "div.top-news a",
            "div.other-article a",
            "div.other-story a",
            "div.small-story a",
            "div.news h4 a",
        ],
        path_markers: &["/article/"],
        pagination: None,
        rules: ExtractionRules {
            source_site: "The Indian Express",
            headline_selectors: &["h1.native_story_title"],
            use_structured_data: true,
            date_rule: None,
            author_selectors: &[],
            collect_all_authors: false,
            author_default: "N/A",
            body_selector: "div.story_details p",
            body_join: " ",
            disclaimer_marker: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;

    #[test]
    fn test_article_extraction_via_graph_block() {
        let html = r#"<html><head>
            <script type="application/ld+json">
              {"@graph": [
                 {"@type": "Organization", "name": "The Indian Express"},
                 {"@type": "NewsArticle",
                  "datePublished": "2023-02-20T18:45:00+05:30",
                  "author": {"name": "Express News Service"}}]}
            </script>
        </head><body>
            <h1 class="native_story_title">Budget Session Begins</h1>
            <div class="story_details"><p>The session opened.</p><p>Debate followed.</p></div>
        </body></html>"#;

        let article = extract(
            html,
            "https://indianexpress.com/article/india/budget-session-123/",
            &profile().rules,
        )
        .unwrap();
        assert_eq!(article.headline, "Budget Session Begins");
        assert_eq!(article.author, "Express News Service");
        assert_eq!(
            article.publication_date.as_deref(),
            Some("2023-02-20T18:45:00+05:30")
        );
        assert_eq!(article.body_text, "The session opened. Debate followed.");
        assert_eq!(article.source_site, "The Indian Express");
    }
}
