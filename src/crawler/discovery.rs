//! Article link discovery on listing pages.
//!
//! An ordered list of selector rules is applied against the rendered
//! document; every raw href is resolved against the page's base URL and
//! kept only if it stays on the source's domain and matches its path
//! markers. Set semantics deduplicate links reachable through more than
//! one rule. An empty result is valid, not an error — it usually means
//! the site's layout drifted out from under the selectors.

use crate::sources::{PaginationRule, SourceProfile};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Discovers candidate article URLs on a listing page.
pub fn discover(html: &str, base_url: &Url, profile: &SourceProfile) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    for css in profile.link_selectors {
        let selector = match Selector::parse(css) {
            Ok(sel) => sel,
            Err(_) => continue,
        };
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(href) => href,
                None => continue,
            };
            let resolved = match resolve(href, base_url) {
                Some(url) => url,
                None => continue,
            };
            if !domain_allowed(&resolved, profile.allowed_domains) {
                continue;
            }
            if !path_matches(&resolved, profile.path_markers) {
                continue;
            }
            links.insert(resolved.to_string());
        }
    }

    links
}

/// Locates the "next page" link on a listing page, if any.
pub fn find_next_page(html: &str, base_url: &Url, rule: &PaginationRule) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(rule.selector).ok()?;

    for element in document.select(&selector) {
        if let Some(label) = rule.required_label {
            let text = element.text().collect::<String>();
            if !text.to_lowercase().contains(&label.to_lowercase()) {
                continue;
            }
        }
        if let Some(href) = element.value().attr("href") {
            if let Some(resolved) = resolve(href, base_url) {
                return Some(resolved.to_string());
            }
        }
    }

    None
}

/// Resolves a raw href to an absolute http(s) URL, or rejects it.
fn resolve(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }

    let resolved = base_url.join(href).ok()?;
    if matches!(resolved.scheme(), "http" | "https") {
        Some(resolved)
    } else {
        None
    }
}

/// Host must equal an allowed domain or be a subdomain of one.
fn domain_allowed(url: &Url, allowed: &[&str]) -> bool {
    let host = match url.host_str() {
        Some(host) => host,
        None => return false,
    };
    allowed
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Path must contain one of the markers; an empty marker list matches all.
fn path_matches(url: &Url, markers: &[&str]) -> bool {
    if markers.is_empty() {
        return true;
    }
    markers.iter().any(|marker| url.path().contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources;

    fn hindu_base() -> Url {
        Url::parse("https://www.thehindu.com/latest-news/").unwrap()
    }

    #[test]
    fn test_discovers_and_resolves_relative_links() {
        let html = r#"<html><body><ul class="timeline-with-img">
            <li><h3 class="title"><a href="/news/national/story-one.ece">One</a></h3></li>
            <li><h3 class="title"><a href="https://www.thehindu.com/news/world/story-two.ece">Two</a></h3></li>
        </ul></body></html>"#;
        let profile = sources::profile_for("the-hindu").unwrap();

        let links = discover(html, &hindu_base(), &profile);
        assert_eq!(links.len(), 2);
        assert!(links.contains("https://www.thehindu.com/news/national/story-one.ece"));
        assert!(links.contains("https://www.thehindu.com/news/world/story-two.ece"));
    }

    #[test]
    fn test_same_href_through_two_rules_is_returned_once() {
        // The TOI profile carries overlapping selectors; the same article
        // is frequently linked from more than one layout block.
        let html = r#"<html><body>
            <span class="w_tle"><a href="/india/story/articleshow/42.cms">A</a></span>
            <a class="linktype1" href="/india/story/articleshow/42.cms">A again</a>
        </body></html>"#;
        let profile = sources::profile_for("times-of-india").unwrap();
        let base = Url::parse("https://timesofindia.indiatimes.com/").unwrap();

        let links = discover(html, &base, &profile);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://timesofindia.indiatimes.com/india/story/articleshow/42.cms"));
    }

    #[test]
    fn test_offsite_links_are_filtered() {
        let html = r#"<html><body><ul class="timeline-with-img">
            <li><h3 class="title"><a href="https://www.example.org/elsewhere">Out</a></h3></li>
        </ul></body></html>"#;
        let profile = sources::profile_for("the-hindu").unwrap();
        assert!(discover(html, &hindu_base(), &profile).is_empty());
    }

    #[test]
    fn test_subdomain_of_allowed_domain_passes() {
        let html = r#"<html><body><ul class="timeline-with-img">
            <li><h3 class="title"><a href="https://sports.thehindu.com/cricket/story.ece">S</a></h3></li>
        </ul></body></html>"#;
        let profile = sources::profile_for("the-hindu").unwrap();
        assert_eq!(discover(html, &hindu_base(), &profile).len(), 1);
    }

    #[test]
    fn test_path_markers_reject_non_article_links() {
        let html = r#"<html><body>
            <span class="w_tle"><a href="/sports/cricket/scorecard">Score</a></span>
            <span class="w_tle"><a href="/city/delhi/story/articleshow/7.cms">News</a></span>
            <span class="w_tle"><a href="/live/liveblog/99.cms">Live</a></span>
        </body></html>"#;
        let profile = sources::profile_for("times-of-india").unwrap();
        let base = Url::parse("https://timesofindia.indiatimes.com/").unwrap();

        let links = discover(html, &base, &profile);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_special_scheme_hrefs_are_skipped() {
        let html = r##"<html><body><ul class="timeline-with-img">
            <li><h3 class="title"><a href="javascript:void(0)">J</a></h3></li>
            <li><h3 class="title"><a href="mailto:desk@thehindu.com">M</a></h3></li>
            <li><h3 class="title"><a href="#top">T</a></h3></li>
        </ul></body></html>"##;
        let profile = sources::profile_for("the-hindu").unwrap();
        assert!(discover(html, &hindu_base(), &profile).is_empty());
    }

    #[test]
    fn test_no_matches_yields_empty_set_not_error() {
        let profile = sources::profile_for("the-hindu").unwrap();
        let links = discover("<html><body><p>redesigned!</p></body></html>", &hindu_base(), &profile);
        assert!(links.is_empty());
    }

    #[test]
    fn test_next_page_link_without_label() {
        let html = r#"<html><body>
            <a class="page-link next" href="/latest-news/?page=2">2</a>
        </body></html>"#;
        let rule = sources::profile_for("the-hindu").unwrap().pagination.unwrap();
        assert_eq!(
            find_next_page(html, &hindu_base(), &rule),
            Some("https://www.thehindu.com/latest-news/?page=2".to_string())
        );
    }

    #[test]
    fn test_next_page_requires_label_when_configured() {
        // NDTV's prev/next buttons share a class; only the NEXT one counts.
        let html = r#"<html><body>
            <a class="btn_np" href="https://www.ndtv.com/world-news/page-1">« PREV</a>
            <a class="btn_np" href="https://www.ndtv.com/world-news/page-3">NEXT »</a>
        </body></html>"#;
        let rule = sources::profile_for("ndtv").unwrap().pagination.unwrap();
        let base = Url::parse("https://www.ndtv.com/world-news/page-2").unwrap();
        assert_eq!(
            find_next_page(html, &base, &rule),
            Some("https://www.ndtv.com/world-news/page-3".to_string())
        );
    }

    #[test]
    fn test_missing_next_page_yields_none() {
        let rule = sources::profile_for("the-hindu").unwrap().pagination.unwrap();
        assert_eq!(
            find_next_page("<html><body></body></html>", &hindu_base(), &rule),
            None
        );
    }
}
