//! The pagination walker.
//!
//! Drives link discovery across a source's listing pages:
//! `Listing(page)` → `Listing(next)` → … → `Done`. Each listing page is
//! fetched, mined for article links (emitted as crawl tasks), searched for
//! a next-page link, and released before the walk moves on. The walker
//! itself puts no upper bound on pages; stopping early is a coordinator
//! policy, expressed through cancellation.

use crate::crawler::discovery::{discover, find_next_page};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::CrawlTask;
use crate::report::RunReport;
use crate::sources::SourceProfile;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Walker position: on a listing page, or finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkerState {
    Listing(String),
    Done,
}

/// Walks one source's listings from `seed`, emitting article tasks.
///
/// Failures terminate this source's walk only; other sources' walks and
/// already-emitted article tasks are unaffected.
pub async fn walk_source(
    fetcher: &Fetcher,
    profile: Arc<SourceProfile>,
    seed: &str,
    tasks: &mpsc::Sender<CrawlTask>,
    report: &RunReport,
    cancel: &CancellationToken,
) {
    let mut state = WalkerState::Listing(seed.to_string());

    loop {
        let page_url = match state {
            WalkerState::Listing(ref url) => url.clone(),
            WalkerState::Done => break,
        };
        if cancel.is_cancelled() {
            tracing::info!(source = profile.name, "walk cancelled");
            break;
        }

        tracing::info!(source = profile.name, url = %page_url, "parsing listing page");
        let fetched = match fetcher
            .fetch(
                &page_url,
                profile.listing_navigation,
                &profile.listing_readiness,
                &profile.request_filter,
            )
            .await
        {
            Ok(page) => page,
            Err(err) => {
                report.record_fetch_error();
                tracing::warn!(source = profile.name, error = %err, "listing fetch failed");
                break;
            }
        };
        report.record_listing_page();

        // Page released before anything else; discovery runs on the
        // captured document, not the live session.
        let (html, final_url) = fetched.release().await;

        let base_url = match Url::parse(&final_url) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(source = profile.name, url = %final_url, error = %err,
                    "listing final url is unparsable");
                break;
            }
        };

        let links = discover(&html, &base_url, &profile);
        if links.is_empty() {
            report.record_layout_drift();
            tracing::warn!(
                source = profile.name,
                url = %page_url,
                "no article links found; the site layout may have changed"
            );
        } else {
            tracing::info!(
                source = profile.name,
                count = links.len(),
                "found article links"
            );
        }
        report.add_links_discovered(links.len());

        for url in links {
            let task = CrawlTask {
                url,
                profile: profile.clone(),
            };
            if tasks.send(task).await.is_err() {
                // Receiver gone: the run is shutting down.
                return;
            }
        }

        state = match &profile.pagination {
            Some(rule) => match find_next_page(&html, &base_url, rule) {
                Some(next) => {
                    tracing::info!(source = profile.name, next = %next, "found next page");
                    WalkerState::Listing(next)
                }
                None => {
                    tracing::info!(source = profile.name, "no more pages");
                    WalkerState::Done
                }
            },
            None => WalkerState::Done,
        };
    }
}
