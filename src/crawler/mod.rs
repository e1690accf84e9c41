//! The crawl pipeline: fetching, link discovery, pagination, orchestration.
//!
//! - Resource-constrained fetching of rendered pages
//! - Article link discovery on listing pages
//! - The pagination walker state machine
//! - The coordinator scheduling concurrent fetch/extract/submit cycles

mod coordinator;
mod discovery;
mod fetcher;
mod walker;

pub use coordinator::Coordinator;
pub use discovery::{discover, find_next_page};
pub use fetcher::{FetchError, FetchStage, FetchedPage, Fetcher};
pub use walker::{walk_source, WalkerState};

use crate::sources::SourceProfile;
use std::sync::Arc;

/// Ephemeral unit of work: one article page to fetch, extract, and submit.
///
/// Created by the pagination walker, consumed exactly once by an article
/// worker, and gone after its cycle completes.
#[derive(Clone)]
pub struct CrawlTask {
    pub url: String,
    pub profile: Arc<SourceProfile>,
}
