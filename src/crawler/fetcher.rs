//! Resource-constrained page fetching.
//!
//! Every fetch checks out one unit of rendering capacity (a semaphore
//! permit plus a browser page), navigates, applies the source's readiness
//! condition under a bounded timeout, and captures the rendered document.
//! The page is released exactly once on every exit path: the fetcher closes
//! it itself before surfacing any error, and a successful fetch hands back
//! a [`FetchedPage`] whose `release` is the single close.

use crate::render::{
    NavigationMode, PageHandle, PageSettings, Readiness, RenderEngine, RenderError,
    RequestFilterPolicy,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Stage of the fetch cycle at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Acquire,
    Navigate,
    Readiness,
    Content,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchStage::Acquire => "acquire",
            FetchStage::Navigate => "navigate",
            FetchStage::Readiness => "readiness",
            FetchStage::Content => "content",
        };
        f.write_str(name)
    }
}

/// A failed fetch, tagged with the URL and the stage that failed.
///
/// Fetch failures are always recoverable at the task level: the page has
/// already been released by the time this error is observed.
#[derive(Debug, thiserror::Error)]
#[error("fetch of {url} failed at {stage}: {source}")]
pub struct FetchError {
    pub url: String,
    pub stage: FetchStage,
    #[source]
    pub source: RenderError,
}

/// A successfully fetched page: rendered document plus the live page
/// resource backing it. Call [`release`](FetchedPage::release) when done.
pub struct FetchedPage {
    page: Option<Box<dyn PageHandle>>,
    _permit: OwnedSemaphorePermit,
    url: String,
    final_url: String,
    html: String,
}

impl std::fmt::Debug for FetchedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedPage")
            .field("page", &self.page.as_ref().map(|_| "<page handle>"))
            .field("url", &self.url)
            .field("final_url", &self.final_url)
            .field("html", &self.html)
            .finish()
    }
}

impl FetchedPage {
    /// The page's URL after any redirects. This is the canonical identity
    /// used for extraction and storage.
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Closes the page and returns the captured document and final URL.
    ///
    /// Consumes the handle, so release can only happen once.
    pub async fn release(mut self) -> (String, String) {
        if let Some(page) = self.page.take() {
            if let Err(err) = page.close().await {
                tracing::debug!(url = %self.url, error = %err, "page close failed");
            }
        }
        (
            std::mem::take(&mut self.html),
            std::mem::take(&mut self.final_url),
        )
    }
}

impl Drop for FetchedPage {
    fn drop(&mut self) {
        // Backstop only: the permit returns to the pool on drop, but the
        // browser session cannot be closed without awaiting.
        if self.page.is_some() {
            tracing::warn!(url = %self.url, "fetched page dropped without release");
        }
    }
}

/// Fetches rendered pages while bounding how many are open at once.
pub struct Fetcher {
    engine: Arc<dyn RenderEngine>,
    pages: Arc<Semaphore>,
    user_agent: String,
    navigation_timeout: Duration,
    readiness_timeout: Duration,
}

impl Fetcher {
    pub fn new(
        engine: Arc<dyn RenderEngine>,
        max_concurrent_pages: usize,
        user_agent: impl Into<String>,
        navigation_timeout: Duration,
        readiness_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            pages: Arc::new(Semaphore::new(max_concurrent_pages)),
            user_agent: user_agent.into(),
            navigation_timeout,
            readiness_timeout,
        }
    }

    /// Checks that the rendering capability is reachable at all by opening
    /// and immediately closing one page. Failure here is the only condition
    /// treated as fatal to a whole run.
    pub async fn probe(&self) -> Result<(), RenderError> {
        let settings = PageSettings {
            navigation: NavigationMode::Commit,
            filter: RequestFilterPolicy::permissive(),
            user_agent: self.user_agent.clone(),
        };
        let page = self.engine.open_page(&settings).await?;
        page.close().await
    }

    /// Fetches `url`, waiting per `readiness`, filtering per `filter`.
    ///
    /// On success the caller owns the returned [`FetchedPage`] and must
    /// release it. On failure the page (if one was opened) has already
    /// been closed; only the error crosses this boundary.
    pub async fn fetch(
        &self,
        url: &str,
        navigation: NavigationMode,
        readiness: &Readiness,
        filter: &RequestFilterPolicy,
    ) -> Result<FetchedPage, FetchError> {
        let permit = self
            .pages
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| FetchError {
                url: url.to_string(),
                stage: FetchStage::Acquire,
                source: RenderError::Session("page pool closed".to_string()),
            })?;

        let settings = PageSettings {
            navigation,
            filter: filter.clone(),
            user_agent: self.user_agent.clone(),
        };
        let mut page = self
            .engine
            .open_page(&settings)
            .await
            .map_err(|source| FetchError {
                url: url.to_string(),
                stage: FetchStage::Acquire,
                source,
            })?;

        match self.drive(page.as_mut(), url, readiness).await {
            Ok((html, final_url)) => Ok(FetchedPage {
                page: Some(page),
                _permit: permit,
                url: url.to_string(),
                final_url,
                html,
            }),
            Err((stage, source)) => {
                if let Err(close_err) = page.close().await {
                    tracing::debug!(url, error = %close_err, "page close after failure failed");
                }
                Err(FetchError {
                    url: url.to_string(),
                    stage,
                    source,
                })
            }
        }
    }

    /// Navigation, readiness wait, and document capture against an open page.
    async fn drive(
        &self,
        page: &mut dyn PageHandle,
        url: &str,
        readiness: &Readiness,
    ) -> Result<(String, String), (FetchStage, RenderError)> {
        match tokio::time::timeout(self.navigation_timeout, page.navigate(url)).await {
            Err(_) => {
                return Err((
                    FetchStage::Navigate,
                    RenderError::Navigation("navigation timed out".to_string()),
                ))
            }
            Ok(Err(err)) => return Err((FetchStage::Navigate, err)),
            Ok(Ok(())) => {}
        }

        match readiness {
            Readiness::Selector(css) => {
                page.wait_for_selector(css, self.readiness_timeout)
                    .await
                    .map_err(|err| (FetchStage::Readiness, err))?;
            }
            Readiness::ScrollSettle { scrolls, settle } => {
                for _ in 0..*scrolls {
                    page.scroll_to_bottom()
                        .await
                        .map_err(|err| (FetchStage::Readiness, err))?;
                    tokio::time::sleep(*settle).await;
                }
            }
            Readiness::Immediate => {}
        }

        let html = page
            .content()
            .await
            .map_err(|err| (FetchStage::Content, err))?;

        // Redirects may have moved the page; the current URL is canonical.
        let final_url = match page.current_url().await {
            Ok(current) => current,
            Err(err) => {
                tracing::debug!(url, error = %err, "could not read final url, keeping requested");
                url.to_string()
            }
        };

        Ok((html, final_url))
    }
}
