//! Rendering capability consumed by the crawler.
//!
//! The crawler never talks to a browser directly; it goes through the
//! [`RenderEngine`] / [`PageHandle`] seam so the rendering environment can
//! be swapped out (a WebDriver endpoint in production, a scripted engine in
//! tests). Each [`PageHandle`] is an exclusive handle to one render-capable
//! page, owned by exactly one in-flight task and closed exactly once.

mod policy;
mod readiness;
mod webdriver;

pub use policy::{RequestFilterPolicy, ResourceKind, CORE_TRACKER_HOSTS, EXTENDED_TRACKER_HOSTS};
pub use readiness::{NavigationMode, Readiness};
pub use webdriver::WebDriverEngine;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the rendering environment.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to open a browser session: {0}")]
    Session(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("timed out waiting for page readiness")]
    ReadinessTimeout,

    #[error("browser command failed: {0}")]
    Command(String),
}

/// Per-page knobs applied when a session is opened.
///
/// Everything here is declarative: sources describe what they need and the
/// engine decides how to realize it (capabilities, session options, ...).
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub navigation: NavigationMode,
    pub filter: RequestFilterPolicy,
    pub user_agent: String,
}

/// Exclusive handle to one render-capable page.
///
/// The handle must be closed on every exit path of the task that owns it;
/// [`close`](PageHandle::close) consumes the handle so a double release is
/// unrepresentable.
#[async_trait]
pub trait PageHandle: Send {
    /// Navigates to `url`, waiting as aggressively as the session's
    /// [`NavigationMode`] allows.
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError>;

    /// Waits until an element matching `css` is present.
    async fn wait_for_selector(&mut self, css: &str, timeout: Duration) -> Result<(), RenderError>;

    /// Scrolls to the bottom of the page (for infinite-scroll listings).
    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError>;

    /// Returns the rendered document source.
    async fn content(&mut self) -> Result<String, RenderError>;

    /// Returns the page's current URL (after any redirects).
    async fn current_url(&mut self) -> Result<String, RenderError>;

    /// Releases the page. Consumes the handle.
    async fn close(self: Box<Self>) -> Result<(), RenderError>;
}

/// The rendering environment itself, a shared pool of page capacity.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Opens a fresh page configured with `settings`.
    async fn open_page(&self, settings: &PageSettings) -> Result<Box<dyn PageHandle>, RenderError>;
}
