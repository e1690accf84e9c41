//! Declarative readiness and navigation descriptors.
//!
//! Sources differ in how late their content becomes available, so both the
//! navigation wait and the readiness criterion are data chosen per source
//! and interpreted by the fetcher, never imperative per-source control flow.

use std::time::Duration;

/// How aggressively navigation waits before returning.
///
/// A latency/completeness trade-off: `Commit` returns as soon as the
/// navigation is committed and relies on the readiness condition to catch
/// up, `Full` waits for the whole load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Return as soon as navigation is committed (fastest).
    Commit,
    /// Return once the DOM content has loaded.
    DomContentLoaded,
    /// Wait for the full load event.
    Full,
}

impl NavigationMode {
    /// The WebDriver page-load strategy realizing this mode.
    pub fn page_load_strategy(self) -> &'static str {
        match self {
            NavigationMode::Commit => "none",
            NavigationMode::DomContentLoaded => "eager",
            NavigationMode::Full => "normal",
        }
    }
}

/// Criterion deciding a rendered page is stable enough to extract from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Wait until an element matching the selector is present.
    Selector(&'static str),

    /// Scroll to the bottom `scrolls` times, settling after each scroll.
    /// Used for infinite-scroll listings where content loads on demand.
    ScrollSettle { scrolls: u32, settle: Duration },

    /// Extract as soon as navigation returns.
    Immediate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_load_strategy_mapping() {
        assert_eq!(NavigationMode::Commit.page_load_strategy(), "none");
        assert_eq!(NavigationMode::DomContentLoaded.page_load_strategy(), "eager");
        assert_eq!(NavigationMode::Full.page_load_strategy(), "normal");
    }
}
