//! Run-level counters and the end-of-run summary.
//!
//! A completed run always reports what it discovered, extracted, stored,
//! and dropped, by failure category — never a silent partial result.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Concurrency-safe counters shared by every task in a run.
#[derive(Debug, Default)]
pub struct RunReport {
    listing_pages: AtomicUsize,
    links_discovered: AtomicUsize,
    articles_extracted: AtomicUsize,
    stored: AtomicUsize,
    duplicates: AtomicUsize,
    fetch_errors: AtomicUsize,
    extraction_failures: AtomicUsize,
    partial_extractions: AtomicUsize,
    sink_errors: AtomicUsize,
    intake_failures: AtomicUsize,
    layout_drift_warnings: AtomicUsize,
}

/// Snapshot of a run's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub listing_pages: usize,
    pub links_discovered: usize,
    pub articles_extracted: usize,
    pub stored: usize,
    pub duplicates: usize,
    pub fetch_errors: usize,
    pub extraction_failures: usize,
    pub partial_extractions: usize,
    pub sink_errors: usize,
    pub intake_failures: usize,
    pub layout_drift_warnings: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_listing_page(&self) {
        self.listing_pages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_links_discovered(&self, count: usize) {
        self.links_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_extracted(&self) {
        self.articles_extracted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stored(&self) {
        self.stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_error(&self) {
        self.fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_extraction_failure(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_partial_extraction(&self) {
        self.partial_extractions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sink_error(&self) {
        self.sink_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_intake_failure(&self) {
        self.intake_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_layout_drift(&self) {
        self.layout_drift_warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            listing_pages: self.listing_pages.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            articles_extracted: self.articles_extracted.load(Ordering::Relaxed),
            stored: self.stored.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            fetch_errors: self.fetch_errors.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            partial_extractions: self.partial_extractions.load(Ordering::Relaxed),
            sink_errors: self.sink_errors.load(Ordering::Relaxed),
            intake_failures: self.intake_failures.load(Ordering::Relaxed),
            layout_drift_warnings: self.layout_drift_warnings.load(Ordering::Relaxed),
        }
    }

    /// Emits the run's counters as one structured log record.
    pub fn log_summary(&self) {
        let summary = self.summary();
        tracing::info!(
            listing_pages = summary.listing_pages,
            links_discovered = summary.links_discovered,
            articles_extracted = summary.articles_extracted,
            stored = summary.stored,
            duplicates = summary.duplicates,
            fetch_errors = summary.fetch_errors,
            extraction_failures = summary.extraction_failures,
            partial_extractions = summary.partial_extractions,
            sink_errors = summary.sink_errors,
            intake_failures = summary.intake_failures,
            layout_drift_warnings = summary.layout_drift_warnings,
            "crawl statistics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let report = RunReport::new();
        report.record_listing_page();
        report.add_links_discovered(7);
        report.record_extracted();
        report.record_stored();
        report.record_duplicate();
        report.record_fetch_error();
        report.record_fetch_error();

        let summary = report.summary();
        assert_eq!(summary.listing_pages, 1);
        assert_eq!(summary.links_discovered, 7);
        assert_eq!(summary.articles_extracted, 1);
        assert_eq!(summary.stored, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.fetch_errors, 2);
        assert_eq!(summary.sink_errors, 0);
    }
}
