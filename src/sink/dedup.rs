//! Run-scoped URL dedup.
//!
//! One context lives for exactly one crawl run and is injected into the
//! pipeline rather than held as ambient state. Membership check and insert
//! are a single atomic step, so two tasks can never both treat the same
//! URL as novel.

use std::collections::HashSet;
use std::sync::Mutex;

/// Concurrency-safe set of URLs already submitted during this run.
#[derive(Debug, Default)]
pub struct DedupContext {
    seen: Mutex<HashSet<String>>,
}

impl DedupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically records `url`; true only for the first caller.
    pub fn first_sighting(&self, url: &str) -> bool {
        self.seen.lock().unwrap().insert(url.to_string())
    }

    /// Read-only probe, used to skip work for already-claimed URLs.
    pub fn contains(&self, url: &str) -> bool {
        self.seen.lock().unwrap().contains(url)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_sighting_is_true_exactly_once() {
        let dedup = DedupContext::new();
        assert!(dedup.first_sighting("https://example.com/a"));
        assert!(!dedup.first_sighting("https://example.com/a"));
        assert!(dedup.first_sighting("https://example.com/b"));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_contains_does_not_claim() {
        let dedup = DedupContext::new();
        assert!(!dedup.contains("https://example.com/a"));
        assert!(dedup.first_sighting("https://example.com/a"));
        assert!(dedup.contains("https://example.com/a"));
    }

    #[test]
    fn test_concurrent_claims_yield_a_single_winner() {
        let dedup = Arc::new(DedupContext::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let dedup = dedup.clone();
            handles.push(std::thread::spawn(move || {
                dedup.first_sighting("https://example.com/contested") as usize
            }));
        }
        let winners: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(winners, 1);
    }
}
