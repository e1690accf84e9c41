//! The submit pipeline: well-formedness, dedup, upsert, intake.

use crate::article::Article;
use crate::sink::dedup::DedupContext;
use crate::sink::intake::IntakeClient;
use crate::sink::traits::{ArticleSink, SinkError, SinkResult};
use std::sync::Arc;

/// What happened to a submitted article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Written to the sink (insert or overwrite).
    Stored,
    /// Already submitted this run; dropped without touching the sink.
    Duplicate,
}

/// One run's path from extracted article to stored record.
pub struct Pipeline {
    dedup: DedupContext,
    sink: Arc<dyn ArticleSink>,
    intake: Option<IntakeClient>,
}

impl Pipeline {
    pub fn new(sink: Arc<dyn ArticleSink>, intake: Option<IntakeClient>) -> Self {
        Self {
            dedup: DedupContext::new(),
            sink,
            intake,
        }
    }

    /// Whether `url` was already claimed this run. Advisory: callers use
    /// it to skip work, not to establish uniqueness.
    pub fn already_seen(&self, url: &str) -> bool {
        self.dedup.contains(url)
    }

    /// Submits one article: reject malformed, drop duplicates, upsert.
    pub async fn submit(&self, article: &Article) -> SinkResult<SubmitOutcome> {
        if !article.has_valid_url() {
            return Err(SinkError::Malformed(article.url.clone()));
        }
        if !self.dedup.first_sighting(&article.url) {
            tracing::debug!(url = %article.url, "duplicate dropped");
            return Ok(SubmitOutcome::Duplicate);
        }
        self.sink.upsert(article).await?;
        tracing::info!(url = %article.url, source = %article.source_site, "article stored");
        Ok(SubmitOutcome::Stored)
    }

    /// Forwards a stored article to the intake endpoint, when configured.
    ///
    /// Returns whether a forward was attempted.
    pub async fn forward_to_intake(&self, article: &Article) -> SinkResult<bool> {
        match &self.intake {
            Some(intake) => {
                intake.forward(article).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
