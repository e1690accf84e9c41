//! Crawl orchestration.
//!
//! The coordinator seeds one pagination walk per configured source (walks
//! run concurrently, pagination within a source stays sequential), feeds
//! discovered article tasks to a bounded pool of workers, and isolates
//! every per-task failure. A run only fails outright when the rendering
//! capability cannot be reached at all.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::walker::walk_source;
use crate::crawler::CrawlTask;
use crate::extract::extract;
use crate::render::RenderEngine;
use crate::report::{RunReport, RunSummary};
use crate::sink::{ArticleSink, IntakeClient, Pipeline, SubmitOutcome};
use crate::sources::{self, SourceProfile};
use crate::{ConfigError, KhabarError};
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Queue depth between walkers and article workers.
const TASK_QUEUE_CAPACITY: usize = 256;

/// Main crawl coordinator.
pub struct Coordinator {
    fetcher: Arc<Fetcher>,
    pipeline: Arc<Pipeline>,
    report: Arc<RunReport>,
    worker_concurrency: usize,
    /// Each source with its resolved seed list.
    sources: Vec<(Arc<SourceProfile>, Vec<String>)>,
}

impl Coordinator {
    /// Builds a coordinator from configuration, a rendering engine, and a
    /// persistence sink.
    pub fn new(
        config: &Config,
        engine: Arc<dyn RenderEngine>,
        sink: Arc<dyn ArticleSink>,
    ) -> Result<Self, KhabarError> {
        let mut resolved = Vec::new();
        for entry in &config.sources {
            let profile = sources::profile_for(&entry.name).ok_or_else(|| {
                ConfigError::Validation(format!("unknown source name: {:?}", entry.name))
            })?;
            let seeds = if entry.seeds.is_empty() {
                profile.seeds.iter().map(|seed| seed.to_string()).collect()
            } else {
                entry.seeds.clone()
            };
            resolved.push((Arc::new(profile), seeds));
        }

        let fetcher = Fetcher::new(
            engine,
            config.crawler.max_concurrent_pages as usize,
            config.crawler.user_agent.clone(),
            Duration::from_secs(config.crawler.navigation_timeout_secs),
            Duration::from_secs(config.crawler.readiness_timeout_secs),
        );

        let intake = match &config.intake {
            Some(intake) => Some(
                IntakeClient::new(&intake.endpoint, Duration::from_secs(intake.timeout_secs))
                    .map_err(KhabarError::Sink)?,
            ),
            None => None,
        };

        Ok(Self {
            fetcher: Arc::new(fetcher),
            pipeline: Arc::new(Pipeline::new(sink, intake)),
            report: Arc::new(RunReport::new()),
            worker_concurrency: config.crawler.max_concurrent_pages as usize,
            sources: resolved,
        })
    }

    /// Runs the crawl to completion (or until `cancel` fires) and returns
    /// the run's counters.
    pub async fn run(&self, cancel: CancellationToken) -> Result<RunSummary, KhabarError> {
        // The one run-fatal condition: no rendering capability at all.
        if let Err(err) = self.fetcher.probe().await {
            tracing::error!(error = %err, "rendering capability is unreachable");
            return Err(KhabarError::Render(err));
        }

        let started = Instant::now();
        let (task_tx, task_rx) = mpsc::channel::<CrawlTask>(TASK_QUEUE_CAPACITY);
        let tracker = TaskTracker::new();

        for (profile, seeds) in &self.sources {
            for seed in seeds {
                let fetcher = self.fetcher.clone();
                let profile = profile.clone();
                let seed = seed.clone();
                let tasks = task_tx.clone();
                let report = self.report.clone();
                let cancel = cancel.clone();
                tracker.spawn(async move {
                    walk_source(&fetcher, profile, &seed, &tasks, &report, &cancel).await;
                });
            }
        }
        // Walkers hold the only senders now; the stream below ends when
        // the last walk finishes.
        drop(task_tx);

        let fetcher = self.fetcher.clone();
        let pipeline = self.pipeline.clone();
        let report = self.report.clone();
        let worker_cancel = cancel.clone();
        let concurrency = self.worker_concurrency;
        tracker.spawn(async move {
            ReceiverStream::new(task_rx)
                .for_each_concurrent(concurrency, |task| {
                    let fetcher = fetcher.clone();
                    let pipeline = pipeline.clone();
                    let report = report.clone();
                    let cancel = worker_cancel.clone();
                    async move {
                        process_article(&fetcher, &pipeline, &report, task, &cancel).await;
                    }
                })
                .await;
        });

        tracker.close();
        tracker.wait().await;

        tracing::info!(elapsed = ?started.elapsed(), "crawl finished");
        self.report.log_summary();
        Ok(self.report.summary())
    }
}

/// One article task: fetch, extract, submit. Failures are logged and
/// counted; nothing here can take down the run.
async fn process_article(
    fetcher: &Fetcher,
    pipeline: &Pipeline,
    report: &RunReport,
    task: CrawlTask,
    cancel: &CancellationToken,
) {
    if cancel.is_cancelled() {
        return;
    }

    // Advisory probe: skip the rendered fetch when another task already
    // claimed this URL. Uniqueness itself is enforced at submit.
    if pipeline.already_seen(&task.url) {
        report.record_duplicate();
        return;
    }

    tracing::info!(source = task.profile.name, url = %task.url, "scraping article");
    let fetched = match fetcher
        .fetch(
            &task.url,
            task.profile.article_navigation,
            &task.profile.article_readiness,
            &task.profile.request_filter,
        )
        .await
    {
        Ok(page) => page,
        Err(err) => {
            report.record_fetch_error();
            tracing::warn!(error = %err, "article fetch failed");
            return;
        }
    };
    let (html, final_url) = fetched.release().await;

    let article = match extract(&html, &final_url, &task.profile.rules) {
        Ok(article) => article,
        Err(err) => {
            report.record_extraction_failure();
            tracing::warn!(error = %err, "article extraction failed");
            return;
        }
    };
    report.record_extracted();
    if article.is_partial() {
        report.record_partial_extraction();
    }

    match pipeline.submit(&article).await {
        Ok(SubmitOutcome::Stored) => {
            report.record_stored();
            if let Err(err) = pipeline.forward_to_intake(&article).await {
                report.record_intake_failure();
                tracing::warn!(url = %article.url, error = %err, "intake forward failed");
            }
        }
        Ok(SubmitOutcome::Duplicate) => report.record_duplicate(),
        Err(err) => {
            report.record_sink_error();
            tracing::error!(url = %article.url, error = %err, "sink write failed");
        }
    }
}
