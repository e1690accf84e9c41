//! Optional forwarding of stored articles to a downstream intake service.
//!
//! The intake endpoint accepts one article per request as
//! `{url, title, content}` and acknowledges it. Forwarding failures are
//! reported to the caller and never abort anything.

use crate::article::Article;
use crate::sink::traits::{SinkError, SinkResult};
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Serialize)]
struct IntakePayload<'a> {
    url: &'a str,
    title: &'a str,
    content: &'a str,
}

/// HTTP client for the downstream intake endpoint.
pub struct IntakeClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl IntakeClient {
    pub fn new(endpoint: &str, timeout: Duration) -> SinkResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| SinkError::Intake(format!("invalid endpoint {:?}: {}", endpoint, err)))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SinkError::Intake(err.to_string()))?;
        Ok(Self { http, endpoint })
    }

    /// Posts one article; any non-success status is an error.
    pub async fn forward(&self, article: &Article) -> SinkResult<()> {
        let payload = IntakePayload {
            url: &article.url,
            title: &article.headline,
            content: &article.body_text,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| SinkError::Intake(err.to_string()))?;

        if !response.status().is_success() {
            return Err(SinkError::Intake(format!(
                "endpoint returned {}",
                response.status()
            )));
        }
        tracing::debug!(url = %article.url, "article forwarded to intake");
        Ok(())
    }
}
