//! WebDriver-backed implementation of the rendering capability.
//!
//! One [`PageHandle`] maps to one WebDriver session. WebDriver has no
//! per-request interception hook, so the request-filter policy is realized
//! at session-open time through browser capabilities: image loading is
//! switched off and blocked tracker hosts are black-holed with
//! host-resolver rules.

use crate::render::{PageHandle, PageSettings, RenderEngine, RenderError, ResourceKind};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Rendering engine talking to a WebDriver endpoint (chromedriver, selenium).
pub struct WebDriverEngine {
    webdriver_url: String,
}

impl WebDriverEngine {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
        }
    }

    /// Translates page settings into WebDriver session capabilities.
    fn capabilities(settings: &PageSettings) -> Map<String, Value> {
        let mut args = vec![
            "--headless=new".to_string(),
            "--disable-gpu".to_string(),
            format!("--user-agent={}", settings.user_agent),
        ];

        if settings.filter.blocks_resource(ResourceKind::Image) {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }

        let blocked = settings.filter.blocked_hosts();
        if !blocked.is_empty() {
            let rules = blocked
                .iter()
                .map(|host| format!("MAP *.{} 127.0.0.1", host))
                .collect::<Vec<_>>()
                .join(", ");
            args.push(format!("--host-resolver-rules={}", rules));
        }

        let mut caps = Map::new();
        caps.insert(
            "pageLoadStrategy".to_string(),
            Value::String(settings.navigation.page_load_strategy().to_string()),
        );
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }
}

#[async_trait]
impl RenderEngine for WebDriverEngine {
    async fn open_page(&self, settings: &PageSettings) -> Result<Box<dyn PageHandle>, RenderError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(Self::capabilities(settings));

        let client = builder
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| RenderError::Session(e.to_string()))?;

        Ok(Box::new(WebDriverPage { client }))
    }
}

/// One open WebDriver session.
struct WebDriverPage {
    client: Client,
}

fn command_error(err: CmdError) -> RenderError {
    match err {
        CmdError::WaitTimeout => RenderError::ReadinessTimeout,
        other => RenderError::Command(other.to_string()),
    }
}

#[async_trait]
impl PageHandle for WebDriverPage {
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))
    }

    async fn wait_for_selector(&mut self, css: &str, timeout: Duration) -> Result<(), RenderError> {
        self.client
            .wait()
            .at_most(timeout)
            .every(Duration::from_millis(250))
            .for_element(Locator::Css(css))
            .await
            .map(|_| ())
            .map_err(command_error)
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError> {
        self.client
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await
            .map(|_| ())
            .map_err(command_error)
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        self.client.source().await.map_err(command_error)
    }

    async fn current_url(&mut self) -> Result<String, RenderError> {
        self.client
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(command_error)
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        self.client.close().await.map_err(command_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NavigationMode, RequestFilterPolicy, CORE_TRACKER_HOSTS};

    fn settings(filter: RequestFilterPolicy) -> PageSettings {
        PageSettings {
            navigation: NavigationMode::Commit,
            filter,
            user_agent: "TestAgent/1.0".to_string(),
        }
    }

    #[test]
    fn test_capabilities_carry_page_load_strategy() {
        let caps = WebDriverEngine::capabilities(&settings(RequestFilterPolicy::permissive()));
        assert_eq!(caps["pageLoadStrategy"], json!("none"));
    }

    #[test]
    fn test_permissive_policy_adds_no_filter_args() {
        let caps = WebDriverEngine::capabilities(&settings(RequestFilterPolicy::permissive()));
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(!args.iter().any(|a| {
            let a = a.as_str().unwrap();
            a.contains("imagesEnabled") || a.contains("host-resolver-rules")
        }));
    }

    #[test]
    fn test_blocked_images_disable_image_loading() {
        let policy = RequestFilterPolicy::new(&[ResourceKind::Image], &[]);
        let caps = WebDriverEngine::capabilities(&settings(policy));
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args
            .iter()
            .any(|a| a.as_str().unwrap() == "--blink-settings=imagesEnabled=false"));
    }

    #[test]
    fn test_blocked_hosts_become_resolver_rules() {
        let policy = RequestFilterPolicy::new(&[], CORE_TRACKER_HOSTS);
        let caps = WebDriverEngine::capabilities(&settings(policy));
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        let rules = args
            .iter()
            .find(|a| a.as_str().unwrap().starts_with("--host-resolver-rules="))
            .expect("missing host-resolver-rules arg")
            .as_str()
            .unwrap();
        assert!(rules.contains("MAP *.doubleclick.net 127.0.0.1"));
        assert!(rules.contains("MAP *.google-analytics.com 127.0.0.1"));
    }

    #[test]
    fn test_user_agent_is_forwarded() {
        let caps = WebDriverEngine::capabilities(&settings(RequestFilterPolicy::permissive()));
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args
            .iter()
            .any(|a| a.as_str().unwrap() == "--user-agent=TestAgent/1.0"));
    }
}
