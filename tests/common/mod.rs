//! Shared test support: a scriptable rendering engine.
#![allow(dead_code)]

use async_trait::async_trait;
use khabar::render::{PageHandle, PageSettings, RenderEngine, RenderError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Rendering engine serving canned documents per URL, with failure
/// injection and open/close counters.
#[derive(Default)]
pub struct ScriptedEngine {
    bodies: HashMap<String, String>,
    fail_navigation: HashSet<String>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.bodies.insert(url.to_string(), html.to_string());
        self
    }

    pub fn failing_navigation(mut self, url: &str) -> Self {
        self.fail_navigation.insert(url.to_string());
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderEngine for ScriptedEngine {
    async fn open_page(&self, _settings: &PageSettings) -> Result<Box<dyn PageHandle>, RenderError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedPage {
            bodies: Arc::new(self.bodies.clone()),
            fail_navigation: Arc::new(self.fail_navigation.clone()),
            closed: self.closed.clone(),
            location: None,
        }))
    }
}

struct ScriptedPage {
    bodies: Arc<HashMap<String, String>>,
    fail_navigation: Arc<HashSet<String>>,
    closed: Arc<AtomicUsize>,
    location: Option<String>,
}

#[async_trait]
impl PageHandle for ScriptedPage {
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        if self.fail_navigation.contains(url) {
            return Err(RenderError::Navigation("connection reset".to_string()));
        }
        if !self.bodies.contains_key(url) {
            return Err(RenderError::Navigation(format!("no route to {}", url)));
        }
        self.location = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&mut self, _css: &str, _timeout: Duration) -> Result<(), RenderError> {
        if self.location.is_some() {
            Ok(())
        } else {
            Err(RenderError::Command("no page loaded".to_string()))
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        let url = self
            .location
            .as_ref()
            .ok_or_else(|| RenderError::Command("no page loaded".to_string()))?;
        Ok(self.bodies[url].clone())
    }

    async fn current_url(&mut self) -> Result<String, RenderError> {
        self.location
            .clone()
            .ok_or_else(|| RenderError::Command("no page loaded".to_string()))
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
