//! Khabar: a browser-rendered news article crawler
//!
//! This crate crawls a fixed set of news sites through a rendering browser,
//! extracts a normalized article record from each article page, and stores
//! the records idempotently keyed by canonical URL.

pub mod article;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod render;
pub mod report;
pub mod sink;
pub mod sources;

use thiserror::Error;

/// Main error type for crawl operations.
#[derive(Debug, Error)]
pub enum KhabarError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, KhabarError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use article::{Article, SENTINEL};
pub use config::Config;
pub use crawler::Coordinator;
pub use report::RunSummary;
