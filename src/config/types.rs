use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub webdriver: WebDriverConfig,
    pub output: OutputConfig,
    /// Sources to crawl, by built-in profile name.
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    /// Optional downstream intake service.
    #[serde(default)]
    pub intake: Option<IntakeConfig>,
}

/// Crawler behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrently open browser pages.
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,

    /// Upper bound on a single navigation, in seconds.
    #[serde(rename = "navigation-timeout-secs", default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Upper bound on a readiness wait, in seconds.
    #[serde(rename = "readiness-timeout-secs", default = "default_readiness_timeout")]
    pub readiness_timeout_secs: u64,

    /// User agent presented by every browser page.
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// WebDriver endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebDriverConfig {
    /// Address of the WebDriver server (chromedriver, selenium).
    pub url: String,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite article database.
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// One source to crawl.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    /// Built-in profile name (e.g. "ndtv", "the-hindu").
    pub name: String,

    /// Seed listing URLs; empty means the profile's defaults.
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Downstream intake endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Endpoint accepting `{url, title, content}` article payloads.
    pub endpoint: String,

    #[serde(rename = "timeout-secs", default = "default_intake_timeout")]
    pub timeout_secs: u64,
}

fn default_navigation_timeout() -> u64 {
    30
}

fn default_readiness_timeout() -> u64 {
    20
}

fn default_intake_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    // Matches a mainstream desktop browser so rendered pages serve their
    // normal markup.
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"
        .to_string()
}
