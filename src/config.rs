//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ranking page base, without the `/ranking` path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `storeCode` query parameter
    #[serde(default = "default_store_code")]
    pub store_code: String,

    /// `sectionId` query parameter
    #[serde(default = "default_section_id")]
    pub section_id: String,

    /// Run Chrome without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Chrome/Chromium executable (auto-detected when unset)
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// How long to wait for the listing marker after navigation
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Pause after each scroll so lazy-loaded items can render
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Upper bound on scroll commands per crawl
    #[serde(default = "default_max_scrolls")]
    pub max_scrolls: usize,

    /// Wall-clock bound on the scroll loop
    #[serde(default = "default_scroll_budget_secs")]
    pub scroll_budget_secs: u64,

    /// Dedicated brand selector; unset reads brand from the name node
    #[serde(default)]
    pub brand_selector: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    "https://www.musinsa.com/main/musinsa".to_string()
}

fn default_store_code() -> String {
    "musinsa".to_string()
}

fn default_section_id() -> String {
    "200".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_wait_timeout_ms() -> u64 {
    30_000
}

fn default_settle_ms() -> u64 {
    2000
}

fn default_max_scrolls() -> usize {
    200
}

fn default_scroll_budget_secs() -> u64 {
    600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            store_code: default_store_code(),
            section_id: default_section_id(),
            headless: default_headless(),
            chrome_path: None,
            wait_timeout_ms: default_wait_timeout_ms(),
            settle_ms: default_settle_ms(),
            max_scrolls: default_max_scrolls(),
            scroll_budget_secs: default_scroll_budget_secs(),
            brand_selector: None,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("musinsa-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(path) = std::env::var("MUSINSA_CHROME_PATH") {
            self.chrome_path = Some(PathBuf::from(path));
        }

        if let Ok(base_url) = std::env::var("MUSINSA_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(settle) = std::env::var("MUSINSA_SETTLE_MS") {
            if let Ok(s) = settle.parse() {
                self.settle_ms = s;
            }
        }

        if let Ok(max) = std::env::var("MUSINSA_MAX_SCROLLS") {
            if let Ok(m) = max.parse() {
                self.max_scrolls = m;
            }
        }

        if let Ok(headless) = std::env::var("MUSINSA_HEADLESS") {
            if let Ok(h) = headless.parse() {
                self.headless = h;
            }
        }

        self
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn scroll_budget(&self) -> Duration {
        Duration::from_secs(self.scroll_budget_secs)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
