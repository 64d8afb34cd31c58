//! Headless Chrome session used to render ranking pages.
//!
//! Every crawl launches its own browser with a throwaway profile and closes
//! it when done. Nothing is shared between crawls.

use crate::config::Config;
use crate::musinsa::error::CrawlError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Browser page operations needed to load a ranking listing.
///
/// Methods take `&mut self` so a page can only ever run one command at a time.
#[async_trait]
pub trait RankingPage: Send {
    /// Navigates to `url` and waits for the load event.
    async fn goto(&mut self, url: &str) -> Result<(), CrawlError>;

    /// Returns true if `selector` matches at least one element right now.
    async fn has_element(&mut self, selector: &str) -> Result<bool, CrawlError>;

    /// Returns the URL the page is currently on.
    async fn current_url(&mut self) -> Result<String, CrawlError>;

    /// Returns `document.body.scrollHeight`.
    async fn scroll_height(&mut self) -> Result<u64, CrawlError>;

    /// Scrolls the window to the current bottom of the document.
    async fn scroll_to_bottom(&mut self) -> Result<(), CrawlError>;

    /// Returns the serialized DOM.
    async fn content(&mut self) -> Result<String, CrawlError>;

    /// Releases the page and its browser. Safe to call more than once.
    async fn close(&mut self) -> Result<(), CrawlError>;
}

/// Trait for launching browser pages - enables mocking for tests.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Page: RankingPage;

    /// Launches a fresh, isolated browser and opens one blank page.
    async fn launch(&self) -> Result<Self::Page, CrawlError>;
}

/// Launches local Chrome/Chromium through the DevTools protocol.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
    chrome_path: Option<PathBuf>,
    request_timeout: Duration,
}

impl ChromeLauncher {
    /// Creates a launcher from the crawl configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            headless: config.headless,
            chrome_path: config.chrome_path.clone(),
            request_timeout: Duration::from_millis(config.wait_timeout_ms.max(1000)),
        }
    }

    fn browser_config(&self, profile: &TempDir) -> Result<BrowserConfig, CrawlError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.request_timeout)
            .window_size(1920, 1080)
            .user_data_dir(profile.path())
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--mute-audio");

        if !self.headless {
            builder = builder.with_head();
        }

        if let Some(path) = &self.chrome_path {
            debug!("Using browser executable: {}", path.display());
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(CrawlError::Launch)
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    type Page = ChromePage;

    async fn launch(&self) -> Result<ChromePage, CrawlError> {
        let profile = tempfile::Builder::new()
            .prefix("musinsa-crawler-")
            .tempdir()
            .map_err(|e| CrawlError::Launch(format!("Failed to create profile directory: {}", e)))?;

        let config = self.browser_config(&profile)?;

        info!("Launching browser (headless: {})", self.headless);
        let (mut browser, mut handler) =
            Browser::launch(config).await.map_err(|e| CrawlError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let msg = e.to_string();
                    // chromiumoxide does not know every CDP event Chrome emits
                    if msg.contains("did not match any variant") || msg.contains("Failed to deserialize") {
                        trace!("Ignoring unknown CDP message: {}", msg);
                    } else {
                        error!("Browser handler error: {}", msg);
                    }
                }
            }
            debug!("Browser handler task completed");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(CrawlError::Launch(format!("Failed to open page: {}", e)));
            }
        };

        Ok(ChromePage { browser, page: Some(page), handler, profile: Some(profile), closed: false })
    }
}

/// One browser process with a single page, owned by one crawl.
pub struct ChromePage {
    browser: Browser,
    page: Option<Page>,
    handler: JoinHandle<()>,
    profile: Option<TempDir>,
    closed: bool,
}

impl ChromePage {
    fn page(&self) -> Result<&Page, CrawlError> {
        self.page.as_ref().ok_or_else(|| CrawlError::Browser("Page is already closed".to_string()))
    }
}

#[async_trait]
impl RankingPage for ChromePage {
    async fn goto(&mut self, url: &str) -> Result<(), CrawlError> {
        debug!("GET {}", url);
        self.page()?
            .goto(url)
            .await
            .map_err(|e| CrawlError::Navigation { url: url.to_string(), reason: e.to_string() })?;
        Ok(())
    }

    async fn has_element(&mut self, selector: &str) -> Result<bool, CrawlError> {
        let script = format!("document.querySelector({}) !== null", serde_json::to_string(selector)?);
        Ok(self.page()?.evaluate(script.as_str()).await?.into_value::<bool>()?)
    }

    async fn current_url(&mut self) -> Result<String, CrawlError> {
        Ok(self.page()?.url().await?.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn scroll_height(&mut self) -> Result<u64, CrawlError> {
        Ok(self.page()?.evaluate("document.body.scrollHeight").await?.into_value::<u64>()?)
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), CrawlError> {
        self.page()?.evaluate("window.scrollTo(0, document.body.scrollHeight)").await?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String, CrawlError> {
        Ok(self.page()?.content().await?)
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }
        }

        let result = self.browser.close().await.map(|_| ()).map_err(CrawlError::from);

        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();

        if let Some(profile) = self.profile.take() {
            if let Err(e) = profile.close() {
                warn!("Failed to remove browser profile: {}", e);
            }
        }

        debug!("Browser closed");
        result
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        // Browser's own Drop kills the child process if it is still running
        self.handler.abort();
    }
}
