//! Crawl orchestration: resolve category, load the page, extract, normalize.

use crate::config::Config;
use crate::musinsa::browser::{BrowserLauncher, ChromeLauncher, RankingPage};
use crate::musinsa::categories::Category;
use crate::musinsa::error::CrawlError;
use crate::musinsa::fetcher::{FetchOutcome, ListingFetcher};
use crate::musinsa::models::{CrawlOutcome, CrawlResult};
use crate::musinsa::normalize::normalize;
use crate::musinsa::parser::Parser;
use anyhow::Result;
use tracing::{info, warn};

/// Runs single-category crawls. Holds no state between runs.
pub struct Crawler<L: BrowserLauncher = ChromeLauncher> {
    config: Config,
    launcher: L,
    parser: Parser,
}

impl Crawler<ChromeLauncher> {
    /// Creates a crawler that drives local Chrome.
    pub fn new(config: Config) -> Result<Self> {
        let launcher = ChromeLauncher::new(&config);
        Self::with_launcher(config, launcher)
    }
}

impl<L: BrowserLauncher> Crawler<L> {
    /// Creates a crawler with a provided launcher (for testing).
    pub fn with_launcher(config: Config, launcher: L) -> Result<Self> {
        let parser = Parser::with_brand_selector(config.brand_selector.as_deref())?;
        Ok(Self { config, launcher, parser })
    }

    /// Crawls the ranking for one category label.
    ///
    /// Unknown labels and invalid pages are ordinary outcomes; only browser
    /// failures come back as `Err`. The browser is closed on every path.
    pub async fn run(&self, label: &str) -> Result<CrawlOutcome, CrawlError> {
        let category = match Category::from_label(label) {
            Ok(category) => category,
            Err(e) => {
                warn!("{}", e);
                return Ok(CrawlOutcome::UnknownCategory { label: label.to_string() });
            }
        };

        info!("Crawling category {} ({})", category, category.code());

        let mut page = self.launcher.launch().await?;
        let outcome = self.crawl(&mut page, category).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }

        outcome
    }

    async fn crawl(&self, page: &mut L::Page, category: Category) -> Result<CrawlOutcome, CrawlError> {
        let fetcher = ListingFetcher::new(&self.config);

        let loaded = match fetcher.fetch(page, category.code()).await? {
            FetchOutcome::Loaded(loaded) => loaded,
            FetchOutcome::Invalid { final_url } => {
                return Ok(CrawlOutcome::PageInvalid { category, final_url });
            }
        };

        let records: Vec<_> = self.parser.extract_items(&loaded.html).iter().map(normalize).collect();

        info!("Crawled {} products from {}", records.len(), category);

        Ok(CrawlOutcome::Completed(CrawlResult {
            category,
            url: loaded.url,
            final_url: loaded.final_url,
            scroll: loaded.scroll,
            records,
        }))
    }
}
