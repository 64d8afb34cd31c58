//! Loads a category ranking page and scrolls it until every item has rendered.

use crate::config::Config;
use crate::musinsa::browser::RankingPage;
use crate::musinsa::categories::CategoryCode;
use crate::musinsa::error::CrawlError;
use crate::musinsa::models::ScrollReport;
use crate::musinsa::selectors::LISTING_ITEM_CSS;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Section the site falls back to when a category has no ranking.
const INVALID_SECTION_MARKER: &str = "sectionId=199";

/// All-zero category the site redirects unknown codes to.
const INVALID_CATEGORY_MARKER: &str = "categoryCode=000";

const MARKER_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A fully scrolled page snapshot, ready for extraction.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub url: String,
    pub final_url: String,
    pub html: String,
    pub scroll: ScrollReport,
}

/// Result of loading a ranking page.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Loaded(LoadedPage),
    /// The site redirected to a default/invalid section.
    Invalid { final_url: String },
}

/// Returns true if the browser was sent to the default/invalid section.
pub fn is_invalid_page(url: &str) -> bool {
    url.contains(INVALID_SECTION_MARKER) || url.contains(INVALID_CATEGORY_MARKER)
}

/// Drives one page through navigation, validation and infinite scroll.
pub struct ListingFetcher<'a> {
    config: &'a Config,
}

impl<'a> ListingFetcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Builds the ranking URL for a category.
    pub fn ranking_url(&self, code: CategoryCode) -> String {
        format!(
            "{}/ranking?storeCode={}&sectionId={}&categoryCode={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.store_code,
            self.config.section_id,
            code
        )
    }

    /// Navigates to the category ranking and loads every item.
    pub async fn fetch(
        &self,
        page: &mut impl RankingPage,
        code: CategoryCode,
    ) -> Result<FetchOutcome, CrawlError> {
        let url = self.ranking_url(code);
        info!("Loading ranking page: {}", url);

        page.goto(&url).await?;

        // Redirects happen during navigation, so an invalid page may never show the marker
        let landed = page.current_url().await?;
        if is_invalid_page(&landed) {
            info!("Redirected to invalid section: {}", landed);
            return Ok(FetchOutcome::Invalid { final_url: landed });
        }

        self.wait_for_listing(page, &url).await?;

        let final_url = page.current_url().await?;
        if is_invalid_page(&final_url) {
            info!("Redirected to invalid section: {}", final_url);
            return Ok(FetchOutcome::Invalid { final_url });
        }

        let scroll = self.scroll_until_stable(page).await?;
        let html = page.content().await?;

        Ok(FetchOutcome::Loaded(LoadedPage { url, final_url, html, scroll }))
    }

    /// Polls for the listing marker until it appears or the wait bound runs out.
    async fn wait_for_listing(&self, page: &mut impl RankingPage, url: &str) -> Result<(), CrawlError> {
        let timeout = self.config.wait_timeout();
        let start = Instant::now();

        loop {
            if page.has_element(LISTING_ITEM_CSS).await? {
                debug!("Listing marker found after {:?}", start.elapsed());
                return Ok(());
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(CrawlError::Timeout {
                    selector: LISTING_ITEM_CSS.to_string(),
                    url: url.to_string(),
                    waited: elapsed,
                });
            }

            tokio::time::sleep(MARKER_POLL_INTERVAL.min(timeout - elapsed)).await;
        }
    }

    /// Scrolls to the bottom until two consecutive height measurements match.
    ///
    /// Bounded by `max_scrolls` and `scroll_budget_secs`; hitting either stops
    /// the loop with `stabilized: false` and the page is extracted as-is.
    pub async fn scroll_until_stable(&self, page: &mut impl RankingPage) -> Result<ScrollReport, CrawlError> {
        let settle = self.config.settle();
        let budget = self.config.scroll_budget();
        let start = Instant::now();

        let mut last_height = page.scroll_height().await?;
        let mut scrolls = 0;

        loop {
            if scrolls >= self.config.max_scrolls {
                warn!("Stopped scrolling after {} scrolls without the page settling", scrolls);
                return Ok(ScrollReport { scrolls, final_height: last_height, stabilized: false });
            }
            if start.elapsed() >= budget {
                warn!("Stopped scrolling after {:?} without the page settling", start.elapsed());
                return Ok(ScrollReport { scrolls, final_height: last_height, stabilized: false });
            }

            page.scroll_to_bottom().await?;
            scrolls += 1;
            tokio::time::sleep(settle).await;

            let new_height = page.scroll_height().await?;
            debug!("Scroll {}: height {} -> {}", scrolls, last_height, new_height);

            if new_height == last_height {
                info!("Page settled after {} scrolls (height {})", scrolls, new_height);
                return Ok(ScrollReport { scrolls, final_height: new_height, stabilized: true });
            }
            last_height = new_height;
        }
    }
}
