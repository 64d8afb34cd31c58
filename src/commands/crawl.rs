//! Crawl command implementation.

use crate::config::Config;
use crate::format::{save_csv, Formatter, SaveStatus};
use crate::musinsa::{BrowserLauncher, Category, CrawlOutcome, Crawler};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Crawls one category and renders or saves the result.
pub struct CrawlCommand {
    config: Config,
    output: Option<PathBuf>,
}

impl CrawlCommand {
    /// Creates a new crawl command. With `output` set, records go to a CSV file.
    pub fn new(config: Config, output: Option<PathBuf>) -> Self {
        Self { config, output }
    }

    /// Executes the crawl and returns a user-facing message or formatted records.
    pub async fn execute(&self, label: &str) -> Result<String> {
        let crawler = Crawler::new(self.config.clone()).context("Failed to set up crawler")?;

        self.execute_with_crawler(&crawler, label).await
    }

    /// Executes the crawl with a provided crawler (for testing).
    pub async fn execute_with_crawler<L: BrowserLauncher>(
        &self,
        crawler: &Crawler<L>,
        label: &str,
    ) -> Result<String> {
        let outcome = crawler.run(label).await.context("Crawl failed")?;

        let result = match outcome {
            CrawlOutcome::UnknownCategory { label } => {
                let labels: Vec<&str> = Category::all().iter().map(|c| c.label()).collect();
                return Ok(format!("Unknown category '{}'. Choose one of: {}", label, labels.join(", ")));
            }
            CrawlOutcome::PageInvalid { category, final_url } => {
                return Ok(format!(
                    "Ranking for {} is not available (redirected to {}).",
                    category, final_url
                ));
            }
            CrawlOutcome::Completed(result) => result,
        };

        if !result.scroll.stabilized {
            warn!("Listing may be incomplete: scrolling stopped after {} scrolls", result.scroll.scrolls);
        }

        let Some(path) = &self.output else {
            let formatter = Formatter::new(self.config.format);
            return Ok(formatter.format_records(&result.records));
        };

        match save_csv(&result.records, path)? {
            SaveStatus::Written { rows } => {
                info!("Crawl of {} saved", result.category);
                Ok(format!("Saved {} records to {}", rows, path.display()))
            }
            SaveStatus::NothingToSave => Ok("No products found. Nothing to save.".to_string()),
        }
    }
}
