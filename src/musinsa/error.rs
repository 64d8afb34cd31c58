//! Fatal crawl failures.

use chromiumoxide::error::CdpError;
use std::time::Duration;
use thiserror::Error;

/// Errors that end a single crawl. None of these are retried.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Timed out after {waited:?} waiting for '{selector}' on {url}")]
    Timeout { selector: String, url: String, waited: Duration },

    #[error("Browser command failed: {0}")]
    Browser(String),
}

impl From<CdpError> for CrawlError {
    fn from(e: CdpError) -> Self {
        CrawlError::Browser(e.to_string())
    }
}

impl From<serde_json::Error> for CrawlError {
    fn from(e: serde_json::Error) -> Self {
        CrawlError::Browser(format!("Unexpected evaluation result: {}", e))
    }
}
