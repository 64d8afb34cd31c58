//! musinsa-crawler - Ranking page crawler for Musinsa categories
//!
//! Renders a category ranking in headless Chrome, scrolls until the
//! infinite list stops growing, and flattens every item into a uniform
//! {image, name, price, brand} record.

pub mod commands;
pub mod config;
pub mod format;
pub mod musinsa;

pub use config::Config;
pub use musinsa::{Category, CrawlOutcome, Crawler, NormalizedRecord};
