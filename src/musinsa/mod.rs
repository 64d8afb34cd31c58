//! Musinsa-specific modules for browser control, parsing, and data models.

pub mod browser;
pub mod categories;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod selectors;

pub use browser::{BrowserLauncher, ChromeLauncher, RankingPage};
pub use categories::{Category, CategoryCode, UnknownCategory};
pub use crawler::Crawler;
pub use error::CrawlError;
pub use models::{CrawlOutcome, CrawlResult, NormalizedRecord, RawItem};
pub use parser::Parser;
