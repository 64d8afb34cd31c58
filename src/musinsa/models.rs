//! Data models for ranking items and crawl results.

use crate::musinsa::categories::Category;
use serde::{Deserialize, Serialize};

pub const NO_IMAGE: &str = "No image";
pub const NO_NAME: &str = "No name";
pub const NO_PRICE: &str = "No price";
pub const NO_BRAND: &str = "No brand";

/// Unprocessed fields pulled from one item card. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    /// Image `src` attribute
    pub image: Option<String>,
    /// Trimmed display name text
    pub name: Option<String>,
    /// Trimmed brand text
    pub brand: Option<String>,
    /// Trimmed price block text
    pub price: Option<String>,
}

/// One output row. Every field is a non-empty display string.
///
/// Field declaration order is the column order for every serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub image: String,
    pub name: String,
    pub price: String,
    pub brand: String,
}

impl NormalizedRecord {
    /// Column names, in output order.
    pub const FIELDS: [&'static str; 4] = ["image", "name", "price", "brand"];

    /// Returns the field values in `FIELDS` order.
    pub fn values(&self) -> [&str; 4] {
        [&self.image, &self.name, &self.price, &self.brand]
    }
}

/// How the scroll loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollReport {
    /// Scroll commands issued
    pub scrolls: usize,
    /// Last measured `document.body.scrollHeight`
    pub final_height: u64,
    /// False when a safety cap stopped the loop before the height settled
    pub stabilized: bool,
}

/// Records from one completed crawl, in DOM order.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub category: Category,
    /// URL the crawl navigated to
    pub url: String,
    /// URL the browser ended up on
    pub final_url: String,
    pub scroll: ScrollReport,
    pub records: Vec<NormalizedRecord>,
}

impl CrawlResult {
    /// Returns number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the page had no items.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Non-error outcomes of a crawl.
#[derive(Debug, Clone)]
pub enum CrawlOutcome {
    /// Page loaded and was extracted (possibly with zero items).
    Completed(CrawlResult),
    /// Label is not a known category; nothing was crawled.
    UnknownCategory { label: String },
    /// Site redirected to a default or invalid section.
    PageInvalid { category: Category, final_url: String },
}

impl CrawlOutcome {
    /// Records of the crawl. Empty for anything but `Completed`.
    pub fn records(&self) -> &[NormalizedRecord] {
        match self {
            CrawlOutcome::Completed(result) => &result.records,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> NormalizedRecord {
        NormalizedRecord {
            image: "https://image.msscdn.net/a.jpg".to_string(),
            name: "Logo Tee".to_string(),
            price: "29,000원".to_string(),
            brand: "Logo Tee".to_string(),
        }
    }

    #[test]
    fn test_values_follow_fields_order() {
        let record = make_record();
        assert_eq!(record.values(), ["https://image.msscdn.net/a.jpg", "Logo Tee", "29,000원", "Logo Tee"]);
    }

    #[test]
    fn test_serde_field_order() {
        let json = serde_json::to_string(&make_record()).unwrap();
        let image = json.find("\"image\"").unwrap();
        let name = json.find("\"name\"").unwrap();
        let price = json.find("\"price\"").unwrap();
        let brand = json.find("\"brand\"").unwrap();
        assert!(image < name && name < price && price < brand);

        let parsed: NormalizedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, make_record());
    }

    #[test]
    fn test_outcome_records() {
        let invalid = CrawlOutcome::PageInvalid {
            category: Category::Shoes,
            final_url: "https://www.musinsa.com/main/musinsa/ranking?sectionId=199".to_string(),
        };
        assert!(invalid.records().is_empty());

        let unknown = CrawlOutcome::UnknownCategory { label: "x".to_string() };
        assert!(unknown.records().is_empty());

        let completed = CrawlOutcome::Completed(CrawlResult {
            category: Category::Shoes,
            url: String::new(),
            final_url: String::new(),
            scroll: ScrollReport { scrolls: 1, final_height: 100, stabilized: true },
            records: vec![make_record()],
        });
        assert_eq!(completed.records().len(), 1);
    }
}
