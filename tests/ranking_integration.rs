//! Integration tests for extraction and normalization using a saved ranking page.

use musinsa_crawler::format::{save_csv, SaveStatus};
use musinsa_crawler::musinsa::categories::resolve;
use musinsa_crawler::musinsa::fetcher::is_invalid_page;
use musinsa_crawler::musinsa::normalize::normalize;
use musinsa_crawler::musinsa::{NormalizedRecord, Parser};

const RANKING_FIXTURE: &str = include_str!("fixtures/ranking_page.html");

fn crawl_fixture() -> Vec<NormalizedRecord> {
    Parser::new().extract_items(RANKING_FIXTURE).iter().map(normalize).collect()
}

#[test]
fn test_extract_ranking_fixture() {
    let records = crawl_fixture();

    // Every container yields a record, even the empty one at the end
    assert_eq!(records.len(), 4);

    let first = &records[0];
    assert!(first.image.ends_with("3847212_17080662432455_500.jpg"));
    assert_eq!(first.name, "아디다스 삼바 OG - 화이트 / B75806");
    assert_eq!(first.price, "139,000원");
    assert_eq!(first.brand, first.name);

    // Discount block hides the sale price
    assert_eq!(records[1].price, "12% off");

    // Lazy image without src, sold out price
    assert_eq!(records[2].image, "No image");
    assert_eq!(records[2].price, "No price");
    assert_eq!(records[2].name, "나이키 덩크 로우 레트로 - 블랙 / DD1391-100");

    assert_eq!(records[3].values(), ["No image", "No name", "No price", "No brand"]);
}

#[test]
fn test_records_are_uniform() {
    for record in crawl_fixture() {
        assert!(record.values().iter().all(|v| !v.is_empty()));
    }
}

#[test]
fn test_shoes_category_url_parts() {
    assert_eq!(resolve("신발").unwrap().as_str(), "007000");
    assert!(is_invalid_page("https://www.musinsa.com/main/musinsa/ranking?storeCode=musinsa&sectionId=199"));
    assert!(!is_invalid_page(
        "https://www.musinsa.com/main/musinsa/ranking?storeCode=musinsa&sectionId=200&categoryCode=007000"
    ));
}

#[test]
fn test_fixture_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoes.csv");

    let status = save_csv(&crawl_fixture(), &path).unwrap();
    assert_eq!(status, SaveStatus::Written { rows: 4 });

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("image,name,price,brand"));
    assert!(lines.next().unwrap().contains("\"139,000원\""));
    assert_eq!(content.lines().count(), 5);
}
