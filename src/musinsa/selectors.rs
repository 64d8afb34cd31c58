//! CSS selectors for the Musinsa ranking grid.
//!
//! The class names are generated by the site's styled-components build and
//! change when Musinsa redeploys. When extraction comes back empty, capture a
//! fresh page, update the selectors here and refresh the test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Listing item marker. Also the element the fetcher waits for.
pub const LISTING_ITEM_CSS: &str = ".sc-1m4cyao-0";

/// Name text inside an item card. Brand is read from the same node unless a
/// dedicated brand selector is configured.
pub const NAME_CSS: &str = ".sc-1m4cyao-10 p";

/// One product entry in the ranking grid.
pub static LISTING_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(LISTING_ITEM_CSS).unwrap());

/// Product thumbnail.
pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Product display name.
pub static NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse(NAME_CSS).unwrap());

/// Price block (discount rate or sale price).
pub static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".sc-1m4cyao-11 .sc-1m4cyao-12").unwrap());
