//! HTML parser for the ranking grid.

use crate::musinsa::models::RawItem;
use crate::musinsa::selectors::{self, IMAGE, LISTING_ITEM, NAME, PRICE};
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, trace};

/// Extracts raw item fields from a rendered ranking page.
pub struct Parser {
    /// Dedicated brand selector. `None` reads brand from the name node.
    brand: Option<Selector>,
}

impl Parser {
    /// Creates a parser that reads brand from the same node as the name.
    pub fn new() -> Self {
        Self { brand: None }
    }

    /// Creates a parser with an optional dedicated brand selector.
    pub fn with_brand_selector(css: Option<&str>) -> Result<Self> {
        let brand = match css {
            Some(css) => Some(
                Selector::parse(css).map_err(|e| anyhow!("Invalid brand selector '{}': {}", css, e))?,
            ),
            None => None,
        };
        Ok(Self { brand })
    }

    /// Returns one `RawItem` per listing node, in document order.
    pub fn extract_items(&self, html: &str) -> Vec<RawItem> {
        let document = Html::parse_document(html);

        if self.brand.is_none() {
            debug!("No brand selector configured; brand is read from '{}'", selectors::NAME_CSS);
        }

        let items: Vec<RawItem> = document
            .select(&LISTING_ITEM)
            .map(|element| {
                let item = self.parse_item(element);
                trace!("Parsed item: {:?}", item.name);
                item
            })
            .collect();

        debug!("Extracted {} items", items.len());
        items
    }

    fn parse_item(&self, element: ElementRef) -> RawItem {
        let image =
            element.select(&IMAGE).next().and_then(|e| e.value().attr("src").map(String::from));

        let name = first_text(element, &NAME);

        let price = first_text(element, &PRICE);

        let brand = match &self.brand {
            Some(selector) => first_text(element, selector),
            None => name.clone(),
        };

        RawItem { image, name, brand, price }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn first_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(inner_text)
}

/// Rendered text of an element: `<br>` breaks lines, whitespace runs within a
/// line collapse to one space.
fn inner_text(element: ElementRef) -> String {
    let mut lines = vec![String::new()];

    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            Node::Element(el) if el.name() == "br" => lines.push(String::new()),
            _ => {}
        }
    }

    let lines: Vec<String> =
        lines.iter().map(|line| line.split_whitespace().collect::<Vec<_>>().join(" ")).collect();

    lines.join("\n").trim().to_string()
}
