//! Field normalization: sentinels for missing fields and price display rules.

use crate::musinsa::models::{NormalizedRecord, RawItem, NO_BRAND, NO_IMAGE, NO_NAME, NO_PRICE};

/// Currency suffix for absolute prices.
pub const CURRENCY_SUFFIX: &str = "원";

/// Turns a raw item into an output record. Total: never fails.
pub fn normalize(raw: &RawItem) -> NormalizedRecord {
    NormalizedRecord {
        image: text_or(raw.image.as_deref(), NO_IMAGE),
        name: text_or(raw.name.as_deref(), NO_NAME),
        price: normalize_price(raw.price.as_deref()),
        brand: text_or(raw.brand.as_deref(), NO_BRAND),
    }
}

/// Renders price block text.
///
/// Text containing `%` is a discount rate and becomes `"<digits>% off"` from
/// the first digit run; anything else in the block is dropped. Otherwise all
/// digits are joined and shown as a grouped won amount.
pub fn normalize_price(text: Option<&str>) -> String {
    let Some(text) = text.map(str::trim) else {
        return NO_PRICE.to_string();
    };

    if text.contains('%') {
        return match first_digit_run(text) {
            Some(digits) => format!("{}% off", digits),
            // No rate to show; keep what the site printed
            None => text.to_string(),
        };
    }

    let digits: String = text.chars().filter_map(decimal_digit).collect();
    if digits.is_empty() {
        return NO_PRICE.to_string();
    }

    format!("{}{}", group_thousands(&digits), CURRENCY_SUFFIX)
}

fn text_or(value: Option<&str>, sentinel: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string(),
    }
}

fn first_digit_run(text: &str) -> Option<String> {
    let run: String = text
        .chars()
        .skip_while(|c| decimal_digit(*c).is_none())
        .map_while(decimal_digit)
        .collect();

    (!run.is_empty()).then_some(run)
}

/// Maps ASCII and full-width digits to their ASCII form.
fn decimal_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
        _ => None,
    }
}

/// Formats a digit string as an integer with comma groups ("0029000" -> "29,000").
fn group_thousands(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(trimmed.len() + trimmed.len() / 3);
    for (i, c) in trimmed.chars().enumerate() {
        if i > 0 && (trimmed.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
