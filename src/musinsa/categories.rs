//! Musinsa ranking categories and their internal category codes.

use std::fmt;
use thiserror::Error;

/// Site-internal identifier for one merchandising category (6 ASCII digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryCode(&'static str);

impl CategoryCode {
    /// Returns the code as it appears in the ranking URL.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Returned when a label is not one of the known category labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category label: '{0}'")]
pub struct UnknownCategory(pub String);

/// Categories offered by the ranking page, in picker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Top,
    Outer,
    Pants,
    OnepieceSkirt,
    Shoes,
    Bag,
    FashionAccessories,
    UnderwearHomewear,
    Beauty,
    SportsLeisure,
    DigitalLife,
    Kids,
}

impl Category {
    /// Returns the human-readable label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Top => "상의",
            Category::Outer => "아우터",
            Category::Pants => "바지",
            Category::OnepieceSkirt => "원피스/스커트",
            Category::Shoes => "신발",
            Category::Bag => "가방",
            Category::FashionAccessories => "패션소품",
            Category::UnderwearHomewear => "속옷/홈웨어",
            Category::Beauty => "뷰티",
            Category::SportsLeisure => "스포츠/레저",
            Category::DigitalLife => "디지털/라이프",
            Category::Kids => "키즈",
        }
    }

    /// Returns the category code used in the ranking URL.
    ///
    /// `OnepieceSkirt` and `Bag` share `004000`; the site table has always
    /// mapped them this way.
    pub fn code(&self) -> CategoryCode {
        CategoryCode(match self {
            Category::Top => "001000",
            Category::Outer => "003000",
            Category::Pants => "002000",
            Category::OnepieceSkirt => "004000",
            Category::Shoes => "007000",
            Category::Bag => "004000",
            Category::FashionAccessories => "101000",
            Category::UnderwearHomewear => "026000",
            Category::Beauty => "104000",
            Category::SportsLeisure => "017000",
            Category::DigitalLife => "102000",
            Category::Kids => "106000",
        })
    }

    /// Looks up a category by its exact label. No case or whitespace folding.
    pub fn from_label(label: &str) -> Result<Self, UnknownCategory> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.label() == label)
            .ok_or_else(|| UnknownCategory(label.to_string()))
    }

    /// Returns all categories in picker order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Top,
            Category::Outer,
            Category::Pants,
            Category::OnepieceSkirt,
            Category::Shoes,
            Category::Bag,
            Category::FashionAccessories,
            Category::UnderwearHomewear,
            Category::Beauty,
            Category::SportsLeisure,
            Category::DigitalLife,
            Category::Kids,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolves a category label straight to its code.
pub fn resolve(label: &str) -> Result<CategoryCode, UnknownCategory> {
    Category::from_label(label).map(|c| c.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_labels() {
        assert_eq!(resolve("신발").unwrap().as_str(), "007000");
        assert_eq!(resolve("상의").unwrap().as_str(), "001000");
        assert_eq!(resolve("속옷/홈웨어").unwrap().as_str(), "026000");
        assert_eq!(resolve("키즈").unwrap().as_str(), "106000");
    }

    #[test]
    fn test_all_codes_are_six_digits() {
        assert_eq!(Category::all().len(), 12);
        for category in Category::all() {
            let code = resolve(category.label()).unwrap();
            assert_eq!(code.as_str().len(), 6, "bad code for {}", category);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()), "bad code for {}", category);
            // Deterministic
            assert_eq!(resolve(category.label()).unwrap(), code);
        }
    }

    #[test]
    fn test_shared_code() {
        assert_eq!(Category::Bag.code(), Category::OnepieceSkirt.code());
    }

    #[test]
    fn test_resolve_unknown() {
        let err = resolve("모자").unwrap_err();
        assert_eq!(err, UnknownCategory("모자".to_string()));
        assert!(err.to_string().contains("모자"));
    }

    #[test]
    fn test_resolve_is_exact_match() {
        assert!(resolve(" 신발").is_err());
        assert!(resolve("신발 ").is_err());
        assert!(resolve("shoes").is_err());
        assert!(resolve("").is_err());
        assert!(resolve("원피스").is_err());
    }

    #[test]
    fn test_label_roundtrip() {
        for category in Category::all() {
            assert_eq!(Category::from_label(category.label()).unwrap(), *category);
        }
        assert_eq!(Category::Shoes.to_string(), "신발");
        assert_eq!(Category::Shoes.code().to_string(), "007000");
    }
}
