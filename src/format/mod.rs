//! Output formatting for ranking records (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::musinsa::NormalizedRecord;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Formats records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[NormalizedRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => csv_records(records),
        }
    }

    // JSON formatting

    fn json_records(&self, records: &[NormalizedRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_records(&self, records: &[NormalizedRecord]) -> String {
        let rank_width = 4;
        let price_width = 12;
        let brand_width = 20;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<rank_width$}  {:<price_width$}  {:<brand_width$}  {:<name_width$}  {}",
            "#", "Price", "Brand", "Name", "Image"
        ));
        lines.push(format!(
            "{:-<rank_width$}  {:-<price_width$}  {:-<brand_width$}  {:-<name_width$}  {:-<5}",
            "", "", "", "", ""
        ));

        for (i, record) in records.iter().enumerate() {
            lines.push(format!(
                "{:<rank_width$}  {:>price_width$}  {:<brand_width$}  {:<name_width$}  {}",
                i + 1,
                record.price,
                truncate(&record.brand, brand_width),
                truncate(&record.name, name_width),
                record.image
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records(&self, records: &[NormalizedRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| # | Price | Brand | Name | Image |".to_string());
        lines.push("|---|-------|-------|------|-------|".to_string());

        for (i, record) in records.iter().enumerate() {
            let image = if record.image.starts_with("http") {
                format!("[link]({})", record.image)
            } else {
                record.image.clone()
            };

            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                i + 1,
                record.price,
                record.brand.replace('|', "\\|"),
                truncate(&record.name, 40).replace('|', "\\|"),
                image
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", records.len()));

        lines.join("\n")
    }
}

/// Result of handing records to the CSV sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Written { rows: usize },
    /// Empty input; no file was created.
    NothingToSave,
}

/// Writes records as UTF-8 CSV with a header row. Empty input writes nothing.
pub fn save_csv(records: &[NormalizedRecord], path: impl AsRef<Path>) -> Result<SaveStatus> {
    let path = path.as_ref();

    if records.is_empty() {
        debug!("No records, skipping write to {}", path.display());
        return Ok(SaveStatus::NothingToSave);
    }

    let mut content = csv_records(records);
    content.push('\n');

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    info!("Saved {} records to {}", records.len(), path.display());
    Ok(SaveStatus::Written { rows: records.len() })
}

fn csv_header() -> String {
    NormalizedRecord::FIELDS.join(",")
}

fn csv_records(records: &[NormalizedRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(csv_header());

    for record in records {
        let row: Vec<String> = record.values().iter().map(|v| csv_escape(v)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_record() -> NormalizedRecord {
        NormalizedRecord {
            image: "https://image.msscdn.net/images/goods_img/1.jpg".to_string(),
            name: "Nike Dunk Low".to_string(),
            price: "20% off".to_string(),
            brand: "Nike Dunk Low".to_string(),
        }
    }

    fn make_sentinel_record() -> NormalizedRecord {
        NormalizedRecord {
            image: "No image".to_string(),
            name: "No name".to_string(),
            price: "No price".to_string(),
            brand: "No brand".to_string(),
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_records(&[make_record(), make_sentinel_record()]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "image,name,price,brand");
        assert_eq!(lines[1], "https://image.msscdn.net/images/goods_img/1.jpg,Nike Dunk Low,20% off,Nike Dunk Low");
        assert_eq!(lines[2], "No image,No name,No price,No brand");
    }

    #[test]
    fn test_csv_escapes_commas_and_quotes() {
        let mut record = make_record();
        record.price = "29,000원".to_string();
        record.name = "Tee \"Boxy\"".to_string();

        let output = Formatter::new(OutputFormat::Csv).format_records(&[record]);
        assert!(output.contains("\"29,000원\""));
        assert!(output.contains("\"Tee \"\"Boxy\"\"\""));
    }

    #[test]
    fn test_empty_outputs() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_records(&[]), "[]");
        assert_eq!(Formatter::new(OutputFormat::Csv).format_records(&[]), "image,name,price,brand");
        assert_eq!(Formatter::new(OutputFormat::Table).format_records(&[]), "No products found.");
        assert_eq!(Formatter::new(OutputFormat::Markdown).format_records(&[]), "No products found.");
    }

    #[test]
    fn test_json_records() {
        let output = Formatter::new(OutputFormat::Json).format_records(&[make_record()]);
        assert!(output.starts_with('['));
        let parsed: Vec<NormalizedRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec![make_record()]);
    }

    #[test]
    fn test_table_records() {
        let output = Formatter::new(OutputFormat::Table).format_records(&[make_record(), make_sentinel_record()]);
        assert!(output.contains("Price"));
        assert!(output.contains("20% off"));
        assert!(output.contains("No brand"));
        assert!(output.contains("Total: 2 products"));
    }

    #[test]
    fn test_table_truncates_korean_names() {
        let mut record = make_record();
        record.name = "오버사이즈 ".repeat(20);
        let output = Formatter::new(OutputFormat::Table).format_records(&[record]);
        assert!(output.contains("..."));
    }

    #[test]
    fn test_markdown_records() {
        let output = Formatter::new(OutputFormat::Markdown).format_records(&[make_record(), make_sentinel_record()]);
        assert!(output.contains("| # | Price | Brand | Name | Image |"));
        assert!(output.contains("[link](https://image.msscdn.net/images/goods_img/1.jpg)"));
        assert!(output.contains("| No image |"));
        assert!(output.contains("*2 products found*"));
    }

    #[test]
    fn test_save_csv_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ranking.csv");

        let status = save_csv(&[make_record(), make_sentinel_record()], &path).unwrap();
        assert_eq!(status, SaveStatus::Written { rows: 2 });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("image,name,price,brand\n"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_save_csv_empty_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ranking.csv");

        let status = save_csv(&[], &path).unwrap();
        assert_eq!(status, SaveStatus::NothingToSave);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_csv_bad_path() {
        let err = save_csv(&[make_record()], "/nonexistent/dir/out.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to write CSV file"));
    }
}
