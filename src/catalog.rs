use anyhow::{Context, Result};
use std::path::Path;

/// One row of the master catalog.
///
/// Column names follow the spreadsheet export: `Department`, `Country`,
/// `Brand`, `SKU ID`, `SKU Name`, `Size`, `Tags` (comma-separated).
#[derive(Debug, Clone, Default)]
pub struct CatalogRow {
    pub sku_id: String,
    pub name: String,
    pub brand: String,
    pub country: String,
    pub department: String,
    pub size: String,
    pub tags: Vec<String>,
}

/// Read all catalog rows from a CSV file.
///
/// Rows with an empty `SKU ID` are skipped. A missing file or a missing
/// `SKU ID` column is fatal; individual blank cells degrade to empty strings.
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open catalog file {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read catalog headers")?
        .clone();

    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let sku_idx = col("SKU ID")
        .with_context(|| format!("Catalog is missing the 'SKU ID' column (found: {:?})", headers))?;
    let name_idx = col("SKU Name");
    let brand_idx = col("Brand");
    let country_idx = col("Country");
    let dept_idx = col("Department");
    let size_idx = col("Size");
    let tags_idx = col("Tags");

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read catalog row")?;

        let sku_id = cell(&record, Some(sku_idx));
        if sku_id.is_empty() {
            continue;
        }

        let tags_raw = cell(&record, tags_idx);
        let tags = tags_raw
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        rows.push(CatalogRow {
            sku_id,
            name: cell(&record, name_idx),
            brand: cell(&record, brand_idx),
            country: cell(&record, country_idx),
            department: cell(&record, dept_idx),
            size: cell(&record, size_idx),
            tags,
        });
    }

    Ok(rows)
}

/// Make a SKU safe for filenames and URL paths.
///
/// Strips a trailing ".0" left behind by spreadsheet numeric formatting,
/// replaces forbidden filesystem characters with "-", and collapses runs of
/// whitespace to single spaces.
pub fn safe_filename(value: &str) -> String {
    let mut out = value.trim().to_string();

    // "123.0" comes from numeric cell formatting; leave non-numeric IDs alone
    if let Some(stripped) = out.strip_suffix(".0") {
        if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
            out = stripped.to_string();
        }
    }

    let mut replaced = String::with_capacity(out.len());
    for c in out.chars() {
        match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => {
                // collapse runs of forbidden chars into one dash
                if !replaced.ends_with('-') {
                    replaced.push('-');
                }
            }
            c => replaced.push(c),
        }
    }

    let mut collapsed = String::with_capacity(replaced.len());
    let mut in_space = false;
    for c in replaced.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn test_safe_filename_strips_excel_decimal() {
        assert_eq!(safe_filename("123.0"), "123");
    }

    #[test]
    fn test_safe_filename_replaces_forbidden_chars() {
        assert_eq!(safe_filename("A/B:C"), "A-B-C");
    }

    #[test]
    fn test_safe_filename_collapses_forbidden_runs() {
        assert_eq!(safe_filename("A//B"), "A-B");
    }

    #[test]
    fn test_safe_filename_normalizes_whitespace() {
        assert_eq!(safe_filename("  K  100 "), "K 100");
    }

    #[test]
    fn test_safe_filename_plain_sku_unchanged() {
        assert_eq!(safe_filename("K100"), "K100");
    }

    #[test]
    fn test_safe_filename_keeps_non_numeric_dot_zero() {
        assert_eq!(safe_filename("v1.0"), "v1.0");
    }

    proptest! {
        #[test]
        fn prop_safe_filename_is_idempotent(s in "\\PC{0,40}") {
            let once = safe_filename(&s);
            let twice = safe_filename(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_safe_filename_has_no_forbidden_chars(s in "\\PC{0,40}") {
            let out = safe_filename(&s);
            prop_assert!(!out.contains(['\\', '/', ':', '*', '?', '"', '<', '>', '|']));
        }
    }

    fn write_catalog(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        file.write_all(content.as_bytes()).expect("Should write");
        file
    }

    #[test]
    fn test_read_catalog_basic_row() {
        let file = write_catalog(
            "Department,Country,Brand,SKU ID,SKU Name,Size,Tags\n\
             Pickled / Olives,Greece,KRINOS,K100,Olives 500g,500g,\"greek,olives\"\n",
        );

        let rows = read_catalog(file.path()).expect("Should parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sku_id, "K100");
        assert_eq!(rows[0].brand, "KRINOS");
        assert_eq!(rows[0].country, "Greece");
        assert_eq!(rows[0].tags, vec!["greek", "olives"]);
    }

    #[test]
    fn test_read_catalog_skips_empty_sku() {
        let file = write_catalog(
            "Department,Country,Brand,SKU ID,SKU Name,Size,Tags\n\
             Grocery,Italy,BARILLA,,Pasta 1kg,1kg,\n\
             Grocery,Italy,BARILLA,B200,Pasta 1kg,1kg,\n",
        );

        let rows = read_catalog(file.path()).expect("Should parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sku_id, "B200");
    }

    #[test]
    fn test_read_catalog_missing_sku_column_is_fatal() {
        let file = write_catalog("Department,Country,Brand\nGrocery,Italy,BARILLA\n");

        let result = read_catalog(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("SKU ID"));
    }

    #[test]
    fn test_read_catalog_missing_optional_cells_default_empty() {
        let file = write_catalog("SKU ID,Brand\nK100,KRINOS\n");

        let rows = read_catalog(file.path()).expect("Should parse");
        assert_eq!(rows[0].name, "");
        assert_eq!(rows[0].country, "");
        assert!(rows[0].tags.is_empty());
    }
}
