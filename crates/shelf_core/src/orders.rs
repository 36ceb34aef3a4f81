//! Pre-upload inspection of order CSV files.
//!
//! The backend treats each line as one receipt: comma separated product
//! names, no header row, uneven column counts allowed. The preview reads
//! the file the same way so the user sees receipt/item counts and the
//! first rows before uploading, and empty files are rejected before a
//! request is ever made.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{PlannerError, Result};

/// How many receipts the preview keeps verbatim
const SAMPLE_ROWS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersPreview {
    pub receipts: usize,
    pub items: usize,
    /// First rows of the file, one `Vec` of product names per receipt
    pub sample: Vec<Vec<String>>,
}

impl OrdersPreview {
    /// Single-line summary for the form
    pub fn summary(&self) -> String {
        format!("{} sipariş, {} ürün", self.receipts, self.items)
    }
}

/// Reads and summarizes an order file from disk.
pub fn preview_orders_file<P: AsRef<Path>>(path: P) -> Result<OrdersPreview> {
    let file = std::fs::File::open(path)?;
    preview_orders(file)
}

/// Reads `product, product, ...` lines, one receipt per line.
///
/// # Errors
/// `EmptyOrders` if no line contains at least one non-blank item.
pub fn preview_orders<R: Read>(reader: R) -> Result<OrdersPreview> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut preview = OrdersPreview::default();

    for result in rdr.records() {
        let record = result?;
        let items: Vec<String> = record
            .iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            continue;
        }

        preview.receipts += 1;
        preview.items += items.len();
        if preview.sample.len() < SAMPLE_ROWS {
            preview.sample.push(items);
        }
    }

    if preview.receipts == 0 {
        return Err(PlannerError::EmptyOrders);
    }

    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_preview_counts_receipts_and_items() {
        let data = "süt, ekmek, peynir\nçay, şeker\n";
        let preview = preview_orders(data.as_bytes()).unwrap();
        assert_eq!(preview.receipts, 2);
        assert_eq!(preview.items, 5);
        assert_eq!(preview.sample[0], vec!["süt", "ekmek", "peynir"]);
        assert_eq!(preview.summary(), "2 sipariş, 5 ürün");
    }

    #[test]
    fn test_preview_skips_blank_cells_and_rows() {
        let data = "süt,, ekmek\n,,\nçay\n";
        let preview = preview_orders(data.as_bytes()).unwrap();
        assert_eq!(preview.receipts, 2);
        assert_eq!(preview.items, 3);
    }

    #[test]
    fn test_preview_empty_file_is_an_error() {
        let result = preview_orders("".as_bytes());
        assert!(matches!(result, Err(PlannerError::EmptyOrders)));

        let result = preview_orders(" ,, \n".as_bytes());
        assert!(matches!(result, Err(PlannerError::EmptyOrders)));
    }

    #[test]
    fn test_preview_caps_sample_rows() {
        let mut data = String::new();
        for i in 0..10 {
            data.push_str(&format!("ürün{}\n", i));
        }
        let preview = preview_orders(data.as_bytes()).unwrap();
        assert_eq!(preview.receipts, 10);
        assert_eq!(preview.sample.len(), SAMPLE_ROWS);
    }

    #[test]
    fn test_preview_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "süt, ekmek").unwrap();
        let preview = preview_orders_file(tmp.path()).unwrap();
        assert_eq!(preview.receipts, 1);
        assert_eq!(preview.items, 2);
    }
}
