//! # Upload Parser
//!
//! Turns an uploaded product sheet into [`ProductInput`] records.
//!
//! ## Import Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Upload Pipeline                                 │
//! │                                                                         │
//! │  raw bytes                                                              │
//! │     │  strip UTF-8 BOM                                                  │
//! │     │  strict UTF-8 ──(invalid)──► Windows-1252 (warn!)                │
//! │     ▼                                                                   │
//! │  header row ──► resolve columns (case-insensitive, aliases, units)     │
//! │     │             └── required column missing? ──► reject batch        │
//! │     ▼                                                                   │
//! │  data rows                                                              │
//! │     │  more cells than headers? ──► reject batch                       │
//! │     │  empty / unreadable cell  ──► None (engine defaults it)          │
//! │     ▼                                                                   │
//! │  Vec<ProductInput>  (file order)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cells are lenient and structure is strict. A stray `n/a` in a price
//! column costs one field; a sheet without a `Cost Price` column is never
//! half-imported.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::StringRecord;
use encoding_rs::WINDOWS_1252;
use pricedesk_core::money::parse_amount;
use pricedesk_core::ProductInput;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::ImportError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// =============================================================================
// Columns
// =============================================================================

/// A logical column of the upload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    RetailPrice,
    DiscountPercent,
    CostPrice,
    StockQty,
}

impl Column {
    /// Columns every upload must carry.
    pub const REQUIRED: [Column; 4] = [
        Column::Name,
        Column::RetailPrice,
        Column::DiscountPercent,
        Column::CostPrice,
    ];

    /// The canonical header text.
    pub fn label(self) -> &'static str {
        match self {
            Column::Name => "Product Name",
            Column::RetailPrice => "Retail Price",
            Column::DiscountPercent => "Discount %",
            Column::CostPrice => "Cost Price",
            Column::StockQty => "Stock Qty",
        }
    }

    /// Normalized header spellings accepted for this column.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Name => &["product name", "product", "name"],
            Column::RetailPrice => &["retail price", "original price", "retail"],
            Column::DiscountPercent => &[
                "discount %",
                "discount percentage",
                "discount percent",
                "discount",
            ],
            Column::CostPrice => &["cost price", "cost"],
            Column::StockQty => &["stock qty", "stock quantity", "stock", "quantity", "qty"],
        }
    }

    fn matches(self, header: &str) -> bool {
        self.aliases().contains(&header)
    }
}

/// Canonical form of a header cell.
///
/// Lowercases, collapses inner whitespace and drops a trailing
/// parenthesized unit, so `" Retail  Price (£) "` becomes `"retail price"`.
pub fn normalize_header(raw: &str) -> String {
    let mut text = raw.trim();
    if text.ends_with(')') {
        if let Some(open) = text.rfind('(') {
            text = text[..open].trim_end();
        }
    }
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    name: usize,
    retail_price: usize,
    discount_percent: usize,
    cost_price: usize,
    stock_qty: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, ImportError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |column: Column| normalized.iter().position(|h| column.matches(h));

        let missing: Vec<String> = Column::REQUIRED
            .iter()
            .filter(|&&column| find(column).is_none())
            .map(|column| column.label().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        // All four were found above.
        let required = |column: Column| find(column).unwrap_or_default();
        Ok(ColumnMap {
            name: required(Column::Name),
            retail_price: required(Column::RetailPrice),
            discount_percent: required(Column::DiscountPercent),
            cost_price: required(Column::CostPrice),
            stock_qty: find(Column::StockQty),
        })
    }

    fn read(&self, record: &StringRecord) -> ProductInput {
        ProductInput {
            name: text_cell(record, self.name),
            retail_price: amount_cell(record, self.retail_price),
            discount_percent: amount_cell(record, self.discount_percent),
            cost_price: amount_cell(record, self.cost_price),
            stock_qty: self.stock_qty.and_then(|i| stock_cell(record, i)),
        }
    }
}

// =============================================================================
// Cells
// =============================================================================

fn text_cell(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn amount_cell(record: &StringRecord, index: usize) -> Option<Decimal> {
    let raw = record.get(index)?;
    match parse_amount(raw) {
        Ok(value) => value,
        Err(_) => {
            debug!(cell = raw, "unreadable number, treating as absent");
            None
        }
    }
}

/// Stock accepts whole numbers, including spreadsheet forms like `3.0`.
fn stock_cell(record: &StringRecord, index: usize) -> Option<u32> {
    let value = amount_cell(record, index)?;
    if !value.fract().is_zero() {
        debug!(%value, "fractional stock, treating as absent");
        return None;
    }
    value.to_u32()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes upload bytes into text.
///
/// A UTF-8 BOM is stripped. Bytes that are not valid UTF-8 are read as
/// Windows-1252, which is what spreadsheet tools on Windows emit for `£`.
pub fn decode_upload(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(err) => {
            warn!(
                valid_up_to = err.valid_up_to(),
                "upload is not UTF-8, falling back to Windows-1252"
            );
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

// =============================================================================
// Import
// =============================================================================

/// Parses an uploaded sheet.
///
/// ## Returns
/// - `Ok(records)` in file order; an empty vector for a header-only file
/// - `Err(ImportError)` if the batch is rejected; nothing is partially returned
///
/// ## Example
/// ```rust
/// use pricedesk_io::import::import_products;
/// use rust_decimal_macros::dec;
///
/// let csv = "Product Name,Retail Price (£),Discount %,Cost Price\nWidget,£100,10%,60\n";
/// let products = import_products(csv.as_bytes()).unwrap();
///
/// assert_eq!(products[0].name.as_deref(), Some("Widget"));
/// assert_eq!(products[0].retail_price, Some(dec!(100)));
/// assert_eq!(products[0].discount_percent, Some(dec!(10)));
/// ```
pub fn import_products(bytes: &[u8]) -> Result<Vec<ProductInput>, ImportError> {
    let text = decode_upload(bytes);
    if text.trim().is_empty() {
        warn!("rejected upload: empty file");
        return Err(ImportError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers).map_err(|err| {
        warn!(error = %err, "rejected upload");
        err
    })?;

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let err = ImportError::Malformed {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            };
            warn!(error = %err, "rejected upload");
            return Err(err);
        }
        products.push(columns.read(&record));
    }

    info!(count = products.len(), "products imported");
    Ok(products)
}

/// Reads and parses an upload from disk.
pub fn import_from_path(path: impl AsRef<Path>) -> Result<Vec<ProductInput>, ImportError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "upload read");
    import_products(&bytes)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "Product Name,Retail Price,Discount %,Cost Price,Stock Qty";

    fn sheet(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Retail  Price (£) "), "retail price");
        assert_eq!(normalize_header("DISCOUNT %"), "discount %");
        assert_eq!(normalize_header("Discount (%)"), "discount");
        assert_eq!(normalize_header("Cost Price"), "cost price");
    }

    #[test]
    fn test_import_full_rows() {
        let text = sheet(&["Widget,100,10,60,5", "Gadget,19.99,0,7.5,"]);
        let products = import_products(text.as_bytes()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(
            products[0],
            ProductInput::new("Widget", dec!(100), dec!(10), dec!(60)).with_stock(5)
        );
        assert_eq!(products[1].retail_price, Some(dec!(19.99)));
        assert_eq!(products[1].stock_qty, None);
    }

    #[test]
    fn test_stock_column_is_optional() {
        let text = "Product Name,Retail Price,Discount %,Cost Price\nWidget,100,10,60\n";
        let products = import_products(text.as_bytes()).unwrap();
        assert_eq!(products[0].stock_qty, None);
    }

    #[test]
    fn test_aliases_and_column_order() {
        let text = "quantity,COST,Original Price,Discount Percentage,name\n3,60,100,10,Widget\n";
        let products = import_products(text.as_bytes()).unwrap();
        assert_eq!(
            products[0],
            ProductInput::new("Widget", dec!(100), dec!(10), dec!(60)).with_stock(3)
        );
    }

    #[test]
    fn test_missing_required_columns_rejects_batch() {
        let text = "Product Name,Retail Price\nWidget,100\n";
        match import_products(text.as_bytes()) {
            Err(ImportError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Discount %", "Cost Price"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(import_products(b""), Err(ImportError::EmptyFile)));
        assert!(matches!(
            import_products(b"\xEF\xBB\xBF \n"),
            Err(ImportError::EmptyFile)
        ));
    }

    #[test]
    fn test_header_only_file_is_empty_batch() {
        let products = import_products(sheet(&[]).as_bytes()).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_extra_cells_reject_batch() {
        let text = sheet(&["Widget,100,10,60,5", "Gadget,1,2,3,4,5"]);
        assert!(matches!(
            import_products(text.as_bytes()),
            Err(ImportError::Malformed { line: 3, .. })
        ));
    }

    #[test]
    fn test_short_rows_default_missing_cells() {
        let text = sheet(&["Widget,100"]);
        let products = import_products(text.as_bytes()).unwrap();
        assert_eq!(products[0].retail_price, Some(dec!(100)));
        assert_eq!(products[0].discount_percent, None);
        assert_eq!(products[0].cost_price, None);
    }

    #[test]
    fn test_unreadable_cells_become_absent() {
        let text = sheet(&["Widget,n/a,10%,£1,250.50,2.5"]);
        // The unquoted thousands separator splits the cost into two cells.
        assert!(import_products(text.as_bytes()).is_err());

        let text = sheet(&["Widget,n/a,10%,\"£1,250.50\",2.5"]);
        let products = import_products(text.as_bytes()).unwrap();
        assert_eq!(products[0].retail_price, None);
        assert_eq!(products[0].discount_percent, Some(dec!(10)));
        assert_eq!(products[0].cost_price, Some(dec!(1250.50)));
        assert_eq!(products[0].stock_qty, None);
    }

    #[test]
    fn test_whole_decimal_stock_accepted() {
        let text = sheet(&["Widget,1,0,1,3.0", "Gadget,1,0,1,-2"]);
        let products = import_products(text.as_bytes()).unwrap();
        assert_eq!(products[0].stock_qty, Some(3));
        assert_eq!(products[1].stock_qty, None);
    }

    #[test]
    fn test_blank_rows_are_kept() {
        let text = sheet(&[",,,,", "Widget,1,0,1,1"]);
        let products = import_products(text.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert!(products[0].is_blank());
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Product Name".as_bytes());
        assert_eq!(decode_upload(&bytes), "Product Name");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // 0xA3 is '£' in Windows-1252 and invalid on its own in UTF-8.
        let bytes = b"Retail Price (\xA3)";
        assert_eq!(decode_upload(bytes), "Retail Price (£)");
    }

    #[test]
    fn test_windows_1252_upload_imports() {
        let mut bytes = b"Product Name,Retail Price (\xA3),Discount %,Cost Price\n".to_vec();
        bytes.extend_from_slice(b"Caf\xE9 Set,\xA312.50,0,5\n");
        let products = import_products(&bytes).unwrap();
        assert_eq!(products[0].name.as_deref(), Some("Café Set"));
        assert_eq!(products[0].retail_price, Some(dec!(12.50)));
    }

    #[test]
    fn test_import_from_missing_path() {
        let err = import_from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
    }
}
