//! # Export Writer
//!
//! Writes computed results as CSV.
//!
//! One column per [`ProductResult`] field, in field order. Input columns are
//! written exactly as entered; derived columns always carry two decimals.
//! The header row uses the upload column names, so an export can be
//! uploaded again.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pricedesk_core::{ProductResult, DISPLAY_DECIMALS};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::ExportError;

/// File name used when the user gives none.
pub const DEFAULT_EXPORT_FILE: &str = "discount_calculations.csv";

/// Export header row.
pub const EXPORT_HEADERS: [&str; 10] = [
    "Product Name",
    "Retail Price",
    "Discount %",
    "Cost Price",
    "Stock Qty",
    "Final Retail",
    "Discount Amount",
    "Discounted Price",
    "Profit",
    "Margin %",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    retail_price: Decimal,
    discount_percent: Decimal,
    cost_price: Decimal,
    stock_qty: u32,
    final_retail: String,
    discount_amount: String,
    discounted_price: String,
    profit: String,
    margin_percent: String,
}

impl<'a> From<&'a ProductResult> for ExportRow<'a> {
    fn from(result: &'a ProductResult) -> Self {
        ExportRow {
            name: &result.name,
            retail_price: result.retail_price,
            discount_percent: result.discount_percent,
            cost_price: result.cost_price,
            stock_qty: result.stock_qty,
            final_retail: two_dp(result.final_retail),
            discount_amount: two_dp(result.discount_amount),
            discounted_price: two_dp(result.discounted_price),
            profit: two_dp(result.profit),
            margin_percent: two_dp(result.margin_percent),
        }
    }
}

fn two_dp(value: Decimal) -> String {
    format!("{:.prec$}", value, prec = DISPLAY_DECIMALS as usize)
}

/// Writes `results` as CSV to any writer, header row first.
///
/// An empty result list produces the header row only.
pub fn write_results<W: Write>(writer: W, results: &[ProductResult]) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADERS)?;
    for result in results {
        csv_writer.serialize(ExportRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `results` to a file, replacing any existing file.
pub fn export_to_path(path: impl AsRef<Path>, results: &[ProductResult]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    write_results(BufWriter::new(file), results)?;
    info!(path = %path.display(), rows = results.len(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricedesk_core::{compute, CalculationOptions, ProductInput};
    use rust_decimal_macros::dec;

    fn render(results: &[ProductResult]) -> String {
        let mut out = Vec::new();
        write_results(&mut out, results).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_only_for_empty_list() {
        assert_eq!(render(&[]), format!("{}\n", EXPORT_HEADERS.join(",")));
    }

    #[test]
    fn test_row_formatting() {
        let inputs = vec![ProductInput::new("Widget", dec!(100), dec!(10), dec!(60)).with_stock(5)];
        let results = compute(&inputs, &CalculationOptions::without_vat());

        let text = render(&results);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "Widget,100,10,60,5,100.00,10.00,90.00,30.00,33.33");
    }

    #[test]
    fn test_inputs_written_as_entered() {
        let inputs = vec![ProductInput::new("Odd, Name", dec!(19.999), dec!(12.5), dec!(0))];
        let results = compute(&inputs, &CalculationOptions::without_vat());

        let text = render(&results);
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Odd, Name\",19.999,12.5,0,0,"));
    }

    #[test]
    fn test_zero_derived_values_print_two_decimals() {
        let results = compute(&[ProductInput::default()], &CalculationOptions::with_vat());
        let text = render(&results);
        assert!(text.lines().nth(1).unwrap().ends_with("0.00,0.00,0.00,0.00,0.00"));
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let results = compute(
            &[ProductInput::new("Widget", dec!(100), dec!(10), dec!(60))],
            &CalculationOptions::with_vat(),
        );

        export_to_path(&path, &results).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains("120.00,12.00,108.00,48.00,44.44"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        let err = export_to_path(&path, &[]).unwrap_err();
        assert!(matches!(err, ExportError::Create { .. }));
    }
}
