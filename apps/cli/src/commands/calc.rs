//! # Calc Command
//!
//! One-shot mode: read a sheet, compute it, print it, optionally save it.
//!
//! ```text
//! pricedesk calc --input sheet.csv                      table on stdout
//! pricedesk calc --input sheet.csv --format json        JSON report on stdout
//! pricedesk calc --input sheet.csv --output out.csv     file + table
//! pricedesk --no-vat calc --input sheet.csv --format csv
//! ```

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use pricedesk_core::{compute, summarize, CalculationOptions, PricingSummary, ProductResult};
use pricedesk_io::{export_to_path, import_from_path, write_results};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliError;
use crate::render::{results_table, summary_block};
use crate::state::AppConfig;

/// Stdout format for `calc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// JSON document printed by `calc --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcReport {
    pub options: CalculationOptions,
    pub results: Vec<ProductResult>,
    pub summary: PricingSummary,
}

/// Runs one calculation pass over a file.
pub fn run_calc<W: Write>(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    options: &CalculationOptions,
    config: &AppConfig,
    out: &mut W,
) -> Result<(), CliError> {
    debug!(input = %input.display(), ?format, include_vat = options.include_vat, "calc command");

    let products = import_from_path(input)?;
    let results = compute(&products, options);

    if let Some(path) = output {
        export_to_path(path, &results)?;
        info!(path = %path.display(), "calc export written");
    }

    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", results_table(&results, &config.currency_symbol))?;
            writeln!(out)?;
            writeln!(out, "{}", summary_block(&summarize(&results), &config.currency_symbol))?;
        }
        OutputFormat::Csv => write_results(&mut *out, &results)?,
        OutputFormat::Json => {
            let report = CalcReport {
                options: *options,
                summary: summarize(&results),
                results,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Prints a failed run in the requested format.
///
/// JSON runs get the serialized [`CliError`] so scripts can branch on
/// `code`. Every other format gets a plain `error:` line.
pub fn write_calc_error<W: Write>(
    out: &mut W,
    err: &CliError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, err).map_err(io::Error::from)?;
            writeln!(out)
        }
        OutputFormat::Table | OutputFormat::Csv => writeln!(out, "error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn sheet(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("sheet.csv");
        std::fs::write(
            &path,
            "Product Name,Retail Price,Discount %,Cost Price,Stock Qty\nWidget,100,10,60,2\n",
        )
        .unwrap();
        path
    }

    fn run(format: OutputFormat, options: CalculationOptions) -> String {
        let dir = tempfile::tempdir().unwrap();
        let input = sheet(&dir);
        let mut out = Vec::new();
        run_calc(&input, None, format, &options, &AppConfig::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_calc_table() {
        let text = run(OutputFormat::Table, CalculationOptions::with_vat());
        assert!(text.contains("Widget"));
        assert!(text.contains("44.44%"));
        assert!(text.contains("Profit on stock"));
    }

    #[test]
    fn test_calc_csv_without_vat() {
        let text = run(OutputFormat::Csv, CalculationOptions::without_vat());
        assert_eq!(
            text.lines().nth(1),
            Some("Widget,100,10,60,2,100.00,10.00,90.00,30.00,33.33")
        );
    }

    #[test]
    fn test_calc_json() {
        let text = run(OutputFormat::Json, CalculationOptions::with_vat());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["options"]["includeVat"], true);
        assert_eq!(value["results"][0]["marginPercent"], "44.44");
        assert_eq!(value["summary"]["stockProfit"], "96.00");
    }

    #[test]
    fn test_calc_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = sheet(&dir);
        let output = dir.path().join("out.csv");
        let mut out = Vec::new();

        run_calc(
            &input,
            Some(output.as_path()),
            OutputFormat::Table,
            &CalculationOptions::default(),
            &AppConfig::default(),
            &mut out,
        )
        .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_calc_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = run_calc(
            &dir.path().join("nope.csv"),
            None,
            OutputFormat::Table,
            &CalculationOptions::default(),
            &AppConfig::default(),
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::UploadRejected);
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_failure_is_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        std::fs::write(&input, "Product Name,Retail Price\nWidget,100\n").unwrap();

        let mut out = Vec::new();
        let err = run_calc(
            &input,
            None,
            OutputFormat::Json,
            &CalculationOptions::default(),
            &AppConfig::default(),
            &mut out,
        )
        .unwrap_err();

        let mut printed = Vec::new();
        write_calc_error(&mut printed, &err, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&printed).unwrap();
        assert_eq!(value["code"], "UPLOAD_REJECTED");
        assert!(value["message"]
            .as_str()
            .unwrap()
            .contains("Missing required column(s): Discount %, Cost Price"));
    }

    #[test]
    fn test_table_failure_is_plain_text() {
        let err = CliError::new(ErrorCode::ExportFailed, "Export failed: disk full");
        let mut printed = Vec::new();
        write_calc_error(&mut printed, &err, OutputFormat::Table).unwrap();
        assert_eq!(String::from_utf8(printed).unwrap(), "error: Export failed: disk full\n");
    }
}
