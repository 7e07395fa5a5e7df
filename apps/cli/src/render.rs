//! # Table Rendering
//!
//! Plain-text tables for the terminal.
//!
//! ```text
//!  #  Product          Retail  Disc %   Cost  Stock  Final Retail  Discount  Discounted  Profit  Margin
//!  0  Example Product  £100.00 10.00%  £60.00     0       £120.00    £12.00     £108.00  £48.00  44.44%
//! ```
//!
//! The row number in the first column is the index `edit` and `delete`
//! take.

use pricedesk_core::money::{format_money, format_percent};
use pricedesk_core::{ListEntry, PricingSummary, ProductResult};

const HEADERS: [&str; 11] = [
    "#",
    "Product",
    "Retail",
    "Disc %",
    "Cost",
    "Stock",
    "Final Retail",
    "Discount",
    "Discounted",
    "Profit",
    "Margin",
];

/// Renders results as an aligned table. Text columns are left-aligned,
/// numbers right-aligned.
pub fn results_table(results: &[ProductResult], symbol: &str) -> String {
    if results.is_empty() {
        return "No products yet. Use `add` or `upload` to get started.".to_string();
    }

    let rows: Vec<[String; 11]> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                i.to_string(),
                r.name.clone(),
                format_money(r.retail_price, symbol),
                format_percent(r.discount_percent),
                format_money(r.cost_price, symbol),
                r.stock_qty.to_string(),
                format_money(r.final_retail, symbol),
                format_money(r.discount_amount, symbol),
                format_money(r.discounted_price, symbol),
                format_money(r.profit, symbol),
                format_percent(r.margin_percent),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths, 1);
    for row in rows {
        push_line(&mut out, row.into_iter(), &widths, 1);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Renders where each row came from and when it was added (UTC).
pub fn entries_table(entries: &[ListEntry]) -> String {
    const ENTRY_HEADERS: [&str; 4] = ["#", "Product", "Source", "Added (UTC)"];

    if entries.is_empty() {
        return "No products yet. Use `add` or `upload` to get started.".to_string();
    }

    let rows: Vec<[String; 4]> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            [
                i.to_string(),
                entry.input.name.clone().unwrap_or_default(),
                entry.source.label().to_string(),
                entry.added_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = ENTRY_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, ENTRY_HEADERS.iter().map(|h| h.to_string()), &widths, 3);
    for row in rows {
        push_line(&mut out, row.into_iter(), &widths, 3);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Writes one row. Columns `1..=last_text` are left-aligned.
fn push_line(
    out: &mut String,
    cells: impl Iterator<Item = String>,
    widths: &[usize],
    last_text: usize,
) {
    let line: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, &width))| {
            let pad = width.saturating_sub(cell.chars().count());
            if (1..=last_text).contains(&col) {
                format!("{}{}", cell, " ".repeat(pad))
            } else {
                format!("{}{}", " ".repeat(pad), cell)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Renders totals as label/value lines.
pub fn summary_block(summary: &PricingSummary, symbol: &str) -> String {
    let lines = [
        ("Products", summary.product_count.to_string()),
        ("Units in stock", summary.total_stock.to_string()),
        (
            "Total discounted price",
            format_money(summary.total_discounted_price, symbol),
        ),
        ("Total cost", format_money(summary.total_cost_price, symbol)),
        ("Total profit", format_money(summary.total_profit, symbol)),
        ("Overall margin", format_percent(summary.overall_margin_percent)),
        ("Profit on stock", format_money(summary.stock_profit, symbol)),
        ("Selling at a loss", summary.loss_count.to_string()),
    ];

    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(label, value)| format!("{:<width$}  {}", label, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricedesk_core::{
        compute, summarize, CalculationOptions, EntrySource, ProductInput, ProductList,
    };
    use rust_decimal_macros::dec;

    fn sample() -> Vec<ProductResult> {
        compute(
            &[
                ProductInput::new("Widget", dec!(100), dec!(10), dec!(60)).with_stock(3),
                ProductInput::new("Loss Leader", dec!(10), dec!(50), dec!(8)),
            ],
            &CalculationOptions::with_vat(),
        )
    }

    #[test]
    fn test_empty_table_message() {
        assert!(results_table(&[], "£").starts_with("No products yet"));
    }

    #[test]
    fn test_table_rows() {
        let table = results_table(&sample(), "£");
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Final Retail"));
        assert!(lines[1].trim_start().starts_with("0  Widget"));
        assert!(lines[1].ends_with("44.44%"));
        assert!(lines[2].contains("-£2.00"));
    }

    #[test]
    fn test_columns_line_up() {
        let table = results_table(&sample(), "$");
        let lengths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(lengths.iter().all(|&len| len == lengths[0]));
    }

    #[test]
    fn test_entries_table() {
        let mut list = ProductList::new();
        list.push(ProductInput::new("Widget", dec!(100), dec!(10), dec!(60)), EntrySource::Manual);
        list.extend(
            vec![ProductInput::new("Gadget", dec!(5), dec!(0), dec!(1))],
            EntrySource::Upload,
        );

        let table = entries_table(list.entries());
        let lines: Vec<&str> = table.lines().collect();
        let added = list.get(1).unwrap().added_at.format("%Y-%m-%d %H:%M:%S").to_string();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Added (UTC)"));
        assert!(lines[1].contains("Widget   manual"));
        assert!(lines[2].contains("Gadget   upload"));
        assert!(lines[2].ends_with(&added));
        assert!(entries_table(&[]).starts_with("No products yet"));
    }

    #[test]
    fn test_summary_block() {
        let block = summary_block(&summarize(&sample()), "£");
        assert!(block.contains("Products                2"));
        assert!(block.contains("Total profit            £46.00"));
        assert!(block.contains("Selling at a loss       1"));
    }
}
