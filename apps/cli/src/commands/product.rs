//! # Product Commands
//!
//! Manual entry and list maintenance.
//!
//! ## Field Syntax
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add  <name>, <retail>, <discount %>, <cost>[, <stock>]               │
//! │  edit <row> <name>, <retail>, <discount %>, <cost>[, <stock>]         │
//! │                                                                         │
//! │  add Widget, 100, 10, 60, 5                                            │
//! │  add "Bolts, M6", £4.50, 0, 1.20                                       │
//! │  add Sample, 25                  ← missing fields default to 0         │
//! │  edit 0 , , 15                   ← empty fields keep current values    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are comma separated and may be quoted like CSV cells.

use pricedesk_core::validation::{
    parse_price, parse_stock_qty, validate_fields, validate_manual_entry,
};
use pricedesk_core::{CoreError, EntrySource, ProductInput};
use tracing::debug;

use crate::error::CliError;
use crate::render::{entries_table, results_table, summary_block};
use crate::state::{AppConfig, Session};

const MAX_FIELDS: usize = 5;

/// Parses a comma-separated field list into a product.
pub fn parse_product_fields(args: &str) -> Result<ProductInput, CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(args.as_bytes());

    let record = match reader.records().next() {
        Some(record) => {
            record.map_err(|e| CliError::usage(format!("Could not read fields: {}", e)))?
        }
        None => csv::StringRecord::new(),
    };

    if record.len() > MAX_FIELDS {
        return Err(CliError::usage(format!(
            "Expected at most {} fields (name, retail, discount, cost, stock), got {}",
            MAX_FIELDS,
            record.len()
        )));
    }

    let field = |i: usize| record.get(i).unwrap_or("");
    let name = field(0);

    Ok(ProductInput {
        name: (!name.is_empty()).then(|| name.to_string()),
        retail_price: parse_price("retail price", field(1))?,
        discount_percent: parse_price("discount", field(2))?,
        cost_price: parse_price("cost price", field(3))?,
        stock_qty: parse_stock_qty(field(4))?,
    })
}

/// Adds a manually entered product.
pub fn add_product(session: &mut Session, args: &str) -> Result<String, CliError> {
    debug!(args, "add command");

    let input = parse_product_fields(args)?;
    validate_manual_entry(&input)?;

    let label = display_name(&input).to_string();
    session.list.push(input, EntrySource::Manual);
    Ok(format!("Added row {}: {}", session.list.len() - 1, label))
}

/// Edits the product at `index`. Empty fields keep their current value.
///
/// Only the fields given are validated, so a stored value outside the
/// manual-entry ranges survives an edit of another field.
pub fn edit_product(session: &mut Session, index: usize, args: &str) -> Result<String, CliError> {
    debug!(index, args, "edit command");

    let changes = parse_product_fields(args)?;
    if changes.is_blank() {
        return Err(CliError::usage("edit needs at least one field to change"));
    }
    validate_fields(&changes)?;

    let current = session
        .list
        .get(index)
        .map(|entry| entry.input.clone())
        .ok_or(CoreError::IndexOutOfRange {
            index,
            len: session.list.len(),
        })?;

    let merged = ProductInput {
        name: changes.name.or(current.name),
        retail_price: changes.retail_price.or(current.retail_price),
        discount_percent: changes.discount_percent.or(current.discount_percent),
        cost_price: changes.cost_price.or(current.cost_price),
        stock_qty: changes.stock_qty.or(current.stock_qty),
    };

    let label = display_name(&merged).to_string();
    session.list.update_at(index, merged)?;
    Ok(format!("Updated row {}: {}", index, label))
}

/// Deletes one or more rows, addressed by their current indices.
pub fn delete_products(session: &mut Session, indices: &[usize]) -> Result<String, CliError> {
    debug!(?indices, "delete command");

    match indices {
        [] => Err(CliError::usage("delete needs at least one row number")),
        [index] => {
            let entry = session.list.remove_at(*index)?;
            Ok(format!("Deleted row {}: {}", index, display_name(&entry.input)))
        }
        _ => {
            let removed = session.list.remove_many(indices)?;
            Ok(format!("Deleted {} products", removed.len()))
        }
    }
}

/// Empties the list.
pub fn clear_products(session: &mut Session) -> String {
    debug!("clear command");
    let count = session.list.len();
    session.list.clear();
    format!("Cleared {} products", count)
}

/// Renders the current results.
pub fn show_products(session: &Session, config: &AppConfig) -> String {
    debug!("show command");
    let vat = if session.options.include_vat {
        "VAT included (20%)"
    } else {
        "VAT not included"
    };
    format!(
        "{}\n{}",
        results_table(&session.results(), &config.currency_symbol),
        vat
    )
}

/// Lists each row's source and the time it was added.
pub fn show_entries(session: &Session) -> String {
    debug!("entries command");
    entries_table(session.list.entries())
}

/// Renders totals for the current results.
pub fn show_summary(session: &Session, config: &AppConfig) -> String {
    debug!("summary command");
    summary_block(&session.summary(), &config.currency_symbol)
}

fn display_name(input: &ProductInput) -> &str {
    match input.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => "(unnamed)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;

    fn session() -> Session {
        Session::new(&AppConfig::default())
    }

    #[test]
    fn test_parse_full_fields() {
        let input = parse_product_fields("Widget, 100, 10, 60, 5").unwrap();
        assert_eq!(
            input,
            ProductInput::new("Widget", dec!(100), dec!(10), dec!(60)).with_stock(5)
        );
    }

    #[test]
    fn test_parse_quoted_name_and_symbols() {
        let input = parse_product_fields("\"Bolts, M6\", £4.50, 5%, 1.20").unwrap();
        assert_eq!(input.name.as_deref(), Some("Bolts, M6"));
        assert_eq!(input.retail_price, Some(dec!(4.50)));
        assert_eq!(input.discount_percent, Some(dec!(5)));
        assert_eq!(input.stock_qty, None);
    }

    #[test]
    fn test_parse_rejects_bad_numbers_and_extra_fields() {
        let err = parse_product_fields("Widget, ten, 0, 1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = parse_product_fields("a,1,2,3,4,5").unwrap_err();
        assert_eq!(err.code, ErrorCode::Usage);
    }

    #[test]
    fn test_add_product() {
        let mut session = session();
        let reply = add_product(&mut session, "Widget, 100, 10, 60").unwrap();
        assert_eq!(reply, "Added row 0: Widget");
        assert_eq!(session.results()[0].discounted_price, dec!(108.00));
    }

    #[test]
    fn test_add_rejects_invalid_values_without_touching_list() {
        let mut session = session();
        assert!(add_product(&mut session, "Widget, -1, 10, 60").is_err());
        assert!(add_product(&mut session, "Widget, 100, 110, 60").is_err());
        assert!(add_product(&mut session, "").is_err());
        assert!(session.list.is_empty());
    }

    #[test]
    fn test_edit_merges_fields() {
        let mut session = session();
        add_product(&mut session, "Widget, 100, 10, 60, 2").unwrap();

        edit_product(&mut session, 0, ", , 25").unwrap();

        let input = &session.list.get(0).unwrap().input;
        assert_eq!(
            *input,
            ProductInput::new("Widget", dec!(100), dec!(25), dec!(60)).with_stock(2)
        );
    }

    #[test]
    fn test_edit_keeps_unchecked_uploaded_values() {
        let mut session = session();
        session.list.push(
            ProductInput::new("Clearance", dec!(40), dec!(150), dec!(10)),
            EntrySource::Upload,
        );

        assert_eq!(edit_product(&mut session, 0, "New").unwrap(), "Updated row 0: New");
        let input = &session.list.get(0).unwrap().input;
        assert_eq!(input.discount_percent, Some(dec!(150)));

        let err = edit_product(&mut session, 0, ", , 120").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.list.get(0).unwrap().input.name.as_deref(), Some("New"));
    }

    #[test]
    fn test_edit_without_fields_is_usage_error() {
        let mut session = session().with_example();
        let err = edit_product(&mut session, 0, " , ").unwrap_err();
        assert_eq!(err.code, ErrorCode::Usage);
    }

    #[test]
    fn test_edit_missing_row() {
        let mut session = session();
        let err = edit_product(&mut session, 3, "X").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_delete_single_and_many() {
        let mut session = session();
        for name in ["A", "B", "C", "D"] {
            add_product(&mut session, &format!("{}, 10, 0, 5", name)).unwrap();
        }

        assert_eq!(delete_products(&mut session, &[1]).unwrap(), "Deleted row 1: B");
        assert_eq!(delete_products(&mut session, &[0, 2]).unwrap(), "Deleted 2 products");

        let names: Vec<String> = session.results().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn test_delete_out_of_range_keeps_list() {
        let mut session = session();
        add_product(&mut session, "A, 10, 0, 5").unwrap();
        let err = delete_products(&mut session, &[1]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(session.list.len(), 1);
    }

    #[test]
    fn test_show_reports_vat_state() {
        let mut session = session().with_example();
        assert!(show_products(&session, &AppConfig::default()).ends_with("VAT included (20%)"));
        session.options.include_vat = false;
        let table = show_products(&session, &AppConfig::default());
        assert!(table.contains("33.33%"));
        assert!(table.ends_with("VAT not included"));
    }

    #[test]
    fn test_clear() {
        let mut session = session().with_example();
        assert_eq!(clear_products(&mut session), "Cleared 1 products");
        assert!(session.list.is_empty());
    }
}
