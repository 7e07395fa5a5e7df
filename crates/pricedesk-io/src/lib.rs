//! # pricedesk-io: Upload and Export for PriceDesk
//!
//! Everything that touches bytes and files lives here; the arithmetic
//! stays in `pricedesk-core`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   sheet.csv ──► import ──► Vec<ProductInput> ──┐                       │
//! │                                                 │                       │
//! │                          pricedesk_core::compute (VAT on/off)           │
//! │                                                 │                       │
//! │   out.csv  ◄── export ◄── Vec<ProductResult> ◄─┘                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`import`] - Decoding, header resolution, lenient cell parsing
//! - [`export`] - CSV writer with two-decimal derived columns
//! - [`error`] - `ImportError`, `ExportError`, `IoError`

pub mod error;
pub mod export;
pub mod import;

use std::path::Path;

use pricedesk_core::{compute, CalculationOptions, ProductResult};

pub use error::{ExportError, ImportError, IoError, IoResult};
pub use export::{export_to_path, write_results, DEFAULT_EXPORT_FILE, EXPORT_HEADERS};
pub use import::{decode_upload, import_from_path, import_products};

/// Imports a sheet, computes it and writes the export in one pass.
///
/// Returns the computed results so the caller can report on them.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CalculationOptions,
) -> IoResult<Vec<ProductResult>> {
    let inputs = import_from_path(input)?;
    let results = compute(&inputs, options);
    export_to_path(output, &results)?;
    Ok(results)
}
