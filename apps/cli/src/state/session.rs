//! # Session State
//!
//! The product list and VAT switch for one shell run.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ──► Session::new(&config) ──► empty list, VAT from config     │
//! │                     │                                                   │
//! │                     ├── add / upload / edit / delete / clear (mutate)  │
//! │                     ├── vat on|off                      (options)      │
//! │                     └── show / summary / export        (read only)     │
//! │                                                                         │
//! │  quit ──► session dropped, nothing persisted                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results are recomputed from the stored inputs on every read, so toggling
//! VAT or deleting a row can never leave stale figures behind.

use pricedesk_core::{
    CalculationOptions, EntrySource, PricingSummary, ProductInput, ProductList, ProductResult,
};
use rust_decimal_macros::dec;

use super::AppConfig;

/// Mutable state owned by the shell loop.
#[derive(Debug, Clone)]
pub struct Session {
    pub list: ProductList,
    pub options: CalculationOptions,
}

impl Session {
    /// Creates an empty session with the configured VAT setting.
    pub fn new(config: &AppConfig) -> Self {
        Session {
            list: ProductList::new(),
            options: config.options(),
        }
    }

    /// Seeds the list with a single example product.
    pub fn with_example(mut self) -> Self {
        self.list.push(example_product(), EntrySource::Manual);
        self
    }

    /// Results for the current list and options.
    pub fn results(&self) -> Vec<ProductResult> {
        self.list.compute(&self.options)
    }

    /// Totals for the current list and options.
    pub fn summary(&self) -> PricingSummary {
        self.list.summary(&self.options)
    }
}

/// The row shown to first-time users.
pub fn example_product() -> ProductInput {
    ProductInput::new("Example Product", dec!(100), dec!(10), dec!(60))
}
