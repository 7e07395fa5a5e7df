//! # pricedesk-core: Pure Pricing Logic for PriceDesk
//!
//! This crate is the **heart** of PriceDesk. It turns raw product records
//! into discounted prices, profit and margin as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PriceDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pricedesk shell (apps/cli)                   │   │
//! │  │    add ──► upload ──► edit/delete ──► show ──► export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               pricedesk-io (CSV upload / export)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductInput / ProductResult           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pricedesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  catalog  │  │ validation│  │   │
//! │  │   │  Input    │  │  compute  │  │ Product-  │  │   rules   │  │   │
//! │  │   │  Result   │  │ summarize │  │   List    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductInput, ProductResult, options)
//! - [`money`] - Decimal rounding and percentage helpers
//! - [`pricing`] - The pricing engine
//! - [`catalog`] - Caller-owned ordered product list
//! - [`error`] - Domain error types
//! - [`validation`] - Input-boundary validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **No I/O**: file system and terminal access is FORBIDDEN here
//! 3. **Decimal Money**: all values are `rust_decimal::Decimal`, never floats
//! 4. **Round Once**: only final derived fields are rounded
//!
//! ## Example Usage
//!
//! ```rust
//! use pricedesk_core::pricing::compute;
//! use pricedesk_core::types::{CalculationOptions, ProductInput};
//! use rust_decimal_macros::dec;
//!
//! let input = ProductInput::new("Widget", dec!(100), dec!(10), dec!(60));
//! let results = compute(&[input], &CalculationOptions::without_vat());
//!
//! assert_eq!(results[0].discounted_price, dec!(90.00));
//! assert_eq!(results[0].margin_percent, dec!(33.33));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{EntrySource, ListEntry, ProductList};
pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{compute, compute_one, summarize};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name accepted from manual entry.
pub const MAX_NAME_LENGTH: usize = 200;

/// Decimal places kept on every derived monetary and percentage field.
pub const DISPLAY_DECIMALS: u32 = 2;
