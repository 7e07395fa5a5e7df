//! # Domain Types
//!
//! Core domain types used throughout PriceDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   normalize()   ┌─────────────────┐               │
//! │  │  ProductInput   │ ──────────────► │     Product     │               │
//! │  │  ─────────────  │                 │  ─────────────  │               │
//! │  │  every field    │                 │  defaults       │               │
//! │  │  Option<_>      │                 │  applied        │               │
//! │  └─────────────────┘                 └────────┬────────┘               │
//! │                                               │ + CalculationOptions    │
//! │                                               ▼                         │
//! │                                      ┌─────────────────┐               │
//! │                                      │  ProductResult  │               │
//! │                                      │  ─────────────  │               │
//! │                                      │  inputs +       │               │
//! │                                      │  derived fields │               │
//! │                                      └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Manual entry and uploads both produce `ProductInput`, so both go through
//! the same defaulting step and a result never depends on where its row
//! came from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Flat VAT rate applied to the retail price before discount (20%).
pub const VAT_RATE: Decimal = dec!(0.20);

// =============================================================================
// Product Input
// =============================================================================

/// A raw product record, possibly partial.
///
/// Absent fields fall back to their defaults in [`ProductInput::normalize`]:
/// empty name, zero prices, zero discount, zero stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductInput {
    /// Display name.
    pub name: Option<String>,

    /// Retail price before VAT and discount.
    #[ts(type = "string | null")]
    pub retail_price: Option<Decimal>,

    /// Discount percentage, expected in [0, 100].
    #[ts(type = "string | null")]
    pub discount_percent: Option<Decimal>,

    /// Cost price paid for the product.
    #[ts(type = "string | null")]
    pub cost_price: Option<Decimal>,

    /// Units in stock.
    pub stock_qty: Option<u32>,
}

impl ProductInput {
    /// Creates a fully specified input without a stock quantity.
    pub fn new(
        name: impl Into<String>,
        retail_price: Decimal,
        discount_percent: Decimal,
        cost_price: Decimal,
    ) -> Self {
        ProductInput {
            name: Some(name.into()),
            retail_price: Some(retail_price),
            discount_percent: Some(discount_percent),
            cost_price: Some(cost_price),
            stock_qty: None,
        }
    }

    /// Sets the stock quantity.
    pub fn with_stock(mut self, stock_qty: u32) -> Self {
        self.stock_qty = Some(stock_qty);
        self
    }

    /// Applies defaults to every absent field.
    pub fn normalize(&self) -> Product {
        Product {
            name: self.name.clone().unwrap_or_default(),
            retail_price: self.retail_price.unwrap_or_default(),
            discount_percent: self.discount_percent.unwrap_or_default(),
            cost_price: self.cost_price.unwrap_or_default(),
            stock_qty: self.stock_qty.unwrap_or_default(),
        }
    }

    /// True when no field carries a value.
    pub fn is_blank(&self) -> bool {
        *self == ProductInput::default()
    }
}

/// A normalized product: every field present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub name: String,
    #[ts(type = "string")]
    pub retail_price: Decimal,
    #[ts(type = "string")]
    pub discount_percent: Decimal,
    #[ts(type = "string")]
    pub cost_price: Decimal,
    pub stock_qty: u32,
}

impl From<Product> for ProductInput {
    fn from(product: Product) -> Self {
        ProductInput {
            name: Some(product.name),
            retail_price: Some(product.retail_price),
            discount_percent: Some(product.discount_percent),
            cost_price: Some(product.cost_price),
            stock_qty: Some(product.stock_qty),
        }
    }
}

// =============================================================================
// Calculation Options
// =============================================================================

/// Global options for one pricing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalculationOptions {
    /// Apply [`VAT_RATE`] to the retail price.
    pub include_vat: bool,
}

impl CalculationOptions {
    /// Options with VAT applied.
    pub const fn with_vat() -> Self {
        CalculationOptions { include_vat: true }
    }

    /// Options without VAT.
    pub const fn without_vat() -> Self {
        CalculationOptions { include_vat: false }
    }

    /// The effective VAT rate for this pass (zero when VAT is off).
    pub fn vat_rate(&self) -> Decimal {
        if self.include_vat {
            VAT_RATE
        } else {
            Decimal::ZERO
        }
    }
}

impl Default for CalculationOptions {
    fn default() -> Self {
        CalculationOptions::with_vat()
    }
}

// =============================================================================
// Product Result
// =============================================================================

/// A computed product record. Never hand-edited.
///
/// Input fields are carried through unrounded; every derived field is
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductResult {
    pub name: String,
    #[ts(type = "string")]
    pub retail_price: Decimal,
    #[ts(type = "string")]
    pub discount_percent: Decimal,
    #[ts(type = "string")]
    pub cost_price: Decimal,
    pub stock_qty: u32,

    /// Retail price with VAT when enabled.
    #[ts(type = "string")]
    pub final_retail: Decimal,

    /// Amount taken off `final_retail` by the discount.
    #[ts(type = "string")]
    pub discount_amount: Decimal,

    /// Selling price after VAT and discount.
    #[ts(type = "string")]
    pub discounted_price: Decimal,

    /// `discounted_price - cost_price`.
    #[ts(type = "string")]
    pub profit: Decimal,

    /// Profit as a percentage of `discounted_price`.
    #[ts(type = "string")]
    pub margin_percent: Decimal,
}

impl ProductResult {
    /// True when the product sells below cost.
    pub fn is_loss(&self) -> bool {
        self.profit.is_sign_negative() && !self.profit.is_zero()
    }
}

// =============================================================================
// Pricing Summary
// =============================================================================

/// Totals over a list of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingSummary {
    pub product_count: usize,
    pub total_stock: u64,
    #[ts(type = "string")]
    pub total_discounted_price: Decimal,
    #[ts(type = "string")]
    pub total_cost_price: Decimal,
    #[ts(type = "string")]
    pub total_profit: Decimal,
    /// Total profit as a percentage of total discounted price.
    #[ts(type = "string")]
    pub overall_margin_percent: Decimal,
    /// Sum of `profit × stock_qty`: profit if every unit sells.
    #[ts(type = "string")]
    pub stock_profit: Decimal,
    /// Rows selling below cost.
    pub loss_count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
