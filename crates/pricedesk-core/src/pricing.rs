//! # Pricing Engine
//!
//! Turns product inputs into discounted prices, profit and margin.
//!
//! ## Per-Record Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductInput                                                           │
//! │       │ normalize (absent → 0 / "")                                    │
//! │       ▼                                                                 │
//! │  final_retail     = retail × (1 + 0.20)      (VAT on)                   │
//! │                   = retail                   (VAT off)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discounted_price = final_retail × (1 − discount / 100)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  profit           = discounted_price − cost                             │
//! │  margin           = profit / discounted_price × 100   (0 if price = 0)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round derived fields to 2 dp (half away from zero) ──► ProductResult   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Intermediate values stay unrounded; rounding happens once at the end.
//! Every step is checked arithmetic and an overflow resolves to zero, so
//! `compute` is total.

use rust_decimal::Decimal;

use crate::money::{apply_percentage_discount, apply_rate, percentage_of, round_money};
use crate::types::{CalculationOptions, PricingSummary, ProductInput, ProductResult};

/// Computes results for every input, in input order.
///
/// ## Example
/// ```rust
/// use pricedesk_core::pricing::compute;
/// use pricedesk_core::types::{CalculationOptions, ProductInput};
/// use rust_decimal_macros::dec;
///
/// let inputs = vec![ProductInput::new("Widget", dec!(100), dec!(10), dec!(60))];
/// let results = compute(&inputs, &CalculationOptions::with_vat());
///
/// assert_eq!(results[0].final_retail, dec!(120.00));
/// assert_eq!(results[0].discounted_price, dec!(108.00));
/// assert_eq!(results[0].profit, dec!(48.00));
/// assert_eq!(results[0].margin_percent, dec!(44.44));
/// ```
pub fn compute(products: &[ProductInput], options: &CalculationOptions) -> Vec<ProductResult> {
    products
        .iter()
        .map(|input| compute_one(input, options))
        .collect()
}

/// Computes the result for a single input.
pub fn compute_one(input: &ProductInput, options: &CalculationOptions) -> ProductResult {
    let product = input.normalize();

    let final_retail = apply_rate(product.retail_price, options.vat_rate()).unwrap_or_default();
    let discounted_price =
        apply_percentage_discount(final_retail, product.discount_percent).unwrap_or_default();
    let discount_amount = final_retail
        .checked_sub(discounted_price)
        .unwrap_or_default();
    let profit = discounted_price
        .checked_sub(product.cost_price)
        .unwrap_or_default();
    let margin_percent = percentage_of(profit, discounted_price);

    ProductResult {
        name: product.name,
        retail_price: product.retail_price,
        discount_percent: product.discount_percent,
        cost_price: product.cost_price,
        stock_qty: product.stock_qty,
        final_retail: round_money(final_retail),
        discount_amount: round_money(discount_amount),
        discounted_price: round_money(discounted_price),
        profit: round_money(profit),
        margin_percent: round_money(margin_percent),
    }
}

/// Totals a result list.
///
/// Sums use the rounded per-row figures so the summary agrees with what a
/// reader adds up from the exported table.
pub fn summarize(results: &[ProductResult]) -> PricingSummary {
    let mut total_stock: u64 = 0;
    let mut total_discounted_price = Decimal::ZERO;
    let mut total_cost_price = Decimal::ZERO;
    let mut total_profit = Decimal::ZERO;
    let mut stock_profit = Decimal::ZERO;
    let mut loss_count = 0;

    for result in results {
        total_stock += u64::from(result.stock_qty);
        total_discounted_price = saturating_add(total_discounted_price, result.discounted_price);
        total_cost_price = saturating_add(total_cost_price, result.cost_price);
        total_profit = saturating_add(total_profit, result.profit);
        let row_stock_profit = result
            .profit
            .checked_mul(Decimal::from(result.stock_qty))
            .unwrap_or_default();
        stock_profit = saturating_add(stock_profit, row_stock_profit);
        if result.is_loss() {
            loss_count += 1;
        }
    }

    PricingSummary {
        product_count: results.len(),
        total_stock,
        total_discounted_price: round_money(total_discounted_price),
        total_cost_price: round_money(total_cost_price),
        total_profit: round_money(total_profit),
        overall_margin_percent: round_money(percentage_of(total_profit, total_discounted_price)),
        stock_profit: round_money(stock_profit),
        loss_count,
    }
}

fn saturating_add(total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
