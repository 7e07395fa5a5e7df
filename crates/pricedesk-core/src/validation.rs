//! # Validation Module
//!
//! Input validation for manually entered products.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell parsing (apps/cli)                                     │
//! │  ├── Splits the command line into fields                               │
//! │  └── THIS MODULE: parse + range checks for manual entry                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Upload parser (pricedesk-io)                                 │
//! │  ├── Rejects files missing required columns                            │
//! │  └── Unreadable cells become absent fields                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Defaults absent fields, resolves degenerate math to 0             │
//! │                                                                         │
//! │  Invalid manual values never reach the product list.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricedesk_core::validation::{parse_price, validate_discount_percent};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(parse_price("retail price", "£19.99").unwrap(), Some(dec!(19.99)));
//! assert!(validate_discount_percent(dec!(120)).is_err());
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ValidationError;
use crate::money::parse_amount;
use crate::types::ProductInput;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - May be empty (names are optional)
/// - Must be at most [`MAX_NAME_LENGTH`] characters after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price (retail or cost).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, unknown cost)
pub fn validate_price(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_discount_percent(value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: Decimal::ZERO,
            max: dec!(100),
        });
    }

    Ok(())
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses a typed price or percentage. Empty text means "not given".
pub fn parse_price(field: &str, raw: &str) -> ValidationResult<Option<Decimal>> {
    parse_amount(raw).map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a number ({})", raw.trim(), e),
    })
}

/// Parses a typed stock quantity. Empty text means "not given".
///
/// ## Rules
/// - Whole number
/// - Not negative
pub fn parse_stock_qty(raw: &str) -> ValidationResult<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if raw.starts_with('-') {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: "stock".to_string(),
            reason: format!("'{}' is not a whole number", raw),
        })
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a manually entered product before it joins the list.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shell: add Widget, 100, 10, 60, 5                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_manual_entry(&input) ← THIS FUNCTION                         │
/// │       │                                                                 │
/// │       ├── nothing given?        → Error: "product is required"         │
/// │       ├── name too long?        → Error: "name must be at most 200..." │
/// │       ├── negative price?       → Error: "... must not be negative"    │
/// │       ├── discount outside 0..100 → Error: "discount must be between"  │
/// │       │                                                                 │
/// │       └── OK → ProductList::push                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_manual_entry(input: &ProductInput) -> ValidationResult<()> {
    if input.is_blank() {
        return Err(ValidationError::Required {
            field: "product".to_string(),
        });
    }
    validate_fields(input)
}

/// Checks only the fields that are present.
///
/// Used by `edit`, where absent fields keep their stored values. An
/// uploaded row holding a 150% discount can still be renamed.
pub fn validate_fields(input: &ProductInput) -> ValidationResult<()> {
    if let Some(name) = &input.name {
        validate_product_name(name)?;
    }
    if let Some(retail) = input.retail_price {
        validate_price("retail price", retail)?;
    }
    if let Some(cost) = input.cost_price {
        validate_price("cost price", cost)?;
    }
    if let Some(discount) = input.discount_percent {
        validate_discount_percent(discount)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Blood Angels Upgrade Sprue").is_ok());
        assert!(validate_product_name("").is_ok());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("retail price", dec!(0)).is_ok());
        assert!(validate_price("retail price", dec!(19.99)).is_ok());
        assert!(validate_price("retail price", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(dec!(0)).is_ok());
        assert!(validate_discount_percent(dec!(12.5)).is_ok());
        assert!(validate_discount_percent(dec!(100)).is_ok());
        assert!(validate_discount_percent(dec!(100.01)).is_err());
        assert!(validate_discount_percent(dec!(-1)).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("cost price", "60").unwrap(), Some(dec!(60)));
        assert_eq!(parse_price("cost price", " ").unwrap(), None);
        let err = parse_price("cost price", "sixty").unwrap_err();
        assert!(err.to_string().starts_with("cost price has invalid format"));
    }

    #[test]
    fn test_parse_stock_qty() {
        assert_eq!(parse_stock_qty("12").unwrap(), Some(12));
        assert_eq!(parse_stock_qty("").unwrap(), None);
        assert!(matches!(
            parse_stock_qty("-3"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(parse_stock_qty("2.5").is_err());
    }

    #[test]
    fn test_validate_manual_entry() {
        let ok = ProductInput::new("Widget", dec!(100), dec!(10), dec!(60));
        assert!(validate_manual_entry(&ok).is_ok());

        assert!(matches!(
            validate_manual_entry(&ProductInput::default()),
            Err(ValidationError::Required { .. })
        ));

        let negative = ProductInput::new("Widget", dec!(-1), dec!(10), dec!(60));
        assert!(validate_manual_entry(&negative).is_err());

        let too_much = ProductInput::new("Widget", dec!(10), dec!(101), dec!(6));
        assert!(validate_manual_entry(&too_much).is_err());
    }

    #[test]
    fn test_partial_manual_entry_is_allowed() {
        let input = ProductInput {
            retail_price: Some(dec!(25)),
            ..ProductInput::default()
        };
        assert!(validate_manual_entry(&input).is_ok());
    }

    #[test]
    fn test_validate_fields_ignores_absent_values() {
        let rename = ProductInput {
            name: Some("New".to_string()),
            ..ProductInput::default()
        };
        assert!(validate_fields(&rename).is_ok());
        assert!(validate_fields(&ProductInput::default()).is_ok());

        let bad_discount = ProductInput {
            discount_percent: Some(dec!(150)),
            ..ProductInput::default()
        };
        assert!(validate_fields(&bad_discount).is_err());
    }
}
