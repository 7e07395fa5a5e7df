//! # Error Types
//!
//! Domain-specific error types for pricedesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricedesk-core errors (this file)                                     │
//! │  ├── CoreError        - Product list operations                        │
//! │  └── ValidationError  - Manual entry validation failures               │
//! │                                                                         │
//! │  pricedesk-io errors (separate crate)                                  │
//! │  └── IoError          - Upload rejection, export failures              │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the shell prints                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself has no error type: every arithmetic
//! degeneracy resolves to a number. Errors here only come from list
//! bookkeeping and input-boundary checks.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Product list errors.
///
/// Every operation that returns one of these leaves the list unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Index does not address an entry in the current list.
    ///
    /// ## When This Occurs
    /// - `delete 5` on a three-row list
    /// - Editing a row that was removed in an earlier step
    #[error("No product at row {index} (list has {len} products)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No entry carries the given identity.
    #[error("Product entry not found: {0}")]
    EntryNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when manually entered values don't meet requirements.
/// Uploaded rows skip this layer and rely on engine defaulting.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., "abc" where a price was expected).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
