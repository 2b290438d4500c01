//! # Error Types
//!
//! Domain-specific error types for billbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billbook-core errors (this file)                                      │
//! │  ├── CoreError        - Invoice-level domain errors                    │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  billbook-db errors (separate crate)                                   │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (CLI) anyhow → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The totals engine and the words transcriber never fail: they are total
//! over already-validated numbers. Everything here comes from turning raw
//! form text into those numbers.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Invoice-level domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A revision was submitted under a different invoice number.
    ///
    /// ## When This Occurs
    /// - `Invoice::revise` is given a draft whose number differs from the
    ///   stored invoice. Renumbering creates a new invoice instead.
    #[error("Invoice number changed from {original} to {submitted}")]
    InvoiceNumberChanged { original: String, submitted: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when submitted form text doesn't meet requirements.
/// Item-level errors carry the 1-based row number so the form can point
/// at the offending line instead of rejecting the batch blindly.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A numeric field could not be parsed.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// A numeric field on a line item could not be parsed.
    ///
    /// ## User Workflow
    /// ```text
    /// Row 2 quantity: "2,5"
    ///      │
    ///      ▼
    /// InvalidItemNumber { item: 2, field: "quantity", value: "2,5" }
    ///      │
    ///      ▼
    /// Form shows: "Invalid number format in item 2: quantity '2,5'"
    /// ```
    #[error("Invalid number format in item {item}: {field} '{value}'")]
    InvalidItemNumber {
        item: usize,
        field: String,
        value: String,
    },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., bad date, bad GSTIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A parsed line item breaks a domain rule, e.g. a negative quantity.
    #[error("Item {item}: {reason}")]
    InvalidItem {
        item: usize,
        reason: Box<ValidationError>,
    },

    /// The submission contained no usable line items.
    #[error("At least one item is required to create an invoice")]
    NoItems,

    /// A line item's tax rates differ from the first item's.
    #[error("Item {item} has tax rates that differ from item 1")]
    MixedTaxRates { item: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
