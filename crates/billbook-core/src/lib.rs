//! # billbook-core: Pure Invoice Logic for Billbook
//!
//! This crate holds the invoice arithmetic and form intake rules as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Front end (invoice form / billbook-cli)              │   │
//! │  │      raw text fields ──► InvoiceDraft                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ billbook-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌─────────┐  ┌────────────┐  │   │
//! │  │   │ validation │─►│  totals   │─►│  words  │  │   money    │  │   │
//! │  │   │  drafts    │  │ CGST/SGST │  │ lakh /  │  │ ₹12,34,567 │  │   │
//! │  │   │  items     │  │ IGST      │  │ crore   │  │            │  │   │
//! │  │   └────────────┘  └───────────┘  └─────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Invoice                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                billbook-db (InvoiceStore)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, GstRates, Invoice, InvoiceDraft)
//! - [`totals`] - The totals engine
//! - [`words`] - Amount in words, Indian numbering
//! - [`money`] - Rupee display with Indian digit grouping
//! - [`validation`] - Form intake rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use billbook_core::{compute_totals, GstRates, LineItem};
//!
//! let items = vec![
//!     LineItem::new("Steel rods", 2.0, 500.0).with_rates(GstRates::inter_state(18.0)),
//! ];
//!
//! let totals = compute_totals(&items, 0.0);
//! assert_eq!(totals.igst_total, 180.0);
//! assert_eq!(totals.final_total, 1180);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Rupees;
pub use totals::{compute_totals, InvoiceTotals};
pub use types::*;
pub use words::amount_in_words;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest invoice number accepted from the form.
pub const MAX_INVOICE_NUMBER_LEN: usize = 50;

/// Highest GST percentage accepted on a line item.
pub const MAX_TAX_RATE: f64 = 100.0;
