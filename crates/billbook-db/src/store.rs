//! # Invoice Store
//!
//! The storage seam between invoice logic and wherever invoices live.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       InvoiceStore (trait)                              │
//! │          save · get · list · delete · exists                           │
//! │                 │                               │                       │
//! │                 ▼                               ▼                       │
//! │  ┌──────────────────────────┐    ┌──────────────────────────────────┐  │
//! │  │   MemoryInvoiceStore     │    │   InvoiceRepository              │  │
//! │  │   RwLock<HashMap>        │    │   SQLite `invoices` table        │  │
//! │  │   tests, --memory        │    │   (repository/invoice.rs)        │  │
//! │  └──────────────────────────┘    └──────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Save Semantics
//! Invoices are keyed by `invoice_number`. Saving a number that already
//! exists replaces the stored record (an edited invoice is resubmitted
//! under its own number) but keeps the stored `id` and `created_at`.

use std::collections::HashMap;

use async_trait::async_trait;
use billbook_core::Invoice;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::DbResult;

/// Storage for computed invoices, keyed by invoice number.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Inserts the invoice, or replaces the one with the same number.
    async fn save(&self, invoice: &Invoice) -> DbResult<()>;

    /// Looks up an invoice by number.
    async fn get(&self, invoice_number: &str) -> DbResult<Option<Invoice>>;

    /// All invoices, oldest first.
    async fn list(&self) -> DbResult<Vec<Invoice>>;

    /// Removes an invoice. Returns whether one was removed.
    async fn delete(&self, invoice_number: &str) -> DbResult<bool>;

    /// Whether an invoice with this number is stored.
    async fn exists(&self, invoice_number: &str) -> DbResult<bool> {
        Ok(self.get(invoice_number).await?.is_some())
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local invoice store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryInvoiceStore {
    invoices: RwLock<HashMap<String, Invoice>>,
}

impl MemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored invoices.
    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn save(&self, invoice: &Invoice) -> DbResult<()> {
        let mut invoices = self.invoices.write().await;

        let mut record = invoice.clone();
        if let Some(existing) = invoices.get(invoice.invoice_number()) {
            record.id = existing.id.clone();
            record.created_at = existing.created_at;
        }

        debug!(
            invoice_number = %record.invoice_number(),
            final_total = record.totals.final_total,
            "Saving invoice"
        );
        invoices.insert(record.invoice_number().to_string(), record);
        Ok(())
    }

    async fn get(&self, invoice_number: &str) -> DbResult<Option<Invoice>> {
        Ok(self.invoices.read().await.get(invoice_number).cloned())
    }

    async fn list(&self) -> DbResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        invoices.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.invoice_number().cmp(b.invoice_number()))
        });
        Ok(invoices)
    }

    async fn delete(&self, invoice_number: &str) -> DbResult<bool> {
        debug!(invoice_number = %invoice_number, "Deleting invoice");
        Ok(self.invoices.write().await.remove(invoice_number).is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
