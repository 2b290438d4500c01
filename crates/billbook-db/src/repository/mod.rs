//! # Repository Module
//!
//! SQLite-backed repositories for Billbook.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  billbook-cli                                                           │
//! │       │  store.save(&invoice)   (Arc<dyn InvoiceStore>)                 │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                      │
//! │  ├── save(&self, invoice)      upsert by invoice_number                │
//! │  ├── get(&self, number)                                                │
//! │  ├── list(&self)                                                       │
//! │  └── delete(&self, number)                                             │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite `invoices` table                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Invoice persistence

pub mod invoice;
