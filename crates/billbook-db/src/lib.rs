//! # billbook-db: Storage Layer for Billbook
//!
//! Invoice storage behind the [`InvoiceStore`] trait, with an in-memory
//! implementation and a SQLite one built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billbook Data Flow                               │
//! │                                                                         │
//! │  billbook-cli (create / show / list)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  billbook-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  InvoiceStore   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  Memory / SQL   │   │  (embedded)  │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (BILLBOOK_DATABASE_PATH)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `InvoiceStore` trait and the in-memory store
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQLite repository implementations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use billbook_db::{Database, DbConfig, InvoiceStore};
//!
//! let db = Database::new(DbConfig::new("billbook.db")).await?;
//! let store = db.invoices();
//! store.save(&invoice).await?;
//! let invoices = store.list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::invoice::InvoiceRepository;
pub use store::{InvoiceStore, MemoryInvoiceStore};
