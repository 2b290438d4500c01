//! # Invoice Repository
//!
//! SQLite persistence for computed invoices.
//!
//! ## Row Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoices                                                               │
//! │  ├── id, invoice_number (UNIQUE)      identity                         │
//! │  ├── invoice_date, billed_to_name     listing columns                  │
//! │  ├── final_total                      listing column                   │
//! │  ├── document                         full Invoice as JSON             │
//! │  └── created_at, updated_at           RFC 3339, UTC                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `document` is the source of truth when reading. The other columns are
//! written alongside it so the table stays readable from a SQL shell.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use billbook_core::Invoice;

use crate::error::DbResult;
use crate::store::InvoiceStore;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Number of stored invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode(document: &str) -> DbResult<Invoice> {
    Ok(serde_json::from_str(document)?)
}

#[async_trait]
impl InvoiceStore for InvoiceRepository {
    /// Inserts or replaces by invoice number.
    ///
    /// ## Transaction
    /// The lookup of the existing row and the upsert run in one transaction
    /// so a concurrent save of the same number can't change the identity
    /// in between.
    async fn save(&self, invoice: &Invoice) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT document FROM invoices WHERE invoice_number = ?1")
                .bind(invoice.invoice_number())
                .fetch_optional(&mut *tx)
                .await?;

        let mut record = invoice.clone();
        if let Some(document) = existing {
            let stored = decode(&document)?;
            record.id = stored.id;
            record.created_at = stored.created_at;
        }

        debug!(
            id = %record.id,
            invoice_number = %record.invoice_number(),
            final_total = record.totals.final_total,
            "Saving invoice"
        );

        let document = serde_json::to_string(&record)?;
        let invoice_date = record
            .header
            .invoice_date
            .map(|d| d.format("%Y-%m-%d").to_string());

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, invoice_date, billed_to_name,
                final_total, document, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(invoice_number) DO UPDATE SET
                invoice_date = excluded.invoice_date,
                billed_to_name = excluded.billed_to_name,
                final_total = excluded.final_total,
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(record.invoice_number())
        .bind(invoice_date)
        .bind(&record.header.billed_to.name)
        .bind(record.totals.final_total as i64)
        .bind(&document)
        .bind(timestamp(&record.created_at))
        .bind(timestamp(&record.updated_at))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, invoice_number: &str) -> DbResult<Option<Invoice>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM invoices WHERE invoice_number = ?1")
                .bind(invoice_number)
                .fetch_optional(&self.pool)
                .await?;

        document.as_deref().map(decode).transpose()
    }

    async fn list(&self) -> DbResult<Vec<Invoice>> {
        let rows = sqlx::query(
            "SELECT document FROM invoices ORDER BY created_at ASC, invoice_number ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listing invoices");

        rows.iter()
            .map(|row| decode(&row.try_get::<String, _>("document")?))
            .collect()
    }

    async fn delete(&self, invoice_number: &str) -> DbResult<bool> {
        debug!(invoice_number = %invoice_number, "Deleting invoice");

        let result = sqlx::query("DELETE FROM invoices WHERE invoice_number = ?1")
            .bind(invoice_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, invoice_number: &str) -> DbResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM invoices WHERE invoice_number = ?1")
                .bind(invoice_number)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::store::tests::{exercise_store, sample_invoice};

    async fn repository() -> InvoiceRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.invoices()
    }

    #[tokio::test]
    async fn test_repository_behaviour() {
        let repo = repository().await;
        exercise_store(&repo).await;
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_listing_columns_follow_document() {
        let repo = repository().await;
        let mut invoice = sample_invoice("INV-7", 2.0);
        invoice.header.billed_to.name = "Sharma Traders".to_string();
        invoice.header.invoice_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 1);
        repo.save(&invoice).await.unwrap();

        let row = sqlx::query(
            "SELECT invoice_date, billed_to_name, final_total FROM invoices WHERE invoice_number = 'INV-7'",
        )
        .fetch_one(&repo.pool)
        .await
        .unwrap();

        let date: Option<String> = row.get("invoice_date");
        let name: String = row.get("billed_to_name");
        let total: i64 = row.get("final_total");
        assert_eq!(date.as_deref(), Some("2024-04-01"));
        assert_eq!(name, "Sharma Traders");
        assert_eq!(total, 1180);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let repo = repository().await;
        sqlx::query(
            "INSERT INTO invoices (id, invoice_number, document, created_at, updated_at)
             VALUES ('x', 'BAD-1', 'not json', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.get("BAD-1").await.unwrap_err();
        assert!(matches!(err, crate::error::DbError::Serialization(_)));
        assert!(repo.exists("BAD-1").await.unwrap());
    }
}
