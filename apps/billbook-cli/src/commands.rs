//! # Commands
//!
//! The work behind each subcommand, written against `&dyn InvoiceStore` so
//! it runs the same on SQLite and on the in-memory store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create  draft.json ─► InvoiceDraft ─► Invoice (new or revised) ─► save │
//! │  show    number ─────► get ──────────► render_summary                  │
//! │  list    ────────────► list ─────────► render_listing                  │
//! │  words   amount ─────► amount_in_words                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use billbook_core::validation::lenient_fields_ignored;
use billbook_core::{amount_in_words, Invoice, InvoiceDraft, Rupees, TaxMode};
use billbook_db::{DbError, InvoiceStore};

// =============================================================================
// Create
// =============================================================================

/// Reads a JSON draft file.
pub async fn read_draft(path: &Path) -> anyhow::Result<InvoiceDraft> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read draft {}", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("Draft {} is not a valid invoice draft", path.display()))
}

/// Computes and stores an invoice from a draft.
///
/// A draft whose number is already stored revises that invoice, keeping
/// its id and creation time.
pub async fn create_from_draft(
    store: &dyn InvoiceStore,
    draft: &InvoiceDraft,
) -> anyhow::Result<Invoice> {
    for field in lenient_fields_ignored(draft) {
        warn!(field, "Value is not a number and was read as 0");
    }

    let invoice = match store.get(draft.invoice_number.trim()).await? {
        Some(existing) => {
            info!(invoice_number = %existing.invoice_number(), "Revising stored invoice");
            existing.revise(draft)?
        }
        None => Invoice::from_draft(draft)?,
    };

    store.save(&invoice).await?;

    info!(
        invoice_number = %invoice.invoice_number(),
        items = invoice.items.len(),
        final_total = invoice.totals.final_total,
        "Invoice saved"
    );
    Ok(invoice)
}

// =============================================================================
// Show / List / Words
// =============================================================================

/// Loads one invoice, failing when it is not stored.
pub async fn find_invoice(store: &dyn InvoiceStore, invoice_number: &str) -> anyhow::Result<Invoice> {
    let invoice = store
        .get(invoice_number)
        .await?
        .ok_or_else(|| DbError::not_found("Invoice", invoice_number))?;
    Ok(invoice)
}

/// One line per stored invoice, oldest first.
pub async fn render_listing(store: &dyn InvoiceStore) -> anyhow::Result<String> {
    let invoices = store.list().await?;
    if invoices.is_empty() {
        return Ok("No invoices stored".to_string());
    }

    let lines: Vec<String> = invoices
        .iter()
        .map(|invoice| {
            format!(
                "{:<20} {:<10} {:>16}  {}",
                invoice.invoice_number(),
                format_date(invoice),
                Rupees::from(invoice.totals.final_total).to_string(),
                invoice.header.billed_to.name
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// The words form of a whole rupee amount.
pub fn render_words(amount: u64) -> String {
    amount_in_words(amount)
}

// =============================================================================
// Summary
// =============================================================================

fn format_date(invoice: &Invoice) -> String {
    invoice
        .header
        .invoice_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn summary_row(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<18}{:>18}", label, value.to_string())
}

/// Printable summary of an invoice.
///
/// Tax rows follow the tax mode the first item's rates selected, so a
/// fully discounted invoice still shows its GST rows at zero. The discount
/// rows appear only when a discount was given.
pub fn render_summary(invoice: &Invoice) -> String {
    let totals = &invoice.totals;
    let billed_to = &invoice.header.billed_to;
    let rates = invoice.items.first().map(|i| i.rates()).unwrap_or_default();

    let mut lines = vec![format!(
        "Invoice {} ({})",
        invoice.invoice_number(),
        format_date(invoice)
    )];

    if !billed_to.name.is_empty() {
        let mut party = format!("Billed to: {}", billed_to.name);
        if !billed_to.gstin.is_empty() {
            party.push_str(&format!("  GSTIN {}", billed_to.gstin));
        }
        lines.push(party);
    }

    lines.push(String::new());
    for (n, (item, amount)) in invoice.items.iter().zip(&totals.line_amounts).enumerate() {
        let hsn = if item.hsn_code.is_empty() {
            String::new()
        } else {
            format!(" [HSN {}]", item.hsn_code)
        };
        lines.push(format!(
            "{:>3}. {}{}  {} {} x {} = {}",
            n + 1,
            item.description,
            hsn,
            item.quantity,
            item.uom,
            Rupees(item.rate),
            Rupees(*amount)
        ));
    }
    lines.push(String::new());

    lines.push(summary_row("Subtotal", Rupees(totals.subtotal)));
    if totals.discount_amount != 0.0 {
        lines.push(summary_row("Discount", Rupees(totals.discount_amount)));
        lines.push(summary_row("Taxable value", Rupees(totals.discounted_subtotal)));
    }

    match totals.tax_mode {
        TaxMode::IntraState => {
            lines.push(summary_row(&format!("CGST @ {}%", rates.cgst), Rupees(totals.cgst_total)));
            lines.push(summary_row(&format!("SGST @ {}%", rates.sgst), Rupees(totals.sgst_total)));
        }
        TaxMode::InterState => {
            lines.push(summary_row(&format!("IGST @ {}%", rates.igst), Rupees(totals.igst_total)));
        }
        TaxMode::Exempt => {}
    }

    lines.push(summary_row("Round off", Rupees(totals.round_off)));
    lines.push(summary_row("Total payable", Rupees::from(totals.final_total)));
    lines.push(String::new());
    lines.push(format!("In words: {}", totals.amount_in_words));
    lines.push(format!("PDF: {}", invoice.pdf_file_name()));

    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use billbook_core::{CoreError, ValidationError};
    use billbook_db::MemoryInvoiceStore;

    fn draft(number: &str, quantity: &str) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: number.to_string(),
            invoice_date: "2024-04-01".to_string(),
            billed_to_name: "Sharma Traders".to_string(),
            billed_to_gstin: "27ABCDE1234F1Z5".to_string(),
            item_description: vec!["Copper wire".to_string()],
            item_hsn: vec!["7408".to_string()],
            item_quantity: vec![quantity.to_string()],
            item_uom: vec!["Mtr".to_string()],
            item_rate: vec!["500".to_string()],
            cgst_rate: "9".to_string(),
            sgst_rate: "9".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_show() {
        let store = MemoryInvoiceStore::new();
        let created = create_from_draft(&store, &draft("INV-001", "2")).await.unwrap();
        assert_eq!(created.totals.final_total, 1180);

        let found = find_invoice(&store, "INV-001").await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_resubmission_revises() {
        let store = MemoryInvoiceStore::new();
        let first = create_from_draft(&store, &draft("INV-001", "2")).await.unwrap();
        let second = create_from_draft(&store, &draft("INV-001", "3")).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.totals.final_total, 1770);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_item() {
        let store = MemoryInvoiceStore::new();
        let err = create_from_draft(&store, &draft("INV-001", "two"))
            .await
            .unwrap_err();

        match err.downcast_ref::<CoreError>() {
            Some(CoreError::Validation(ValidationError::InvalidItemNumber { item, .. })) => {
                assert_eq!(*item, 1)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_show_missing_invoice() {
        let store = MemoryInvoiceStore::new();
        let err = find_invoice(&store, "NOPE").await.unwrap_err();
        assert_eq!(err.to_string(), "Invoice not found: NOPE");
    }

    #[tokio::test]
    async fn test_listing() {
        let store = MemoryInvoiceStore::new();
        assert_eq!(render_listing(&store).await.unwrap(), "No invoices stored");

        create_from_draft(&store, &draft("INV-001", "2")).await.unwrap();
        let listing = render_listing(&store).await.unwrap();
        assert!(listing.starts_with("INV-001"));
        assert!(listing.contains("2024-04-01"));
        assert!(listing.contains("₹1,180.00"));
        assert!(listing.ends_with("Sharma Traders"));
    }

    #[test]
    fn test_summary_intra_state() {
        let invoice = Invoice::from_draft(&draft("INV-001", "2")).unwrap();
        let summary = render_summary(&invoice);

        assert!(summary.contains("Invoice INV-001 (2024-04-01)"));
        assert!(summary.contains("GSTIN 27ABCDE1234F1Z5"));
        assert!(summary.contains("Copper wire [HSN 7408]  2 Mtr x ₹500.00 = ₹1,000.00"));
        assert!(summary.contains("CGST @ 9%"));
        assert!(summary.contains("SGST @ 9%"));
        assert!(!summary.contains("IGST"));
        assert!(!summary.contains("Discount"));
        assert!(summary.contains("₹1,180.00"));
        assert!(summary.contains("In words: One Thousand One Hundred Eighty Rupees Only"));
        assert!(summary.contains("PDF: INV-001_2024-04-01.pdf"));
    }

    #[test]
    fn test_summary_keeps_gst_rows_when_fully_discounted() {
        let mut d = draft("INV-003", "2");
        d.discount_amount = "1000".to_string();

        let invoice = Invoice::from_draft(&d).unwrap();
        assert_eq!(invoice.totals.tax_mode, TaxMode::IntraState);

        let summary = render_summary(&invoice);
        assert!(summary.contains("CGST @ 9%"));
        assert!(summary.contains("SGST @ 9%"));
        assert!(summary.contains("In words: Zero"));
    }

    #[test]
    fn test_summary_inter_state_with_discount() {
        let mut d = draft("INV-002", "2");
        d.cgst_rate.clear();
        d.sgst_rate.clear();
        d.igst_rate = "18".to_string();
        d.discount_amount = "100".to_string();

        let summary = render_summary(&Invoice::from_draft(&d).unwrap());
        assert!(summary.contains("IGST @ 18%"));
        assert!(!summary.contains("CGST"));
        assert!(summary.contains("Discount"));
        assert!(summary.contains("₹900.00"));
        assert!(summary.contains("One Thousand Sixty Two Rupees Only"));
    }

    #[test]
    fn test_words() {
        assert_eq!(render_words(0), "Zero");
        assert_eq!(render_words(1500), "One Thousand Five Hundred Rupees Only");
    }
}
