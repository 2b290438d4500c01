//! # Domain Types
//!
//! Core domain types used throughout Billbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  InvoiceDraft (raw form text)                                          │
//! │       │  validation::line_items_from_draft / header_from_draft         │
//! │       ▼                                                                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InvoiceHeader   │   │   LineItem      │   │    GstRates     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoice_number │   │  description    │   │  cgst (%)       │       │
//! │  │  invoice_date   │   │  quantity, rate │   │  sgst (%)       │       │
//! │  │  billed_to      │   │  cgst/sgst/igst │   │  igst (%)       │       │
//! │  └────────┬────────┘   └────────┬────────┘   └─────────────────┘       │
//! │           │                     │ totals::compute_totals               │
//! │           ▼                     ▼                                       │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Invoice = header + items + InvoiceTotals │ ──► InvoiceStore         │
//! │  └─────────────────────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every stored invoice has:
//! - `id`: UUID v4 - immutable, survives edits
//! - `invoice_number`: business identifier printed on the document, and the
//!   key the store is addressed by

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::totals::{compute_totals, InvoiceTotals};
use crate::validation;

// =============================================================================
// GST Rates
// =============================================================================

/// Invoice-level GST percentages.
///
/// A same-state supply charges CGST and SGST together; an inter-state
/// supply charges IGST alone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRates {
    /// Central GST, percent.
    pub cgst: f64,
    /// State GST, percent.
    pub sgst: f64,
    /// Integrated GST, percent.
    pub igst: f64,
}

impl GstRates {
    /// Same-state rates (CGST + SGST).
    pub const fn intra_state(cgst: f64, sgst: f64) -> Self {
        GstRates {
            cgst,
            sgst,
            igst: 0.0,
        }
    }

    /// Inter-state rate (IGST).
    pub const fn inter_state(igst: f64) -> Self {
        GstRates {
            cgst: 0.0,
            sgst: 0.0,
            igst,
        }
    }

    /// Picks which taxes apply.
    ///
    /// ## Selection Rule
    /// ```text
    /// cgst > 0 AND sgst > 0 ──► IntraState (IGST ignored even if set)
    ///          │ no
    ///          ▼
    /// igst > 0              ──► InterState
    ///          │ no
    ///          ▼
    ///                           Exempt
    /// ```
    pub fn tax_mode(&self) -> TaxMode {
        if self.cgst > 0.0 && self.sgst > 0.0 {
            TaxMode::IntraState
        } else if self.igst > 0.0 {
            TaxMode::InterState
        } else {
            TaxMode::Exempt
        }
    }
}

/// Which GST components an invoice charges. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// CGST + SGST.
    IntraState,
    /// IGST only.
    InterState,
    /// No positive rate, or no items.
    #[default]
    Exempt,
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable entry on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// What is being billed. Never empty once validated.
    pub description: String,

    /// HSN classification code, empty when not given.
    #[serde(default)]
    pub hsn_code: String,

    pub quantity: f64,

    /// Unit of measure label ("Nos", "Kg"), empty when not given.
    #[serde(default)]
    pub uom: String,

    /// Unit price in rupees.
    pub rate: f64,

    #[serde(default)]
    pub cgst_rate: f64,
    #[serde(default)]
    pub sgst_rate: f64,
    #[serde(default)]
    pub igst_rate: f64,
}

impl LineItem {
    /// Creates an item with no HSN code, unit or tax.
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        LineItem {
            description: description.into(),
            hsn_code: String::new(),
            quantity,
            uom: String::new(),
            rate,
            cgst_rate: 0.0,
            sgst_rate: 0.0,
            igst_rate: 0.0,
        }
    }

    pub fn with_hsn(mut self, hsn_code: impl Into<String>) -> Self {
        self.hsn_code = hsn_code.into();
        self
    }

    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom = uom.into();
        self
    }

    /// Applies invoice-level GST rates to this item.
    pub fn with_rates(mut self, rates: GstRates) -> Self {
        self.cgst_rate = rates.cgst;
        self.sgst_rate = rates.sgst;
        self.igst_rate = rates.igst;
        self
    }

    /// Line amount before discount and tax (quantity × rate).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }

    /// The item's GST rates.
    #[inline]
    pub fn rates(&self) -> GstRates {
        GstRates {
            cgst: self.cgst_rate,
            sgst: self.sgst_rate,
            igst: self.igst_rate,
        }
    }
}

// =============================================================================
// Invoice Header
// =============================================================================

/// The party an invoice is billed to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BilledTo {
    pub name: String,
    pub place_of_supply: String,
    pub state: String,
    pub state_code: String,
    /// GST identification number; empty for unregistered buyers.
    pub gstin: String,
}

/// Document metadata printed above the line items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceHeader {
    pub invoice_number: String,
    #[ts(as = "Option<String>")]
    pub invoice_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub date_of_supply: Option<NaiveDate>,
    pub vehicle_no: String,
    /// Goods receipt / railway receipt number.
    pub gr_rr_no: String,
    /// E-way bill or other electronic reference.
    pub electronic_ref_no: String,
    pub billed_to: BilledTo,
}

// =============================================================================
// Invoice Draft
// =============================================================================

/// A raw invoice form submission.
///
/// Every field is text exactly as typed. Item columns are parallel lists
/// indexed by row; rows with a blank description are dropped during intake.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub invoice_date: String,
    pub date_of_supply: String,
    pub vehicle_no: String,
    pub gr_rr_no: String,
    pub electronic_ref_no: String,

    pub billed_to_name: String,
    pub billed_to_address: String,
    pub billed_to_state: String,
    pub billed_to_state_code: String,
    pub billed_to_gstin: String,

    pub item_description: Vec<String>,
    pub item_hsn: Vec<String>,
    pub item_quantity: Vec<String>,
    pub item_uom: Vec<String>,
    pub item_rate: Vec<String>,

    pub cgst_rate: String,
    pub sgst_rate: String,
    pub igst_rate: String,
    pub discount_amount: String,
}

impl InvoiceDraft {
    /// Invoice-level GST rates. Malformed text counts as zero.
    pub fn gst_rates(&self) -> GstRates {
        GstRates {
            cgst: validation::parse_or_zero(&self.cgst_rate),
            sgst: validation::parse_or_zero(&self.sgst_rate),
            igst: validation::parse_or_zero(&self.igst_rate),
        }
    }

    /// Flat discount in rupees. Malformed text counts as zero.
    pub fn discount(&self) -> f64 {
        validation::parse_or_zero(&self.discount_amount)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A computed invoice record, ready to store or render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub header: InvoiceHeader,

    pub items: Vec<LineItem>,

    pub totals: InvoiceTotals,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Computes totals for `items` and wraps them in a new record.
    pub fn new(header: InvoiceHeader, items: Vec<LineItem>, discount_amount: f64) -> Self {
        let totals = compute_totals(&items, discount_amount);
        let now = Utc::now();

        Invoice {
            id: Uuid::new_v4().to_string(),
            header,
            items,
            totals,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates a form submission and computes its totals.
    ///
    /// ## Flow
    /// ```text
    /// InvoiceDraft
    ///      │
    ///      ├── header_from_draft      → invoice number, dates, GSTIN
    ///      ├── line_items_from_draft  → per-row numbers, ≥ 1 item
    ///      ├── gst_rates / discount   → lenient, bad text = 0
    ///      ▼
    /// compute_totals ──► Invoice
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use billbook_core::{Invoice, InvoiceDraft};
    ///
    /// let draft = InvoiceDraft {
    ///     invoice_number: "INV-001".to_string(),
    ///     item_description: vec!["Steel rods".to_string()],
    ///     item_quantity: vec!["2".to_string()],
    ///     item_rate: vec!["500".to_string()],
    ///     cgst_rate: "9".to_string(),
    ///     sgst_rate: "9".to_string(),
    ///     ..Default::default()
    /// };
    ///
    /// let invoice = Invoice::from_draft(&draft).unwrap();
    /// assert_eq!(invoice.totals.final_total, 1180);
    /// ```
    pub fn from_draft(draft: &InvoiceDraft) -> CoreResult<Self> {
        let header = validation::header_from_draft(draft)?;
        let items = validation::line_items_from_draft(draft)?;
        Ok(Invoice::new(header, items, draft.discount()))
    }

    /// Applies an edited submission to this invoice.
    ///
    /// The result keeps `id` and `created_at`; everything else comes from
    /// the draft. The draft must carry the same invoice number.
    pub fn revise(&self, draft: &InvoiceDraft) -> CoreResult<Self> {
        let submitted = draft.invoice_number.trim();
        if submitted != self.header.invoice_number {
            return Err(CoreError::InvoiceNumberChanged {
                original: self.header.invoice_number.clone(),
                submitted: submitted.to_string(),
            });
        }

        let revised = Invoice::from_draft(draft)?;
        Ok(Invoice {
            id: self.id.clone(),
            created_at: self.created_at,
            ..revised
        })
    }

    #[inline]
    pub fn invoice_number(&self) -> &str {
        &self.header.invoice_number
    }

    /// File name the PDF export is downloaded under:
    /// `{invoice_number}_{invoice_date}.pdf`.
    pub fn pdf_file_name(&self) -> String {
        let date = self
            .header
            .invoice_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        format!("{}_{}.pdf", self.header.invoice_number, date)
    }

    /// Converts back to form text, for pre-filling an edit form.
    pub fn to_draft(&self) -> InvoiceDraft {
        let rates = self.items.first().map(LineItem::rates).unwrap_or_default();
        let fmt_date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        let billed_to = &self.header.billed_to;

        InvoiceDraft {
            invoice_number: self.header.invoice_number.clone(),
            invoice_date: fmt_date(self.header.invoice_date),
            date_of_supply: fmt_date(self.header.date_of_supply),
            vehicle_no: self.header.vehicle_no.clone(),
            gr_rr_no: self.header.gr_rr_no.clone(),
            electronic_ref_no: self.header.electronic_ref_no.clone(),
            billed_to_name: billed_to.name.clone(),
            billed_to_address: billed_to.place_of_supply.clone(),
            billed_to_state: billed_to.state.clone(),
            billed_to_state_code: billed_to.state_code.clone(),
            billed_to_gstin: billed_to.gstin.clone(),
            item_description: self.items.iter().map(|i| i.description.clone()).collect(),
            item_hsn: self.items.iter().map(|i| i.hsn_code.clone()).collect(),
            item_quantity: self.items.iter().map(|i| i.quantity.to_string()).collect(),
            item_uom: self.items.iter().map(|i| i.uom.clone()).collect(),
            item_rate: self.items.iter().map(|i| i.rate.to_string()).collect(),
            cgst_rate: rates.cgst.to_string(),
            sgst_rate: rates.sgst.to_string(),
            igst_rate: rates.igst.to_string(),
            discount_amount: self.totals.discount_amount.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn sample_draft() -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: "INV-042".to_string(),
            invoice_date: "2024-03-15".to_string(),
            billed_to_name: "Sharma Traders".to_string(),
            billed_to_state: "Maharashtra".to_string(),
            billed_to_state_code: "27".to_string(),
            item_description: vec!["Cement bags".to_string(), "Sand".to_string()],
            item_hsn: vec!["2523".to_string(), String::new()],
            item_quantity: vec!["10".to_string(), "2".to_string()],
            item_uom: vec!["Bag".to_string(), "Ton".to_string()],
            item_rate: vec!["350".to_string(), "1200".to_string()],
            cgst_rate: "9".to_string(),
            sgst_rate: "9".to_string(),
            discount_amount: "100".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tax_mode_selection() {
        assert_eq!(GstRates::intra_state(9.0, 9.0).tax_mode(), TaxMode::IntraState);
        assert_eq!(GstRates::inter_state(18.0).tax_mode(), TaxMode::InterState);
        assert_eq!(GstRates::default().tax_mode(), TaxMode::Exempt);

        // Only one of the CGST/SGST pair set: falls through to IGST
        let rates = GstRates {
            cgst: 9.0,
            sgst: 0.0,
            igst: 18.0,
        };
        assert_eq!(rates.tax_mode(), TaxMode::InterState);

        // Both pairs set: CGST/SGST win
        let rates = GstRates {
            cgst: 9.0,
            sgst: 9.0,
            igst: 18.0,
        };
        assert_eq!(rates.tax_mode(), TaxMode::IntraState);
    }

    #[test]
    fn test_line_item_amount() {
        let item = LineItem::new("Bolts", 2.5, 40.0)
            .with_hsn("7318")
            .with_uom("Kg")
            .with_rates(GstRates::intra_state(6.0, 6.0));

        assert_eq!(item.amount(), 100.0);
        assert_eq!(item.rates(), GstRates::intra_state(6.0, 6.0));
        assert_eq!(item.uom, "Kg");
    }

    #[test]
    fn test_invoice_from_draft() {
        let invoice = Invoice::from_draft(&sample_draft()).unwrap();

        assert_eq!(invoice.invoice_number(), "INV-042");
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[1].hsn_code, "");
        assert_eq!(invoice.totals.subtotal, 5900.0);
        assert_eq!(invoice.totals.discounted_subtotal, 5800.0);
        assert_eq!(invoice.totals.cgst_total, 522.0);
        assert_eq!(invoice.totals.sgst_total, 522.0);
        assert_eq!(invoice.totals.final_total, 6844);
        assert_eq!(invoice.pdf_file_name(), "INV-042_2024-03-15.pdf");
    }

    #[test]
    fn test_invoice_from_draft_without_items() {
        let draft = InvoiceDraft {
            invoice_number: "INV-1".to_string(),
            ..Default::default()
        };

        let err = Invoice::from_draft(&draft).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::NoItems)));
    }

    #[test]
    fn test_lenient_invoice_level_fields() {
        let mut draft = sample_draft();
        draft.cgst_rate = "nine".to_string();
        draft.discount_amount = "ten".to_string();

        assert_eq!(draft.gst_rates().cgst, 0.0);
        assert_eq!(draft.discount(), 0.0);

        // CGST alone is zero, so the invoice is tax exempt
        let invoice = Invoice::from_draft(&draft).unwrap();
        assert_eq!(invoice.totals.tax_mode, TaxMode::Exempt);
        assert_eq!(invoice.totals.final_total, 5900);
    }

    #[test]
    fn test_revise_keeps_identity() {
        let original = Invoice::from_draft(&sample_draft()).unwrap();

        let mut draft = original.to_draft();
        draft.item_quantity[0] = "20".to_string();

        let revised = original.revise(&draft).unwrap();
        assert_eq!(revised.id, original.id);
        assert_eq!(revised.created_at, original.created_at);
        assert_eq!(revised.totals.subtotal, 9400.0);
        assert!(revised.updated_at >= original.updated_at);
    }

    #[test]
    fn test_revise_rejects_renumbering() {
        let original = Invoice::from_draft(&sample_draft()).unwrap();

        let mut draft = original.to_draft();
        draft.invoice_number = "INV-043".to_string();

        let err = original.revise(&draft).unwrap_err();
        assert!(matches!(err, CoreError::InvoiceNumberChanged { .. }));
    }

    #[test]
    fn test_to_draft_round_trips_totals() {
        let original = Invoice::from_draft(&sample_draft()).unwrap();
        let again = Invoice::from_draft(&original.to_draft()).unwrap();

        assert_eq!(again.header, original.header);
        assert_eq!(again.items, original.items);
        assert_eq!(again.totals, original.totals);
    }

    #[test]
    fn test_pdf_file_name_without_date() {
        let header = InvoiceHeader {
            invoice_number: "INV-7".to_string(),
            ..Default::default()
        };
        let invoice = Invoice::new(header, vec![LineItem::new("Pipe", 1.0, 10.0)], 0.0);
        assert_eq!(invoice.pdf_file_name(), "INV-7_.pdf");
    }

    #[test]
    fn test_draft_from_partial_json() {
        let draft: InvoiceDraft = serde_json::from_str(
            r#"{
                "invoice_number": "INV-9",
                "item_description": ["Cement"],
                "item_quantity": ["10"],
                "item_rate": ["350"],
                "igst_rate": "28"
            }"#,
        )
        .unwrap();

        assert!(draft.billed_to_name.is_empty());
        let invoice = Invoice::from_draft(&draft).unwrap();
        assert_eq!(invoice.totals.igst_total, 980.0);
        assert_eq!(invoice.totals.final_total, 4480);
        assert_eq!(invoice.totals.tax_mode, TaxMode::InterState);
    }

    #[test]
    fn test_tax_mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaxMode::IntraState).unwrap(),
            "\"intra_state\""
        );
    }
}
