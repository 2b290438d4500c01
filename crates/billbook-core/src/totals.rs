//! # Totals Engine
//!
//! Turns line items and a flat discount into the reconciled figures printed
//! at the foot of a GST invoice.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► line amounts (qty × rate) ──► subtotal                       │
//! │                                             │                           │
//! │                                             ▼  − discount, floor at 0   │
//! │                                     discounted_subtotal                 │
//! │                                             │                           │
//! │            first item's rates ──► tax mode  ▼                           │
//! │                          CGST + SGST   OR   IGST   OR   none            │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                        grand_total                      │
//! │                                             │  truncate toward zero     │
//! │                                             ▼                           │
//! │                           final_total (+ round_off, amount_in_words)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Floating Point
//! Figures are `f64` rupees. The payable total is *truncated*, not rounded:
//! ₹1180.99 is payable as ₹1180 with a round-off of −0.99.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{LineItem, TaxMode};
use crate::words::amount_in_words;

// =============================================================================
// Invoice Totals
// =============================================================================

/// The computed summary of an invoice. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    /// Per-item `quantity × rate`, parallel to the item list.
    pub line_amounts: Vec<f64>,

    /// Sum of `line_amounts`.
    pub subtotal: f64,

    /// Which taxes the first item's rates selected. Stays set when a
    /// discount zeroes the taxable base.
    #[serde(default)]
    pub tax_mode: TaxMode,

    /// Flat discount as supplied by the caller.
    pub discount_amount: f64,

    /// `subtotal - discount_amount`, never below zero.
    pub discounted_subtotal: f64,

    pub cgst_total: f64,
    pub sgst_total: f64,
    pub igst_total: f64,

    /// Taxable value plus all taxes.
    pub grand_total: f64,

    /// `final_total - grand_total`, always in `(-1, 0]`.
    pub round_off: f64,

    /// Whole rupees payable: `grand_total` truncated toward zero.
    pub final_total: u64,

    /// `final_total` in words, e.g. "One Thousand One Hundred Eighty Rupees Only".
    pub amount_in_words: String,
}

impl InvoiceTotals {
    /// Sum of all tax components.
    #[inline]
    pub fn tax_total(&self) -> f64 {
        self.cgst_total + self.sgst_total + self.igst_total
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Computes invoice totals.
///
/// Tax treatment is decided once, from the **first** item's rates; all
/// items on one invoice are assumed to share them. Use
/// [`validate_uniform_tax_rates`](crate::validation::validate_uniform_tax_rates)
/// upstream if that cannot be guaranteed.
///
/// The items are only read. Their amounts come back in
/// [`InvoiceTotals::line_amounts`]. An empty item list yields all-zero
/// figures and `"Zero"` whatever the discount.
///
/// ## Example
/// ```rust
/// use billbook_core::{compute_totals, GstRates, LineItem};
///
/// let items = vec![LineItem::new("Widget", 2.0, 500.0)
///     .with_rates(GstRates::intra_state(9.0, 9.0))];
///
/// let totals = compute_totals(&items, 0.0);
/// assert_eq!(totals.subtotal, 1000.0);
/// assert_eq!(totals.cgst_total, 90.0);
/// assert_eq!(totals.sgst_total, 90.0);
/// assert_eq!(totals.final_total, 1180);
/// assert_eq!(totals.amount_in_words, "One Thousand One Hundred Eighty Rupees Only");
/// ```
pub fn compute_totals(items: &[LineItem], discount_amount: f64) -> InvoiceTotals {
    let Some(first) = items.first() else {
        return InvoiceTotals {
            discount_amount,
            amount_in_words: amount_in_words(0),
            ..InvoiceTotals::default()
        };
    };

    let line_amounts: Vec<f64> = items.iter().map(LineItem::amount).collect();
    let subtotal: f64 = line_amounts.iter().sum();

    let discounted_subtotal = (subtotal - discount_amount).max(0.0);

    let rates = first.rates();
    let tax_mode = rates.tax_mode();
    let (cgst_total, sgst_total, igst_total) = match tax_mode {
        TaxMode::IntraState => (
            discounted_subtotal * rates.cgst / 100.0,
            discounted_subtotal * rates.sgst / 100.0,
            0.0,
        ),
        TaxMode::InterState => (0.0, 0.0, discounted_subtotal * rates.igst / 100.0),
        TaxMode::Exempt => (0.0, 0.0, 0.0),
    };

    let grand_total = discounted_subtotal + cgst_total + sgst_total + igst_total;

    // The taxable base is floored at zero and taxes only apply at positive
    // rates, so the grand total is never negative. `as` truncates toward zero.
    let final_total = grand_total.trunc() as u64;
    let round_off = final_total as f64 - grand_total;

    InvoiceTotals {
        line_amounts,
        subtotal,
        tax_mode,
        discount_amount,
        discounted_subtotal,
        cgst_total,
        sgst_total,
        igst_total,
        grand_total,
        round_off,
        final_total,
        amount_in_words: amount_in_words(final_total),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GstRates;

    fn item(quantity: f64, rate: f64, rates: GstRates) -> LineItem {
        LineItem::new("Item", quantity, rate).with_rates(rates)
    }

    #[test]
    fn test_intra_state_scenario() {
        let items = vec![item(2.0, 500.0, GstRates::intra_state(9.0, 9.0))];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.subtotal, 1000.0);
        assert_eq!(totals.cgst_total, 90.0);
        assert_eq!(totals.sgst_total, 90.0);
        assert_eq!(totals.igst_total, 0.0);
        assert_eq!(totals.grand_total, 1180.0);
        assert_eq!(totals.final_total, 1180);
        assert_eq!(totals.round_off, 0.0);
        assert_eq!(
            totals.amount_in_words,
            "One Thousand One Hundred Eighty Rupees Only"
        );
        assert_eq!(totals.tax_mode, TaxMode::IntraState);
    }

    #[test]
    fn test_inter_state_scenario() {
        let items = vec![item(2.0, 500.0, GstRates::inter_state(18.0))];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.igst_total, 180.0);
        assert_eq!(totals.cgst_total, 0.0);
        assert_eq!(totals.sgst_total, 0.0);
        assert_eq!(totals.grand_total, 1180.0);
        assert_eq!(totals.tax_mode, TaxMode::InterState);
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        for discount in [0.0, 50.0, -10.0] {
            let totals = compute_totals(&[], discount);

            assert!(totals.line_amounts.is_empty());
            assert_eq!(totals.subtotal, 0.0);
            assert_eq!(totals.discounted_subtotal, 0.0);
            assert_eq!(totals.grand_total, 0.0);
            assert_eq!(totals.tax_mode, TaxMode::Exempt);
            assert_eq!(totals.cgst_total, 0.0);
            assert_eq!(totals.sgst_total, 0.0);
            assert_eq!(totals.igst_total, 0.0);
            assert_eq!(totals.final_total, 0);
            assert_eq!(totals.amount_in_words, "Zero");
        }
    }

    #[test]
    fn test_full_discount_keeps_intra_state_mode() {
        let items = vec![item(1.0, 100.0, GstRates::intra_state(9.0, 9.0))];

        for discount in [100.0, 250.0] {
            let totals = compute_totals(&items, discount);
            assert_eq!(totals.tax_mode, TaxMode::IntraState);
            assert_eq!(totals.cgst_total, 0.0);
            assert_eq!(totals.sgst_total, 0.0);
            assert_eq!(totals.final_total, 0);
        }
    }

    #[test]
    fn test_line_amounts_match_items() {
        let rates = GstRates::intra_state(2.5, 2.5);
        let items = vec![
            item(3.0, 19.99, rates),
            item(0.5, 120.0, rates),
            item(0.0, 999.0, rates),
            item(7.0, -5.0, rates),
        ];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.line_amounts.len(), items.len());
        for (amount, item) in totals.line_amounts.iter().zip(&items) {
            assert_eq!(*amount, item.quantity * item.rate);
        }
        let sum: f64 = totals.line_amounts.iter().sum();
        assert_eq!(sum, totals.subtotal);
    }

    #[test]
    fn test_discount_clamps_at_zero() {
        let items = vec![item(1.0, 300.0, GstRates::inter_state(18.0))];

        for discount in [300.0, 300.01, 10_000.0] {
            let totals = compute_totals(&items, discount);
            assert_eq!(totals.discounted_subtotal, 0.0);
            assert_eq!(totals.igst_total, 0.0);
            assert_eq!(totals.final_total, 0);
            assert_eq!(totals.amount_in_words, "Zero");
            assert_eq!(totals.discount_amount, discount);
        }

        let totals = compute_totals(&items, 100.0);
        assert_eq!(totals.discounted_subtotal, 200.0);
        assert_eq!(totals.igst_total, 36.0);
    }

    #[test]
    fn test_tax_modes_are_exclusive() {
        let rate_sets = [
            GstRates::intra_state(9.0, 9.0),
            GstRates::inter_state(18.0),
            GstRates {
                cgst: 9.0,
                sgst: 9.0,
                igst: 18.0,
            },
            GstRates {
                cgst: 9.0,
                sgst: 0.0,
                igst: 18.0,
            },
            GstRates::default(),
        ];

        for rates in rate_sets {
            let totals = compute_totals(&[item(4.0, 250.0, rates)], 0.0);
            let pair = totals.cgst_total != 0.0 || totals.sgst_total != 0.0;
            let igst = totals.igst_total != 0.0;
            assert!(!(pair && igst), "{rates:?}");
        }
    }

    #[test]
    fn test_only_first_item_rates_are_read() {
        // Second item claims IGST, but the first item decides the mode.
        let items = vec![
            item(1.0, 100.0, GstRates::intra_state(9.0, 9.0)),
            item(1.0, 100.0, GstRates::inter_state(28.0)),
        ];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.cgst_total, 18.0);
        assert_eq!(totals.sgst_total, 18.0);
        assert_eq!(totals.igst_total, 0.0);

        // And an exempt first item makes the whole invoice exempt.
        let items = vec![
            item(1.0, 100.0, GstRates::default()),
            item(1.0, 100.0, GstRates::inter_state(18.0)),
        ];
        let totals = compute_totals(&items, 0.0);
        assert_eq!(totals.tax_total(), 0.0);
        assert_eq!(totals.final_total, 200);
    }

    #[test]
    fn test_truncation_not_rounding() {
        // 999.99 + 18% = 1179.9882 → 1179, not 1180
        let items = vec![item(1.0, 999.99, GstRates::inter_state(18.0))];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.final_total, 1179);
        assert!(totals.round_off < 0.0 && totals.round_off > -1.0);
        assert_eq!(
            totals.amount_in_words,
            "One Thousand One Hundred Seventy Nine Rupees Only"
        );
    }

    #[test]
    fn test_round_off_bounds() {
        let rates = GstRates::intra_state(6.0, 6.0);
        for (quantity, rate) in [(1.0, 0.4), (3.0, 33.33), (7.0, 14.29), (2.5, 81.7), (11.0, 9.09)] {
            let totals = compute_totals(&[item(quantity, rate, rates)], 1.5);

            let final_total = totals.final_total as f64;
            assert!(final_total <= totals.grand_total);
            assert!(totals.grand_total < final_total + 1.0);
            assert!(totals.round_off > -1.0 && totals.round_off <= 0.0);
            assert_eq!(totals.round_off, final_total - totals.grand_total);
        }
    }

    #[test]
    fn test_negative_rates_are_ignored() {
        let items = vec![item(1.0, 100.0, GstRates::intra_state(-9.0, -9.0))];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.tax_mode, TaxMode::Exempt);
        assert_eq!(totals.final_total, 100);
    }

    #[test]
    fn test_items_are_not_modified() {
        let items = vec![item(2.0, 500.0, GstRates::intra_state(9.0, 9.0))];
        let before = items.clone();
        let _ = compute_totals(&items, 0.0);
        assert_eq!(items, before);
    }
}
