//! # Validation Module
//!
//! Turns raw invoice form text into validated domain values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Intake Rules                                       │
//! │                                                                         │
//! │  Strict (reject the submission, name the row):                         │
//! │  ├── invoice number: required, ≤ 50 chars, A-Z a-z 0-9 - _ /           │
//! │  ├── dates: blank or YYYY-MM-DD                                        │
//! │  ├── GSTIN: blank or 15 uppercase letters/digits                       │
//! │  ├── item quantity / rate: blank = 0, otherwise a finite number        │
//! │  ├── item quantity ≥ 0, item tax rates within 0..=100                  │
//! │  └── at least one row with a description                               │
//! │                                                                         │
//! │  Lenient (fall back to 0, never reject):                               │
//! │  └── CGST / SGST / IGST rates and discount amount                      │
//! │                                                                         │
//! │  The totals engine runs only on values that passed this layer.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billbook_core::validation::{parse_amount, validate_invoice_number};
//!
//! assert_eq!(parse_amount("quantity", " 2.5 ").unwrap(), 2.5);
//! assert_eq!(parse_amount("quantity", "").unwrap(), 0.0);
//! assert!(parse_amount("quantity", "two").is_err());
//!
//! assert!(validate_invoice_number("INV/2024/001").is_ok());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{BilledTo, InvoiceDraft, InvoiceHeader, LineItem};
use crate::{MAX_INVOICE_NUMBER_LEN, MAX_TAX_RATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parses a numeric form field.
///
/// Blank text is zero. Anything else must parse as a finite `f64`.
pub fn parse_amount(field: &str, text: &str) -> ValidationResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        }),
    }
}

/// Parses an invoice-level rate or discount, treating bad input as zero.
pub fn parse_or_zero(text: &str) -> f64 {
    parse_amount("", text).unwrap_or(0.0)
}

/// Names the invoice-level fields of `draft` whose text is not a number
/// and will therefore be read as zero.
///
/// Lets a caller warn about the fallback without rejecting the draft.
pub fn lenient_fields_ignored(draft: &InvoiceDraft) -> Vec<&'static str> {
    [
        ("cgst_rate", &draft.cgst_rate),
        ("sgst_rate", &draft.sgst_rate),
        ("igst_rate", &draft.igst_rate),
        ("discount_amount", &draft.discount_amount),
    ]
    .into_iter()
    .filter(|(field, text)| parse_amount(field, text).is_err())
    .map(|(field, _)| field)
    .collect()
}

// =============================================================================
// Line Items
// =============================================================================

/// Builds line items from the parallel item columns of a draft.
///
/// ## Rules
/// - Rows with a blank description are skipped
/// - Columns shorter than the description list read as blank
/// - A malformed quantity or rate rejects the draft, naming the 1-based row
/// - Each item must pass [`validate_line_item`] (non-negative quantity, tax
///   rates within 0..=100), again naming the row
/// - Every item carries the draft's invoice-level GST rates
/// - Zero remaining items is an error
///
/// ## Example
/// ```rust
/// use billbook_core::InvoiceDraft;
/// use billbook_core::validation::line_items_from_draft;
///
/// let draft = InvoiceDraft {
///     item_description: vec!["Tiles".into(), "".into()],
///     item_quantity: vec!["12".into(), "1".into()],
///     item_rate: vec!["45.5".into(), "10".into()],
///     igst_rate: "18".into(),
///     ..Default::default()
/// };
///
/// let items = line_items_from_draft(&draft).unwrap();
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].igst_rate, 18.0);
/// ```
pub fn line_items_from_draft(draft: &InvoiceDraft) -> ValidationResult<Vec<LineItem>> {
    let rates = draft.gst_rates();
    let cell = |column: &[String], row: usize| -> String {
        column.get(row).map(|s| s.trim().to_string()).unwrap_or_default()
    };

    let mut items = Vec::new();
    for (row, description) in draft.item_description.iter().enumerate() {
        let description = description.trim();
        if description.is_empty() {
            continue;
        }

        let item_number = row + 1;
        let number = |field: &str, text: String| {
            parse_amount(field, &text).map_err(|_| ValidationError::InvalidItemNumber {
                item: item_number,
                field: field.to_string(),
                value: text,
            })
        };

        let quantity = number("quantity", cell(&draft.item_quantity, row))?;
        let rate = number("rate", cell(&draft.item_rate, row))?;

        let item = LineItem::new(description, quantity, rate)
            .with_hsn(cell(&draft.item_hsn, row))
            .with_uom(cell(&draft.item_uom, row))
            .with_rates(rates);
        validate_line_item(&item).map_err(|reason| ValidationError::InvalidItem {
            item: item_number,
            reason: Box::new(reason),
        })?;
        items.push(item);
    }

    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    Ok(items)
}

/// Checks a single item against the domain rules.
///
/// ## Rules
/// - Description must not be blank
/// - Quantity must be finite and non-negative
/// - Rate must be finite (negative rates are allowed, e.g. credit lines)
/// - Each tax rate must be within 0..=100 percent
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    if item.description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if !item.quantity.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: "quantity".to_string(),
            value: item.quantity.to_string(),
        });
    }
    if item.quantity < 0.0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if !item.rate.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: "rate".to_string(),
            value: item.rate.to_string(),
        });
    }

    for (field, value) in [
        ("cgst_rate", item.cgst_rate),
        ("sgst_rate", item.sgst_rate),
        ("igst_rate", item.igst_rate),
    ] {
        if !(0.0..=MAX_TAX_RATE).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0.0,
                max: MAX_TAX_RATE,
            });
        }
    }

    Ok(())
}

/// Rejects item lists whose tax rates differ from the first item's.
///
/// The totals engine reads only the first item's rates. Callers that accept
/// per-item rates can run this first instead of silently taxing every line
/// at the first line's rates.
pub fn validate_uniform_tax_rates(items: &[LineItem]) -> ValidationResult<()> {
    let Some(first) = items.first() else {
        return Ok(());
    };

    let expected = first.rates();
    match items.iter().position(|item| item.rates() != expected) {
        Some(index) => Err(ValidationError::MixedTaxRates { item: index + 1 }),
        None => Ok(()),
    }
}

// =============================================================================
// Header Fields
// =============================================================================

/// Validates an invoice number.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, `-`, `_` and `/` only
pub fn validate_invoice_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "invoice_number".to_string(),
        });
    }

    if number.chars().count() > MAX_INVOICE_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "invoice_number".to_string(),
            max: MAX_INVOICE_NUMBER_LEN,
        });
    }

    if !number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "invoice_number".to_string(),
            reason: "must contain only letters, numbers, '-', '_' and '/'".to_string(),
        });
    }

    Ok(())
}

/// Validates a GSTIN. Blank is allowed (unregistered buyer).
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let gstin = gstin.trim();
    if gstin.is_empty() {
        return Ok(());
    }

    let well_formed = gstin.len() == 15
        && gstin
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: "must be 15 uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Parses an optional `YYYY-MM-DD` date field.
pub fn parse_date(field: &str, text: &str) -> ValidationResult<Option<NaiveDate>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{text}' is not a YYYY-MM-DD date"),
        })
}

/// Builds the validated header of a draft.
pub fn header_from_draft(draft: &InvoiceDraft) -> ValidationResult<InvoiceHeader> {
    validate_invoice_number(&draft.invoice_number)?;
    validate_gstin(&draft.billed_to_gstin)?;

    Ok(InvoiceHeader {
        invoice_number: draft.invoice_number.trim().to_string(),
        invoice_date: parse_date("invoice_date", &draft.invoice_date)?,
        date_of_supply: parse_date("date_of_supply", &draft.date_of_supply)?,
        vehicle_no: draft.vehicle_no.trim().to_string(),
        gr_rr_no: draft.gr_rr_no.trim().to_string(),
        electronic_ref_no: draft.electronic_ref_no.trim().to_string(),
        billed_to: BilledTo {
            name: draft.billed_to_name.trim().to_string(),
            place_of_supply: draft.billed_to_address.trim().to_string(),
            state: draft.billed_to_state.trim().to_string(),
            state_code: draft.billed_to_state_code.trim().to_string(),
            gstin: draft.billed_to_gstin.trim().to_string(),
        },
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
