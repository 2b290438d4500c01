//! # Money Display
//!
//! Rupee amounts as they appear on a printed invoice.
//!
//! ## Indian Digit Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Western:   1,234,567.50                                                │
//! │  Indian:   12,34,567.50   ← last three digits, then groups of two      │
//! │                                                                         │
//! │  12,34,567 = 12 lakh 34 thousand 567 (matches the words form)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts stay `f64` everywhere in the engine; this type only formats.

use std::fmt;

/// Display wrapper for a rupee amount.
///
/// ## Example
/// ```rust
/// use billbook_core::money::Rupees;
///
/// assert_eq!(Rupees(1180.0).to_string(), "₹1,180.00");
/// assert_eq!(Rupees(1234567.5).to_string(), "₹12,34,567.50");
/// assert_eq!(Rupees(-0.99).to_string(), "-₹0.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Rupees(pub f64);

impl Rupees {
    /// The amount without the currency sign, e.g. `"12,34,567.50"`.
    pub fn grouped(&self) -> String {
        let fixed = format!("{:.2}", self.0.abs());
        let (whole, paise) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{}.{}", group_indian(whole), paise)
    }

    /// True when the amount would print with a leading minus.
    ///
    /// Values that round to zero at two decimals print unsigned.
    fn prints_negative(&self) -> bool {
        self.0 < 0.0 && format!("{:.2}", self.0.abs()) != "0.00"
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.prints_negative() { "-" } else { "" };
        write!(f, "{}₹{}", sign, self.grouped())
    }
}

impl From<f64> for Rupees {
    fn from(amount: f64) -> Self {
        Rupees(amount)
    }
}

impl From<u64> for Rupees {
    fn from(amount: u64) -> Self {
        Rupees(amount as f64)
    }
}

/// Inserts Indian-style separators into a run of ASCII digits.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(Rupees(0.0).to_string(), "₹0.00");
        assert_eq!(Rupees(7.5).to_string(), "₹7.50");
        assert_eq!(Rupees(999.999).to_string(), "₹1,000.00");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(Rupees(1180.0).grouped(), "1,180.00");
        assert_eq!(Rupees(100000.0).grouped(), "1,00,000.00");
        assert_eq!(Rupees(10000000.0).grouped(), "1,00,00,000.00");
        assert_eq!(Rupees(123456789.12).grouped(), "12,34,56,789.12");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(Rupees(-0.99).to_string(), "-₹0.99");
        assert_eq!(Rupees(-150000.0).to_string(), "-₹1,50,000.00");
        // A round-off that vanishes at two decimals prints unsigned
        assert_eq!(Rupees(-0.001).to_string(), "₹0.00");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Rupees::from(1180_u64), Rupees(1180.0));
        assert_eq!(Rupees::from(2.5), Rupees(2.5));
    }
}
