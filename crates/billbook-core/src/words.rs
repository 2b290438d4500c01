//! # Amount in Words
//!
//! Transcribes a whole-rupee amount into the legal words form printed on
//! the invoice, using the Indian numbering system.
//!
//! ## Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  12,34,56,789                                                           │
//! │   │   │  │  └── 789  → "Seven Hundred Eighty Nine"                      │
//! │   │   │  └───── 56   → "Fifty Six Thousand"                             │
//! │   │   └──────── 34   → "Thirty Four Lakh"                               │
//! │   └──────────── 12   → "Twelve Crore"                                   │
//! │                                                                         │
//! │  "Twelve Crore Thirty Four Lakh Fifty Six Thousand                      │
//! │   Seven Hundred Eighty Nine Rupees Only"                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Paise are not transcribed: the payable total is already truncated to
//! whole rupees by the totals engine.

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

pub const CRORE: u64 = 10_000_000;
pub const LAKH: u64 = 100_000;
pub const THOUSAND: u64 = 1_000;

/// Fixed suffix appended to every non-zero transcription.
pub const CURRENCY_SUFFIX: &str = " Rupees Only";

/// Transcribes `amount` into Indian-numbering words followed by
/// `" Rupees Only"`.
///
/// Zero is the one special case: it yields the bare word `"Zero"`.
///
/// ## Example
/// ```rust
/// use billbook_core::words::amount_in_words;
///
/// assert_eq!(amount_in_words(0), "Zero");
/// assert_eq!(amount_in_words(1500), "One Thousand Five Hundred Rupees Only");
/// assert_eq!(amount_in_words(100_000), "One Lakh Rupees Only");
/// ```
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut words = Vec::new();
    spell_groups(amount, &mut words);

    let mut out = words.join(" ");
    out.push_str(CURRENCY_SUFFIX);
    out
}

/// Collects the words for a non-zero amount, without the currency suffix.
fn spell_groups(mut n: u64, words: &mut Vec<&'static str>) {
    if n >= CRORE {
        let crores = n / CRORE;
        // Past 999 crore the quotient is itself grouped ("One Thousand Crore").
        if crores > 999 {
            spell_groups(crores, words);
        } else {
            push_hundreds(words, crores);
        }
        words.push("Crore");
        n %= CRORE;
    }

    for (size, label) in [(LAKH, "Lakh"), (THOUSAND, "Thousand")] {
        if n >= size {
            push_hundreds(words, n / size);
            words.push(label);
            n %= size;
        }
    }

    if n > 0 {
        push_hundreds(words, n);
    }
}

/// Pushes the words for a value in `0..=999`.
fn push_hundreds(words: &mut Vec<&'static str>, mut n: u64) {
    debug_assert!(n < 1000);

    if n > 99 {
        words.push(ONES[(n / 100) as usize]);
        words.push("Hundred");
        n %= 100;
    }

    if n > 19 {
        words.push(TENS[(n / 10) as usize]);
        n %= 10;
    } else if n > 9 {
        // The ones digit is absorbed by the teen word.
        words.push(TEENS[(n - 10) as usize]);
        return;
    }

    if n > 0 {
        words.push(ONES[n as usize]);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
