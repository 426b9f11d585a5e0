//! Currency input normalization and formatting.
//!
//! Converts between the raw text of a currency field, the canonical display
//! string (`"R$ 1.234,56"`) and the exact [`Money`] value behind it. The
//! digits a user types are read as minor units: typing `12345` shows
//! `R$ 123,45`.
//!
//! Keystroke normalization never fails; malformed partial input collapses to
//! the nearest valid display string (or clears the field). Parse errors exist
//! only at submission and query time.

use shared::Money;
use thiserror::Error;

/// Keystrokes beyond this many digits are ignored.
pub const MAX_AMOUNT_DIGITS: usize = 10;

const SYMBOL: &str = "R$";

/// A display string that could not be read back as a monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid monetary amount: {input:?}")]
pub struct InvalidAmount {
    pub input: String,
}

/// The live text of a currency form field.
///
/// Created empty and mutated only through [`MoneyInput::apply_keystrokes`];
/// the held string is always either empty or a canonical display string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyInput {
    display: String,
}

impl MoneyInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the field content with the normalized form of `raw`.
    ///
    /// `raw` is the full text of the field after the user's edit, which
    /// includes whatever formatted display was already there.
    pub fn apply_keystrokes(&mut self, raw: &str) {
        self.display = normalize_keystrokes(raw, MAX_AMOUNT_DIGITS);
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    pub fn amount(&self) -> Result<Money, InvalidAmount> {
        parse_display(&self.display)
    }

    pub fn is_positive(&self) -> bool {
        is_positive_amount(&self.display)
    }
}

/// Normalize one edit of a currency field into a display string.
///
/// Every non-digit character of `raw` is dropped; what remains is read as a
/// minor-unit digit stream. An empty stream clears the field. Only the first
/// `max_digits` digits are kept, so excess keystrokes at the end are ignored.
pub fn normalize_keystrokes(raw: &str, max_digits: usize) -> String {
    // 18 digits is the most that fits in i64 cents.
    let max_digits = max_digits.min(18);
    let digits: Vec<u8> = raw
        .bytes()
        .filter(u8::is_ascii_digit)
        .take(max_digits)
        .collect();
    if digits.is_empty() {
        return String::new();
    }
    let cents = digits
        .iter()
        .fold(0i64, |acc, d| acc * 10 + i64::from(d - b'0'));
    format(Money::from_cents(cents))
}

/// Render an amount in the canonical display form: symbol, thousands
/// grouping, comma decimal separator, exactly two fraction digits.
///
/// Zero renders as `"R$ 0,00"`, never as an empty string. Negative values
/// (overdrawn balances) get a leading minus sign.
pub fn format(amount: Money) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{}{} {},{:02}",
        sign,
        SYMBOL,
        group_thousands(abs / 100),
        abs % 100
    )
}

/// Read a display string back into an exact amount.
///
/// Strips the currency symbol, whitespace and grouping separators, maps the
/// decimal comma to a radix point, and parses the rest as a non-negative
/// fixed-point number with at most two fraction digits.
pub fn parse_display(display: &str) -> Result<Money, InvalidAmount> {
    let invalid = || InvalidAmount {
        input: display.to_string(),
    };

    let mut cleaned = String::with_capacity(display.len());
    for ch in display.chars() {
        match ch {
            'R' | '$' | '.' => {}
            ',' => cleaned.push('.'),
            c if c.is_whitespace() => {}
            c => cleaned.push(c),
        }
    }
    if cleaned.is_empty() {
        return Err(invalid());
    }

    let (whole, frac) = match cleaned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > 2 {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let mut frac_cents: i64 = if frac.is_empty() {
        0
    } else {
        frac.parse().map_err(|_| invalid())?
    };
    if frac.len() == 1 {
        frac_cents *= 10;
    }

    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac_cents))
        .map(Money::from_cents)
        .ok_or_else(invalid)
}

/// True iff `display` parses and is strictly greater than zero.
///
/// Zero and malformed amounts are both rejected: a transfer of zero value is
/// never valid.
pub fn is_positive_amount(display: &str) -> bool {
    parse_display(display).map_or(false, Money::is_positive)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
