//! Human-readable amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Thousands separator used in replies.
pub const THOUSANDS_SEPARATOR: char = '’';

/// Format an amount for display.
///
/// Whole values print without decimals; others are rounded to two places
/// with trailing zeros dropped. Thousands are grouped with
/// [`THOUSANDS_SEPARATOR`].
///
/// ```
/// use ledgerbot_core::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1234567)), "1’234’567");
/// assert_eq!(format_amount(dec!(-1234.567)), "-1’234.57");
/// assert_eq!(format_amount(dec!(0.10)), "0.1");
/// ```
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let n = digits.len();
    if n <= 3 {
        return digits.to_string();
    }
    let first = match n % 3 {
        0 => 3,
        r => r,
    };

    let mut out = String::with_capacity(n + n / 3 * THOUSANDS_SEPARATOR.len_utf8());
    out.push_str(&digits[..first]);
    let mut i = first;
    while i < n {
        out.push(THOUSANDS_SEPARATOR);
        out.push_str(&digits[i..i + 3]);
        i += 3;
    }
    out
}
