//! Colón amount formatting and lenient parsing.
//!
//! Amounts are whole colones. Formatting follows the `es-CR` display
//! convention (`₡` symbol, no-break space as the thousands separator, no
//! decimals); parsing is deliberately forgiving so that anything a user
//! can type into an amount box maps to a number.

/// Currency symbol for the Costa Rican colón.
pub const CRC_SYMBOL: char = '₡';

/// Thousands separator used by the `es-CR` locale (U+00A0).
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Placeholder shown in preview slots that have no value yet.
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Formats a whole-colón amount, e.g. `1000000` → `₡1 000 000`.
pub fn format_crc(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2 + 2);
    out.push(CRC_SYMBOL);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Parses an amount typed by the user.
///
/// Every character that is not an ASCII digit is dropped, so currency
/// symbols, separators and stray letters are ignored. Empty input is 0.
/// Digit strings too large for `u64` saturate at `u64::MAX`.
pub fn parse_crc(text: &str) -> u64 {
    text.chars()
        .filter(char::is_ascii_digit)
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c as u8 - b'0'))
        })
}

/// Returns the trimmed value, or [`EMPTY_PLACEHOLDER`] when blank.
pub fn preview_text(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}
