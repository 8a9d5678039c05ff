//! Fixed it-IT / EUR currency formatting.
//!
//! Presentation-side contract: the core emits plain numeric values; this
//! renders them with zero decimals, `.` as thousands separator, and a
//! trailing non-breaking space + euro sign (`50.000 €`).

/// Formats an amount as a zero-decimal euro string in the Italian convention.
pub fn format_currency_eur(value: f64) -> String {
    // Core guarantees finite non-negative values; clamp anyway so a stray
    // caller cannot produce garbage output.
    let amount = if value.is_finite() && value > 0.0 {
        value.round() as i64
    } else {
        0
    };

    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped.push('\u{a0}');
    grouped.push('€');
    grouped
}
