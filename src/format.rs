//! Money formatting and quantity parsing.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as dollars with two decimals, e.g. `$29.97`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Parse user quantity text into a positive whole number.
///
/// Numeric text is floored (`"2.9"` is 2). Empty, non-numeric, non-finite or
/// non-positive input gives `None`. Values past `u32::MAX` saturate.
pub fn parse_quantity(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let n: f64 = trimmed.parse().ok()?;
    if !n.is_finite() {
        return None;
    }

    let floored = n.floor();
    if floored < 1.0 {
        return None;
    }
    // Oversized input still has to fail the stock check, not read as zero.
    Some(floored.min(f64::from(u32::MAX)) as u32)
}
