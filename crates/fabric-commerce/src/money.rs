//! Monetary rounding and display.
//!
//! Prices are plain `f64` amounts in Canadian dollars. Display prices are
//! rounded to cents once, at derivation time; sums over cart lines are left
//! unrounded until they are formatted.
//!
//! Rounding works on the exact decimal value of the `f64`, not on
//! `amount * 100.0`: `2.255` is stored as `2.25499999...` and rounds down.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round the exact value of `amount` to cents, half away from zero.
///
/// `None` for NaN, infinities and magnitudes `Decimal` can't hold.
fn to_cents(amount: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(amount)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Round to 2 decimal places, half away from zero.
///
/// NaN, infinities and out-of-range magnitudes pass through unchanged.
pub fn round2(amount: f64) -> f64 {
    to_cents(amount)
        .and_then(|cents| cents.to_string().parse().ok())
        .unwrap_or(amount)
}

/// Format an amount as Canadian dollars, e.g. `$1,234.56` or `-$1.50`.
///
/// Negative amounts keep their sign even when they round to zero.
pub fn format_price(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount < 0.0 { "-$∞" } else { "$∞" }.to_string();
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let Some(mut cents) = to_cents(amount.abs()) else {
        return format!("{}${:.2}", sign, amount.abs());
    };
    cents.rescale(2);

    let text = cents.to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
