//! Money parsing, formatting and rounding using rust_decimal for precision
//!
//! Canonical monetary form is a point-decimal number rounded to 2 places;
//! display form uses the locale comma separator (`1.234,56`). All arithmetic
//! is done on `Decimal` internally, then converted back to `f64` at the
//! boundary.

use rust_decimal::prelude::*;
use shared::{LedgerError, LedgerResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Non-finite inputs are rejected at the parse boundary; if one somehow
/// reaches here, logs an error and returns ZERO instead of corrupting a
/// monetary calculation.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places half-up
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: a Decimal rounded to 2dp is always within f64 range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Round a monetary value to 2 decimal places, half-up
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Parse a display-form decimal string into canonical form
///
/// Display form uses `.` as thousands separator and `,` as decimal
/// separator. Empty or unparseable input is an `InvalidNumber` error.
pub fn to_canonical(display: &str) -> LedgerResult<f64> {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidNumber(display.to_string()));
    }

    let canonical: String = trimmed
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value: f64 = canonical
        .parse()
        .map_err(|_| LedgerError::InvalidNumber(display.to_string()))?;

    if !value.is_finite() {
        return Err(LedgerError::InvalidNumber(display.to_string()));
    }

    Ok(value)
}

/// Convert a canonical decimal string to display form
///
/// Only the separator changes; rounding is the caller's responsibility,
/// performed before formatting.
pub fn to_display(canonical: &str) -> String {
    canonical.replace('.', ",")
}

/// Format a canonical value for display: 2 decimals, comma separator
pub fn format_display(value: f64) -> String {
    to_display(&format!("{:.2}", round2(value)))
}

/// Format a value as currency the way the register shows it
pub fn format_brl(value: f64) -> String {
    format!("R$ {}", format_display(value))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests;
