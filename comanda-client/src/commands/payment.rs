//! Payment calculator
//!
//! Evaluates one tender attempt against a command's remaining balance.
//! Only cash may produce change; electronic methods must tender at most the
//! remaining balance. Overpayment in cash is channeled into change, never
//! into the paid total.

use crate::money::{to_canonical, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::command::{LineItem, PaymentMethod};
use shared::{LedgerError, LedgerResult};

/// Result of evaluating a tender attempt
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentDecision {
    /// Remaining balance is already zero; informational, nothing to apply
    NothingToPay,
    /// Tender accepted
    Approved {
        /// Amount settled against the balance: `min(tendered, remaining)`
        amount_to_apply: f64,
        /// Change due back, zero for non-cash methods
        change: f64,
    },
}

/// Remaining balance: `max(0, round2(total - total_paid))`
///
/// Pure and idempotent; never negative, even when `total_paid` has drifted
/// above `total`.
pub fn compute_remaining(total: f64, total_paid: f64) -> f64 {
    let remaining = to_decimal(total) - to_decimal(total_paid);
    to_f64(remaining.max(Decimal::ZERO))
}

/// Total for one line: `round2(amount * unit_price)`
///
/// `amount` is a unit count for regular items and a weight for the weighed
/// category, so the product is rounded, never the inputs.
pub fn line_total(item: &LineItem) -> f64 {
    to_f64(to_decimal(item.amount) * to_decimal(item.unit_price))
}

/// Sum of line totals over a batch, each line rounded first
pub fn batch_total(items: &[LineItem]) -> f64 {
    let sum = items
        .iter()
        .map(|item| to_decimal(line_total(item)))
        .sum::<Decimal>();
    to_f64(sum)
}

/// Change due for an already-parsed tendered amount
///
/// Non-cash methods are assumed exact: tendering more than the remaining
/// balance is an immediate `OverpaymentNotAllowed`.
pub fn compute_change(tendered: f64, remaining: f64, method: PaymentMethod) -> LedgerResult<f64> {
    let tendered = to_decimal(tendered);
    let remaining = to_decimal(remaining);

    if tendered <= remaining {
        return Ok(0.0);
    }
    if !method.is_cash() {
        return Err(LedgerError::OverpaymentNotAllowed);
    }
    Ok(to_f64(tendered - remaining))
}

/// Evaluate a payment attempt, first failure wins:
///
/// 1. nothing left to pay (informational outcome, not an error)
/// 2. tendered amount missing
/// 3. tendered amount unparseable or non-positive
/// 4. non-cash overpayment
pub fn evaluate_payment(
    remaining: f64,
    tendered_raw: &str,
    method: PaymentMethod,
) -> LedgerResult<PaymentDecision> {
    if remaining == 0.0 {
        return Ok(PaymentDecision::NothingToPay);
    }

    if tendered_raw.trim().is_empty() {
        return Err(LedgerError::MissingAmount);
    }

    let tendered = to_canonical(tendered_raw)?;
    if tendered <= 0.0 {
        return Err(LedgerError::InvalidNumber(tendered_raw.to_string()));
    }

    let change = compute_change(tendered, remaining, method)?;
    let amount_to_apply = to_f64(to_decimal(tendered).min(to_decimal(remaining)));

    Ok(PaymentDecision::Approved {
        amount_to_apply,
        change,
    })
}
