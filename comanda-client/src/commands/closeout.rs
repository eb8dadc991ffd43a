//! Order closeout validator
//!
//! Decides whether a command is eligible to close and produces the final
//! [`Settlement`]. Gratuity ("caixinha") and discount are both computed
//! against the pre-discount total.

use crate::commands::payment::compute_remaining;
use crate::money::{format_display, round2, to_canonical, to_decimal};
use rust_decimal::Decimal;
use shared::command::{Command, Settlement};
use shared::{LedgerError, LedgerResult};

/// `round2(total * percent / 100)`, the percentage-slider derivation used
/// for both gratuity and discount
pub fn percent_of_total(total: f64, percent: f64) -> f64 {
    let amount = to_decimal(total) * to_decimal(percent) / Decimal::ONE_HUNDRED;
    crate::money::to_f64(amount)
}

/// Which input last fed an [`AdjustableAmount`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// Derived from the percentage slider
    Percent,
    /// Typed directly into the currency field
    Manual,
}

/// One display value fed by two input sources: a percentage slider and a
/// manual currency field. The active source is tracked explicitly and the
/// last edit wins, so a slider recompute never clobbers a value the
/// operator is typing into the amount field.
#[derive(Debug, Clone)]
pub struct AdjustableAmount {
    display: String,
    source: EntrySource,
}

impl Default for AdjustableAmount {
    fn default() -> Self {
        Self {
            display: String::new(),
            source: EntrySource::Manual,
        }
    }
}

impl AdjustableAmount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the percentage slider
    pub fn set_percent(&mut self, total: f64, percent: f64) {
        self.display = format_display(percent_of_total(total, percent));
        self.source = EntrySource::Percent;
    }

    /// Direct entry into the currency field
    pub fn set_manual(&mut self, raw: impl Into<String>) {
        self.display = raw.into();
        self.source = EntrySource::Manual;
    }

    /// Current display value (comma-separated)
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn source(&self) -> EntrySource {
        self.source
    }
}

/// Empty input means zero; anything else must parse as a monetary value
fn parse_amount(raw: &str) -> Result<f64, ()> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    to_canonical(raw).map_err(|_| ())
}

/// Validate a closeout attempt, preconditions in order, first failure wins:
///
/// 1. unpaid balance remains
/// 2. gratuity fails numeric parse
/// 3. discount fails numeric parse
/// 4. discount negative
/// 5. discount above the total (equal is allowed)
///
/// On success the resulting [`Settlement`] is handed to the collaborator;
/// nothing is mutated here.
pub fn validate_closeout(
    command: &Command,
    discount_raw: &str,
    gratuity_raw: &str,
    observation: &str,
) -> LedgerResult<Settlement> {
    let remaining = compute_remaining(command.total, command.total_paid);
    if remaining > 0.0 {
        return Err(LedgerError::OrderNotFullyPaid);
    }

    let gratuity = parse_amount(gratuity_raw)
        .map_err(|_| LedgerError::InvalidGratuity(gratuity_raw.to_string()))?;

    let discount = parse_amount(discount_raw)
        .map_err(|_| LedgerError::InvalidDiscount(discount_raw.to_string()))?;

    if discount < 0.0 {
        return Err(LedgerError::InvalidDiscount(discount_raw.to_string()));
    }

    if to_decimal(discount) > to_decimal(command.total) {
        return Err(LedgerError::DiscountExceedsTotal);
    }

    Ok(Settlement {
        paid_total: command.total_paid,
        discount: round2(discount),
        gratuity: round2(gratuity),
        observation: observation.to_string(),
    })
}
