//! Error types for the payment ledger
//!
//! Every variant is scoped to a single operator interaction: nothing here is
//! fatal to the process, and nothing is retried automatically. Each error
//! knows how to describe itself to the operator as a [`Notification`].

use crate::notify::Notification;
use thiserror::Error;

/// Fallback copy when the backend fails without a usable message
pub const REMOTE_FALLBACK_MESSAGE: &str = "Erro no servidor. Recarregue a página.";

/// Unified error type for ledger interactions
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// Input cannot be parsed as a monetary value
    #[error("invalid monetary value: {0:?}")]
    InvalidNumber(String),

    /// Tendered amount field was left empty
    #[error("tendered amount is missing")]
    MissingAmount,

    /// Non-cash methods must tender exactly the remaining balance or less
    #[error("payment exceeds the remaining balance")]
    OverpaymentNotAllowed,

    /// Closeout attempted while a balance remains
    #[error("command still has an unpaid balance")]
    OrderNotFullyPaid,

    /// Gratuity field cannot be parsed
    #[error("invalid gratuity value: {0:?}")]
    InvalidGratuity(String),

    /// Discount field cannot be parsed or is negative
    #[error("invalid discount value: {0:?}")]
    InvalidDiscount(String),

    /// Discount above the command total (equal is allowed)
    #[error("discount exceeds the command total")]
    DiscountExceedsTotal,

    /// Product re-selected while already present in the batch or command
    #[error("product already selected: {name}")]
    DuplicateSelection { name: String },

    /// Requested amount exceeds the available stock
    #[error("requested amount exceeds available stock")]
    OutOfStock,

    /// The backend collaborator failed; its message is surfaced verbatim
    /// when present
    #[error("remote failure: {}", message.as_deref().unwrap_or(REMOTE_FALLBACK_MESSAGE))]
    Remote { message: Option<String> },
}

impl LedgerError {
    /// Create a Remote error carrying the backend-provided message
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: Some(message.into()),
        }
    }

    /// Create a Remote error with no usable backend message
    pub fn remote_unknown() -> Self {
        Self::Remote { message: None }
    }

    /// Operator-facing notification for this error, with the copy and
    /// duration the register UI shows
    pub fn notification(&self) -> Notification {
        match self {
            Self::InvalidNumber(_) => Notification::warning("Valor recebido inválido!", 1000),
            Self::MissingAmount => {
                Notification::warning("Insira o valor recebido do cliente", 2000)
            }
            Self::OverpaymentNotAllowed => {
                Notification::warning("Pagamento maior do que o necessário", 2000)
            }
            Self::OrderNotFullyPaid => Notification::warning("Comanda ainda não foi paga!", 2000),
            Self::InvalidGratuity(_) => Notification::error("Valor da caixinha inválido.", 1000),
            Self::InvalidDiscount(_) => Notification::error("Valor de desconto inválido.", 1000),
            Self::DiscountExceedsTotal => {
                Notification::error("Valor de desconto maior que o total.", 1000)
            }
            Self::DuplicateSelection { name } => {
                Notification::warning(format!("O produto: {name} já foi selecionado"), 2000)
            }
            Self::OutOfStock => {
                Notification::error("Quantidade acima do estoque disponível", 2000)
            }
            Self::Remote { message } => Notification::error(
                message.as_deref().unwrap_or(REMOTE_FALLBACK_MESSAGE),
                2000,
            ),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;

    #[test]
    fn test_remote_message_surfaced_verbatim() {
        let err = LedgerError::remote("Comanda não encontrada");
        let n = err.notification();
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.title, "Comanda não encontrada");
    }

    #[test]
    fn test_remote_without_message_uses_fallback() {
        let n = LedgerError::remote_unknown().notification();
        assert_eq!(n.title, REMOTE_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_duplicate_selection_names_the_product() {
        let err = LedgerError::DuplicateSelection {
            name: "Coca-Cola".to_string(),
        };
        assert!(err.notification().title.contains("Coca-Cola"));
    }

    #[test]
    fn test_business_rules_are_warnings_not_errors() {
        assert_eq!(
            LedgerError::OrderNotFullyPaid.notification().kind,
            NotificationKind::Warning
        );
        assert_eq!(
            LedgerError::OverpaymentNotAllowed.notification().kind,
            NotificationKind::Warning
        );
    }
}
