//! Collaborator interface to the backend
//!
//! [`CommandApi`] is the sole boundary between the ledger and the remote
//! service: one method per backend operation, implemented over HTTP by
//! [`HttpCommandClient`] and by in-memory doubles in tests.

use crate::{ClientError, ClientResult, HttpCommandClient};
use async_trait::async_trait;
use serde::Deserialize;
use shared::command::{CloseoutRequest, Command, CommandPatch, Product};
use tracing::debug;

/// Backend operations the ledger depends on
#[async_trait]
pub trait CommandApi: Send + Sync {
    /// Fetch the current authoritative command state
    async fn get_command(&self, id: &str) -> ClientResult<Command>;

    /// Apply a field-level patch and return the new authoritative state
    /// together with the backend's message, if any.
    ///
    /// With `update_total` set, the backend settles `patch.total` against
    /// the balance instead of replacing the command total.
    async fn update_command(
        &self,
        id: &str,
        patch: &CommandPatch,
        update_total: bool,
    ) -> ClientResult<(Option<String>, Command)>;

    /// Execute the closeout transaction, returning the closed command
    /// together with the backend's message, if any
    async fn record_payment(
        &self,
        request: &CloseoutRequest,
    ) -> ClientResult<(Option<String>, Command)>;

    /// Check whether `amount` of a product is available in stock
    async fn verify_stock_amount(&self, product_id: &str, amount: f64) -> ClientResult<bool>;

    /// Decrement a product's stock, returning its updated state
    async fn decrement_stock(&self, product_id: &str, amount: f64) -> ClientResult<Product>;
}

// ========== Wire envelopes ==========

#[derive(Debug, Deserialize)]
struct CommandEnvelope {
    #[serde(default)]
    message: Option<String>,
    command: Command,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayEnvelope {
    #[serde(default)]
    message: Option<String>,
    payment_infos: PaymentInfos,
}

#[derive(Debug, Deserialize)]
struct PaymentInfos {
    command: Command,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockCheckEnvelope {
    is_in_stock: bool,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Product,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StockAmountBody<'a> {
    product_id: &'a str,
    amount: f64,
}

#[async_trait]
impl CommandApi for HttpCommandClient {
    async fn get_command(&self, id: &str) -> ClientResult<Command> {
        debug!(command_id = %id, "fetching command");
        let envelope: CommandEnvelope = self.get(&format!("commands/{id}")).await?;
        Ok(envelope.command)
    }

    async fn update_command(
        &self,
        id: &str,
        patch: &CommandPatch,
        update_total: bool,
    ) -> ClientResult<(Option<String>, Command)> {
        debug!(command_id = %id, update_total, "updating command");
        let envelope: CommandEnvelope = self
            .put(&format!("commands/{id}?updateTotal={update_total}"), patch)
            .await?;
        Ok((envelope.message, envelope.command))
    }

    async fn record_payment(
        &self,
        request: &CloseoutRequest,
    ) -> ClientResult<(Option<String>, Command)> {
        debug!(command_id = %request.command_id, "recording closeout payment");
        let envelope: PayEnvelope = self.post("payments", request).await?;
        let command = envelope.payment_infos.command;
        if command.is_active {
            return Err(ClientError::InvalidResponse(
                "closeout left the command active".to_string(),
            ));
        }
        Ok((envelope.message, command))
    }

    async fn verify_stock_amount(&self, product_id: &str, amount: f64) -> ClientResult<bool> {
        debug!(%product_id, amount, "verifying stock amount");
        let body = StockAmountBody { product_id, amount };
        let envelope: StockCheckEnvelope = self.post("products/verify-amount", &body).await?;
        Ok(envelope.is_in_stock)
    }

    async fn decrement_stock(&self, product_id: &str, amount: f64) -> ClientResult<Product> {
        debug!(%product_id, amount, "decrementing stock");
        let body = StockAmountBody { product_id, amount };
        let envelope: ProductEnvelope = self.patch("products/diminish-amount", &body).await?;
        Ok(envelope.product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_envelope_with_and_without_message() {
        let with: CommandEnvelope = serde_json::from_str(
            r#"{"message": "Pagamento registrado", "command": {"_id": "c1", "waiter": "Diego"}}"#,
        )
        .unwrap();
        assert_eq!(with.message.as_deref(), Some("Pagamento registrado"));
        assert_eq!(with.command.id, "c1");

        let without: CommandEnvelope =
            serde_json::from_str(r#"{"command": {"_id": "c2", "waiter": "Bryan"}}"#).unwrap();
        assert!(without.message.is_none());
    }

    #[test]
    fn test_pay_envelope_shape() {
        let envelope: PayEnvelope = serde_json::from_str(
            r#"{"paymentInfos": {"command": {"_id": "c1", "waiter": "Diego", "isActive": false}}}"#,
        )
        .unwrap();
        assert!(!envelope.payment_infos.command.is_active);
        assert!(envelope.message.is_none());

        let with_message: PayEnvelope = serde_json::from_str(
            r#"{"message": "Comanda fechada com sucesso",
                "paymentInfos": {"command": {"_id": "c1", "waiter": "Diego", "isActive": false}}}"#,
        )
        .unwrap();
        assert_eq!(
            with_message.message.as_deref(),
            Some("Comanda fechada com sucesso")
        );
    }

    #[test]
    fn test_stock_check_envelope() {
        let envelope: StockCheckEnvelope =
            serde_json::from_str(r#"{"isInStock": true}"#).unwrap();
        assert!(envelope.is_in_stock);
    }
}
