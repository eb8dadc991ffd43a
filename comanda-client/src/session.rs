//! Order session
//!
//! One open command, driven against the backend through an injected
//! [`CommandApi`] handle — no ambient state. Every submission path holds an
//! advisory in-flight flag for its own control: re-entry while a call is
//! pending is an ignored no-op, never queued. Snapshots are replaced
//! wholesale with each authoritative response; on any failure nothing
//! changes locally and the flag clears so the operator can retry.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use shared::command::{
    CloseoutRequest, Command, CommandPatch, LineItem, PaymentMethod, Product, Settlement,
};
use shared::{LedgerError, LedgerResult, Notification};

use crate::api::CommandApi;
use crate::commands::closeout::validate_closeout;
use crate::commands::payment::{batch_total, compute_remaining, evaluate_payment, PaymentDecision};
use crate::commands::reducer::{reduce, ProductsAction};
use crate::money::to_canonical;

/// Outcome of a payment submission
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// A payment for this command is already in flight; call ignored
    Ignored,
    /// Remaining balance was already zero; nothing applied
    NothingToPay,
    /// Payment settled against the balance
    Applied {
        amount_applied: f64,
        change: f64,
        /// Backend-provided success message, when present
        message: Option<String>,
    },
}

impl PaymentOutcome {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Ignored => None,
            Self::NothingToPay => Some(Notification::info("Não há nada a se pagar", 1000)),
            Self::Applied { message, .. } => Some(Notification::success(
                message.as_deref().unwrap_or("Pagamento registrado"),
                3000,
            )),
        }
    }
}

/// Outcome of a closeout submission
#[derive(Debug, Clone, PartialEq)]
pub enum CloseoutOutcome {
    Ignored,
    Closed {
        settlement: Settlement,
        /// Backend-provided success message, when present
        message: Option<String>,
    },
}

impl CloseoutOutcome {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Ignored => None,
            Self::Closed { message, .. } => Some(Notification::success(
                message.as_deref().unwrap_or("Comanda fechada!"),
                2000,
            )),
        }
    }
}

/// Outcome of selecting a product into the pending batch
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Ignored,
    Selected,
}

/// One stock decrement that failed after the order update succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct StockFailure {
    pub product_id: String,
    pub name: String,
    pub error: LedgerError,
}

/// Aggregated result of the post-add stock decrement batch
///
/// The order update has already succeeded by the time this is produced;
/// failures listed here mean inventory needs reconciling for those
/// products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockReconciliation {
    pub updated: Vec<Product>,
    pub failed: Vec<StockFailure>,
}

impl StockReconciliation {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of pushing the pending batch onto the command
#[derive(Debug, Clone, PartialEq)]
pub enum AddProductsOutcome {
    Ignored,
    Added { reconciliation: StockReconciliation },
}

impl AddProductsOutcome {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Ignored => None,
            Self::Added { reconciliation } if reconciliation.is_clean() => {
                Some(Notification::success("Produtos adicionados", 2000))
            }
            Self::Added { reconciliation } => {
                let names: Vec<&str> = reconciliation
                    .failed
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect();
                Some(Notification::warning(
                    format!("Baixa de estoque falhou para: {}", names.join(", ")),
                    2000,
                ))
            }
        }
    }
}

/// Session around one open command
pub struct OrderSession {
    api: Arc<dyn CommandApi>,
    command: Command,
    /// Pending batch of products selected but not yet pushed to the command
    selected: Vec<LineItem>,
    paying: bool,
    closing: bool,
    adding: bool,
    selecting: bool,
}

impl OrderSession {
    pub fn new(api: Arc<dyn CommandApi>, command: Command) -> Self {
        Self {
            api,
            command,
            selected: Vec::new(),
            paying: false,
            closing: false,
            adding: false,
            selecting: false,
        }
    }

    /// Open a session by fetching the authoritative command state
    pub async fn open(api: Arc<dyn CommandApi>, command_id: &str) -> LedgerResult<Self> {
        let command = api.get_command(command_id).await?;
        Ok(Self::new(api, command))
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn selected(&self) -> &[LineItem] {
        &self.selected
    }

    /// Value of the pending batch, each line rounded first
    pub fn selected_total(&self) -> f64 {
        batch_total(&self.selected)
    }

    /// Remaining balance on the current snapshot
    pub fn remaining(&self) -> f64 {
        compute_remaining(self.command.total, self.command.total_paid)
    }

    /// Re-fetch the authoritative snapshot, replacing the local one wholesale
    pub async fn refresh(&mut self) -> LedgerResult<&Command> {
        self.command = self.api.get_command(&self.command.id).await?;
        Ok(&self.command)
    }

    /// Apply a UI-dispatched action to the local product list
    pub fn apply_products_action(&mut self, action: ProductsAction) {
        self.command.products = reduce(&self.command.products, action);
    }

    // ========== Payment ==========

    /// Settle a tendered amount against the remaining balance
    pub async fn make_payment(
        &mut self,
        tendered_raw: &str,
        method: PaymentMethod,
    ) -> LedgerResult<PaymentOutcome> {
        if self.paying {
            return Ok(PaymentOutcome::Ignored);
        }
        self.paying = true;
        let result = self.make_payment_inner(tendered_raw, method).await;
        self.paying = false;
        result
    }

    async fn make_payment_inner(
        &mut self,
        tendered_raw: &str,
        method: PaymentMethod,
    ) -> LedgerResult<PaymentOutcome> {
        let remaining = self.remaining();
        let decision = evaluate_payment(remaining, tendered_raw, method)?;

        let (amount_to_apply, change) = match decision {
            PaymentDecision::NothingToPay => return Ok(PaymentOutcome::NothingToPay),
            PaymentDecision::Approved {
                amount_to_apply,
                change,
            } => (amount_to_apply, change),
        };

        let patch = CommandPatch {
            total: Some(amount_to_apply),
            payment_type: Some(method),
            ..Default::default()
        };
        let (message, updated) = self
            .api
            .update_command(&self.command.id, &patch, true)
            .await?;
        self.command = updated;

        info!(
            command_id = %self.command.id,
            amount = amount_to_apply,
            change,
            method = %method,
            "payment applied"
        );

        Ok(PaymentOutcome::Applied {
            amount_applied: amount_to_apply,
            change,
            message,
        })
    }

    // ========== Closeout ==========

    /// Close the command once fully paid, attaching discount, gratuity and
    /// observation. Atomic from this side: either the backend confirms and
    /// the snapshot is replaced with the closed command, or nothing changes.
    pub async fn close_command(
        &mut self,
        discount_raw: &str,
        gratuity_raw: &str,
        observation: &str,
    ) -> LedgerResult<CloseoutOutcome> {
        if self.closing {
            return Ok(CloseoutOutcome::Ignored);
        }
        self.closing = true;
        let result = self
            .close_command_inner(discount_raw, gratuity_raw, observation)
            .await;
        self.closing = false;
        result
    }

    async fn close_command_inner(
        &mut self,
        discount_raw: &str,
        gratuity_raw: &str,
        observation: &str,
    ) -> LedgerResult<CloseoutOutcome> {
        let settlement = validate_closeout(&self.command, discount_raw, gratuity_raw, observation)?;

        let request = CloseoutRequest {
            command_id: self.command.id.clone(),
            payment_types: self.command.payment_types.clone(),
            waiter_extra: settlement.gratuity,
            observation: settlement.observation.clone(),
            discount: settlement.discount,
        };
        let (message, closed) = self.api.record_payment(&request).await?;
        self.command = closed;

        info!(
            command_id = %self.command.id,
            discount = settlement.discount,
            gratuity = settlement.gratuity,
            "command closed"
        );

        Ok(CloseoutOutcome::Closed {
            settlement,
            message,
        })
    }

    // ========== Product selection ==========

    /// Select a product into the pending batch, gated on available stock
    pub async fn select_product(
        &mut self,
        product: &Product,
        amount_raw: &str,
    ) -> LedgerResult<SelectOutcome> {
        if self.selecting {
            return Ok(SelectOutcome::Ignored);
        }
        self.selecting = true;
        let result = self.select_product_inner(product, amount_raw).await;
        self.selecting = false;
        result
    }

    async fn select_product_inner(
        &mut self,
        product: &Product,
        amount_raw: &str,
    ) -> LedgerResult<SelectOutcome> {
        if self.selected.iter().any(|s| s.name == product.name) {
            return Err(LedgerError::DuplicateSelection {
                name: product.name.clone(),
            });
        }

        // Fractional amounts are valid for the weighed category
        let amount = to_canonical(amount_raw)?;
        if amount <= 0.0 {
            return Err(LedgerError::InvalidNumber(amount_raw.to_string()));
        }

        if !self.api.verify_stock_amount(&product.id, amount).await? {
            return Err(LedgerError::OutOfStock);
        }

        self.selected.push(LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            amount,
            unit_price: product.unit_price,
            total_payed: 0.0,
        });

        Ok(SelectOutcome::Selected)
    }

    /// Drop a product from the pending batch
    pub fn unselect_product(&mut self, product_id: &str) {
        self.selected.retain(|s| s.id != product_id);
    }

    // ========== Add products ==========

    /// Push the pending batch onto the command, then decrement stock for
    /// every selected product.
    ///
    /// The decrement batch is awaited as a whole and per-product failures
    /// are aggregated into the returned [`StockReconciliation`] instead of
    /// being fired and forgotten.
    pub async fn add_products(&mut self) -> LedgerResult<AddProductsOutcome> {
        if self.adding {
            return Ok(AddProductsOutcome::Ignored);
        }
        self.adding = true;
        let result = self.add_products_inner().await;
        self.adding = false;
        result
    }

    async fn add_products_inner(&mut self) -> LedgerResult<AddProductsOutcome> {
        // Work from the authoritative state, not the local snapshot
        let authoritative = self.api.get_command(&self.command.id).await?;

        if let Some(existing) = authoritative
            .products
            .iter()
            .find(|p| self.selected.iter().any(|s| s.name == p.name))
        {
            return Err(LedgerError::DuplicateSelection {
                name: existing.name.clone(),
            });
        }

        let mut products = authoritative.products;
        products.extend(self.selected.iter().cloned());

        let patch = CommandPatch {
            products: Some(products),
            ..Default::default()
        };
        let (_, updated) = self
            .api
            .update_command(&self.command.id, &patch, false)
            .await?;
        self.command = updated;

        let batch = self.selected.iter().map(|item| {
            let api = Arc::clone(&self.api);
            let id = item.id.clone();
            let name = item.name.clone();
            let amount = item.amount;
            async move {
                let result = api.decrement_stock(&id, amount).await;
                (id, name, result)
            }
        });

        let mut reconciliation = StockReconciliation::default();
        for (product_id, name, result) in join_all(batch).await {
            match result {
                Ok(product) => reconciliation.updated.push(product),
                Err(err) => {
                    warn!(%product_id, error = %err, "stock decrement failed");
                    reconciliation.failed.push(StockFailure {
                        product_id,
                        name,
                        error: err.into(),
                    });
                }
            }
        }

        info!(
            command_id = %self.command.id,
            added = self.selected.len(),
            decrement_failures = reconciliation.failed.len(),
            "products added to command"
        );

        self.selected.clear();
        Ok(AddProductsOutcome::Added { reconciliation })
    }
}
