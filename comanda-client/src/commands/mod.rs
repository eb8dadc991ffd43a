//! Command (comanda) business rules
//!
//! Pure calculation and validation: the payment calculator, the closeout
//! validator and the products reducer. Nothing here touches the network;
//! [`crate::session`] wires these rules to the collaborator.

pub mod closeout;
pub mod payment;
pub mod reducer;

pub use closeout::{validate_closeout, AdjustableAmount, EntrySource};
pub use payment::{
    batch_total, compute_change, compute_remaining, evaluate_payment, line_total, PaymentDecision,
};
pub use reducer::{reduce, ProductsAction, ReducerError};
