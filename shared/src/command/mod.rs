//! Command (comanda) domain types

mod types;

pub use types::{
    CloseoutRequest, Command, CommandPatch, LineItem, PaymentMethod, Product, Settlement,
    WEIGHED_CATEGORY,
};
