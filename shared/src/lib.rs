//! Shared types for the comanda payment ledger
//!
//! Domain types, error taxonomy and the notification surface used by the
//! client crate. Persistence and rendering live elsewhere; everything here
//! is plain data plus the rules for describing failures to the operator.

pub mod command;
pub mod error;
pub mod notify;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{LedgerError, LedgerResult};
pub use notify::{Notification, NotificationKind};
