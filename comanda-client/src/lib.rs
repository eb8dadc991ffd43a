//! Client-side payment ledger for the comanda (table tab) application
//!
//! The core of the crate is the order payment ledger: monetary parsing and
//! formatting ([`money`]), the payment calculator and closeout validator
//! ([`commands`]), and the [`session::OrderSession`] that drives one open
//! command against the remote backend through the [`api::CommandApi`]
//! collaborator.
//!
//! Rendering, routing and persistence are out of scope; the session exposes
//! typed outcomes and [`shared::Notification`]s for the UI layer to display.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod money;
pub mod session;

pub use api::CommandApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpCommandClient;
pub use session::OrderSession;
