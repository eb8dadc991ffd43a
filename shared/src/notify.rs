//! Transient notification surface
//!
//! Every interaction outcome is reported to the operator as a short-lived
//! notification. This is the contract the UI layer renders as toasts; the
//! ledger itself never blocks on it.

use serde::{Deserialize, Serialize};

/// Outcome kind, mapped by the UI to toast styling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient operator-facing message with a display duration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    /// Display duration in milliseconds
    pub duration_ms: u64,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind,
            title: title.into(),
            duration_ms,
        }
    }

    pub fn success(title: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NotificationKind::Success, title, duration_ms)
    }

    pub fn info(title: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NotificationKind::Info, title, duration_ms)
    }

    pub fn warning(title: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NotificationKind::Warning, title, duration_ms)
    }

    pub fn error(title: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NotificationKind::Error, title, duration_ms)
    }
}
