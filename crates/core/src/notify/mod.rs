//! User-facing notifications.
//!
//! Components never talk to a global toast queue; they receive a
//! [`Notifier`] and call [`Notifier::notify`]. Front ends decide how a
//! notification is shown.

mod handle;

pub use handle::{ChannelNotifier, TracingNotifier};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Capability for surfacing notifications.
///
/// Implementations must not block; delivery failures are logged, never
/// returned to the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
