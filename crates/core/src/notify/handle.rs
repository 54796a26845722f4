use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{Notification, NotificationKind, Notifier};

/// Notifier that writes every notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(title = %notification.title, "{}", notification.message)
            }
            NotificationKind::Error => {
                warn!(title = %notification.title, "{}", notification.message)
            }
        }
    }
}

/// Notifier that forwards notifications through a channel.
///
/// Cheaply cloneable. A front end owns the receiving half and renders
/// notifications at its own pace.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier along with the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::error!("Failed to deliver notification: {}", e);
        }
    }
}
