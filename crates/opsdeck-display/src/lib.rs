//! Toast notification display.
//!
//! This crate owns the process-wide [`NotificationCenter`] and the consume
//! loop that drains bridge notifications into it. Toasts live in the center's
//! container from `show` until their dismissal completes, whether that
//! dismissal came from the fixed auto-dismiss timer or from the manual
//! [`ToastHandle`].

pub mod center;
pub mod toast;

use std::sync::Arc;

use opsdeck_bridge::notification::NotificationMessage;
use tokio::sync::mpsc::UnboundedReceiver;

pub use crate::center::NotificationCenter;
pub use crate::toast::{Toast, ToastHandle, ToastPhase};

/// Drains notifications from the bridge channel into the center until every
/// sender is dropped.
///
/// Toasts shown through this loop offer no manual-dismiss control; they rely
/// on the auto-dismiss timer, so the handle is dropped here.
pub async fn run(center: Arc<NotificationCenter>, mut rx: UnboundedReceiver<NotificationMessage>) {
    while let Some(notification) = rx.recv().await {
        log::debug!("Got a notification message: {notification:?}");
        let _ = center.show(notification.severity, notification.message);
    }
}
