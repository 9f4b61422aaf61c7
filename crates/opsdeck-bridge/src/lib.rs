//! Shared contract between the API client and the notification display.
//!
//! This crate defines the types that connect the two sides of the
//! application:
//! - The client performs network I/O and reports outcomes as
//!   [`notification::NotificationMessage`]s through the [`notification::Notifier`]
//!   seam.
//! - The display drains those messages from a [`NotificationChannel`] and
//!   renders them as transient toasts.
//!
//! The channel is deliberately unbounded: the display imposes no cap on the
//! number of concurrently shown notifications and no backpressure on
//! producers. A producer never blocks or fails because the display is busy.

pub mod config;
pub mod notification;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::notification::NotificationMessage;

/// Channel pair connecting notification producers to the display consume loop.
pub struct NotificationChannel {
    /// Sender half handed to producers (wrapped in a
    /// [`notification::ChannelNotifier`]).
    pub tx: UnboundedSender<NotificationMessage>,
    /// Receiver half drained by the display consume loop.
    pub rx: UnboundedReceiver<NotificationMessage>,
}

impl NotificationChannel {
    /// Creates a new unbounded notification channel.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}
