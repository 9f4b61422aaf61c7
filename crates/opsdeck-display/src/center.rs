//! Process-wide notification center.
//!
//! The center owns the toast container. It is mounted once at startup; no
//! other component mutates the container directly. Showing a toast while the
//! container is not mounted is tolerated: the notification is dropped with a
//! logged diagnostic, never an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use opsdeck_bridge::notification::Severity;

use crate::toast::{Toast, ToastHandle};

/// Delay before a shown toast dismisses itself.
pub const AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// Container of live toasts. Mutated only through [`NotificationCenter::show`]
/// and toast dismissal.
#[derive(Debug, Default)]
pub(crate) struct Container {
    toasts: Mutex<Vec<Arc<Toast>>>,
}

impl Container {
    fn push(&self, toast: Arc<Toast>) {
        self.toasts
            .lock()
            .expect("toast container lock poisoned")
            .push(toast);
    }

    pub(crate) fn remove(&self, id: u64) {
        self.toasts
            .lock()
            .expect("toast container lock poisoned")
            .retain(|toast| toast.id() != id);
    }

    fn snapshot(&self) -> Vec<Arc<Toast>> {
        self.toasts
            .lock()
            .expect("toast container lock poisoned")
            .clone()
    }
}

/// Owner of the toast container and entry point for showing notifications.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    container: Mutex<Option<Arc<Container>>>,
    next_id: AtomicU64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the toast container. Call once at startup; a repeated mount is
    /// ignored with a warning.
    pub fn mount(&self) {
        let mut container = self
            .container
            .lock()
            .expect("notification center lock poisoned");
        if container.is_some() {
            log::warn!("Notification container is already mounted");
            return;
        }
        *container = Some(Arc::new(Container::default()));
    }

    /// Displays a toast with the given severity and message and schedules its
    /// automatic dismissal after [`AUTO_DISMISS`]. Returns the manual-dismiss
    /// handle, or `None` when the container was never mounted.
    ///
    /// Must be called from within a tokio runtime when the container is
    /// mounted (the auto-dismiss timer is a spawned task).
    pub fn show(&self, severity: Severity, message: impl Into<String>) -> Option<ToastHandle> {
        let container = match &*self
            .container
            .lock()
            .expect("notification center lock poisoned")
        {
            Some(container) => container.clone(),
            None => {
                log::error!("Notification container is not mounted, dropping notification");
                return None;
            }
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Arc::new(Toast::new(id, severity, message.into()));
        container.push(toast.clone());

        let handle = ToastHandle { toast, container };
        let timer = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(AUTO_DISMISS).await;
            timer.dismiss();
        });

        Some(handle)
    }

    /// Snapshot of the live toasts, oldest first. Empty when the container is
    /// not mounted.
    pub fn toasts(&self) -> Vec<Arc<Toast>> {
        match &*self
            .container
            .lock()
            .expect("notification center lock poisoned")
        {
            Some(container) => container.snapshot(),
            None => Vec::new(),
        }
    }
}
