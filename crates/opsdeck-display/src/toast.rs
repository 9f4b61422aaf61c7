use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use opsdeck_bridge::notification::Severity;

use crate::center::Container;

/// How long a dismissed toast stays in its fade-out phase before it is
/// removed from the container.
pub const FADE_OUT: Duration = Duration::from_millis(200);

/// Rendering phase of a toast. The lifecycle is linear and terminal:
/// shown → dismissing → removed from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Visible in the container.
    Shown,
    /// Dismissal has begun; the toast is playing its fade-out.
    Dismissing,
}

/// A single transient notification owned by the container.
#[derive(Debug)]
pub struct Toast {
    id: u64,
    severity: Severity,
    message: String,
    phase: Mutex<ToastPhase>,
    dismissed: AtomicBool,
}

impl Toast {
    pub(crate) fn new(id: u64, severity: Severity, message: String) -> Self {
        Self {
            id,
            severity,
            message,
            phase: Mutex::new(ToastPhase::Shown),
            dismissed: AtomicBool::new(false),
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> ToastPhase {
        *self.phase.lock().expect("toast phase lock poisoned")
    }

    /// Flips the one-shot dismiss guard. Returns true for the caller that won
    /// the dismissal race; every later caller gets false.
    pub(crate) fn begin_dismiss(&self) -> bool {
        if self.dismissed.swap(true, Ordering::SeqCst) {
            return false;
        }
        *self.phase.lock().expect("toast phase lock poisoned") = ToastPhase::Dismissing;
        true
    }
}

/// Manual-dismiss control for a shown toast.
///
/// The auto-dismiss timer holds a clone of the same handle; whichever side
/// dismisses first wins and the other becomes a no-op.
#[derive(Clone)]
pub struct ToastHandle {
    pub(crate) toast: Arc<Toast>,
    pub(crate) container: Arc<Container>,
}

impl ToastHandle {
    /// Starts dismissing the toast: it enters the fade-out phase and is
    /// removed from the container once the fade completes. Repeated calls
    /// are silent no-ops.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dismiss(&self) {
        if !self.toast.begin_dismiss() {
            return;
        }

        let container = self.container.clone();
        let id = self.toast.id();
        tokio::spawn(async move {
            tokio::time::sleep(FADE_OUT).await;
            container.remove(id);
        });
    }

    /// The toast this handle controls.
    pub fn toast(&self) -> &Arc<Toast> {
        &self.toast
    }
}
