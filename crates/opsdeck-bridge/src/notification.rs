use tokio::sync::mpsc::UnboundedSender;

/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent, allowing the display
/// to style them appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Danger,
}

impl Severity {
    /// Stable style class for the rendering layer.
    pub fn style_class(&self) -> &'static str {
        match self {
            Severity::Info => "is-info",
            Severity::Success => "is-success",
            Severity::Warning => "is-warning",
            Severity::Danger => "is-danger",
        }
    }
}

/// A notification payload intended for the user interface.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// The severity of the notification, determining its visual style.
    pub severity: Severity,
    /// The text content to display to the user.
    pub message: String,
}

impl NotificationMessage {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Capability to surface a notification to the user.
///
/// Collaborators that report outcomes take this as an explicitly injected
/// dependency. Absence of a notifier is represented by not injecting one,
/// never by a runtime existence check.
pub trait Notifier: Send + Sync {
    /// Surfaces a notification. Fire-and-forget: implementations must not
    /// block and must tolerate the display being gone.
    fn notify(&self, severity: Severity, message: &str);
}

/// [`Notifier`] backed by the sender half of a [`crate::NotificationChannel`].
pub struct ChannelNotifier {
    tx: UnboundedSender<NotificationMessage>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<NotificationMessage>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let notification = NotificationMessage::new(severity, message);
        if self.tx.send(notification).is_err() {
            log::warn!("Notification channel is closed, dropping {severity:?} notification");
        }
    }
}
