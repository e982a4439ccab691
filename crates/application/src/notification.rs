use serde::Serialize;

/// Default toast lifetime in milliseconds.
pub const DEFAULT_NOTIFICATION_MS: u32 = 5_000;
/// Lifetime of the post-login greeting.
pub const WELCOME_NOTIFICATION_MS: u32 = 3_000;
/// Lifetime of the "deletion cancelled" hint.
pub const CANCELLED_NOTIFICATION_MS: u32 = 2_000;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Completed mutation.
    Success,
    /// Failed operation.
    Error,
    /// Neutral information.
    Info,
}

/// Transient toast shown above the content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
    /// Display duration in milliseconds.
    pub duration_ms: u32,
}

impl Notification {
    /// Creates a success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message, DEFAULT_NOTIFICATION_MS)
    }

    /// Creates an error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message, DEFAULT_NOTIFICATION_MS)
    }

    /// Greeting shown right after sign-in.
    #[must_use]
    pub fn welcome() -> Self {
        Self::new(
            NotificationKind::Success,
            "Welcome back!",
            WELCOME_NOTIFICATION_MS,
        )
    }

    /// Hint shown when a delete confirmation is declined.
    #[must_use]
    pub fn deletion_cancelled() -> Self {
        Self::new(
            NotificationKind::Info,
            "Deletion cancelled.",
            CANCELLED_NOTIFICATION_MS,
        )
    }

    fn new(kind: NotificationKind, message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            duration_ms,
        }
    }
}
