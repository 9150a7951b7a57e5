//! User-facing notifications.
//!
//! A notification is a short title plus a description, shown once on the next
//! rendered page. Destructive notifications report something the user has to
//! fix or retry.

use serde::{Deserialize, Serialize};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// A one-shot message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    /// Informational notification.
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Error notification.
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Whether this notification reports a failure.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}
