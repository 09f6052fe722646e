use std::{fmt, time::Duration};

use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Identifies a notification for as long as it is shown.
#[nutype(derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Deref, Serialize, Deserialize
))]
pub struct NotificationId(uuid::Uuid);

/// A transient message shown to the user until it expires or is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub id: NotificationId,
    pub message: String,
    pub variant: NotificationVariant,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl fmt::Display for NotificationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        })
    }
}

/// Options of a new notification. Unset values fall back to the defaults of
/// the notification service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationOptions {
    pub variant: Option<NotificationVariant>,
    pub duration: Option<Duration>,
}

impl NotificationOptions {
    pub fn variant(variant: NotificationVariant) -> Self {
        Self {
            variant: Some(variant),
            duration: None,
        }
    }

    pub fn with_duration(self, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..self
        }
    }
}
