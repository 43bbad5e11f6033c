//! Core types for the client state store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actor recorded when a confirmation is created locally without an
/// explicit actor.
pub const DEFAULT_CONFIRMING_ACTOR: &str = "admin";

/// Actor recorded when a confirmation is merged in from the remote backend.
pub const SYNCED_ACTOR: &str = "synced";

/// Unique identifier for a calendar event.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Creates an event ID from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the event ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a notification.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl NotificationId {
    /// Creates a notification ID from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the notification ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NotificationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Record of who confirmed a calendar event and when.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventConfirmation {
    /// The actor that confirmed the event ("admin", "synced", or a user id).
    pub confirmed_by: String,
    /// When the confirmation happened.
    pub confirmed_at: DateTime<Utc>,
}

/// Free-form fields of an in-progress booking form.
pub type DraftFields = serde_json::Map<String, serde_json::Value>;

/// A provisional, single-slot record of an in-progress multi-step booking.
///
/// The fields are flattened so the persisted shape is the booking object
/// itself plus a `created_at` stamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingDraft {
    /// When the draft was started; drafts expire one hour after this.
    pub created_at: DateTime<Utc>,
    /// The booking form fields, stored as-is.
    #[serde(flatten)]
    pub fields: DraftFields,
}
