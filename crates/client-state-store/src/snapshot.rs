//! The serializable state aggregate.
//!
//! # Design Principles
//!
//! - The snapshot is a plain data aggregate; all policy lives in the store
//! - Every field carries a serde default so a blob written by an older
//!   schema shallow-merges onto defaults instead of failing to parse
//! - The snapshot round-trips through JSON unchanged

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{EventConfirmation, EventId, NotificationId, PendingDraft};

/// The complete in-memory representation of cached client state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    /// Opaque identity record of the signed-in user, if any.
    pub user: Option<Value>,
    /// At most one in-flight booking draft.
    pub pending_draft: Option<PendingDraft>,
    /// Confirmed calendar events, keyed by event id. Pruned by cleanup
    /// after seven days.
    pub confirmed_events: HashMap<EventId, EventConfirmation>,
    /// Notifications already shown to the user, insertion order = recency,
    /// capped at 100 entries.
    pub viewed_notifications: Vec<NotificationId>,
    /// User preferences. No TTL; persists until logout.
    pub preferences: HashMap<String, Value>,
    /// Timestamp of the most recent successful write. Informational only.
    pub last_persisted_at: Option<DateTime<Utc>>,
}

impl StateSnapshot {
    /// Parses a persisted blob, falling back onto defaults for any field
    /// the blob does not carry.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serializes the snapshot for persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
