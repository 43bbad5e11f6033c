//! The state store engine.
//!
//! The store owns the snapshot and the durable storage handle, and is the
//! only component that mutates either.
//!
//! # Write Path (strict order)
//!
//! 1. Mutate the in-memory snapshot
//! 2. Write through to durable storage
//!
//! A storage fault after step 1 leaves the snapshot mutated: readers keep
//! seeing their own writes and the cache keeps working in memory only.
//!
//! # Open (silent recovery)
//!
//! On open:
//! 1. Read the blob under the well-known key
//! 2. Parse, shallow-merging onto defaults
//! 3. Fall back to defaults on any fault
//!
//! Opening never fails and never writes.

use chrono::{DateTime, Utc};
use serde_json::Value;

use client_state_storage::{StateStorage, StorageKeys};

use crate::snapshot::StateSnapshot;
use crate::types::{
    DraftFields, EventConfirmation, EventId, NotificationId, PendingDraft,
    DEFAULT_CONFIRMING_ACTOR, SYNCED_ACTOR,
};

/// Pending drafts expire one hour after creation.
pub const DRAFT_TTL_MS: i64 = 3_600_000;

/// Confirmed-event records expire seven days after confirmation.
pub const CONFIRMATION_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Upper bound on the viewed-notification set.
pub const MAX_VIEWED_NOTIFICATIONS: usize = 100;

/// The client state store.
///
/// Constructed once at application start and passed by handle to all
/// consumers; opening is the one-time load, so there is no separate
/// init-once flag to manage.
pub struct StateStore {
    storage: Box<dyn StateStorage>,
    snapshot: StateSnapshot,
}

impl StateStore {
    /// Opens a store backed by the given storage.
    ///
    /// Reads the persisted blob and shallow-merges it onto defaults. A
    /// missing blob, a storage fault, or a corrupt blob all yield the
    /// default snapshot; the corrupt blob is overwritten on the next
    /// persist.
    pub fn open(storage: Box<dyn StateStorage>) -> Self {
        let snapshot = match storage.get(StorageKeys::APP_STATE) {
            Ok(Some(raw)) => match StateSnapshot::from_json(&raw) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!("state store: discarding corrupt snapshot blob: {e}");
                    StateSnapshot::default()
                }
            },
            Ok(None) => StateSnapshot::default(),
            Err(e) => {
                tracing::warn!("state store: failed to load snapshot: {e}");
                StateSnapshot::default()
            }
        };

        Self { storage, snapshot }
    }

    /// Borrow of the live snapshot.
    pub fn state(&self) -> &StateSnapshot {
        &self.snapshot
    }

    /// Owned copy of the full snapshot, for diagnostics.
    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot.clone()
    }

    /// Writes the snapshot through to storage.
    ///
    /// Fire-and-forget with respect to durability: a storage fault is
    /// logged and swallowed, leaving the in-memory snapshot authoritative.
    fn persist(&mut self) {
        self.snapshot.last_persisted_at = Some(Utc::now());

        let raw = match self.snapshot.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("state store: failed to serialize snapshot: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set(StorageKeys::APP_STATE, &raw) {
            tracing::warn!("state store: failed to persist snapshot: {e}");
        }
    }

    // ========================================================================
    // User
    // ========================================================================

    /// Replaces the signed-in user record wholesale.
    pub fn set_user(&mut self, user: Option<Value>) {
        self.snapshot.user = user;
        self.persist();
    }

    /// The signed-in user record, if any.
    pub fn user(&self) -> Option<&Value> {
        self.snapshot.user.as_ref()
    }

    // ========================================================================
    // Pending draft
    // ========================================================================

    /// Starts a new booking draft, discarding any previous one.
    ///
    /// The draft is stamped with the current time; there is no merge with
    /// a prior draft.
    pub fn set_pending_draft(&mut self, fields: DraftFields) {
        self.snapshot.pending_draft = Some(PendingDraft {
            created_at: Utc::now(),
            fields,
        });
        self.persist();
    }

    /// The in-flight draft, expiring it lazily.
    ///
    /// A draft older than one hour is cleared and the removal persisted
    /// before returning, so this read can write.
    pub fn pending_draft(&mut self) -> Option<&PendingDraft> {
        let expired = self
            .snapshot
            .pending_draft
            .as_ref()
            .is_some_and(|draft| (Utc::now() - draft.created_at).num_milliseconds() > DRAFT_TTL_MS);

        if expired {
            tracing::debug!("state store: expiring stale booking draft");
            self.snapshot.pending_draft = None;
            self.persist();
        }

        self.snapshot.pending_draft.as_ref()
    }

    /// Drops the in-flight draft.
    pub fn clear_pending_draft(&mut self) {
        self.snapshot.pending_draft = None;
        self.persist();
    }

    // ========================================================================
    // Confirmed events
    // ========================================================================

    /// Records that an event was confirmed.
    ///
    /// The actor defaults to "admin" and the time to now. Re-confirming an
    /// already-confirmed event overwrites the record (last write wins).
    pub fn mark_event_confirmed(
        &mut self,
        id: EventId,
        confirmed_by: Option<&str>,
        confirmed_at: Option<DateTime<Utc>>,
    ) {
        self.snapshot.confirmed_events.insert(
            id,
            EventConfirmation {
                confirmed_by: confirmed_by.unwrap_or(DEFAULT_CONFIRMING_ACTOR).to_string(),
                confirmed_at: confirmed_at.unwrap_or_else(Utc::now),
            },
        );
        self.persist();
    }

    /// Whether the event has a confirmation record.
    pub fn is_event_confirmed(&self, id: &EventId) -> bool {
        self.snapshot.confirmed_events.contains_key(id)
    }

    /// The confirmation record for an event, if any.
    pub fn event_confirmation(&self, id: &EventId) -> Option<&EventConfirmation> {
        self.snapshot.confirmed_events.get(id)
    }

    /// Merges remote confirmations into the local cache.
    ///
    /// Insert-if-absent: an id already confirmed locally keeps its local
    /// record, whatever the remote timestamp says. Persists once after the
    /// merge, inserted or not. Returns the number of records inserted.
    pub fn merge_confirmed_events(
        &mut self,
        rows: impl IntoIterator<Item = (EventId, DateTime<Utc>)>,
    ) -> usize {
        let mut inserted = 0;
        for (id, updated_at) in rows {
            if !self.snapshot.confirmed_events.contains_key(&id) {
                self.snapshot.confirmed_events.insert(
                    id,
                    EventConfirmation {
                        confirmed_by: SYNCED_ACTOR.to_string(),
                        confirmed_at: updated_at,
                    },
                );
                inserted += 1;
            }
        }
        self.persist();
        inserted
    }

    // ========================================================================
    // Viewed notifications
    // ========================================================================

    /// Records that a notification was shown.
    ///
    /// Set semantics: a duplicate id is a no-op and does NOT move the
    /// existing entry to most-recent. After an append the set is trimmed
    /// oldest-first to 100 entries. Persists only when an insertion
    /// actually happened. Returns whether the id was new.
    pub fn mark_notification_viewed(&mut self, id: NotificationId) -> bool {
        if !self.append_viewed_notification(id) {
            return false;
        }
        self.persist();
        true
    }

    /// Whether the notification has already been shown.
    pub fn is_notification_viewed(&self, id: &NotificationId) -> bool {
        self.snapshot.viewed_notifications.contains(id)
    }

    /// Merges remote read-notification ids into the local set.
    ///
    /// Same append-if-absent and cap rule as [`mark_notification_viewed`];
    /// persists once when at least one id was new. Returns the number of
    /// ids inserted.
    ///
    /// [`mark_notification_viewed`]: StateStore::mark_notification_viewed
    pub fn merge_viewed_notifications(
        &mut self,
        ids: impl IntoIterator<Item = NotificationId>,
    ) -> usize {
        let mut inserted = 0;
        for id in ids {
            if self.append_viewed_notification(id) {
                inserted += 1;
            }
        }
        if inserted > 0 {
            self.persist();
        }
        inserted
    }

    /// Appends an id if absent and enforces the cap. Does not persist.
    fn append_viewed_notification(&mut self, id: NotificationId) -> bool {
        if self.snapshot.viewed_notifications.contains(&id) {
            return false;
        }
        self.snapshot.viewed_notifications.push(id);
        while self.snapshot.viewed_notifications.len() > MAX_VIEWED_NOTIFICATIONS {
            self.snapshot.viewed_notifications.remove(0);
        }
        true
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    /// Sets a preference value.
    pub fn set_preference(&mut self, key: impl Into<String>, value: Value) {
        self.snapshot.preferences.insert(key.into(), value);
        self.persist();
    }

    /// A preference value, if set. Pure read.
    pub fn preference(&self, key: &str) -> Option<&Value> {
        self.snapshot.preferences.get(key)
    }

    /// A preference value, or the given default if unset.
    pub fn preference_or(&self, key: &str, default: Value) -> Value {
        self.snapshot.preferences.get(key).cloned().unwrap_or(default)
    }

    // ========================================================================
    // Cleanup and teardown
    // ========================================================================

    /// Drops confirmation records older than seven days.
    ///
    /// Cheap to over-call: persists once whether or not anything was
    /// removed, so callers can run it on a timer or on every page load.
    /// Returns the number of records removed.
    pub fn cleanup(&mut self) -> usize {
        let cutoff = Utc::now() - chrono::Duration::milliseconds(CONFIRMATION_TTL_MS);
        let before = self.snapshot.confirmed_events.len();
        self.snapshot
            .confirmed_events
            .retain(|_, confirmation| confirmation.confirmed_at >= cutoff);
        let removed = before - self.snapshot.confirmed_events.len();

        if removed > 0 {
            tracing::debug!(removed, "state store: pruned stale confirmations");
        }
        self.persist();
        removed
    }

    /// Resets the snapshot to defaults and removes the persisted blob.
    ///
    /// Used for logout-style teardown. A storage fault is logged and
    /// swallowed; the in-memory reset always happens.
    pub fn clear(&mut self) {
        self.snapshot = StateSnapshot::default();
        if let Err(e) = self.storage.remove(StorageKeys::APP_STATE) {
            tracing::warn!("state store: failed to remove snapshot blob: {e}");
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
