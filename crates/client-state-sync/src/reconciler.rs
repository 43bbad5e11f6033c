//! The state reconciler.
//!
//! Pulls authoritative records from a remote query capability and merges
//! them into the local snapshot. Merges are idempotent monotonic unions:
//! remote rows only ever fill gaps, never overwrite local facts. The one
//! exception is the viewed-notification cap, whose oldest-first eviction
//! under heavy remote volume can push out an older locally-viewed id.
//!
//! Fault policy: a failed query logs a warning and leaves the snapshot
//! untouched. There is no partial merge and no retry scheduling; retry is
//! the caller's responsibility.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use client_state_store::{EventId, NotificationId, StateStore};

use crate::error::{SyncError, SyncResult};

/// A confirmed-status row from the remote calendar.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConfirmedEventRow {
    /// Event identifier.
    pub id: String,
    /// Remote status; the query filters on "confirmed".
    pub status: String,
    /// When the remote last touched the record.
    pub updated_at: DateTime<Utc>,
}

/// A read-notification row for one actor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NotificationReadRow {
    /// Notification identifier.
    pub notification_id: String,
}

/// The remote query capability the reconciler consumes.
///
/// Implemented by [`RemoteClient`] for the Supabase REST backend and by
/// in-process fakes in tests.
///
/// [`RemoteClient`]: crate::RemoteClient
#[allow(async_fn_in_trait)]
pub trait RemoteStateQuery {
    /// List calendar events whose remote status is "confirmed".
    async fn list_confirmed_events(&self) -> SyncResult<Vec<ConfirmedEventRow>>;

    /// List notification ids already marked read for the given actor.
    ///
    /// Returns [`SyncError::ResourceMissing`] when the backing table is
    /// not configured, which callers treat as "nothing to merge."
    async fn list_read_notifications(&self, actor_id: &str) -> SyncResult<Vec<NotificationReadRow>>;
}

/// Merges authoritative remote data into the local [`StateStore`].
#[derive(Debug)]
pub struct StateReconciler<Q> {
    remote: Q,
}

impl<Q: RemoteStateQuery> StateReconciler<Q> {
    /// Create a reconciler over the given remote capability.
    pub fn new(remote: Q) -> Self {
        Self { remote }
    }

    /// The remote capability, for callers that also query it directly.
    pub fn remote(&self) -> &Q {
        &self.remote
    }

    /// Pulls confirmed events and merges them into the local cache.
    ///
    /// Absent ids are inserted as synced confirmations stamped with the
    /// remote update time; ids already confirmed locally are left alone,
    /// so user-initiated confirmations always win over a later sync. The
    /// store persists once after the merge.
    ///
    /// Returns the number of records merged. A query failure logs a
    /// warning and returns 0 without touching state; callers cannot
    /// distinguish that from "nothing new."
    pub async fn sync_confirmed_events(&self, store: &mut StateStore) -> usize {
        let rows = match self.remote.list_confirmed_events().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("state sync: confirmed-events query failed: {e}");
                return 0;
            }
        };

        let fetched = rows.len();
        let merged = store.merge_confirmed_events(
            rows.into_iter()
                .map(|row| (EventId::from(row.id), row.updated_at)),
        );

        debug!(fetched, merged, "state sync: confirmed events reconciled");
        merged
    }

    /// Pulls read-notification ids for an actor and merges them into the
    /// viewed set.
    ///
    /// Merging follows the same append-if-absent and cap-at-100 rule as a
    /// local view. A missing backing table is a "not configured" condition
    /// and returns silently with zero effect; any other failure logs a
    /// warning and returns 0 without touching state.
    pub async fn sync_read_notifications(&self, store: &mut StateStore, actor_id: &str) -> usize {
        let rows = match self.remote.list_read_notifications(actor_id).await {
            Ok(rows) => rows,
            Err(SyncError::ResourceMissing(_)) => {
                debug!("state sync: read-notifications table not configured; skipping");
                return 0;
            }
            Err(e) => {
                warn!("state sync: read-notifications query failed: {e}");
                return 0;
            }
        };

        let merged = store.merge_viewed_notifications(
            rows.into_iter()
                .map(|row| NotificationId::from(row.notification_id)),
        );

        debug!(actor_id, merged, "state sync: read notifications reconciled");
        merged
    }
}
