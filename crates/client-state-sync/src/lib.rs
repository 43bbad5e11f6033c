//! Remote state reconciliation for the Showroom client cache.
//!
//! The local [`StateStore`](client_state_store::StateStore) accelerates UI
//! decisions; the system of record lives behind a Supabase REST API. This
//! crate pulls the authoritative records down and merges them in:
//!
//! - **Confirmed events**: inserted if absent, never overwriting a local
//!   confirmation (local wins over a later sync).
//! - **Read notifications**: merged through the same append-if-absent and
//!   cap-at-100 rule as locally-viewed notifications.
//!
//! Both operations are idempotent and best-effort: a remote fault is
//! logged and the snapshot left untouched.
//!
//! ## Example
//!
//! ```ignore
//! use client_state_sync::{RemoteClient, StateReconciler};
//!
//! let mut client = RemoteClient::new(config.supabase_url, config.supabase_publishable_key);
//! client.set_access_token(session_token);
//!
//! let reconciler = StateReconciler::new(client);
//! reconciler.sync_confirmed_events(&mut store).await;
//! reconciler.sync_read_notifications(&mut store, &user_id).await;
//! ```

mod client;
mod error;
mod reconciler;

pub use client::RemoteClient;
pub use error::{SyncError, SyncResult};
pub use reconciler::{ConfirmedEventRow, NotificationReadRow, RemoteStateQuery, StateReconciler};
