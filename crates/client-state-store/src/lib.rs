//! # Client State Store
//!
//! A write-through client state cache that persists session-scoped facts
//! across process restarts and evicts stale entries.
//!
//! ## Non-negotiable Principles
//!
//! - **The in-memory snapshot is the single source of truth for readers**
//! - **Every mutation writes through to durable storage immediately**
//! - **Storage faults degrade to in-memory-only operation, never errors**
//! - **A corrupt or missing blob falls back to defaults on open**
//! - **Local facts always win over synced facts**
//!
//! ## Example
//!
//! ```rust
//! use client_state_store::StateStore;
//! use client_state_storage::MemoryStorage;
//!
//! let mut store = StateStore::open(Box::new(MemoryStorage::new()));
//!
//! store.mark_event_confirmed("evt-1".into(), None, None);
//! assert!(store.is_event_confirmed(&"evt-1".into()));
//!
//! store.mark_notification_viewed("ntf-1".into());
//! assert!(store.is_notification_viewed(&"ntf-1".into()));
//!
//! // Logout wipes memory and storage
//! store.clear();
//! assert!(!store.is_event_confirmed(&"evt-1".into()));
//! ```
//!
//! ## Crate Structure
//!
//! - [`store`] - The state store engine (lifecycle, mutators, cleanup)
//! - [`snapshot`] - The serializable state aggregate
//! - [`types`] - Core types

pub mod snapshot;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use snapshot::StateSnapshot;
pub use store::{StateStore, CONFIRMATION_TTL_MS, DRAFT_TTL_MS, MAX_VIEWED_NOTIFICATIONS};
pub use types::{
    DraftFields, EventConfirmation, EventId, NotificationId, PendingDraft, DEFAULT_CONFIRMING_ACTOR,
    SYNCED_ACTOR,
};
