//! Integration tests for the state store engine.
//!
//! Test organization:
//!
//! - `lifecycle.rs`     - open, write-through, degradation, clear
//! - `drafts.rs`        - pending draft slot and lazy expiry
//! - `confirmations.rs` - confirmed events, remote merge, TTL cleanup
//! - `notifications.rs` - bounded viewed-notification set
//! - `preferences.rs`   - preference map
//! - `persistence.rs`   - snapshot round-trip laws

mod persistence;
mod preferences;

use std::sync::Arc;

use client_state_storage::{MemoryStorage, StateStorage, StorageError, StorageKeys, StorageResult};

use crate::snapshot::StateSnapshot;
use crate::store::StateStore;

/// Storage stub whose writes always fail, for silent-degrade tests.
pub struct FailingStorage;

impl StateStorage for FailingStorage {
    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Encoding("write refused".to_string()))
    }

    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn remove(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::Encoding("remove refused".to_string()))
    }
}

/// Opens a store over a shared in-memory backend, returning both handles.
pub fn open_with_memory() -> (StateStore, Arc<MemoryStorage>) {
    let mem = Arc::new(MemoryStorage::new());
    let store = StateStore::open(Box::new(Arc::clone(&mem)));
    (store, mem)
}

/// Parses the blob currently persisted under the app-state key.
pub fn persisted_snapshot(mem: &MemoryStorage) -> Option<StateSnapshot> {
    mem.get(StorageKeys::APP_STATE)
        .unwrap()
        .map(|raw| StateSnapshot::from_json(&raw).unwrap())
}

/// Basic workflow test demonstrating core functionality.
#[test]
fn basic_workflow() {
    let (mut store, mem) = open_with_memory();

    store.set_user(Some(serde_json::json!({"id": "u-1"})));
    store.mark_event_confirmed("e-1".into(), None, None);
    store.mark_notification_viewed("n-1".into());
    store.set_preference("units", serde_json::json!("imperial"));

    assert!(store.user().is_some());
    assert!(store.is_event_confirmed(&"e-1".into()));
    assert!(store.is_notification_viewed(&"n-1".into()));
    assert_eq!(
        store.preference_or("units", serde_json::json!("metric")),
        serde_json::json!("imperial")
    );

    // Every mutation wrote through
    let persisted = persisted_snapshot(&mem).unwrap();
    assert_eq!(&persisted, store.state());

    // Logout wipes memory and storage
    store.clear();
    assert_eq!(store.state(), &StateSnapshot::default());
    assert!(persisted_snapshot(&mem).is_none());
}
