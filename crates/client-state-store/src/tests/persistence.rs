//! Snapshot round-trip laws.

use std::sync::Arc;

use chrono::{Duration, Utc};
use client_state_storage::MemoryStorage;

use super::open_with_memory;
use crate::snapshot::StateSnapshot;
use crate::store::StateStore;
use crate::types::DraftFields;

/// Builds a snapshot purely through the documented mutators.
fn mutated_store() -> (StateStore, Arc<MemoryStorage>) {
    let (mut store, mem) = open_with_memory();

    store.set_user(Some(serde_json::json!({"id": "u-1", "email": "pro@example.com"})));

    let mut fields = DraftFields::new();
    fields.insert("slab".to_string(), serde_json::json!("calacatta"));
    fields.insert("sqft".to_string(), serde_json::json!(42));
    store.set_pending_draft(fields);

    store.mark_event_confirmed("e-1".into(), None, None);
    store.mark_event_confirmed("e-2".into(), Some("u-1"), Some(Utc::now() - Duration::days(2)));

    for i in 0..5 {
        store.mark_notification_viewed(format!("n-{i}").into());
    }

    store.set_preference("units", serde_json::json!("metric"));
    store.set_preference("filters", serde_json::json!({"color": "white"}));

    (store, mem)
}

#[test]
fn serialize_deserialize_is_observationally_equal() {
    let (store, _mem) = mutated_store();

    let snapshot = store.snapshot();
    let restored = StateSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

    assert_eq!(restored, snapshot);
    // Ordered collection order survives the trip
    assert_eq!(restored.viewed_notifications, snapshot.viewed_notifications);
}

#[test]
fn reopened_store_observes_identical_state() {
    let (store, mem) = mutated_store();
    let expected = store.snapshot();
    drop(store);

    let reopened = StateStore::open(Box::new(mem));
    assert_eq!(reopened.state(), &expected);
}

#[test]
fn diagnostics_snapshot_is_a_detached_copy() {
    let (mut store, _mem) = mutated_store();

    let copy = store.snapshot();
    store.clear();

    // The copy is unaffected by later mutation
    assert!(copy.user.is_some());
    assert!(store.state().user.is_none());
}
