//! Preference map behavior.

use client_state_storage::{StateStorage, StorageKeys};

use super::{open_with_memory, persisted_snapshot};

#[test]
fn set_and_get_preference() {
    let (mut store, _mem) = open_with_memory();

    store.set_preference("units", serde_json::json!("metric"));

    assert_eq!(store.preference("units"), Some(&serde_json::json!("metric")));
    assert_eq!(store.preference("missing"), None);
}

#[test]
fn preference_or_falls_back_to_default() {
    let (mut store, _mem) = open_with_memory();

    store.set_preference("units", serde_json::json!("metric"));

    assert_eq!(
        store.preference_or("units", serde_json::json!("imperial")),
        serde_json::json!("metric")
    );
    assert_eq!(
        store.preference_or("missing", serde_json::json!("imperial")),
        serde_json::json!("imperial")
    );
}

#[test]
fn preferences_accept_arbitrary_values() {
    let (mut store, _mem) = open_with_memory();

    store.set_preference("filters", serde_json::json!({"color": "white", "max_price": 90}));
    store.set_preference("recently_compared", serde_json::json!(["slab-1", "slab-2"]));

    assert_eq!(
        store.preference("filters").unwrap()["max_price"],
        serde_json::json!(90)
    );
}

#[test]
fn setter_persists_getter_does_not() {
    let (mut store, mem) = open_with_memory();

    store.set_preference("units", serde_json::json!("metric"));
    let blob = mem.get(StorageKeys::APP_STATE).unwrap();

    let _ = store.preference("units");
    let _ = store.preference_or("units", serde_json::json!("imperial"));

    assert_eq!(mem.get(StorageKeys::APP_STATE).unwrap(), blob);
}

#[test]
fn overwriting_a_preference_replaces_the_value() {
    let (mut store, mem) = open_with_memory();

    store.set_preference("units", serde_json::json!("metric"));
    store.set_preference("units", serde_json::json!("imperial"));

    assert_eq!(store.preference("units"), Some(&serde_json::json!("imperial")));
    assert_eq!(
        persisted_snapshot(&mem).unwrap().preferences.get("units"),
        Some(&serde_json::json!("imperial"))
    );
}

#[test]
fn cleanup_does_not_touch_preferences() {
    let (mut store, _mem) = open_with_memory();

    store.set_preference("units", serde_json::json!("metric"));
    store.cleanup();

    assert_eq!(store.preference("units"), Some(&serde_json::json!("metric")));
}
