//! Storage key constants.

/// Storage keys used by the client cache
pub struct StorageKeys;

impl StorageKeys {
    /// The serialized application state snapshot (JSON)
    pub const APP_STATE: &'static str = "showroom_app_state";

    /// Identifier of the signed-in actor, kept outside the snapshot so
    /// a corrupt snapshot cannot take the identity hint down with it
    pub const ACTOR_ID: &'static str = "showroom_actor_id";
}
