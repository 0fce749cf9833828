use std::sync::Arc;

use wiz_session::{SessionManager, StaticSessionId};
use wiz_store::{MemStore, SessionRecord};

pub const FAKE_ID: &str = "fakeId";

/// Top-level JSON object literal as a session record.
pub fn record(value: serde_json::Value) -> SessionRecord {
    value.as_object().cloned().expect("object")
}

/// Manager over a clone of `store` (shared interior), pinned to the fixed
/// test session id.
pub fn manager(store: &MemStore) -> SessionManager {
    SessionManager::new(
        Arc::new(store.clone()),
        Arc::new(StaticSessionId::new(FAKE_ID)),
    )
}
