use crate::{SessionRecord, SessionStore, StoreError, StoreResult, seal_record, unseal_record};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Arc, RwLock,
        atomic::{AtomicUsize, Ordering},
    },
};
use wiz_codec::{DynRecordCodec, NoopCodec};

/// In-memory store. The default backend for suite runs that do not point at a
/// real session service, and the instrumented one: it counts `close` calls so
/// lifecycle tests can assert teardown ran exactly once.
#[derive(Clone)]
pub struct MemStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    codec: DynRecordCodec,
    closes: Arc<AtomicUsize>,
}

impl std::fmt::Debug for MemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemStore")
            .field("records", &self.records.read().unwrap().len())
            .field("closes", &self.closes.load(Ordering::SeqCst))
            .finish()
    }
}

impl MemStore {
    /// Store that keeps payloads in cleartext.
    pub fn new() -> Self {
        Self::with_codec(Arc::new(NoopCodec))
    }

    /// Store that runs payloads through `codec` at the boundary.
    pub fn with_codec(codec: DynRecordCodec) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            codec,
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completed `close` calls.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closes.load(Ordering::SeqCst) > 0 {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemStore {
    async fn get(&self, session_id: &str) -> StoreResult<Option<SessionRecord>> {
        self.ensure_open()?;
        let sealed = {
            let guard = self.records.read().unwrap();
            guard.get(session_id).cloned()
        };
        match sealed {
            Some(bytes) => Ok(Some(unseal_record(self.codec.as_ref(), session_id, &bytes)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, session_id: &str, record: &SessionRecord) -> StoreResult<()> {
        self.ensure_open()?;
        let sealed = seal_record(self.codec.as_ref(), session_id, record)?;
        let mut guard = self.records.write().unwrap();
        guard.insert(session_id.to_string(), sealed);
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiz_codec::Base64Codec;

    fn record(value: serde_json::Value) -> SessionRecord {
        value.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn record_round_trip() {
        let store = MemStore::new();
        let rec = record(json!({"hmpo-wizard-apply": {"steps": ["/start"]}}));
        store.set("fakeId", &rec).await.expect("set");
        let loaded = store.get("fakeId").await.expect("get").expect("present");
        assert_eq!(rec, loaded);
    }

    #[tokio::test]
    async fn missing_id_yields_none() {
        let store = MemStore::new();
        assert!(store.get("unknown").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn set_replaces_previous_record() {
        let store = MemStore::new();
        store
            .set("fakeId", &record(json!({"a": 1})))
            .await
            .expect("first set");
        store
            .set("fakeId", &record(json!({"b": 2})))
            .await
            .expect("second set");
        let loaded = store.get("fakeId").await.expect("get").expect("present");
        assert_eq!(loaded, record(json!({"b": 2})));
    }

    #[tokio::test]
    async fn closed_store_rejects_calls() {
        let store = MemStore::new();
        store.close().await.expect("close");
        assert_eq!(store.close_count(), 1);
        let err = store.get("fakeId").await.expect_err("get after close");
        assert!(matches!(err, StoreError::Closed));
        let err = store
            .set("fakeId", &SessionRecord::new())
            .await
            .expect_err("set after close");
        assert!(matches!(err, StoreError::Closed));
    }

    #[tokio::test]
    async fn base64_codec_seals_payloads_at_rest() {
        let store = MemStore::with_codec(Arc::new(Base64Codec));
        let rec = record(json!({"some": "data"}));
        store.set("fakeId", &rec).await.expect("set");

        let raw = {
            let guard = store.records.read().unwrap();
            guard.get("fakeId").cloned().expect("raw")
        };
        assert!(
            !raw.contains(&b'{'),
            "payload should not be stored as cleartext JSON"
        );

        let loaded = store.get("fakeId").await.expect("get").expect("present");
        assert_eq!(rec, loaded);
    }
}
