use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::identity::DynSessionIdSource;
use crate::journey::{self, ResolvedSession};
use crate::merge::shallow_merge;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use wiz_store::{DynSessionStore, SessionRecord};

/// Orchestrates session reads and writes for one test suite.
///
/// The manager is stateless across calls apart from the injected store
/// connection, which stays open for the whole suite. Every operation
/// re-resolves the session id and re-fetches the record, so reads always
/// reflect the store's latest state at the cost of a round-trip per call.
pub struct SessionManager {
    store: DynSessionStore,
    identity: DynSessionIdSource,
    config: SessionConfig,
    closed: AtomicBool,
}

impl SessionManager {
    pub fn new(store: DynSessionStore, identity: DynSessionIdSource) -> Self {
        Self::with_config(store, identity, SessionConfig::default())
    }

    pub fn with_config(
        store: DynSessionStore,
        identity: DynSessionIdSource,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            identity,
            config,
            closed: AtomicBool::new(false),
        }
    }

    /// Current session id as reported by the identity source.
    pub async fn session_id(&self) -> SessionResult<String> {
        self.identity.resolve().await.map_err(SessionError::Identity)
    }

    /// Full session record for the current identity. Ids the store has never
    /// seen read as an empty record.
    pub async fn fetch_record(&self) -> SessionResult<SessionRecord> {
        let session_id = self.session_id().await?;
        let record = self.store.get(&session_id).await?.unwrap_or_default();
        debug!(
            "fetched session '{}' ({} top-level keys)",
            session_id,
            record.len()
        );
        Ok(record)
    }

    /// Merge `patch` into the journey record at `prefix + journey_key` and
    /// write the full session record back, keyed by the identity resolved at
    /// the start of the call. Other journeys and top-level metadata are
    /// carried over untouched.
    pub async fn save_record(&self, journey_key: &str, patch: SessionRecord) -> SessionResult<()> {
        let session_id = self.session_id().await?;
        let mut record = self.fetch_record().await?;
        let key = self.config.namespaced_key(journey_key);
        let mut journey = journey::journey_record(&record, &key);
        shallow_merge(&mut journey, patch);
        record.insert(key.clone(), Value::Object(journey));
        debug!("saving session '{}' under '{}'", session_id, key);
        self.store.set(&session_id, &record).await?;
        Ok(())
    }

    /// Journey data for `journey_key`, or for the only journey present when
    /// no key is given. Read-only; the store is not touched beyond the fetch.
    pub async fn get_session_data(
        &self,
        journey_key: Option<&str>,
    ) -> SessionResult<ResolvedSession> {
        let record = self.fetch_record().await?;
        journey::resolve(&self.config.journey_prefix, &record, journey_key)
    }

    /// Shallow-merge `patch` into the journey record for `journey_key` and
    /// persist the result. Fields absent from `patch` keep their old values.
    pub async fn set_session_data(
        &self,
        journey_key: &str,
        patch: SessionRecord,
    ) -> SessionResult<()> {
        let resolved = self.get_session_data(Some(journey_key)).await?;
        let mut journey = resolved.data;
        shallow_merge(&mut journey, patch);
        self.save_record(journey_key, journey).await
    }

    /// Replace the `steps` field of the journey record, leaving every other
    /// field of that journey untouched.
    pub async fn set_session_steps(
        &self,
        journey_key: &str,
        steps: Vec<String>,
    ) -> SessionResult<()> {
        let mut patch = SessionRecord::new();
        patch.insert("steps".to_string(), Value::from(steps));
        self.set_session_data(journey_key, patch).await
    }

    /// Release the store connection. Later calls are no-ops; the store sees
    /// exactly one close regardless of how the suite ended.
    pub async fn close(&self) -> SessionResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        debug!("closing session store");
        self.store.close().await?;
        Ok(())
    }
}
