//! Session record storage abstractions plus in-memory and filesystem backends.

mod fs_store;
mod mem_store;

pub use fs_store::FsStore;
pub use mem_store::MemStore;

use async_trait::async_trait;
use std::{io, path::PathBuf, sync::Arc};
use wiz_codec::RecordCodec;

/// A session record: the top-level JSON object a store holds per session id.
pub type SessionRecord = serde_json::Map<String, serde_json::Value>;

pub type StoreResult<T> = Result<T, StoreError>;
pub type DynSessionStore = Arc<dyn SessionStore>;

/// Trait implemented by all session stores.
///
/// A store keeps one JSON object per session id. `get` returns `None` for ids
/// it has never seen; records come into existence on the first `set` and a
/// later `set` replaces the record wholesale. `close` releases the backing
/// connection; every call after it fails with [`StoreError::Closed`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> StoreResult<Option<SessionRecord>>;
    async fn set(&self, session_id: &str, record: &SessionRecord) -> StoreResult<()>;
    async fn close(&self) -> StoreResult<()>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("codec error for session '{session_id}': {source}")]
    Codec {
        session_id: String,
        #[source]
        source: wiz_codec::CodecError,
    },
    #[error("store is closed")]
    Closed,
    #[error("store backend error: {0}")]
    Backend(String),
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source: err,
    }
}

pub(crate) fn seal_record(
    codec: &dyn RecordCodec,
    session_id: &str,
    record: &SessionRecord,
) -> StoreResult<Vec<u8>> {
    let plain = serde_json::to_vec(record)?;
    codec.encrypt(&plain).map_err(|source| StoreError::Codec {
        session_id: session_id.to_string(),
        source,
    })
}

pub(crate) fn unseal_record(
    codec: &dyn RecordCodec,
    session_id: &str,
    sealed: &[u8],
) -> StoreResult<SessionRecord> {
    let plain = codec.decrypt(sealed).map_err(|source| StoreError::Codec {
        session_id: session_id.to_string(),
        source,
    })?;
    Ok(serde_json::from_slice(&plain)?)
}
