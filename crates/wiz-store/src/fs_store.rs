use crate::{
    SessionRecord, SessionStore, StoreError, StoreResult, io_error, seal_record, unseal_record,
};
use async_trait::async_trait;
use std::{
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::fs;
use wiz_codec::{DynRecordCodec, NoopCodec};

/// Filesystem-backed store rooted at `<root>/.sessions`.
///
/// One file per session id. Ids are hex-encoded on disk so arbitrary cookie
/// values cannot escape the root or collide with path syntax.
#[derive(Clone)]
pub struct FsStore {
    sessions_dir: PathBuf,
    codec: DynRecordCodec,
    closed: Arc<AtomicBool>,
}

impl fmt::Debug for FsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsStore")
            .field("sessions_dir", &self.sessions_dir)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

impl FsStore {
    pub async fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_codec(root, Arc::new(NoopCodec)).await
    }

    pub async fn open_with_codec(
        root: impl AsRef<Path>,
        codec: DynRecordCodec,
    ) -> StoreResult<Self> {
        let sessions_dir = root.as_ref().join(".sessions");
        fs::create_dir_all(&sessions_dir)
            .await
            .map_err(|e| io_error(&sessions_dir, e))?;
        Ok(Self {
            sessions_dir,
            codec,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(hex::encode(session_id.as_bytes()))
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FsStore {
    async fn get(&self, session_id: &str) -> StoreResult<Option<SessionRecord>> {
        self.ensure_open()?;
        let path = self.session_path(session_id);
        let sealed = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(path, err)),
        };
        Ok(Some(unseal_record(self.codec.as_ref(), session_id, &sealed)?))
    }

    async fn set(&self, session_id: &str, record: &SessionRecord) -> StoreResult<()> {
        self.ensure_open()?;
        let sealed = seal_record(self.codec.as_ref(), session_id, record)?;
        let path = self.session_path(session_id);
        fs::write(&path, &sealed).await.map_err(|e| io_error(path, e))
    }

    async fn close(&self) -> StoreResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
