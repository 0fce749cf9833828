use thiserror::Error;
use wiz_store::StoreError;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session identity error: {0}")]
    Identity(anyhow::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("ambiguous journey: session holds {keys:?}, supply an explicit journey key")]
    AmbiguousJourney { keys: Vec<String> },
}
