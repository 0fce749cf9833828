use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Handler signature for closure-backed identity sources.
pub type SessionIdHandler =
    Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<String>> + Send + Sync>;

/// Supplies the current browser session id.
///
/// Implementations query the browser-automation layer for the value of the
/// session cookie. The id is resolved on every operation and never cached
/// here; the browser session can rotate mid-suite.
#[async_trait]
pub trait SessionIdSource: Send + Sync {
    async fn resolve(&self) -> anyhow::Result<String>;
}

pub type DynSessionIdSource = Arc<dyn SessionIdSource>;

/// Fixed-id source for suites that pin their session cookie up front.
#[derive(Debug, Clone)]
pub struct StaticSessionId {
    id: String,
}

impl StaticSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl SessionIdSource for StaticSessionId {
    async fn resolve(&self) -> anyhow::Result<String> {
        Ok(self.id.clone())
    }
}

/// Closure-backed source, for wiring a live browser client without writing a
/// dedicated adapter type.
#[derive(Clone)]
pub struct FnSessionId {
    handler: SessionIdHandler,
}

impl FnSessionId {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, anyhow::Result<String>> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for FnSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSessionId").finish()
    }
}

#[async_trait]
impl SessionIdSource for FnSessionId {
    async fn resolve(&self) -> anyhow::Result<String> {
        (self.handler)().await
    }
}
