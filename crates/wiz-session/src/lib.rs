//! Session-state manager for end-to-end wizard test suites.
//!
//! A browser under test identifies itself with a session cookie; the cookie
//! value keys a JSON session record in an external store. State for each
//! wizard journey lives under a prefixed sub-key of that record, so several
//! journeys share one browser session without collision. [`SessionManager`]
//! owns the read/merge/write protocol over those records; the store, the
//! browser-automation layer, and the at-rest codec are injected collaborators.

pub mod config;
pub mod error;
pub mod identity;
pub mod journey;
pub mod manager;
pub mod merge;

pub use config::{DEFAULT_JOURNEY_PREFIX, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use identity::{
    DynSessionIdSource, FnSessionId, SessionIdHandler, SessionIdSource, StaticSessionId,
};
pub use journey::ResolvedSession;
pub use manager::SessionManager;
