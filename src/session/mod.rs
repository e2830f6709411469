//! Session identity: a stable opaque token correlating one installation's messages.

mod id;
mod provider;
mod store;

pub use id::SessionId;
pub use provider::{SessionIdentityProvider, SESSION_STORAGE_KEY};
pub use store::{
    FileSessionStore, MemorySessionStore, NullSessionStore, SessionStore, StoreError, StoreResult,
    STATE_DIR_ENV,
};
