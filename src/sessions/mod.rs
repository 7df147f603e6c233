//! Session management — per-conversation append-only logs.

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemorySessionStore;
pub use traits::{ExchangeEntry, Session, SessionFilter, SessionStore};

use std::sync::Arc;

/// Create the default in-memory session store.
pub fn create_session_store() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}
