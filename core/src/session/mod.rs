//! Session lifecycle: the one piece of process-wide shared mutable state.
//!
//! Reads go through [`SessionStore::current`] or the broadcast
//! subscription; writes are serialized inside the store's own methods.

pub mod store;
pub mod types;

pub use store::SessionStore;
pub use types::{Identity, Session, SessionEvent, SESSION_KEY};
