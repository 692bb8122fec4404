//! Session persistence.
//!
//! The session file is the only durable link between invocations: each run
//! is a fresh process, so the store is the source of truth for
//! conversation memory. See [`store::SessionStore`].

pub mod store;

pub use store::{SESSION_TTL_HOURS, SessionStore};
