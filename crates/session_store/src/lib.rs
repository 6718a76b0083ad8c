//! # Session Store
//!
//! String key-value persistence for client session state. Backed by a
//! platform store, degrading to an in-memory map when the platform store
//! starts failing.

pub mod error;
pub mod storage;
pub mod store;

// Re-exports
pub use error::StorageError;
pub use storage::{FileStore, InMemoryStore, StorageBackend};
pub use store::SessionStore;
