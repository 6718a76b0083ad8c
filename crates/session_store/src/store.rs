//! Session store with one-way fallback to memory

use crate::error::StorageError;
use crate::storage::{InMemoryStore, StorageBackend};
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Infallible key-value store for session state.
///
/// Operations go to the platform backend until it returns its first error.
/// From then on this instance serves every key from its in-memory fallback
/// and never consults the platform backend again. Errors are logged and never
/// returned to callers.
pub struct SessionStore {
    platform: Arc<dyn StorageBackend>,
    fallback: InMemoryStore,
    use_fallback: AtomicBool,
}

impl SessionStore {
    pub fn new(platform: Arc<dyn StorageBackend>) -> Self {
        Self {
            platform,
            fallback: InMemoryStore::new(),
            use_fallback: AtomicBool::new(false),
        }
    }

    /// A store that starts on the in-memory map and never touches disk
    pub fn in_memory() -> Self {
        Self {
            platform: Arc::new(InMemoryStore::new()),
            fallback: InMemoryStore::new(),
            use_fallback: AtomicBool::new(true),
        }
    }

    pub fn is_using_fallback(&self) -> bool {
        self.use_fallback.load(Ordering::SeqCst)
    }

    fn switch_to_fallback(&self, operation: &str, err: &StorageError) {
        if !self.use_fallback.swap(true, Ordering::SeqCst) {
            warn!("Platform storage failed during {operation}, using in-memory fallback: {err}");
        } else {
            debug!("Platform storage failed during {operation} after fallback switch: {err}");
        }
    }

    pub async fn set_item(&self, key: &str, value: &str) {
        if !self.is_using_fallback() {
            match self.platform.set_item(key, value).await {
                Ok(()) => return,
                Err(e) => self.switch_to_fallback("set_item", &e),
            }
        }
        if let Err(e) = self.fallback.set_item(key, value).await {
            warn!("In-memory storage failed during set_item: {e}");
        }
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        if !self.is_using_fallback() {
            match self.platform.get_item(key).await {
                Ok(value) => return value,
                Err(e) => self.switch_to_fallback("get_item", &e),
            }
        }
        self.fallback.get_item(key).await.unwrap_or_else(|e| {
            warn!("In-memory storage failed during get_item: {e}");
            None
        })
    }

    pub async fn remove_item(&self, key: &str) {
        if !self.is_using_fallback() {
            match self.platform.remove_item(key).await {
                Ok(()) => return,
                Err(e) => self.switch_to_fallback("remove_item", &e),
            }
        }
        if let Err(e) = self.fallback.remove_item(key).await {
            warn!("In-memory storage failed during remove_item: {e}");
        }
    }

    pub async fn clear(&self) {
        if !self.is_using_fallback() {
            match self.platform.clear().await {
                Ok(()) => return,
                Err(e) => self.switch_to_fallback("clear", &e),
            }
        }
        if let Err(e) = self.fallback.clear().await {
            warn!("In-memory storage failed during clear: {e}");
        }
    }
}
