use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::CacheStore;
use crate::error::Result;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    cached_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_fresh(&self) -> bool {
        self.cached_at.elapsed() < self.ttl
    }
}

/// Process-local TTL map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, fresh or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // a panic mid-insert cannot leave the map inconsistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        let lookup = entries
            .get(key)
            .map(|entry| entry.is_fresh().then(|| entry.value.clone()));
        match lookup {
            Some(Some(value)) => Some(value),
            Some(None) => {
                tracing::debug!("Evicting expired cache entry {}", key);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                cached_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
