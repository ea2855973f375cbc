//! Rendered-fragment cache.
//!
//! Listings are cached as finished HTML in a key-value store with expiry.
//! Two stores are provided: a process-local map and a directory of JSON
//! files for callers that outlive a single process.

use md5::{Digest, Md5};
use std::time::Duration;

use crate::constants;
use crate::error::Result;

/// File-backed store
pub mod file;
/// In-memory store
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key-value store with per-entry expiry.
pub trait CacheStore: Send + Sync {
    /// Value stored under `key`, if present and unexpired.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Drop the entry under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: CacheStore + ?Sized> CacheStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Cache key of the fragment for a keyword and page size.
pub fn cache_key(keyword: &str, limit: u32) -> String {
    let digest = Md5::digest(format!("{keyword}_{limit}").as_bytes());
    format!("{}{}", constants::cache::KEY_PREFIX, hex::encode(digest))
}
