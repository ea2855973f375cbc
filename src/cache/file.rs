use chrono::Utc;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::CacheStore;
use crate::error::{Error, Result};

/// On-disk form of one entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    /// Unix seconds after which the entry is stale.
    expires_at: i64,
}

/// TTL store keeping one JSON file per key in a directory.
///
/// The directory is created on first write. Unreadable or corrupt files are
/// treated as misses and deleted.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entry files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let safe = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let stem = if safe {
            key.to_string()
        } else {
            hex::encode(Md5::digest(key.as_bytes()))
        };
        self.dir.join(format!("{stem}.json"))
    }

    fn discard(path: &Path) {
        if let Err(e) = fs_err::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Failed to remove cache entry: {e}");
            }
        }
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let raw = match fs_err::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read cache entry: {e}");
                return None;
            }
        };

        let entry: StoredEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Discarding corrupt cache entry {}: {e}", path.display());
                Self::discard(&path);
                return None;
            }
        };

        if Utc::now().timestamp() < entry.expires_at {
            Some(entry.value)
        } else {
            tracing::debug!("Evicting expired cache entry {}", key);
            Self::discard(&path);
            None
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        fs_err::create_dir_all(&self.dir)?;

        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let entry = StoredEntry {
            value: value.to_string(),
            expires_at: Utc::now().timestamp().saturating_add(ttl),
        };

        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        fs_err::write(&tmp, serde_json::to_vec(&entry)?)?;
        fs_err::rename(&tmp, &path).map_err(|e| Error::io(e, path.clone()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        match fs_err::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(e, path)),
        }
    }
}
