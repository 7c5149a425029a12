//! Disk-backed cache with time-based expiry, keyed by URL.
//!
//! Each entry is one JSON file named after the SHA-256 of its key. The cache
//! is constructed once at startup and handed to the clients that need it.

use std::future::Future;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ErfgoedError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    key: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    value: T,
}

#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCache {
    /// Open (and create if needed) a cache directory.
    pub fn open(dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            ErfgoedError::Cache(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir, ttl })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let hash = hex::encode(Sha256::digest(key.as_bytes()));
        self.dir.join(format!("{hash}.json"))
    }

    /// Look up a cached value. Missing, expired and unreadable entries are `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable cache entry");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt cache entry, ignoring");
                return None;
            }
        };

        if entry.key != key || entry.expires_at <= Utc::now() {
            return None;
        }
        tracing::debug!(key, "Cache hit");
        Some(entry.value)
    }

    /// Store a value (temp file + rename, so readers never see half an entry).
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let now = Utc::now();
        let entry = CacheEntry {
            key: key.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
            value,
        };
        let bytes = serde_json::to_vec(&entry)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| ErfgoedError::Cache(format!("cannot write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| ErfgoedError::Cache(format!("cannot write {}: {e}", path.display())))?;
        Ok(())
    }

    /// Get cached value or compute and store it.
    pub async fn get_or_insert_with<T, E, F, Fut>(&self, key: &str, f: F) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<ErfgoedError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(cached) = self.get(key).await {
            return Ok(cached);
        }

        let value = f().await?;
        self.put(key, &value).await?;
        Ok(value)
    }

    /// Delete expired entries. Returns how many files were removed.
    pub async fn evict_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(bytes) = tokio::fs::read(&path).await else {
                continue;
            };
            let stale = match serde_json::from_slice::<CacheEntry<serde_json::Value>>(&bytes) {
                Ok(entry) => entry.expires_at <= now,
                Err(_) => true,
            };
            if stale {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
