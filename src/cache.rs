//! Persistent TTL cache backed by fjall
//!
//! Values are encoded with postcard next to the time they were stored and
//! the time they expire. Store access runs on the blocking thread pool.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::task;
use tracing::debug;

use crate::{Result, TravelAtlasError};

const KEYSPACE: &str = "snapshots";

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    stored_at: i64,  // Unix timestamp (seconds)
    expires_at: i64, // Unix timestamp (seconds)
}

pub struct PersistentCache {
    _db: fjall::Database,
    store: Keyspace,
}

fn cache_error(action: &str) -> impl Fn(fjall::Error) -> TravelAtlasError + '_ {
    move |e| TravelAtlasError::cache(format!("Failed to {action}: {e}"))
}

fn join_error(e: task::JoinError) -> TravelAtlasError {
    TravelAtlasError::cache(format!("Cache task failed: {e}"))
}

impl PersistentCache {
    /// Opens (or creates) the cache database under `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(path.as_ref())
            .open()
            .map_err(cache_error("open cache database"))?;
        let store = db
            .keyspace(KEYSPACE, fjall::KeyspaceCreateOptions::default)
            .map_err(cache_error("open cache keyspace"))?;
        Ok(PersistentCache { _db: db, store })
    }

    /// Stores a serializable value with a time-to-live (TTL).
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now();
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|_| TravelAtlasError::cache("TTL out of range"))?;
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TravelAtlasError::cache("TTL overflow"))?;
        let entry = StoredEntry {
            value,
            stored_at: now.timestamp(),
            expires_at: expires_at.timestamp(),
        };
        let bytes = postcard::to_stdvec(&entry)
            .map_err(|e| TravelAtlasError::cache(format!("Failed to encode entry: {e}")))?;

        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(join_error)?
            .map_err(cache_error("write entry"))?;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses, expired and undecodable entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();
        let maybe_bytes = task::spawn_blocking(move || {
            store.get(key_bytes).map(|v| v.map(|bytes| bytes.to_vec()))
        })
        .await
        .map_err(join_error)?
        .map_err(cache_error("read entry"))?;

        let Some(bytes) = maybe_bytes else {
            debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = match postcard::from_bytes(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Dropping undecodable entry: {e}");
                self.remove(key).await?;
                return Ok(None);
            }
        };

        let now = Utc::now().timestamp();
        if now < entry.expires_at {
            let stored_at = DateTime::from_timestamp(entry.stored_at, 0);
            debug!(?stored_at, "Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(join_error)?
            .map_err(cache_error("remove entry"))?;
        Ok(())
    }
}

impl Debug for PersistentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentCache").finish_non_exhaustive()
    }
}
