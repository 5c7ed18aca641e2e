//! Provider decorator keeping the last fetch in the persistent cache

use std::time::Duration;

use async_trait::async_trait;
use rand::RngExt;
use tracing::{debug, warn};

use super::TravelDataProvider;
use crate::Result;
use crate::cache::PersistentCache;
use crate::snapshot::SnapshotData;

pub struct CachedProvider<P> {
    inner: P,
    cache: PersistentCache,
    ttl: Duration,
}

impl<P: TravelDataProvider> CachedProvider<P> {
    pub fn new(inner: P, cache: PersistentCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    fn cache_key(&self) -> String {
        format!("snapshot:{}", self.inner.name())
    }
}

/// Spread expiries so that replicas sharing a store do not refetch together
fn jittered(ttl: Duration) -> Duration {
    let jitter: f64 = rand::rng().random_range(0.9..1.1);
    ttl.mul_f64(jitter)
}

#[async_trait]
impl<P: TravelDataProvider> TravelDataProvider for CachedProvider<P> {
    async fn load(&self) -> Result<SnapshotData> {
        let key = self.cache_key();

        match self.cache.get::<SnapshotData>(&key).await {
            Ok(Some(data)) => {
                debug!("Serving snapshot from cache");
                return Ok(data);
            }
            Ok(None) => {}
            Err(e) => warn!("Snapshot cache read failed, falling back to provider: {e:#}"),
        }

        let data = self.inner.load().await?;

        let ttl = jittered(self.ttl);
        if let Err(e) = self.cache.put(&key, data.clone(), ttl).await {
            warn!("Failed to cache snapshot: {e:#}");
        }
        Ok(data)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
