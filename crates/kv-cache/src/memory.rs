//! In-memory key-value cache with TTL expiration.

use crate::cache::KeyValueCache;
use crate::error::CacheError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Entry in the cache with optional expiration.
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

type Entries = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// In-memory cache with automatic TTL expiration.
///
/// Expired entries are invisible to readers immediately and physically
/// removed by a background sweep.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Entries,
}

impl MemoryCache {
    /// Create a new in-memory cache.
    ///
    /// Spawns a background task that sweeps expired entries every
    /// `sweep_interval`. The task stops once the last handle is dropped.
    pub fn new(sweep_interval: Duration) -> Self {
        let cache = Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        };

        let entries = Arc::downgrade(&cache.entries);
        tokio::spawn(async move {
            sweep_loop(entries, sweep_interval).await;
        });

        info!(
            "In-memory cache initialized (sweep_interval={:?})",
            sweep_interval
        );

        cache
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        let now = Instant::now();
        entries.values().filter(|entry| entry.is_live(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

async fn sweep_loop(entries: Weak<RwLock<HashMap<String, CacheEntry>>>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;

        let Some(entries) = entries.upgrade() else {
            debug!("Cache dropped, stopping sweep");
            return;
        };

        let removed = sweep(&entries).await;
        if removed > 0 {
            debug!("Swept {} expired cache entries", removed);
        }
    }
}

async fn sweep(entries: &Entries) -> usize {
    let now = Instant::now();
    let mut entries = entries.write().await;
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    before - entries.len()
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().await;
        let now = Instant::now();

        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    #[instrument(skip(self, value))]
    async fn create(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();

        if entries.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Err(CacheError::KeyExists(key.to_string()));
        }

        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }

    #[instrument(skip(self, value))]
    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
