//! Key-value cache contract.

use crate::error::CacheError;
use async_trait::async_trait;
use std::time::Duration;

/// TTL key-value cache.
///
/// Values are opaque bytes. A `ttl` of `None` keeps the entry until it is
/// overwritten or deleted.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Get the value of a live entry, `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Create an entry only if no live entry exists under `key`.
    ///
    /// Returns [`CacheError::KeyExists`] when another writer got there first.
    async fn create(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError>;

    /// Create or overwrite an entry.
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>)
        -> Result<(), CacheError>;

    /// Remove an entry. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
