//! Per-channel command cooldowns backed by the shared cache.

use chat_events::Platform;
use kv_cache::{CacheError, KeyValueCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// Key namespace for built-in command cooldowns.
pub const BUILTIN_NAMESPACE: &str = "cmdm";

/// Key namespace for user command cooldowns.
pub const USER_NAMESPACE: &str = "ucmd";

/// Cooldown markers stored as TTL entries in a [`KeyValueCache`].
///
/// Cache failures never block or fail a command: reads fail open and writes
/// are logged and dropped.
#[derive(Clone)]
pub struct CooldownStore {
    cache: Arc<dyn KeyValueCache>,
    namespace: String,
    op_timeout: Duration,
}

impl CooldownStore {
    pub fn new(
        cache: Arc<dyn KeyValueCache>,
        namespace: impl Into<String>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
            op_timeout,
        }
    }

    /// Cache key for a command in a channel.
    pub fn key(&self, platform: Platform, scope: &str, name: &str) -> String {
        format!("{}.{}.{}.{}", self.namespace, platform, scope, name)
    }

    /// Whether a live cooldown marker exists.
    pub async fn is_in_cooldown(&self, platform: Platform, scope: &str, name: &str) -> bool {
        let key = self.key(platform, scope, name);

        match timeout(self.op_timeout, self.cache.get(&key)).await {
            Ok(Ok(value)) => value.is_some(),
            Ok(Err(e)) => {
                error!(key = %key, error = %e, "Cooldown lookup failed");
                false
            }
            Err(_) => {
                warn!(key = %key, "Cooldown lookup timed out");
                false
            }
        }
    }

    /// Start a cooldown unless one is already running.
    pub async fn set_cooldown(&self, platform: Platform, scope: &str, name: &str, ttl: Duration) {
        let key = self.key(platform, scope, name);

        match timeout(self.op_timeout, self.cache.create(&key, Vec::new(), Some(ttl))).await {
            Ok(Ok(())) => {}
            Ok(Err(CacheError::KeyExists(_))) => {
                debug!(key = %key, "Cooldown already set");
            }
            Ok(Err(e)) => {
                error!(key = %key, error = %e, "Failed to set cooldown");
            }
            Err(_) => {
                warn!(key = %key, "Setting cooldown timed out");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{HangingCache, MockCache};
    use kv_cache::MemoryCache;

    fn store(cache: Arc<dyn KeyValueCache>) -> CooldownStore {
        CooldownStore::new(cache, BUILTIN_NAMESPACE, Duration::from_secs(1))
    }

    #[test]
    fn test_key_format() {
        let cooldowns = store(Arc::new(MockCache::new()));
        assert_eq!(
            cooldowns.key(Platform::Twitch, "1001", "ping"),
            "cmdm.twitch.1001.ping"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_and_expire() {
        let cooldowns = store(Arc::new(MemoryCache::new(Duration::from_secs(60))));

        assert!(!cooldowns.is_in_cooldown(Platform::Kick, "1", "ping").await);

        cooldowns
            .set_cooldown(Platform::Kick, "1", "ping", Duration::from_secs(5))
            .await;
        assert!(cooldowns.is_in_cooldown(Platform::Kick, "1", "ping").await);
        // Other channels and platforms are unaffected
        assert!(!cooldowns.is_in_cooldown(Platform::Kick, "2", "ping").await);
        assert!(!cooldowns.is_in_cooldown(Platform::Twitch, "1", "ping").await);

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(!cooldowns.is_in_cooldown(Platform::Kick, "1", "ping").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_does_not_extend_running_cooldown() {
        let cooldowns = store(Arc::new(MemoryCache::new(Duration::from_secs(60))));

        cooldowns
            .set_cooldown(Platform::Twitch, "1", "dice", Duration::from_secs(5))
            .await;
        tokio::time::advance(Duration::from_secs(3)).await;
        cooldowns
            .set_cooldown(Platform::Twitch, "1", "dice", Duration::from_secs(5))
            .await;
        tokio::time::advance(Duration::from_secs(3)).await;

        assert!(!cooldowns.is_in_cooldown(Platform::Twitch, "1", "dice").await);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_open() {
        let mut cache = MockCache::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Err(CacheError::Unavailable("connection refused".into())));

        let cooldowns = store(Arc::new(cache));
        assert!(!cooldowns.is_in_cooldown(Platform::Twitch, "1", "ping").await);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let mut cache = MockCache::new();
        cache
            .expect_create()
            .withf(|key, _, ttl| key == "cmdm.twitch.1.ping" && *ttl == Some(Duration::from_secs(5)))
            .times(1)
            .returning(|_, _, _| Err(CacheError::Unavailable("connection refused".into())));

        let cooldowns = store(Arc::new(cache));
        cooldowns
            .set_cooldown(Platform::Twitch, "1", "ping", Duration::from_secs(5))
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_cache_times_out() {
        let cooldowns = store(Arc::new(HangingCache));

        assert!(!cooldowns.is_in_cooldown(Platform::Youtube, "1", "ping").await);
        cooldowns
            .set_cooldown(Platform::Youtube, "1", "ping", Duration::from_secs(5))
            .await;
    }
}
