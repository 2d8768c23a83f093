//! Cache-aside access to user-defined commands.

use crate::error::CommandError;
use crate::registry::CommandRegistry;
use command_store::{
    NewUserCommand, StoreError, UserCommand, UserCommandRepository, UserCommandUpdate,
};
use kv_cache::{CacheError, KeyValueCache};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

/// Lifetime of a cached user command unless configured otherwise.
pub const MIRROR_TTL: Duration = Duration::from_secs(60 * 60);

/// Which tier served a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Cache,
    Store,
}

/// A value together with the tier it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tiered<T> {
    pub value: T,
    pub tier: Tier,
}

/// User commands read through the cache and written to the repository.
///
/// The repository is the source of truth. Cache entries are JSON mirrors of
/// single records with a bounded lifetime, maintained best-effort after
/// successful writes.
pub struct UserCommandStore {
    cache: Arc<dyn KeyValueCache>,
    repository: Arc<dyn UserCommandRepository>,
    registry: Arc<CommandRegistry>,
    op_timeout: Duration,
    mirror_ttl: Duration,
    /// Bumped after every successful repository write.
    writes: AtomicU64,
}

impl UserCommandStore {
    pub fn new(
        cache: Arc<dyn KeyValueCache>,
        repository: Arc<dyn UserCommandRepository>,
        registry: Arc<CommandRegistry>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            repository,
            registry,
            op_timeout,
            mirror_ttl: MIRROR_TTL,
            writes: AtomicU64::new(0),
        }
    }

    /// Set how long cached commands live.
    pub fn with_mirror_ttl(mut self, ttl: Duration) -> Self {
        self.mirror_ttl = ttl;
        self
    }

    /// Cache key mirroring a single user command.
    pub fn cache_key(user_id: Uuid, name: &str) -> String {
        format!("ucs.{}.{}", user_id, name)
    }

    pub async fn get_one(&self, user_id: Uuid, name: &str) -> Result<UserCommand, CommandError> {
        self.get_one_tiered(user_id, name).await.map(|t| t.value)
    }

    /// Read a command, reporting whether the cache or the repository served it.
    ///
    /// A repository hit fills the cache only if the key is absent. If a write
    /// landed while the read was in flight the filled entry is dropped again.
    #[instrument(skip(self))]
    pub async fn get_one_tiered(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Tiered<UserCommand>, CommandError> {
        let key = Self::cache_key(user_id, name);

        if let Some(command) = self.cached(&key).await {
            return Ok(Tiered {
                value: command,
                tier: Tier::Cache,
            });
        }

        let seen = self.writes.load(Ordering::Acquire);
        let command = self
            .bounded("get_one", self.repository.get_one(user_id, name))
            .await?;
        self.fill(&key, &command).await;
        if self.writes.load(Ordering::Acquire) != seen {
            debug!(key = %key, "Write overlapped read, dropping filled entry");
            self.purge(&key).await;
        }

        Ok(Tiered {
            value: command,
            tier: Tier::Store,
        })
    }

    /// All commands owned by `user_id`, ordered by name.
    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<UserCommand>, CommandError> {
        self.bounded("get_by_user", self.repository.get_by_user(user_id))
            .await
    }

    /// Create a command. Names shadowing a built-in are rejected.
    #[instrument(skip(self, text))]
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        text: &str,
        reply: bool,
    ) -> Result<UserCommand, CommandError> {
        self.ensure_not_reserved(name)?;

        let command = self
            .bounded(
                "create",
                self.repository.create(NewUserCommand {
                    user_id,
                    name: name.to_string(),
                    text: text.to_string(),
                    reply,
                }),
            )
            .await?;
        self.written();
        self.mirror(&command).await;

        Ok(command)
    }

    /// Apply a partial update. A rename drops the mirror under the old name.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        user_id: Uuid,
        name: &str,
        update: UserCommandUpdate,
    ) -> Result<UserCommand, CommandError> {
        if let Some(new_name) = &update.new_name {
            self.ensure_not_reserved(new_name)?;
        }

        let command = self
            .bounded("update", self.repository.update(user_id, name, update))
            .await?;
        self.written();
        self.mirror(&command).await;
        if command.name != name {
            self.purge(&Self::cache_key(user_id, name)).await;
        }

        Ok(command)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, name: &str) -> Result<UserCommand, CommandError> {
        let command = self
            .bounded("delete", self.repository.delete(user_id, name))
            .await?;
        self.written();
        self.purge(&Self::cache_key(user_id, name)).await;

        Ok(command)
    }

    fn ensure_not_reserved(&self, name: &str) -> Result<(), CommandError> {
        if self.registry.is_reserved(name) {
            return Err(CommandError::InvalidInput(format!(
                "{} is a built-in command",
                name
            )));
        }
        Ok(())
    }

    fn written(&self) {
        self.writes.fetch_add(1, Ordering::AcqRel);
    }

    async fn cached(&self, key: &str) -> Option<UserCommand> {
        let bytes = match timeout(self.op_timeout, self.cache.get(key)).await {
            Ok(Ok(Some(bytes))) => bytes,
            Ok(Ok(None)) => {
                debug!(key = %key, "User command cache miss");
                return None;
            }
            Ok(Err(e)) => {
                warn!(key = %key, error = %e, "User command cache read failed");
                return None;
            }
            Err(_) => {
                warn!(key = %key, "User command cache read timed out");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Cache a record read from the repository unless the key is taken.
    async fn fill(&self, key: &str, command: &UserCommand) {
        let Some(bytes) = encode(key, command) else {
            return;
        };

        match timeout(
            self.op_timeout,
            self.cache.create(key, bytes, Some(self.mirror_ttl)),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(CacheError::KeyExists(_))) => {
                debug!(key = %key, "User command already cached");
            }
            Ok(Err(e)) => warn!(key = %key, error = %e, "Failed to cache user command"),
            Err(_) => warn!(key = %key, "Caching user command timed out"),
        }
    }

    /// Overwrite the cached copy after a repository write.
    async fn mirror(&self, command: &UserCommand) {
        let key = Self::cache_key(command.user_id, &command.name);
        let Some(bytes) = encode(&key, command) else {
            return;
        };

        match timeout(
            self.op_timeout,
            self.cache.put(&key, bytes, Some(self.mirror_ttl)),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(key = %key, error = %e, "Failed to cache user command"),
            Err(_) => warn!(key = %key, "Caching user command timed out"),
        }
    }

    async fn purge(&self, key: &str) {
        match timeout(self.op_timeout, self.cache.delete(key)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(key = %key, error = %e, "Failed to purge cached user command"),
            Err(_) => warn!(key = %key, "Purging cached user command timed out"),
        }
    }

    /// Run a repository call under the store deadline and map its error.
    async fn bounded<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, CommandError> {
        match timeout(self.op_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                match &e {
                    StoreError::NotFound { .. } | StoreError::UniqueViolation { .. } => {
                        debug!(op, error = %e, "User command store rejected operation")
                    }
                    _ => error!(op, error = %e, "User command store failed"),
                }
                Err(e.into())
            }
            Err(_) => {
                error!(op, timeout = ?self.op_timeout, "User command store timed out");
                Err(CommandError::External(format!("{} timed out", op)))
            }
        }
    }
}

fn encode(key: &str, command: &UserCommand) -> Option<Vec<u8>> {
    match serde_json::to_vec(command) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to encode user command");
            None
        }
    }
}
