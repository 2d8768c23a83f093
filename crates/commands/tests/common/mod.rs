//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chat_events::{ChannelPublisher, ChatMessage, ChatterRole, MessageSend, Platform};
use command_store::{
    MemoryRepository, NewUserCommand, StoreError, UserCommand, UserCommandRepository,
    UserCommandUpdate,
};
use commands::builtin::register_builtins;
use commands::{
    CommandDispatcher, CommandRegistry, CooldownStore, MessageRouter, UserCommandDispatcher,
    UserCommandStore, BUILTIN_NAMESPACE, USER_NAMESPACE,
};
use kv_cache::MemoryCache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

pub const OWNER: Uuid = Uuid::from_u128(0x0e6d_2b1c_9a3f_4d7e_8b15_c2a4_f6e8_1d3b);

/// Repository that can be switched off to simulate an unreachable store.
#[derive(Default)]
pub struct SwitchableRepository {
    inner: MemoryRepository,
    down: AtomicBool,
}

impl SwitchableRepository {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserCommandRepository for SwitchableRepository {
    async fn get_one(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError> {
        self.check()?;
        self.inner.get_one(user_id, name).await
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<UserCommand>, StoreError> {
        self.check()?;
        self.inner.get_by_user(user_id).await
    }

    async fn create(&self, command: NewUserCommand) -> Result<UserCommand, StoreError> {
        self.check()?;
        self.inner.create(command).await
    }

    async fn update(
        &self,
        user_id: Uuid,
        name: &str,
        update: UserCommandUpdate,
    ) -> Result<UserCommand, StoreError> {
        self.check()?;
        self.inner.update(user_id, name, update).await
    }

    async fn delete(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError> {
        self.check()?;
        self.inner.delete(user_id, name).await
    }
}

/// Fully wired command core with in-memory backends.
pub struct Harness {
    pub cache: Arc<MemoryCache>,
    pub repository: Arc<SwitchableRepository>,
    pub store: Arc<UserCommandStore>,
    pub router: MessageRouter,
    pub replies: mpsc::UnboundedReceiver<MessageSend>,
}

impl Harness {
    pub fn new() -> Self {
        let cache = Arc::new(MemoryCache::new(Duration::from_secs(60)));
        let repository = Arc::new(SwitchableRepository::default());
        let op_timeout = Duration::from_secs(1);

        let mut registry = CommandRegistry::default();
        register_builtins(&mut registry);
        let registry = Arc::new(registry);

        let store = Arc::new(UserCommandStore::new(
            cache.clone(),
            repository.clone(),
            registry.clone(),
            op_timeout,
        ));

        let builtins = CommandDispatcher::new(
            registry,
            CooldownStore::new(cache.clone(), BUILTIN_NAMESPACE, op_timeout),
            store.clone(),
        );
        let user_commands = UserCommandDispatcher::new(
            store.clone(),
            CooldownStore::new(cache.clone(), USER_NAMESPACE, op_timeout),
        );

        let (publisher, replies) = ChannelPublisher::new();
        let router = MessageRouter::new(builtins, user_commands, Arc::new(publisher));

        Self {
            cache,
            repository,
            store,
            router,
            replies,
        }
    }
}

/// Chat message in the test channel.
pub fn event(message: &str) -> ChatMessage {
    event_from(message, ChatterRole::Viewer)
}

pub fn event_from(message: &str, role: ChatterRole) -> ChatMessage {
    ChatMessage {
        platform: Platform::Twitch,
        broadcaster_id: "1001".into(),
        broadcaster_name: "Streamer".into(),
        broadcaster_login: "streamer".into(),
        chatter_id: "2002".into(),
        chatter_name: "Chatter".into(),
        chatter_login: "chatter".into(),
        chatter_role: role,
        bot_id: "3003".into(),
        user_id: OWNER,
        message_id: Uuid::new_v4().to_string(),
        message: message.into(),
        reply_to: None,
    }
}
