//! Wiring of the command core and the event loop.

use crate::config::Config;
use chat_events::{ChatMessage, ReplyPublisher};
use command_store::UserCommandRepository;
use commands::builtin::register_builtins;
use commands::{
    CommandDispatcher, CommandRegistry, CooldownStore, MessageRouter, UserCommandDispatcher,
    UserCommandStore, BUILTIN_NAMESPACE, USER_NAMESPACE,
};
use kv_cache::KeyValueCache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_stream::{Stream, StreamExt};
use tracing::{error, info, warn};

/// Build the router over the given backends.
pub fn build_router(
    config: &Config,
    cache: Arc<dyn KeyValueCache>,
    repository: Arc<dyn UserCommandRepository>,
    publisher: Arc<dyn ReplyPublisher>,
) -> MessageRouter {
    let mut registry = CommandRegistry::new(config.bot.command_prefix.clone());
    register_builtins(&mut registry);
    info!("Registered {} built-in commands", registry.len());
    let registry = Arc::new(registry);

    let user_commands = Arc::new(
        UserCommandStore::new(
            cache.clone(),
            repository,
            registry.clone(),
            config.store.op_timeout,
        )
        .with_mirror_ttl(config.store.cache_ttl),
    );

    let builtins = CommandDispatcher::new(
        registry,
        CooldownStore::new(cache.clone(), BUILTIN_NAMESPACE, config.cache.op_timeout),
        user_commands.clone(),
    );
    let custom = UserCommandDispatcher::new(
        user_commands,
        CooldownStore::new(cache, USER_NAMESPACE, config.cache.op_timeout),
    )
    .with_cooldown(config.cooldown.user_command);

    MessageRouter::new(builtins, custom, publisher)
}

/// Handle events until the stream ends or `shutdown` resolves.
///
/// Every event runs in its own task bounded by `handle_timeout`. Returns the
/// tasks still in flight.
pub async fn run<S, F>(
    router: Arc<MessageRouter>,
    events: S,
    handle_timeout: Duration,
    shutdown: F,
) -> JoinSet<()>
where
    S: Stream<Item = ChatMessage>,
    F: Future,
{
    let mut events = std::pin::pin!(events);
    let mut shutdown = std::pin::pin!(shutdown);
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    info!("Event stream closed");
                    break;
                };

                let router = router.clone();
                tasks.spawn(async move {
                    if timeout(handle_timeout, router.handle(&event)).await.is_err() {
                        warn!(
                            message_id = %event.message_id,
                            timeout = ?handle_timeout,
                            "Event handling timed out"
                        );
                    }
                });
            }
            Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = result {
                    error!("Event task failed: {}", e);
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    tasks
}

/// Wait for in-flight tasks, aborting whatever is left after `deadline`.
pub async fn drain(mut tasks: JoinSet<()>, deadline: Duration) {
    if tasks.is_empty() {
        return;
    }
    info!("Waiting for {} in-flight events", tasks.len());

    let finished = timeout(deadline, async {
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!("Event task failed: {}", e);
            }
        }
    })
    .await;

    if finished.is_err() {
        warn!("Aborting {} events after {:?}", tasks.len(), deadline);
        tasks.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_events::{ChannelPublisher, EventReceiver, Platform};
    use command_store::MemoryRepository;
    use kv_cache::MemoryCache;
    use std::io::Cursor;
    use tokio::io::BufReader;

    fn event_line(message: &str, message_id: &str) -> String {
        serde_json::json!({
            "platform": "kick",
            "broadcasterID": "42",
            "chatterID": "7",
            "chatterRole": "viewer",
            "botID": "99",
            "userID": uuid::Uuid::nil(),
            "messageID": message_id,
            "message": message,
        })
        .to_string()
    }

    fn router(config: &Config, publisher: ChannelPublisher) -> Arc<MessageRouter> {
        Arc::new(build_router(
            config,
            Arc::new(MemoryCache::new(config.cache.sweep_interval)),
            Arc::new(MemoryRepository::new()),
            Arc::new(publisher),
        ))
    }

    #[tokio::test]
    async fn test_run_until_stream_ends() {
        let config = Config::default();
        let (publisher, mut replies) = ChannelPublisher::new();
        let router = router(&config, publisher);

        let input = [
            event_line("!ping", "m1"),
            "not json".to_string(),
            event_line("hello", "m2"),
            event_line("!coin", "m3"),
        ]
        .join("\n");
        let events = EventReceiver::new(BufReader::new(Cursor::new(input.into_bytes()))).stream();

        let tasks = run(router, events, config.bot.handle_timeout, std::future::pending::<()>()).await;
        drain(tasks, config.bot.shutdown_timeout).await;

        let mut messages = Vec::new();
        while let Ok(reply) = replies.try_recv() {
            assert_eq!(reply.platform, Platform::Kick);
            assert_eq!(reply.broadcaster_id, "42");
            messages.push(reply.message);
        }
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m == "pong"));
        assert!(messages.iter().any(|m| m.starts_with("🪙: ")));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let config = Config::default();
        let (publisher, _replies) = ChannelPublisher::new();
        let router = router(&config, publisher);

        let tasks = run(
            router,
            tokio_stream::pending::<ChatMessage>(),
            config.bot.handle_timeout,
            async {},
        )
        .await;

        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let mut config = Config::default();
        config.bot.command_prefix = "?".into();
        let (publisher, mut replies) = ChannelPublisher::new();
        let router = router(&config, publisher);

        let input = [event_line("!ping", "m1"), event_line("?ping", "m2")].join("\n");
        let events = EventReceiver::new(BufReader::new(Cursor::new(input.into_bytes()))).stream();

        let tasks = run(router, events, config.bot.handle_timeout, std::future::pending::<()>()).await;
        drain(tasks, config.bot.shutdown_timeout).await;

        let reply = replies.try_recv().unwrap();
        assert_eq!(reply.reply_to.as_deref(), Some("m2"));
        assert!(replies.try_recv().is_err());
    }
}
