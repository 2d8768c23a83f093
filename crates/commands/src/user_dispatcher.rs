//! Dispatcher for user-defined commands.

use crate::cooldown::CooldownStore;
use crate::error::CommandError;
use crate::user_store::UserCommandStore;
use chat_events::{ChatMessage, MessageSend};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Cooldown applied to every user command unless configured otherwise.
pub const USER_COMMAND_COOLDOWN: Duration = Duration::from_secs(10);

/// Text before the first whitespace, matched verbatim.
pub fn first_token(message: &str) -> &str {
    message
        .split_once(char::is_whitespace)
        .map_or(message, |(head, _)| head)
}

/// Resolves chat messages against the channel owner's command table.
pub struct UserCommandDispatcher {
    store: Arc<UserCommandStore>,
    cooldowns: CooldownStore,
    cooldown: Duration,
}

impl UserCommandDispatcher {
    pub fn new(store: Arc<UserCommandStore>, cooldowns: CooldownStore) -> Self {
        Self {
            store,
            cooldowns,
            cooldown: USER_COMMAND_COOLDOWN,
        }
    }

    /// Set the cooldown applied after each invocation.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Whether the first token names one of the owner's commands.
    pub async fn is_command_event(&self, event: &ChatMessage) -> bool {
        let name = first_token(&event.message);
        if name.is_empty() {
            return false;
        }
        self.store.get_one(event.user_id, name).await.is_ok()
    }

    #[instrument(
        skip_all,
        fields(
            platform = %event.platform,
            broadcaster_id = %event.broadcaster_id,
            message_id = %event.message_id,
        )
    )]
    pub async fn dispatch(&self, event: &ChatMessage) -> Result<MessageSend, CommandError> {
        let name = first_token(&event.message);
        let command = self.store.get_one(event.user_id, name).await?;

        if self
            .cooldowns
            .is_in_cooldown(event.platform, &event.broadcaster_id, &command.name)
            .await
        {
            debug!(cmd = %command.name, "User command in cooldown");
            return Err(CommandError::Forbidden("cooldown".into()));
        }

        self.cooldowns
            .set_cooldown(
                event.platform,
                &event.broadcaster_id,
                &command.name,
                self.cooldown,
            )
            .await;

        if command.text.is_empty() {
            return Err(CommandError::NoAction);
        }

        info!(cmd = %command.name, "User command executed");
        Ok(MessageSend {
            broadcaster_id: event.broadcaster_id.clone(),
            bot_id: event.bot_id.clone(),
            platform: event.platform,
            message: command.text,
            reply_to: command.reply.then(|| event.message_id.clone()),
        })
    }
}
