//! Dispatcher for built-in commands.

use crate::cooldown::CooldownStore;
use crate::error::CommandError;
use crate::registry::CommandRegistry;
use crate::types::{CommandContext, ParsedCommand};
use crate::user_store::UserCommandStore;
use chat_events::{ChatMessage, MessageSend};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Resolves, rate-limits and executes built-in commands.
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
    cooldowns: CooldownStore,
    user_commands: Arc<UserCommandStore>,
}

impl CommandDispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        cooldowns: CooldownStore,
        user_commands: Arc<UserCommandStore>,
    ) -> Self {
        Self {
            registry,
            cooldowns,
            user_commands,
        }
    }

    pub fn is_command(&self, text: &str) -> bool {
        self.registry.is_command(text)
    }

    pub fn is_command_event(&self, event: &ChatMessage) -> bool {
        self.is_command(&event.message)
    }

    pub fn parse(&self, message: &str) -> ParsedCommand {
        ParsedCommand::parse(message, self.registry.prefix())
    }

    /// Run the built-in command named by `event`.
    ///
    /// The cooldown is recorded before execution, so invocations that end
    /// without a reply still start it.
    #[instrument(
        skip_all,
        fields(
            platform = %event.platform,
            broadcaster_id = %event.broadcaster_id,
            message_id = %event.message_id,
        )
    )]
    pub async fn dispatch(&self, event: &ChatMessage) -> Result<MessageSend, CommandError> {
        let parsed = self.parse(&event.message);
        let command = self.registry.resolve(&parsed.command).ok_or_else(|| {
            error!(cmd = %parsed.command, "Dispatched message does not name a command");
            CommandError::Internal(format!("unresolved command {}", parsed.command))
        })?;

        let name = command.name();
        if self
            .cooldowns
            .is_in_cooldown(event.platform, &event.broadcaster_id, name)
            .await
        {
            debug!(cmd = %name, "Command in cooldown");
            return Err(CommandError::Forbidden("cooldown".into()));
        }

        self.cooldowns
            .set_cooldown(event.platform, &event.broadcaster_id, name, command.cooldown())
            .await;

        let ctx = CommandContext::from_event(event, parsed, &self.user_commands);
        let response = match command.execute(&ctx).await {
            Ok(response) => response,
            Err(CommandError::NoAction) => return Err(CommandError::NoAction),
            Err(e) => {
                error!(
                    cmd = %name,
                    description = %command.description(),
                    error = %e,
                    "Command execution failed"
                );
                return Err(CommandError::Internal(format!("{} failed", name)));
            }
        };

        if !response.should_respond() {
            debug!(cmd = %name, "Command produced an empty response");
            return Err(CommandError::NoAction);
        }

        info!(cmd = %name, "Command executed");
        Ok(response.into_send(&ctx))
    }
}
