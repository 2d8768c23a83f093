//! Core types for chat commands.

use crate::error::CommandError;
use crate::user_store::UserCommandStore;
use async_trait::async_trait;
use chat_events::{ChatMessage, ChatterRole, MessageSend, Platform};
use std::time::Duration;
use uuid::Uuid;

/// Prefix that marks a chat message as a built-in command.
pub const COMMAND_PREFIX: &str = "!";

/// Cooldown applied to a built-in command unless it overrides it.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// A chat message split into prefix, command name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub prefix: String,
    pub command: String,
    pub args: String,
}

impl ParsedCommand {
    /// Split `message` at the first whitespace.
    ///
    /// The head loses `prefix` if it starts with it, the tail is kept verbatim.
    pub fn parse(message: &str, prefix: &str) -> Self {
        let (head, args) = message
            .split_once(char::is_whitespace)
            .unwrap_or((message, ""));

        Self {
            prefix: prefix.to_string(),
            command: head.strip_prefix(prefix).unwrap_or(head).to_string(),
            args: args.to_string(),
        }
    }
}

/// A chatter or bot account on a platform.
#[derive(Debug, Clone, Default)]
pub struct PlatformUser {
    pub id: String,
    pub name: String,
    pub login: String,
    pub role: ChatterRole,
}

/// The channel a command was invoked in.
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub login: String,
    pub platform: Platform,
    /// Role of the channel owner, always broadcaster.
    pub role: ChatterRole,
    /// Internal id of the channel owner.
    pub owner_id: Uuid,
}

/// The triggering chat message.
#[derive(Debug, Clone)]
pub struct MessageRef {
    pub id: String,
    pub text: String,
    pub reply_to: Option<String>,
}

/// Everything a command needs to produce a response.
pub struct CommandContext<'a> {
    pub chatter: PlatformUser,
    pub channel: Channel,
    pub bot: PlatformUser,
    pub message: MessageRef,
    pub command: ParsedCommand,
    /// Access to the channel's user-defined commands.
    pub user_commands: &'a UserCommandStore,
}

impl<'a> CommandContext<'a> {
    pub fn from_event(
        event: &ChatMessage,
        command: ParsedCommand,
        user_commands: &'a UserCommandStore,
    ) -> Self {
        Self {
            chatter: PlatformUser {
                id: event.chatter_id.clone(),
                name: event.chatter_name.clone(),
                login: event.chatter_login.clone(),
                role: event.chatter_role,
            },
            channel: Channel {
                id: event.broadcaster_id.clone(),
                name: event.broadcaster_name.clone(),
                login: event.broadcaster_login.clone(),
                platform: event.platform,
                role: ChatterRole::Broadcaster,
                owner_id: event.user_id,
            },
            bot: PlatformUser {
                id: event.bot_id.clone(),
                ..Default::default()
            },
            message: MessageRef {
                id: event.message_id.clone(),
                text: event.message.clone(),
                reply_to: event.reply_to.clone(),
            },
            command,
            user_commands,
        }
    }

    /// Whether the chatter holds at least `role` in this channel.
    pub fn has_role(&self, role: ChatterRole) -> bool {
        self.chatter.role >= role
    }
}

/// Reply produced by a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResponse {
    pub message: String,
    /// Message id to thread the reply to.
    pub reply_to: Option<String>,
    /// Reserved for platforms with whispers; never set by built-ins.
    pub private: bool,
}

impl CommandResponse {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// A reply threaded to the triggering message.
    pub fn reply(message: impl Into<String>, ctx: &CommandContext<'_>) -> Self {
        Self {
            message: message.into(),
            reply_to: Some(ctx.message.id.clone()),
            private: false,
        }
    }

    pub fn should_respond(&self) -> bool {
        !self.message.is_empty()
    }

    /// Address the response to the channel the context came from.
    pub fn into_send(self, ctx: &CommandContext<'_>) -> MessageSend {
        MessageSend {
            broadcaster_id: ctx.channel.id.clone(),
            bot_id: ctx.bot.id.clone(),
            platform: ctx.channel.platform,
            message: self.message,
            reply_to: self.reply_to,
        }
    }
}

/// A built-in chat command.
#[async_trait]
pub trait Command: Send + Sync {
    /// Canonical name, without prefix.
    fn name(&self) -> &str;

    /// Alternative names resolving to the same command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    fn description(&self) -> &str {
        ""
    }

    /// Per-channel cooldown applied after each invocation.
    fn cooldown(&self) -> Duration {
        DEFAULT_COOLDOWN
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError>;
}
