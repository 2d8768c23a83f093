//! Routes chat messages to the built-in or user-command dispatcher.

use crate::dispatcher::CommandDispatcher;
use crate::error::CommandError;
use crate::user_dispatcher::UserCommandDispatcher;
use chat_events::{ChatMessage, MessageSend, ReplyPublisher};
use std::sync::Arc;
use tracing::{debug, error, instrument, trace, warn};

/// Entry point for inbound chat messages.
///
/// Built-in commands are tried first and always shadow user commands.
pub struct MessageRouter {
    builtins: CommandDispatcher,
    user_commands: UserCommandDispatcher,
    publisher: Arc<dyn ReplyPublisher>,
}

impl MessageRouter {
    pub fn new(
        builtins: CommandDispatcher,
        user_commands: UserCommandDispatcher,
        publisher: Arc<dyn ReplyPublisher>,
    ) -> Self {
        Self {
            builtins,
            user_commands,
            publisher,
        }
    }

    /// Produce the reply for `event`, if any.
    pub async fn route(&self, event: &ChatMessage) -> Option<MessageSend> {
        let result = if self.builtins.is_command_event(event) {
            self.builtins.dispatch(event).await
        } else if self.user_commands.is_command_event(event).await {
            self.user_commands.dispatch(event).await
        } else {
            trace!(message_id = %event.message_id, "Message is not a command");
            return None;
        };

        match result {
            Ok(reply) => Some(reply),
            Err(e) if e.is_silent() => {
                debug!(message_id = %event.message_id, reason = %e, "No reply");
                None
            }
            Err(e @ CommandError::Internal(_)) => {
                error!(message_id = %event.message_id, error = %e, "Command dispatch failed");
                None
            }
            Err(e) => {
                warn!(message_id = %event.message_id, error = %e, "Command dispatch failed");
                None
            }
        }
    }

    /// Route `event` and publish the reply, if any.
    #[instrument(skip_all, fields(platform = %event.platform, broadcaster_id = %event.broadcaster_id))]
    pub async fn handle(&self, event: &ChatMessage) {
        let Some(reply) = self.route(event).await else {
            return;
        };

        if let Err(e) = self.publisher.publish(&reply).await {
            error!(error = %e, "Failed to publish reply");
        }
    }
}
