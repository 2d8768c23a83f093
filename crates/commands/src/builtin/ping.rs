//! Liveness check.

use crate::error::CommandError;
use crate::types::{Command, CommandContext, CommandResponse};
use async_trait::async_trait;

pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "im gonna ping"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError> {
        Ok(CommandResponse::reply("pong", ctx))
    }
}
