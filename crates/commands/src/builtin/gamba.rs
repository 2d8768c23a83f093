//! Three-reel slot machine.

use crate::error::CommandError;
use crate::types::{Command, CommandContext, CommandResponse};
use async_trait::async_trait;
use rand::Rng;

const REEL: [&str; 8] = ["🍒", "🍋", "🔔", "💎", "⭐", "🍇", "🍊", "🔥"];

pub struct GambaCommand;

fn spin() -> String {
    let mut rng = rand::thread_rng();
    (0..3).map(|_| REEL[rng.gen_range(0..REEL.len())]).collect()
}

#[async_trait]
impl Command for GambaCommand {
    fn name(&self) -> &str {
        "gamba"
    }

    fn description(&self) -> &str {
        "gamba"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError> {
        Ok(CommandResponse::reply(format!("🎰: {}", spin()), ctx))
    }
}
