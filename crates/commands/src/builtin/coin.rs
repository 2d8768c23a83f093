//! Coin flip, with a small chance of landing on the edge.

use crate::error::CommandError;
use crate::types::{Command, CommandContext, CommandResponse};
use async_trait::async_trait;
use rand::Rng;

const ROLL_RANGE: u32 = 6000;
const EDGE: u32 = 2999;

pub struct CoinCommand;

fn side(roll: u32) -> &'static str {
    match roll.cmp(&EDGE) {
        std::cmp::Ordering::Less => "heads",
        std::cmp::Ordering::Greater => "tails",
        std::cmp::Ordering::Equal => "edge",
    }
}

fn flip() -> &'static str {
    side(rand::thread_rng().gen_range(0..ROLL_RANGE))
}

#[async_trait]
impl Command for CoinCommand {
    fn name(&self) -> &str {
        "coin"
    }

    fn description(&self) -> &str {
        "get heads or tails by throwing this coin"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError> {
        Ok(CommandResponse::reply(format!("🪙: {}", flip()), ctx))
    }
}
