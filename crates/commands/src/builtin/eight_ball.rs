//! Magic 8-ball answers.

use crate::error::CommandError;
use crate::types::{Command, CommandContext, CommandResponse};
use async_trait::async_trait;
use rand::seq::SliceRandom;

const ANSWERS: [&str; 20] = [
    "it is certain",
    "it is decidedly so",
    "without a doubt",
    "yes definitely",
    "you may rely on it",
    "as I see it, yes",
    "most likely",
    "outlook good",
    "yes",
    "signs point to yes",
    "reply hazy, try again",
    "ask again later",
    "better not tell you now",
    "cannot predict now",
    "concentrate and ask again",
    "don't count on it",
    "my reply is no",
    "my sources say no",
    "outlook not so good",
    "very doubtful",
];

pub struct EightBallCommand;

fn shake() -> &'static str {
    ANSWERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ANSWERS[0])
}

#[async_trait]
impl Command for EightBallCommand {
    fn name(&self) -> &str {
        "8ball"
    }

    fn description(&self) -> &str {
        "ask the magic 8-ball a question"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError> {
        // Nothing to answer without a question
        if ctx.command.args.trim().is_empty() {
            return Err(CommandError::NoAction);
        }

        Ok(CommandResponse::reply(format!("🎱: {}", shake()), ctx))
    }
}
