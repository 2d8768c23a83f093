//! Dice roll with a configurable number of sides.

use crate::error::CommandError;
use crate::types::{Command, CommandContext, CommandResponse};
use async_trait::async_trait;
use rand::Rng;

const MIN_SIDES: i64 = 2;
const MAX_SIDES: i64 = 100;
const DEFAULT_SIDES: i64 = 6;

pub struct DiceCommand;

fn parse_sides(args: &str) -> Result<i64, CommandError> {
    let args = args.trim();
    let sides = if args.is_empty() {
        DEFAULT_SIDES
    } else {
        args.parse::<i64>()
            .map_err(|_| CommandError::InvalidInput("sides are not integer".into()))?
    };

    if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
        return Err(CommandError::InvalidInput(format!(
            "sides are limited to {}..{}",
            MIN_SIDES, MAX_SIDES
        )));
    }
    Ok(sides)
}

/// Roll in `MIN_SIDES..=sides`.
fn roll(sides: i64) -> i64 {
    rand::thread_rng().gen_range(MIN_SIDES..=sides)
}

#[async_trait]
impl Command for DiceCommand {
    fn name(&self) -> &str {
        "dice"
    }

    fn description(&self) -> &str {
        "roll a dice with N sides (default N=6, min N=2, max N=100)"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError> {
        let sides = parse_sides(&ctx.command.args)?;
        Ok(CommandResponse::reply(format!("🎲: {}", roll(sides)), ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use chat_events::ChatterRole;

    fn rolled(response: &CommandResponse) -> i64 {
        response
            .message
            .strip_prefix("🎲: ")
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_parse_sides() {
        assert_eq!(parse_sides("").unwrap(), 6);
        assert_eq!(parse_sides(" 20 ").unwrap(), 20);
        assert_eq!(parse_sides("2").unwrap(), 2);
        assert_eq!(parse_sides("100").unwrap(), 100);
    }

    #[tokio::test]
    async fn test_out_of_range_sides() {
        let store = test_support::user_store();

        for args in ["0", "1", "101", "-5", "six"] {
            let ctx = test_support::context(&store, &format!("!dice {}", args), ChatterRole::Viewer);
            assert!(
                matches!(DiceCommand.execute(&ctx).await, Err(CommandError::InvalidInput(_))),
                "args {:?} should be rejected",
                args
            );
        }
    }

    #[tokio::test]
    async fn test_roll_within_bounds() {
        let store = test_support::user_store();
        let default = test_support::context(&store, "!dice", ChatterRole::Viewer);
        let twenty = test_support::context(&store, "!dice 20", ChatterRole::Viewer);

        for _ in 0..200 {
            let value = rolled(&DiceCommand.execute(&default).await.unwrap());
            assert!((2..=6).contains(&value));

            let value = rolled(&DiceCommand.execute(&twenty).await.unwrap());
            assert!((2..=20).contains(&value));
        }
    }
}
