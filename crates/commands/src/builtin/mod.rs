//! Built-in commands.

mod cmd;
mod coin;
mod dice;
mod eight_ball;
mod gamba;
mod ping;

pub use cmd::CmdCommand;
pub use coin::CoinCommand;
pub use dice::DiceCommand;
pub use eight_ball::EightBallCommand;
pub use gamba::GambaCommand;
pub use ping::PingCommand;

use crate::registry::CommandRegistry;
use std::sync::Arc;

/// Register every built-in command.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(Arc::new(PingCommand));
    registry.register(Arc::new(EightBallCommand));
    registry.register(Arc::new(DiceCommand));
    registry.register(Arc::new(CoinCommand));
    registry.register(Arc::new(GambaCommand));
    registry.register(Arc::new(CmdCommand));
}
