//! Chat command dispatch for the bot.
//!
//! A [`MessageRouter`] sends each inbound message to the built-in
//! [`CommandDispatcher`] or, failing that, to the [`UserCommandDispatcher`].
//! Both rate-limit per channel through a [`CooldownStore`]; user commands are
//! read through the [`UserCommandStore`] cache.

mod cooldown;
mod dispatcher;
mod error;
mod registry;
mod router;
mod types;
mod user_dispatcher;
mod user_store;
pub mod builtin;

pub use cooldown::{CooldownStore, BUILTIN_NAMESPACE, USER_NAMESPACE};
pub use dispatcher::CommandDispatcher;
pub use error::CommandError;
pub use registry::CommandRegistry;
pub use router::MessageRouter;
pub use types::*;
pub use user_dispatcher::{first_token, UserCommandDispatcher, USER_COMMAND_COOLDOWN};
pub use user_store::{Tier, Tiered, UserCommandStore, MIRROR_TTL};


#[cfg(test)]
mod tests {
    use super::*;
    use chat_events::ChatterRole;

    #[test]
    fn test_parse_command() {
        let parsed = ParsedCommand::parse("!dice 20", "!");
        assert_eq!(parsed.prefix, "!");
        assert_eq!(parsed.command, "dice");
        assert_eq!(parsed.args, "20");

        let parsed = ParsedCommand::parse("!8ball will it rain?", "!");
        assert_eq!(parsed.command, "8ball");
        assert_eq!(parsed.args, "will it rain?");

        let parsed = ParsedCommand::parse("!ping", "!");
        assert_eq!(parsed.command, "ping");
        assert_eq!(parsed.args, "");
    }

    #[test]
    fn test_parse_without_prefix_keeps_head() {
        let parsed = ParsedCommand::parse("hello world", "!");
        assert_eq!(parsed.command, "hello");
        assert_eq!(parsed.args, "world");
    }

    #[test]
    fn test_builtin_registry() {
        let registry = test_support::registry();

        let names: Vec<&str> = registry.commands().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["ping", "8ball", "dice", "coin", "gamba", "cmd"]);
        for alias in ["cmdadd", "cmddel", "cmdedit"] {
            assert_eq!(registry.resolve(alias).unwrap().name(), "cmd");
        }
        assert!(registry
            .commands()
            .iter()
            .all(|c| c.cooldown() == DEFAULT_COOLDOWN));
    }

    #[tokio::test]
    async fn test_response_into_send() {
        let store = test_support::user_store();
        let ctx = test_support::context(&store, "!ping", ChatterRole::Viewer);

        let send = CommandResponse::reply("pong", &ctx).into_send(&ctx);
        assert_eq!(send.broadcaster_id, "1001");
        assert_eq!(send.bot_id, "3003");
        assert_eq!(send.message, "pong");
        assert_eq!(send.reply_to.as_deref(), Some("msg-1"));
    }

    #[test]
    fn test_store_error_mapping() {
        use command_store::StoreError;
        use uuid::Uuid;

        let unique = StoreError::UniqueViolation {
            user_id: Uuid::nil(),
            name: "!hi".into(),
        };
        assert!(matches!(CommandError::from(unique), CommandError::InvalidInput(_)));

        let missing = StoreError::NotFound {
            user_id: Uuid::nil(),
            name: "!hi".into(),
        };
        assert!(matches!(CommandError::from(missing), CommandError::NotFound(_)));

        let down = StoreError::Unavailable("disk full".into());
        assert_eq!(
            CommandError::from(down),
            CommandError::External("command storage unavailable".into())
        );
    }
}
