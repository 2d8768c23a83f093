//! Moderator command for managing a channel's custom commands.

use crate::error::CommandError;
use crate::types::{Command, CommandContext, CommandResponse};
use async_trait::async_trait;
use chat_events::ChatterRole;
use command_store::UserCommandUpdate;

const CREATE_OP: &str = "add";
const UPDATE_OP: &str = "edit";
const DELETE_OP: &str = "del";
const LIST_OP: &str = "list";

const DESCRIPTION: &str =
    "example: !cmd (add|edit|del|list) command_name text of command (only for add or edit)";

/// `cmd add|edit|del|list`, also reachable as `cmdadd`, `cmddel` and `cmdedit`.
pub struct CmdCommand;

fn op_usage(op: &str) -> String {
    match op {
        CREATE_OP | UPDATE_OP => format!(
            "{} example: !cmd {} !customcommand Response to custom command! PogChamp",
            op, op
        ),
        DELETE_OP => format!("{} example: !cmd {} !customcommand", op, op),
        _ => DESCRIPTION.to_string(),
    }
}

/// Chat-safe rendering of a failed store operation.
fn render_error(action: &str, err: &CommandError) -> String {
    match err {
        CommandError::InvalidInput(reason) => format!("couldn't {} command: {}", action, reason),
        CommandError::NotFound(_) => "command not found".to_string(),
        _ => format!("couldn't {} command, try again later", action),
    }
}

/// Split off the first space-separated word, trimming both halves.
fn cut(input: &str) -> (&str, &str) {
    let (head, tail) = input.trim().split_once(' ').unwrap_or((input.trim(), ""));
    (head.trim(), tail.trim())
}

impl CmdCommand {
    async fn create(&self, ctx: &CommandContext<'_>, rest: &str) -> String {
        let (name, text) = cut(rest);
        if name.is_empty() || text.is_empty() {
            return op_usage(CREATE_OP);
        }

        match ctx
            .user_commands
            .create(ctx.channel.owner_id, name, text, false)
            .await
        {
            Ok(_) => "command created!".to_string(),
            Err(e) => render_error("create", &e),
        }
    }

    async fn update(&self, ctx: &CommandContext<'_>, rest: &str) -> String {
        let (name, text) = cut(rest);
        if name.is_empty() || text.is_empty() {
            return op_usage(UPDATE_OP);
        }

        match ctx
            .user_commands
            .update(ctx.channel.owner_id, name, UserCommandUpdate::text(text))
            .await
        {
            Ok(_) => "command updated!".to_string(),
            Err(e) => render_error("update", &e),
        }
    }

    async fn delete(&self, ctx: &CommandContext<'_>, rest: &str) -> String {
        let (name, _) = cut(rest);
        if name.is_empty() {
            return op_usage(DELETE_OP);
        }

        match ctx.user_commands.delete(ctx.channel.owner_id, name).await {
            Ok(_) => "command deleted!".to_string(),
            Err(e) => render_error("delete", &e),
        }
    }

    async fn list(&self, ctx: &CommandContext<'_>) -> String {
        match ctx.user_commands.get_by_user(ctx.channel.owner_id).await {
            Ok(commands) if commands.is_empty() => "no custom commands yet".to_string(),
            Ok(commands) => {
                let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
                format!("commands: {}", names.join(", "))
            }
            Err(e) => render_error("list", &e),
        }
    }
}

#[async_trait]
impl Command for CmdCommand {
    fn name(&self) -> &str {
        "cmd"
    }

    fn aliases(&self) -> &[&str] {
        &["cmdadd", "cmddel", "cmdedit"]
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandResponse, CommandError> {
        if !ctx.has_role(ChatterRole::Moderator) {
            return Err(CommandError::NoAction);
        }

        let invoked = ctx.command.command.as_str();
        let (operation, rest) = if self.aliases().contains(&invoked) {
            (invoked.trim_start_matches("cmd"), ctx.command.args.as_str())
        } else {
            cut(&ctx.command.args)
        };

        let message = match operation {
            CREATE_OP => self.create(ctx, rest).await,
            UPDATE_OP => self.update(ctx, rest).await,
            DELETE_OP => self.delete(ctx, rest).await,
            LIST_OP => self.list(ctx).await,
            _ => DESCRIPTION.to_string(),
        };

        Ok(CommandResponse::reply(message, ctx))
    }
}
