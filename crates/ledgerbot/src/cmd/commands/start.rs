//! `/start` and `/help`.

use crate::cmd::registry::{Command, CommandError, Deps, Registry, Request};
use crate::messages::MessageId;

/// Greeting with a short usage guide.
pub fn start() -> Command {
    Command {
        name: "start",
        description: MessageId::DescStart,
        hidden: false,
        handler: handle_start,
    }
}

fn handle_start(_: &Registry, req: &Request<'_>, deps: &mut Deps<'_>) -> Result<(), CommandError> {
    deps.reply_with(req.chat_id(), MessageId::Start, &[])
}

/// List visible commands with their descriptions.
pub fn help() -> Command {
    Command {
        name: "help",
        description: MessageId::DescHelp,
        hidden: false,
        handler: handle_help,
    }
}

fn handle_help(
    registry: &Registry,
    req: &Request<'_>,
    deps: &mut Deps<'_>,
) -> Result<(), CommandError> {
    let mut text = deps.text(MessageId::Help, &[]);
    for command in registry.visible() {
        text.push_str(&format!(
            "\n/{} - {}",
            command.name,
            deps.text(command.description, &[])
        ));
    }
    deps.reply(req.chat_id(), &text)
}
