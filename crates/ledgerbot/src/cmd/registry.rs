//! Command table and message dispatch.

use std::io;
use std::path::Path;

use ledgerbot_core::ChatId;
use ledgerbot_expr::Evaluator;
use ledgerbot_store::{Storage, StoreError};
use thiserror::Error;

use crate::messages::{t, Lang, MessageId};
use crate::transport::{Chat, Message};

/// Name of the command that handles `/<account> <expression>` messages.
pub const TRANSACTION: &str = "transaction";

/// Failure while handling a command.
///
/// Expected outcomes such as a missing account are replied to and are not
/// errors; these are the ones the bot could not answer properly.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A reply could not be delivered.
    #[error("failed to send reply to chat {chat_id}")]
    Send {
        /// Destination chat.
        chat_id: ChatId,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// What handlers work with.
pub struct Deps<'a> {
    /// Account storage.
    pub store: &'a mut dyn Storage,
    /// Where replies go.
    pub chat: &'a mut dyn Chat,
    /// Computes transaction amounts.
    pub evaluator: &'a dyn Evaluator,
    /// Reply language.
    pub lang: Lang,
    /// Where `/statement` writes files.
    pub statements_dir: &'a Path,
}

impl Deps<'_> {
    /// Localized text for `id`.
    pub fn text(&self, id: MessageId, args: &[&str]) -> String {
        t(self.lang, id, args)
    }

    /// Send a plain reply.
    pub fn reply(&mut self, chat_id: ChatId, text: &str) -> Result<(), CommandError> {
        self.chat
            .send(chat_id, text)
            .map_err(|source| CommandError::Send { chat_id, source })
    }

    /// Send a localized reply.
    pub fn reply_with(
        &mut self,
        chat_id: ChatId,
        id: MessageId,
        args: &[&str],
    ) -> Result<(), CommandError> {
        let text = self.text(id, args);
        self.reply(chat_id, &text)
    }
}

/// A parsed command message.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// The message as received.
    pub message: &'a Message,
    /// Command name without `/` or `@botname`.
    pub command: &'a str,
    /// Trimmed text after the command.
    pub args: &'a str,
}

impl Request<'_> {
    /// Chat the request came from.
    pub const fn chat_id(&self) -> ChatId {
        self.message.chat_id
    }
}

/// Command handler.
pub type Handler = fn(&Registry, &Request<'_>, &mut Deps<'_>) -> Result<(), CommandError>;

/// A registered command.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    /// Name typed after `/`.
    pub name: &'static str,
    /// Shown by `/help`.
    pub description: MessageId,
    /// Hidden commands are left out of `/help` and cannot be called by name.
    pub hidden: bool,
    /// What to run.
    pub handler: Handler,
}

/// Ordered set of commands.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// A registry with every built-in command.
    pub fn with_default_commands() -> Self {
        let mut registry = Self::new();
        for command in super::commands::all() {
            registry.register(command);
        }
        registry
    }

    /// Add a command, replacing one with the same name.
    pub fn register(&mut self, command: Command) {
        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(slot) => *slot = command,
            None => self.commands.push(command),
        }
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Commands shown in `/help`, in registration order.
    pub fn visible(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|c| !c.hidden)
    }

    /// Handle one incoming message.
    ///
    /// Returns `Ok(false)` if the message was not a command. Unknown commands
    /// go to the [`TRANSACTION`] handler, which treats the command name as
    /// an account. A storage failure is answered with a generic reply before
    /// being returned.
    pub fn handle(&self, deps: &mut Deps<'_>, message: &Message) -> Result<bool, CommandError> {
        let Some((name, args)) = message.command() else {
            tracing::debug!(chat_id = message.chat_id, "ignoring plain text");
            return Ok(false);
        };

        let command = match self.get(name).filter(|c| !c.hidden) {
            Some(command) => command,
            None => match self.get(TRANSACTION) {
                Some(command) => command,
                None => {
                    tracing::warn!("Unknown command: {}", name);
                    return Ok(false);
                }
            },
        };

        let request = Request {
            message,
            command: name,
            args,
        };
        tracing::debug!(
            chat_id = message.chat_id,
            user_id = message.user_id,
            command = command.name,
            "dispatch /{}",
            name
        );

        match (command.handler)(self, &request, deps) {
            Ok(()) => Ok(true),
            Err(CommandError::Store(e)) => {
                tracing::error!(chat_id = message.chat_id, "storage failure: {}", e);
                // Best effort; the storage error is the one worth reporting.
                let _ = deps.reply_with(message.chat_id, MessageId::UnsuccessfulOperation, &[]);
                Err(CommandError::Store(e))
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for Deps<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deps")
            .field("lang", &self.lang)
            .field("statements_dir", &self.statements_dir)
            .finish_non_exhaustive()
    }
}
