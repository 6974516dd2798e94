//! Incoming messages and reply delivery.

use std::io::{self, Write};

use ledgerbot_core::{ChatId, UserId};

/// A text message received from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Chat the message came from; replies go back here.
    pub chat_id: ChatId,
    /// Sender.
    pub user_id: UserId,
    /// Message text.
    pub text: String,
}

impl Message {
    /// Create a message.
    pub fn new(chat_id: ChatId, user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            user_id,
            text: text.into(),
        }
    }

    /// Split a `/command args` message into command name and arguments.
    ///
    /// Returns `None` for text that does not start with `/`. A `@botname`
    /// suffix on the command is dropped and the arguments are trimmed.
    ///
    /// ```
    /// use ledgerbot::transport::Message;
    ///
    /// let msg = Message::new(1, 2, "/cash@ledger_bot  200*1.5 rent ");
    /// assert_eq!(msg.command(), Some(("cash", "200*1.5 rent")));
    /// assert_eq!(Message::new(1, 2, "hello").command(), None);
    /// ```
    pub fn command(&self) -> Option<(&str, &str)> {
        let text = self.text.trim().strip_prefix('/')?;
        let (command, args) = match text.find(char::is_whitespace) {
            Some(i) => (&text[..i], text[i..].trim()),
            None => (text, ""),
        };
        let command = command.split_once('@').map_or(command, |(name, _)| name);
        Some((command, args))
    }
}

/// Something replies can be sent through.
pub trait Chat {
    /// Deliver `text` to `chat_id`.
    fn send(&mut self, chat_id: ChatId, text: &str) -> io::Result<()>;
}

/// Prints replies to a writer, one blank line between them.
#[derive(Debug)]
pub struct ConsoleChat<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleChat<W> {
    /// Print replies to `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Take the writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleChat<io::Stdout> {
    /// Print replies to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Chat for ConsoleChat<W> {
    fn send(&mut self, _chat_id: ChatId, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(text: &str) -> Option<(String, String)> {
        Message::new(0, 0, text)
            .command()
            .map(|(c, a)| (c.to_string(), a.to_string()))
    }

    fn some(command: &str, args: &str) -> Option<(String, String)> {
        Some((command.to_string(), args.to_string()))
    }

    #[test]
    fn test_command_without_args() {
        assert_eq!(cmd("/list"), some("list", ""));
        assert_eq!(cmd("  /get  "), some("get", ""));
    }

    #[test]
    fn test_command_with_args() {
        assert_eq!(cmd("/new savings"), some("new", "savings"));
        assert_eq!(cmd("/cash\t5+5 coffee"), some("cash", "5+5 coffee"));
    }

    #[test]
    fn test_bot_suffix_stripped() {
        assert_eq!(cmd("/get@my_ledger_bot"), some("get", ""));
        assert_eq!(cmd("/new@bot card"), some("new", "card"));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(cmd("just chatting"), None);
        assert_eq!(cmd(""), None);
    }

    #[test]
    fn test_bare_slash() {
        assert_eq!(cmd("/"), some("", ""));
    }

    #[test]
    fn test_console_chat_output() {
        let mut chat = ConsoleChat::new(Vec::new());
        chat.send(1, "first").unwrap();
        chat.send(1, "second").unwrap();
        assert_eq!(
            String::from_utf8(chat.into_inner()).unwrap(),
            "first\n\nsecond\n\n"
        );
    }
}
