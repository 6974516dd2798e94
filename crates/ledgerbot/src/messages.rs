//! Reply texts in English and Russian.
//!
//! Templates use `{}` placeholders filled in order by [`t`].

use std::fmt;

/// Reply language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Lang {
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Ru => write!(f, "ru"),
        }
    }
}

/// Every reply the bot can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// Greeting.
    Start,
    /// Header of the command list.
    Help,
    /// `{name}`
    AccountCreated,
    /// Command needs an account name.
    NoAccountName,
    /// Chat has no accounts.
    NoAccountsYet,
    /// Transaction without an expression.
    NoExpression,
    /// Expression could not be evaluated.
    InvalidExpression,
    /// `{name}`
    AccDoesNotExist,
    /// `{name}`
    AccAlreadyExist,
    /// `{name}`
    AccRemoved,
    /// Header of `/list`.
    AccountList,
    /// Header of `/get`.
    Balances,
    /// `{amount} {account} {note} {balance} {tx_id}`
    BalanceUpdated,
    /// `{amount} {account} {balance}`
    BalanceReverted,
    /// Placeholder for an empty note.
    NoteNone,
    /// `/undo` without a valid id.
    NoTransactionId,
    /// `{tx_id}`
    TransactionNotFound,
    /// `{tx_id}`
    AlreadyReverted,
    /// `{name}`
    BalanceOverflow,
    /// `{rows} {path}`
    StatementWritten,
    /// `/statement` name that is not a plain file name.
    InvalidFileName,
    /// Storage or delivery failure.
    UnsuccessfulOperation,
    /// `/start` description.
    DescStart,
    /// `/help` description.
    DescHelp,
    /// `/new` description.
    DescNew,
    /// `/del` description.
    DescDel,
    /// `/list` description.
    DescList,
    /// `/get` description.
    DescGet,
    /// `/undo` description.
    DescUndo,
    /// `/statement` description.
    DescStatement,
    /// Transaction description.
    DescTransaction,
}

fn en(id: MessageId) -> &'static str {
    #[allow(clippy::enum_glob_use)]
    use MessageId::*;
    match id {
        Start => "Hi! I keep balances for this chat.\n\
                  Create an account with /new <name>, then record changes with \
                  /<name> <expression> [comment], for example /cash 200*1.5 rent.\n\
                  /help lists all commands.",
        Help => "Commands:",
        AccountCreated => "Account {} created",
        NoAccountName => "No account name given. Usage: /<command> <account_name>",
        NoAccountsYet => "You don't have any accounts yet. Use /new <account_name>",
        NoExpression => "Invalid command format. Use /<account_name> <expression> [comment]",
        InvalidExpression => "Could not evaluate the expression",
        AccDoesNotExist => "Account {} does not exist.",
        AccAlreadyExist => "Account {} already exists",
        AccRemoved => "Account {} removed",
        AccountList => "Your accounts:",
        Balances => "Balances:",
        BalanceUpdated => "Recorded {} to {}\nNote: {}\nBalance: {}\nUndo: /undo {}",
        BalanceReverted => "Reverted {} on {}\nBalance: {}",
        NoteNone => "none",
        NoTransactionId => "Give a transaction number. Usage: /undo <number>",
        TransactionNotFound => "Transaction #{} not found",
        AlreadyReverted => "Transaction #{} is already reverted",
        BalanceOverflow => "The balance of {} would be too large, nothing recorded",
        StatementWritten => "Statement with {} transaction(s) written to {}",
        InvalidFileName => "Give a plain file name without folders, like june.csv",
        UnsuccessfulOperation => "Operation failed",
        DescStart => "Start talking to the bot",
        DescHelp => "List commands",
        DescNew => "Create a new account",
        DescDel => "Delete an account",
        DescList => "List accounts",
        DescGet => "Show balances of all accounts",
        DescUndo => "Revert a transaction",
        DescStatement => "Write a CSV statement",
        DescTransaction => "Record a change to an account",
    }
}

fn ru(id: MessageId) -> Option<&'static str> {
    #[allow(clippy::enum_glob_use)]
    use MessageId::*;
    let text = match id {
        Start => "Привет! Я веду балансы этого чата.\n\
                  Создайте счет командой /new <имя>, затем записывайте изменения: \
                  /<имя> <выражение> [комментарий], например /cash 200*1.5 аренда.\n\
                  /help покажет все команды.",
        Help => "Команды:",
        AccountCreated => "Счет {} создан",
        NoAccountName => "Не указано имя счета. Пример: /<команда> <имя_счета>",
        NoAccountsYet => "У вас пока нет счетов. Используйте /new <имя_счета>",
        NoExpression => {
            "Неверный формат команды. Используйте /<имя счета> <выражение> [комментарий]"
        }
        InvalidExpression => "Не удалось вычислить выражение",
        AccDoesNotExist => "Счет {} не существует.",
        AccAlreadyExist => "Счет с именем {} уже существует",
        AccRemoved => "Счет {} удален",
        AccountList => "Ваши счета:",
        Balances => "Средств на руках:",
        BalanceUpdated => "Запомнил {} на счет {}\nКомментарий: {}\nБаланс: {}\nОтменить: /undo {}",
        BalanceReverted => "Отменено {} на счете {}\nБаланс: {}",
        NoteNone => "Нет",
        NoTransactionId => "Укажите номер операции. Пример: /undo <номер>",
        TransactionNotFound => "Операция #{} не найдена",
        AlreadyReverted => "Операция #{} уже отменена",
        BalanceOverflow => "Баланс счета {} стал бы слишком большим, ничего не записано",
        StatementWritten => "Выписка ({} операций) сохранена в {}",
        InvalidFileName => "Укажите просто имя файла без папок, например june.csv",
        UnsuccessfulOperation => "Не удалось выполнить операцию",
        DescStart => "Начать диалог с ботом",
        DescHelp => "Список команд",
        DescNew => "Создать новый счет",
        DescDel => "Удалить существующий счет",
        DescList => "Вывести список счетов",
        DescGet => "Показать баланс всех счетов",
        DescUndo => "Отменить операцию",
        DescStatement => "Получить выписку",
        DescTransaction => return None,
    };
    Some(text)
}

/// The raw template for `id`, falling back to English.
pub fn template(lang: Lang, id: MessageId) -> &'static str {
    match lang {
        Lang::En => en(id),
        Lang::Ru => ru(id).unwrap_or_else(|| en(id)),
    }
}

/// Render `id` in `lang`, substituting `args` for `{}` in order.
///
/// Placeholders without a matching argument are kept as `{}`; extra
/// arguments are ignored.
///
/// ```
/// use ledgerbot::messages::{t, Lang, MessageId};
///
/// assert_eq!(t(Lang::En, MessageId::AccRemoved, &["cash"]), "Account cash removed");
/// assert_eq!(t(Lang::Ru, MessageId::AccRemoved, &["cash"]), "Счет cash удален");
/// ```
pub fn t(lang: Lang, id: MessageId, args: &[&str]) -> String {
    fill(template(lang, id), args)
}

fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(at) = rest.find("{}") {
        out.push_str(&rest[..at]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out
}
