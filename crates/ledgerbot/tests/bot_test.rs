//! End-to-end command tests: messages in, replies out.

use ledgerbot::cmd::Registry;
use ledgerbot::cmd::Deps;
use ledgerbot::messages::Lang;
use ledgerbot::transport::{Chat, Message};
use ledgerbot_core::ChatId;
use ledgerbot_expr::DecimalEvaluator;
use ledgerbot_store::{JsonStore, MemoryStore, Storage};
use rust_decimal_macros::dec;
use std::io;

const CHAT: ChatId = -1001;
const USER: i64 = 77;

#[derive(Default)]
struct Recorder {
    sent: Vec<(ChatId, String)>,
}

impl Chat for Recorder {
    fn send(&mut self, chat_id: ChatId, text: &str) -> io::Result<()> {
        self.sent.push((chat_id, text.to_string()));
        Ok(())
    }
}

struct Harness<S: Storage> {
    store: S,
    chat: Recorder,
    registry: Registry,
    lang: Lang,
    statements: tempfile::TempDir,
}

impl<S: Storage> Harness<S> {
    fn new(store: S) -> Self {
        Self {
            store,
            chat: Recorder::default(),
            registry: Registry::with_default_commands(),
            lang: Lang::En,
            statements: tempfile::tempdir().unwrap(),
        }
    }

    /// Send one message from `chat_id` and return the replies it produced.
    fn send_from(&mut self, chat_id: ChatId, text: &str) -> Vec<String> {
        let before = self.chat.sent.len();
        let mut deps = Deps {
            store: &mut self.store,
            chat: &mut self.chat,
            evaluator: &DecimalEvaluator,
            lang: self.lang,
            statements_dir: self.statements.path(),
        };
        self.registry
            .handle(&mut deps, &Message::new(chat_id, USER, text))
            .unwrap();
        self.chat.sent[before..]
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn send(&mut self, text: &str) -> Vec<String> {
        self.send_from(CHAT, text)
    }

    /// The single reply to `text`.
    fn reply(&mut self, text: &str) -> String {
        let replies = self.send(text);
        assert_eq!(replies.len(), 1, "expected one reply to {text:?}: {replies:?}");
        replies.into_iter().next().unwrap()
    }
}

fn bot() -> Harness<MemoryStore> {
    Harness::new(MemoryStore::new())
}

// ============================================================================
// Accounts
// ============================================================================

#[test]
fn test_new_list_del() {
    let mut bot = bot();
    assert_eq!(bot.reply("/new cash"), "Account cash created");
    assert_eq!(bot.reply("/new card"), "Account card created");
    assert_eq!(bot.reply("/new cash"), "Account cash already exists");
    assert_eq!(bot.reply("/list"), "Your accounts:\n1) cash\n2) card");
    assert_eq!(bot.reply("/del cash"), "Account cash removed");
    assert_eq!(bot.reply("/del cash"), "Account cash does not exist.");
    assert_eq!(bot.reply("/list"), "Your accounts:\n1) card");
}

#[test]
fn test_missing_names() {
    let mut bot = bot();
    let usage = "No account name given. Usage: /<command> <account_name>";
    assert_eq!(bot.reply("/new"), usage);
    assert_eq!(bot.reply("/new   "), usage);
    assert_eq!(bot.reply("/del"), usage);
}

#[test]
fn test_empty_chat() {
    let mut bot = bot();
    let none = "You don't have any accounts yet. Use /new <account_name>";
    assert_eq!(bot.reply("/list"), none);
    assert_eq!(bot.reply("/get"), none);
}

#[test]
fn test_chats_are_separate() {
    let mut bot = bot();
    bot.reply("/new cash");
    assert_eq!(
        bot.send_from(5, "/cash 10"),
        vec!["Account cash does not exist.".to_string()]
    );
    assert!(bot.store.list_accounts(5).is_empty());
}

// ============================================================================
// Transactions
// ============================================================================

#[test]
fn test_transaction_reply() {
    let mut bot = bot();
    bot.reply("/new cash");
    assert_eq!(
        bot.reply("/cash 200*1.5 rent for june"),
        "Recorded 300 to cash\nNote: rent for june\nBalance: 300\nUndo: /undo 1"
    );
    assert_eq!(
        bot.reply("/cash -1000 - 15%"),
        "Recorded -1’000.15 to cash\nNote: none\nBalance: -700.15\nUndo: /undo 2"
    );
}

#[test]
fn test_transaction_stores_raw_expression() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash 1000 - 15 % lunch with Bob");

    let txs = bot.store.transactions(CHAT);
    assert_eq!(txs.len(), 1);
    let (account, tx) = &txs[0];
    assert_eq!(account.balance, dec!(999.85));
    assert_eq!(tx.expression, "1000 - 15 %");
    assert_eq!(tx.note, "lunch with Bob");
    assert_eq!(tx.created_by, USER);
}

#[test]
fn test_comma_decimal() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash 2,5 coffee");
    assert_eq!(bot.store.account(CHAT, "cash").unwrap().balance, dec!(2.5));
}

#[test]
fn test_unknown_account() {
    let mut bot = bot();
    assert_eq!(bot.reply("/wallet 5"), "Account wallet does not exist.");
}

#[test]
fn test_no_expression() {
    let mut bot = bot();
    bot.reply("/new cash");
    let usage = "Invalid command format. Use /<account_name> <expression> [comment]";
    assert_eq!(bot.reply("/cash"), usage);
    assert_eq!(bot.reply("/cash lunch"), usage);
    assert_eq!(bot.reply("/cash (5+"), usage);
    assert!(bot.store.transactions(CHAT).is_empty());
}

#[test]
fn test_invalid_expression() {
    let mut bot = bot();
    bot.reply("/new cash");
    assert_eq!(bot.reply("/cash 5/0"), "Could not evaluate the expression");
    assert_eq!(bot.store.account(CHAT, "cash").unwrap().balance, dec!(0));
}

#[test]
fn test_balance_overflow_is_refused() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash 79228162514264337593543950335");
    assert_eq!(
        bot.reply("/cash 79228162514264337593543950335 again"),
        "The balance of cash would be too large, nothing recorded"
    );
    assert_eq!(bot.store.transactions(CHAT).len(), 1);
    assert_eq!(
        bot.reply("/cash -1"),
        "Recorded -1 to cash\nNote: none\nBalance: 79’228’162’514’264’337’593’543’950’334\nUndo: /undo 2"
    );
}

#[test]
fn test_bot_suffix() {
    let mut bot = bot();
    bot.reply("/new@ledger_bot cash");
    bot.reply("/cash@ledger_bot 42");
    assert_eq!(bot.store.account(CHAT, "cash").unwrap().balance, dec!(42));
}

#[test]
fn test_plain_text_ignored() {
    let mut bot = bot();
    bot.reply("/new cash");
    assert!(bot.send("cash 100").is_empty());
    assert!(bot.send("").is_empty());
}

// ============================================================================
// Balances and undo
// ============================================================================

#[test]
fn test_get_aligns_balances() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/new card");
    bot.reply("/cash 1500");
    bot.reply("/card -20.5");
    assert_eq!(bot.reply("/get"), "Balances:\n1’500  cash\n-20.5  card");
}

#[test]
fn test_undo() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash 100");
    bot.reply("/cash 40 taxi");
    assert_eq!(bot.reply("/undo 2"), "Reverted -40 on cash\nBalance: 100");
    assert_eq!(bot.reply("/undo 2"), "Transaction #2 is already reverted");
    assert_eq!(bot.reply("/undo 9"), "Transaction #9 not found");
    assert_eq!(
        bot.reply("/undo"),
        "Give a transaction number. Usage: /undo <number>"
    );
}

#[test]
fn test_undo_that_would_overflow() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash -79228162514264337593543950335");
    bot.reply("/cash 79228162514264337593543950335");
    bot.reply("/cash 79228162514264337593543950335");
    assert_eq!(
        bot.reply("/undo 1"),
        "The balance of cash would be too large, nothing recorded"
    );
    assert_eq!(
        bot.reply("/undo 3"),
        "Reverted -79’228’162’514’264’337’593’543’950’335 on cash\nBalance: 0"
    );
    assert_eq!(
        bot.reply("/undo 1").lines().last().unwrap(),
        "Balance: 79’228’162’514’264’337’593’543’950’335"
    );
}

#[test]
fn test_undo_from_other_chat() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash 100");
    assert_eq!(
        bot.send_from(5, "/undo 1"),
        vec!["Transaction #1 not found".to_string()]
    );
}

// ============================================================================
// Help, language, statements, persistence
// ============================================================================

#[test]
fn test_help_lists_visible_commands() {
    let mut bot = bot();
    let help = bot.reply("/help");
    assert!(help.starts_with("Commands:\n/start - "));
    assert!(help.contains("\n/undo - Revert a transaction"));
    assert!(!help.contains("transaction -"));
}

#[test]
fn test_russian_replies() {
    let mut bot = bot();
    bot.lang = Lang::Ru;
    assert_eq!(bot.reply("/new cash"), "Счет cash создан");
    assert_eq!(
        bot.reply("/cash 10"),
        "Запомнил 10 на счет cash\nКомментарий: Нет\nБаланс: 10\nОтменить: /undo 1"
    );
}

#[test]
fn test_statement_command() {
    let mut bot = bot();
    bot.reply("/new cash");
    bot.reply("/cash 5 a");
    bot.reply("/cash 6 b");
    let path = bot.statements.path().join("out.csv");
    assert_eq!(
        bot.reply("/statement out.csv"),
        format!("Statement with 2 transaction(s) written to {}", path.display())
    );
    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_statement_default_name() {
    let mut bot = bot();
    let reply = bot.reply("/statement");
    assert!(reply.starts_with("Statement with 0 transaction(s) written to "));
    let files: Vec<_> = std::fs::read_dir(bot.statements.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with(&format!("statement_{CHAT}_")));
}

#[test]
fn test_statement_stays_in_its_directory() {
    let outside = tempfile::tempdir().unwrap();
    let target = outside.path().join("stolen.csv");

    let mut bot = bot();
    bot.reply("/new cash");
    let refusal = "Give a plain file name without folders, like june.csv";
    for name in [
        target.display().to_string(),
        "../stolen.csv".to_string(),
        "..".to_string(),
        "sub/out.csv".to_string(),
    ] {
        assert_eq!(bot.reply(&format!("/statement {name}")), refusal);
    }
    assert!(!target.exists());
    assert_eq!(std::fs::read_dir(bot.statements.path()).unwrap().count(), 0);
}

#[test]
fn test_statement_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let mut bot = bot();
    let mut deps = Deps {
        store: &mut bot.store,
        chat: &mut bot.chat,
        evaluator: &DecimalEvaluator,
        lang: Lang::En,
        statements_dir: &missing,
    };
    let message = Message::new(CHAT, USER, "/statement out.csv");
    assert!(bot.registry.handle(&mut deps, &message).is_err());
    assert_eq!(bot.chat.sent.last().unwrap().1, "Operation failed");
}

#[test]
fn test_json_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    let mut bot = Harness::new(JsonStore::open(&path).unwrap());
    bot.reply("/new cash");
    bot.reply("/cash 250 salary");
    drop(bot);

    let mut bot = Harness::new(JsonStore::open(&path).unwrap());
    assert_eq!(bot.reply("/get"), "Balances:\n250  cash");
    assert_eq!(bot.reply("/undo 1"), "Reverted -250 on cash\nBalance: 0");
}
