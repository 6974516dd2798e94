//! ledgerbot - keep chat account balances from the terminal.
//!
//! Each input line is handled as a chat message from one chat and user.
//!
//! # Usage
//!
//! ```bash
//! ledgerbot                                   # interactive, default ledger file
//! ledgerbot --data ./ledger.json --lang ru --statements-dir ./statements
//! ledgerbot --memory -e "/new cash" -e "/cash 200*1.5 rent" -e "/get"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use ledgerbot_core::{ChatId, UserId};
use ledgerbot_expr::DecimalEvaluator;
use ledgerbot_store::{JsonStore, MemoryStore, Storage};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cmd::registry::{Deps, Registry};
use crate::messages::Lang;
use crate::transport::{ConsoleChat, Message};

/// Keep shared account balances by typing arithmetic.
#[derive(Parser, Debug)]
#[command(name = "ledgerbot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ledger file (default: <data dir>/ledgerbot/ledger.json)
    #[arg(long, value_name = "FILE", conflicts_with = "memory")]
    data: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved
    #[arg(long)]
    memory: bool,

    /// Chat the messages belong to
    #[arg(long, value_name = "ID", default_value_t = 0, allow_negative_numbers = true)]
    chat_id: ChatId,

    /// Sender of the messages
    #[arg(long, value_name = "ID", default_value_t = 0, allow_negative_numbers = true)]
    user_id: UserId,

    /// Directory /statement writes into (default: <data dir>/ledgerbot/statements)
    #[arg(long, value_name = "DIR")]
    statements_dir: Option<PathBuf>,

    /// Reply language
    #[arg(long, value_enum, default_value_t = Lang::En)]
    lang: Lang,

    /// Handle MESSAGE and exit (repeatable; skips interactive mode)
    #[arg(short = 'e', long = "execute", value_name = "MESSAGE")]
    execute: Vec<String>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point for the bot.
pub fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ledgerbot=debug"
    } else {
        "ledgerbot=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Replies go to stdout; keep logs out of the way.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Default ledger location.
fn default_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ledgerbot").join("ledger.json"))
}

/// Default statements directory, or the working directory without a data dir.
fn default_statements_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("."),
        |p| p.join("ledgerbot").join("statements"),
    )
}

/// Interactive history location.
fn get_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ledgerbot").join("history"))
}

fn open_store(args: &Args) -> Result<Box<dyn Storage>> {
    if args.memory {
        tracing::info!("using in-memory ledger");
        return Ok(Box::new(MemoryStore::new()));
    }

    let path = match &args.data {
        Some(path) => path.clone(),
        None => default_data_path().context("no data directory found; pass --data <FILE>")?,
    };
    let store = JsonStore::open(&path)
        .with_context(|| format!("failed to open ledger {}", path.display()))?;
    tracing::info!("Ledger: {}", path.display());
    Ok(Box::new(store))
}

fn run(args: &Args) -> Result<()> {
    let mut store = open_store(args)?;
    let mut chat = ConsoleChat::stdout();
    let registry = Registry::with_default_commands();

    let statements_dir = args
        .statements_dir
        .clone()
        .unwrap_or_else(default_statements_dir);
    fs::create_dir_all(&statements_dir).with_context(|| {
        format!(
            "failed to create statements directory {}",
            statements_dir.display()
        )
    })?;
    tracing::debug!("Statements: {}", statements_dir.display());

    let mut deps = Deps {
        store: &mut *store,
        chat: &mut chat,
        evaluator: &DecimalEvaluator,
        lang: args.lang,
        statements_dir: &statements_dir,
    };

    if !args.execute.is_empty() {
        for text in &args.execute {
            let message = Message::new(args.chat_id, args.user_id, text.as_str());
            registry
                .handle(&mut deps, &message)
                .with_context(|| format!("failed to handle {text:?}"))?;
        }
        return Ok(());
    }

    run_interactive(&registry, &mut deps, args)
}

fn run_interactive(registry: &Registry, deps: &mut Deps<'_>, args: &Args) -> Result<()> {
    let mut rl: Editor<(), DefaultHistory> = DefaultEditor::new()?;

    if let Some(history_path) = get_history_path() {
        if let Some(parent) = history_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.load_history(&history_path);
    }

    println!(
        "ledgerbot {} (chat {}, user {})",
        crate::VERSION,
        args.chat_id,
        args.user_id
    );
    println!("Type /help for commands, Ctrl-D to quit.");
    println!();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if matches!(line, "exit" | "quit") {
                    break;
                }

                let message = Message::new(args.chat_id, args.user_id, line);
                match registry.handle(deps, &message) {
                    Ok(true) => {}
                    Ok(false) => eprintln!("(not a command; messages start with /)"),
                    Err(e) => eprintln!("error: {:#}", anyhow::Error::from(e)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("(interrupted)");
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        }
    }

    if let Some(history_path) = get_history_path() {
        let _ = rl.save_history(&history_path);
    }

    Ok(())
}
