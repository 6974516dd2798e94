//! ledgerbot - chat ledger bot on the terminal.
//!
//! Thin wrapper around [`ledgerbot::cmd::bot::main`].

fn main() -> std::process::ExitCode {
    ledgerbot::cmd::bot::main()
}
