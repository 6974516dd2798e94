//! Bot commands and the `ledgerbot` entry point.
//!
//! [`registry`] routes `/command` messages to the handlers in [`commands`];
//! [`bot`] wires a store, a chat and the registry together for the binary.

pub mod bot;
pub mod commands;
pub mod registry;

pub use registry::{Command, CommandError, Deps, Handler, Registry, Request, TRANSACTION};
