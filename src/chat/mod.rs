//! Chat application module for interactive conversations with Gemini.
//!
//! This module provides the REPL pieces shared by the `geminius-chat` and
//! `geminius-think` binaries:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: history ownership and exchange execution
//! - [`commands`]: slash command parsing
//! - [`history`]: the append-only conversation record
//! - [`repl`]: the read-eval-print loop itself

mod commands;
mod config;
mod history;
mod repl;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatArgsError, ChatConfig, ChatVariant, parse_temperature};
pub use history::{History, HistoryEntry, Role};
pub use repl::{connect, run};
pub use session::{ChatSession, SessionStats};
