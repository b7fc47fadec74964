//! Chat application module for the interactive REPL.
//!
//! This module provides a line-oriented chat interface on top of the
//! completion client.  It supports:
//!
//! - Keyword commands (`help`, `settings`, `clear`, `save`, `load`, `exit`)
//! - Persisted, user-editable settings
//! - Saving and loading the conversation log
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and startup configuration
//! - [`settings`]: the persisted settings mapping and its store
//! - [`conversation`]: the session's prompt/response log
//! - [`completion`]: the failure-containing completion boundary
//! - [`commands`]: keyword command parsing
//! - [`input`]: line readers
//! - [`session`]: the dispatcher that ties it together

mod commands;
mod completion;
mod config;
mod conversation;
mod input;
mod session;
mod settings;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{COMMAND_WORDS, Command, help_text, parse_command};
pub use completion::{APOLOGY, Completer, RemoteCompleter};
pub use config::{ChatArgs, ChatConfig};
pub use conversation::{Conversation, Exchange, Loaded};
pub use input::{CommandHelper, EditorReader, LineReader, ReadOutcome, ScriptedInput};
pub use session::{
    ChatSession, GOODBYE, PROMPT, ReplState, SETTINGS_DONE, SETTINGS_KEY_PROMPT,
};
pub use settings::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationParams, Settings,
    SettingsStore,
};
