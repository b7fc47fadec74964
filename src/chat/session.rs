//! The REPL dispatcher.
//!
//! `ChatSession` owns the settings, the conversation log and the renderer,
//! and turns each line of input into one command.

use crate::chat::commands::{Command, help_text, parse_command};
use crate::chat::completion::Completer;
use crate::chat::conversation::{Conversation, Loaded};
use crate::chat::input::{LineReader, ReadOutcome};
use crate::chat::settings::{Settings, SettingsStore};
use crate::observability::{
    CONVERSATIONS_LOADED, CONVERSATIONS_SAVED, REPL_COMMANDS, REPL_LINES, SETTINGS_PERSISTED,
};
use crate::render::Renderer;

/// Prompt shown for each line of chat input.
pub const PROMPT: &str = "AI CLI > ";

/// Prompt shown while editing settings.
pub const SETTINGS_KEY_PROMPT: &str = "Enter the key to modify (or 'done' to finish): ";

/// Line that ends a settings-edit session.
pub const SETTINGS_DONE: &str = "done";

/// Closing line printed when the session ends.
pub const GOODBYE: &str = "Thank you for using the AI CLI tool. Goodbye!";

/// Whether the REPL is still accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    /// Reading and dispatching lines.
    Running,
    /// Stopped by `exit` or end of input.  Absorbing.
    Terminated,
}

/// A chat session that dispatches input lines and records the conversation.
pub struct ChatSession<C: Completer, R: Renderer> {
    completer: C,
    renderer: R,
    settings: Settings,
    store: SettingsStore,
    conversation: Conversation,
    state: ReplState,
}

impl<C: Completer, R: Renderer> ChatSession<C, R> {
    /// Creates a session that persists settings edits through `store`.
    pub fn new(completer: C, renderer: R, settings: Settings, store: SettingsStore) -> Self {
        Self {
            completer,
            renderer,
            settings,
            store,
            conversation: Conversation::new(),
            state: ReplState::Running,
        }
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the conversation recorded so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns whether the session is still running.
    pub fn state(&self) -> ReplState {
        self.state
    }

    /// Returns the completer.
    pub fn completer(&self) -> &C {
        &self.completer
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consumes the session, returning the conversation and the renderer.
    pub fn into_parts(self) -> (Conversation, R) {
        (self.conversation, self.renderer)
    }

    /// Prints the welcome banner.
    pub fn greet(&mut self) {
        self.renderer
            .print_banner("AI CLI", "Welcome to the AI-powered CLI tool!");
        self.renderer
            .print_info("Type 'help' for available commands or start chatting!");
    }

    /// Reads and dispatches lines until the session terminates.
    pub async fn run<L: LineReader>(&mut self, input: &mut L) {
        while self.state == ReplState::Running {
            match input.read_line(PROMPT) {
                ReadOutcome::Line(line) => self.dispatch(&line, input).await,
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => self.state = ReplState::Terminated,
                ReadOutcome::Failed(err) => {
                    tracing::error!("failed to read input: {err}");
                    self.renderer.print_error(&format!("Input error: {err}"));
                    self.state = ReplState::Terminated;
                }
            }
        }
        self.renderer.print_info(GOODBYE);
    }

    /// Dispatches a single line.  `input` is used by commands that prompt
    /// for more input.
    pub async fn dispatch<L: LineReader>(&mut self, line: &str, input: &mut L) {
        if self.state == ReplState::Terminated {
            return;
        }
        let Some(command) = parse_command(line) else {
            return;
        };
        REPL_LINES.click();
        tracing::debug!(command = command.name(), "dispatching");
        if !matches!(command, Command::Chat(_)) {
            REPL_COMMANDS.click();
        }

        match command {
            Command::Exit => self.state = ReplState::Terminated,
            Command::Help => self.renderer.print_help(help_text()),
            Command::Settings => self.edit_settings(input),
            Command::Clear => self.renderer.clear_screen(),
            Command::Save(name) => self.save(&name),
            Command::Load(name) => self.load(&name),
            Command::Chat(prompt) => self.chat(prompt).await,
            Command::Invalid(message) => self.renderer.print_error(&message),
        }
    }

    async fn chat(&mut self, prompt: String) {
        let response = self.completer.complete(&prompt, &self.settings).await;
        self.renderer.print_response(&response);
        self.conversation.append(prompt, response);
    }

    fn edit_settings<L: LineReader>(&mut self, input: &mut L) {
        self.renderer.print_settings(&self.settings);
        loop {
            let key = match input.read_line(SETTINGS_KEY_PROMPT) {
                ReadOutcome::Line(line) => line.trim().to_string(),
                ReadOutcome::Interrupted | ReadOutcome::Eof => break,
                ReadOutcome::Failed(err) => {
                    self.renderer.print_error(&format!("Input error: {err}"));
                    break;
                }
            };
            if key == SETTINGS_DONE {
                break;
            }
            if key.is_empty() {
                continue;
            }
            if !self.settings.contains_key(&key) {
                self.renderer.print_error(&format!("Invalid key: {key}"));
                continue;
            }

            let value = match input.read_line(&format!("Enter new value for {key}: ")) {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted | ReadOutcome::Eof => break,
                ReadOutcome::Failed(err) => {
                    self.renderer.print_error(&format!("Input error: {err}"));
                    break;
                }
            };
            if let Err(err) = self.settings.set(&key, value) {
                self.renderer.print_error(&err.to_string());
                continue;
            }
            if let Err(err) = self.settings.check(&key) {
                self.renderer.print_warning(&format!(
                    "{err}; requests will fail until it is corrected"
                ));
            }
        }

        match self.store.persist(&self.settings) {
            Ok(()) => {
                SETTINGS_PERSISTED.click();
                self.renderer.print_info("Settings updated and saved.");
            }
            Err(err) => {
                tracing::error!(path = %self.store.path().display(), "failed to save settings: {err}");
                self.renderer
                    .print_error(&format!("Failed to save settings: {err}"));
            }
        }
    }

    fn save(&mut self, name: &str) {
        match self.conversation.save(name) {
            Ok(()) => {
                CONVERSATIONS_SAVED.click();
                self.renderer
                    .print_info(&format!("Conversation saved to {name}"));
            }
            Err(err) => {
                tracing::error!("failed to save conversation to {name}: {err}");
                self.renderer
                    .print_error(&format!("Failed to save conversation: {err}"));
            }
        }
    }

    fn load(&mut self, name: &str) {
        match Conversation::load(name) {
            Ok(Loaded::Found(conversation)) => {
                CONVERSATIONS_LOADED.click();
                self.conversation = conversation;
                self.renderer
                    .print_info(&format!("Conversation loaded from {name}"));
            }
            Ok(Loaded::NotFound) => {
                self.conversation = Conversation::new();
                self.renderer.print_info(&format!("File {name} not found."));
            }
            Err(err) => {
                tracing::error!("failed to load conversation from {name}: {err}");
                self.renderer
                    .print_error(&format!("Failed to load conversation: {err}"));
            }
        }
    }
}
