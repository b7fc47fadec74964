//! Interactive command-line chat client.
//!
//! Reads a line at a time, runs keyword commands, and forwards everything
//! else to an OpenAI-compatible chat-completions endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Start chatting with the settings in ~/.aicli_config.json
//! aicli
//!
//! # Verbose diagnostics on stderr
//! aicli --debug
//!
//! # Use a local OpenAI-compatible server and a separate settings file
//! aicli --base-url http://localhost:11434/v1/ --config ./aicli.json
//! ```
//!
//! # Commands
//!
//! - `help` - Show available commands
//! - `settings` - Edit settings (type `done` to finish)
//! - `clear` - Clear the screen
//! - `save <file>` - Save the conversation
//! - `load <file>` - Load a saved conversation
//! - `exit` - Exit the application

use arrrg::CommandLine;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use aicli::chat::{
    ChatArgs, ChatConfig, ChatSession, EditorReader, PlainTextRenderer, RemoteCompleter, Settings,
};

/// Main entry point for the aicli application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("aicli [OPTIONS]");
    let config = ChatConfig::from(args);
    init_tracing(config.debug);

    let store = config.settings_store();
    let settings = match store.load() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                path = %store.path().display(),
                "could not read settings, using defaults: {err}"
            );
            Settings::default()
        }
    };

    let completer = RemoteCompleter::new().with_base_url(config.base_url.clone());
    let renderer = PlainTextRenderer::with_color(config.use_color);
    let mut input = EditorReader::new()?;

    let mut session = ChatSession::new(completer, renderer, settings, store);
    session.greet();
    session.run(&mut input).await;
    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the level chosen by `--debug`.
fn init_tracing(debug: bool) {
    let default_directive = if debug { "aicli=debug" } else { "aicli=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
