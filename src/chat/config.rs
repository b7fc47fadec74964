//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! startup configuration.  Generation parameters are not command-line
//! options; they live in the persisted [`Settings`](crate::chat::Settings).

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::chat::settings::SettingsStore;

/// Command-line arguments for the aicli tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Enable verbose diagnostic output.
    #[arrrg(flag, "Enable debug mode")]
    pub debug: bool,

    /// Settings file to use instead of the per-user default.
    #[arrrg(optional, "Settings file (default: ~/.aicli_config.json)", "PATH")]
    pub config: Option<String>,

    /// Base URL of an OpenAI-compatible endpoint.
    #[arrrg(optional, "Completion API base URL (default: https://api.openai.com/v1/)", "URL")]
    pub base_url: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Startup configuration resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Where settings are loaded from and persisted to.
    pub settings_path: PathBuf,

    /// Endpoint override; `None` uses the default endpoint.
    pub base_url: Option<String>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether debug-level diagnostics are enabled.
    pub debug: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Settings: ~/.aicli_config.json
    /// - Endpoint: default
    /// - Color: enabled
    /// - Debug: disabled
    pub fn new() -> Self {
        Self {
            settings_path: SettingsStore::default_path(),
            base_url: None,
            use_color: true,
            debug: false,
        }
    }

    /// Sets the settings path.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    /// Sets the endpoint base URL.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables debug diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the settings store for the configured path.
    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.settings_path.clone())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            settings_path: args
                .config
                .map(PathBuf::from)
                .unwrap_or(defaults.settings_path),
            base_url: args.base_url,
            use_color: !args.no_color,
            debug: args.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.settings_path.ends_with(".aicli_config.json"));
        assert!(config.base_url.is_none());
        assert!(config.use_color);
        assert!(!config.debug);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            debug: true,
            config: Some("/tmp/aicli.json".to_string()),
            base_url: Some("http://localhost:8080/v1/".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.settings_path, PathBuf::from("/tmp/aicli.json"));
        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:8080/v1/")
        );
        assert!(!config.use_color);
        assert!(config.debug);
        assert_eq!(
            config.settings_store().path(),
            PathBuf::from("/tmp/aicli.json").as_path()
        );
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_settings_path("settings.json")
            .with_base_url(Some("http://127.0.0.1:1234/v1".to_string()))
            .without_color()
            .with_debug(true);
        assert_eq!(config.settings_path, PathBuf::from("settings.json"));
        assert!(config.base_url.is_some());
        assert!(!config.use_color);
        assert!(config.debug);
    }
}
