//! Persisted settings for the chat application.
//!
//! Settings are a flat JSON object stored in the user's home directory.
//! Values are stored exactly as the user typed them; they are only parsed
//! into typed [`GenerationParams`] when a request is built.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::types::ChatCompletionRequest;

/// File name of the settings document inside the home directory.
pub const SETTINGS_FILE_NAME: &str = ".aicli_config.json";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default maximum tokens per response.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Setting holding the API credential.
pub const KEY_API_KEY: &str = "api_key";
/// Setting holding the model identifier.
pub const KEY_MODEL: &str = "model";
/// Setting holding the response token limit.
pub const KEY_MAX_TOKENS: &str = "max_tokens";
/// Setting holding the sampling temperature.
pub const KEY_TEMPERATURE: &str = "temperature";

const MAX_TEMPERATURE: f64 = 2.0;

/// The mutable mapping of configuration keys to values.
///
/// Key order follows the file the settings were loaded from, or the default
/// order for fresh settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    /// Creates settings holding the default values.
    pub fn new() -> Self {
        let mut values = Map::new();
        values.insert(KEY_API_KEY.to_string(), json!(""));
        values.insert(KEY_MODEL.to_string(), json!(DEFAULT_MODEL));
        values.insert(KEY_MAX_TOKENS.to_string(), json!(DEFAULT_MAX_TOKENS));
        values.insert(KEY_TEMPERATURE.to_string(), json!(0.7));
        Self { values }
    }

    /// Wraps an existing mapping without adding defaults.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns true if `key` is a known setting.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over the settings in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Returns the setting names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Replaces the value of an existing setting with `value`, verbatim.
    ///
    /// Unknown keys are rejected and never created.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = Value::String(value.into());
                Ok(())
            }
            None => Err(Error::unknown_setting(key)),
        }
    }

    /// Checks that the value stored under `key` is usable in a request.
    pub fn check(&self, key: &str) -> Result<()> {
        let Some(value) = self.values.get(key) else {
            return Err(Error::unknown_setting(key));
        };
        match key {
            KEY_MAX_TOKENS => parse_max_tokens(value).map(|_| ()),
            KEY_TEMPERATURE => parse_temperature(value).map(|_| ()),
            KEY_MODEL => parse_model(value).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Parses the settings into the typed parameters of a request.
    pub fn generation(&self) -> Result<GenerationParams> {
        let api_key = match self.values.get(KEY_API_KEY) {
            Some(Value::String(key)) if !key.trim().is_empty() => Some(key.trim().to_string()),
            _ => None,
        };
        let model = parse_model(self.require(KEY_MODEL)?)?;
        let max_tokens = parse_max_tokens(self.require(KEY_MAX_TOKENS)?)?;
        let temperature = parse_temperature(self.require(KEY_TEMPERATURE)?)?;
        Ok(GenerationParams {
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Renders a value for display, masking the credential.
    pub fn display_value(&self, key: &str) -> Option<String> {
        let value = self.values.get(key)?;
        let text = value_text(value);
        if key == KEY_API_KEY {
            Some(mask_secret(&text))
        } else {
            Some(text)
        }
    }

    fn require(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| Error::validation("setting is missing", Some(key.to_string())))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed view of the settings consumed by the completion client.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// API credential; `None` defers to the environment.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerationParams {
    /// Builds a single-turn request for `prompt`.
    pub fn request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest::single_turn(&self.model, prompt, self.max_tokens)
            .with_temperature(self.temperature)
    }
}

/// Loads and persists [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user settings path, `~/.aicli_config.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILE_NAME)
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings, or returns the defaults when the file is absent.
    pub fn load(&self) -> Result<Settings> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file; using defaults");
                return Ok(Settings::default());
            }
            Err(err) => return Err(Error::io("failed to read settings file", err)),
        };
        let values: Map<String, Value> = serde_json::from_str(&text).map_err(|err| {
            Error::serialization("settings file is not a JSON object", Some(Box::new(err)))
        })?;
        tracing::debug!(path = %self.path.display(), keys = values.len(), "loaded settings");
        Ok(Settings::from_map(values))
    }

    /// Overwrites the settings file with `settings`.
    pub fn persist(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|err| Error::io("failed to create settings directory", err))?;
        }
        let file = File::create(&self.path)
            .map_err(|err| Error::io("failed to create settings file", err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, settings).map_err(|err| {
            Error::serialization("failed to serialize settings", Some(Box::new(err)))
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "(not set)".to_string();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

fn parse_model(value: &Value) -> Result<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(Error::validation(
            "expected a model name",
            Some(KEY_MODEL.to_string()),
        )),
    }
}

fn parse_max_tokens(value: &Value) -> Result<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(Error::validation(
            format!("expected a positive integer, found {}", value_text(value)),
            Some(KEY_MAX_TOKENS.to_string()),
        )),
    }
}

fn parse_temperature(value: &Value) -> Result<f32> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(t) if t.is_finite() && (0.0..=MAX_TEMPERATURE).contains(&t) => Ok(t as f32),
        _ => Err(Error::validation(
            format!(
                "expected a number between 0 and {MAX_TEMPERATURE}, found {}",
                value_text(value)
            ),
            Some(KEY_TEMPERATURE.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("aicli-settings-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        let keys: Vec<&str> = settings.keys().collect();
        assert_eq!(keys, vec!["api_key", "model", "max_tokens", "temperature"]);
        let params = settings.generation().unwrap();
        assert_eq!(params.api_key, None);
        assert_eq!(params.model, DEFAULT_MODEL);
        assert_eq!(params.max_tokens, DEFAULT_MAX_TOKENS);
        assert!((params.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::new(temp_path("missing"));
        let _ = fs::remove_file(store.path());
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn round_trip_keeps_unparsable_values() {
        let store = SettingsStore::new(temp_path("round-trip"));
        let mut settings = Settings::default();
        settings.set("max_tokens", "lots").unwrap();
        settings.set("temperature", "warm").unwrap();
        store.persist(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.get("max_tokens"), Some(&json!("lots")));
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut settings = Settings::default();
        let err = settings.set("colour", "blue").unwrap_err();
        assert!(err.is_unknown_setting());
        assert!(!settings.contains_key("colour"));
    }

    #[test]
    fn generation_parses_text_values() {
        let mut settings = Settings::default();
        settings.set("max_tokens", "42").unwrap();
        settings.set("temperature", " 0.2 ").unwrap();
        settings.set("api_key", "sk-abc").unwrap();
        let params = settings.generation().unwrap();
        assert_eq!(params.max_tokens, 42);
        assert!((params.temperature - 0.2).abs() < 1e-6);
        assert_eq!(params.api_key.as_deref(), Some("sk-abc"));

        let request = params.request("hello");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, 42);
    }

    #[test]
    fn generation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.set("max_tokens", "abc").unwrap();
        let err = settings.generation().unwrap_err();
        assert!(err.is_validation());
        assert!(settings.check("max_tokens").is_err());

        let mut settings = Settings::default();
        settings.set("max_tokens", "0").unwrap();
        assert!(settings.generation().is_err());

        let mut settings = Settings::default();
        settings.set("temperature", "3.5").unwrap();
        assert!(settings.check("temperature").is_err());
        assert!(settings.check("api_key").is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let store = SettingsStore::new(temp_path("malformed"));
        fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.load().unwrap_err().is_serialization());
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn api_key_is_masked() {
        let mut settings = Settings::default();
        assert_eq!(settings.display_value("api_key").unwrap(), "(not set)");
        settings.set("api_key", "sk-1234567890").unwrap();
        assert_eq!(settings.display_value("api_key").unwrap(), "*********7890");
        assert_eq!(settings.display_value("max_tokens").unwrap(), "150");
        assert!(settings.display_value("nope").is_none());
    }
}
