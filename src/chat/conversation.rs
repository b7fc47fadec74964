//! The session-local record of prompt/response pairs.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use crate::error::{Error, Result};

/// One prompt and the text shown in response to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// What the user typed.
    pub user: String,
    /// What the model returned, or the apology on failure.
    pub ai: String,
}

impl Exchange {
    /// Creates a new exchange.
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
        }
    }
}

/// Ordered sequence of exchanges, oldest first.
///
/// Serialized as a bare JSON array of `{"user": ..., "ai": ...}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    exchanges: Vec<Exchange>,
}

/// Result of loading a conversation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// The file existed and parsed.
    Found(Conversation),
    /// No file exists at the path.
    NotFound,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an exchange to the end of the log.
    pub fn append(&mut self, user: impl Into<String>, ai: impl Into<String>) {
        self.exchanges.push(Exchange::new(user, ai));
    }

    /// Number of exchanges.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// True if no exchange has been recorded.
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Iterates over exchanges in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// The most recent exchange.
    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }

    /// Drops every exchange.
    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    /// Writes the whole log to `path`, replacing any existing content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create conversation file", err))?;
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, self).map_err(|err| {
            Error::serialization("failed to serialize conversation", Some(Box::new(err)))
        })?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a log previously written by [`Conversation::save`].
    ///
    /// A missing file is reported as [`Loaded::NotFound`] rather than an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Loaded> {
        let file = match File::open(path.as_ref()) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Loaded::NotFound),
            Err(err) => return Err(Error::io("failed to open conversation file", err)),
        };
        let reader = BufReader::new(file);
        let conversation: Conversation = from_reader(reader).map_err(|err| {
            Error::serialization("failed to parse conversation", Some(Box::new(err)))
        })?;
        Ok(Loaded::Found(conversation))
    }
}

impl From<Vec<Exchange>> for Conversation {
    fn from(exchanges: Vec<Exchange>) -> Self {
        Self { exchanges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "aicli-conversation-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn append_keeps_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());
        conversation.append("first", "one");
        conversation.append("second", "two");
        assert_eq!(conversation.len(), 2);
        let users: Vec<&str> = conversation.iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, vec!["first", "second"]);
        assert_eq!(conversation.last(), Some(&Exchange::new("second", "two")));
    }

    #[test]
    fn serializes_as_array() {
        let mut conversation = Conversation::new();
        conversation.append("hi", "hello");
        assert_eq!(
            to_value(&conversation).unwrap(),
            json!([{"user": "hi", "ai": "hello"}])
        );
    }

    #[test]
    fn save_then_load_reproduces_log() {
        let path = temp_path("round-trip");
        let mut conversation = Conversation::new();
        conversation.append("What is 2+2?", "4");
        conversation.append("And \"quoted\"\nlines?", "Sure:\n- one\n- two");
        conversation.save(&path).unwrap();

        assert_eq!(
            Conversation::load(&path).unwrap(),
            Loaded::Found(conversation)
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_overwrites_existing_file() {
        let path = temp_path("overwrite");
        let mut long = Conversation::new();
        long.append("a", "1");
        long.append("b", "2");
        long.save(&path).unwrap();

        let mut short = Conversation::new();
        short.append("c", "3");
        short.save(&path).unwrap();

        assert_eq!(Conversation::load(&path).unwrap(), Loaded::Found(short));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_is_not_found() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(Conversation::load(&path).unwrap(), Loaded::NotFound);
    }

    #[test]
    fn load_garbage_is_an_error() {
        let path = temp_path("garbage");
        fs::write(&path, "{\"user\": 1}").unwrap();
        assert!(Conversation::load(&path).unwrap_err().is_serialization());
        fs::remove_file(&path).unwrap();
    }
}
