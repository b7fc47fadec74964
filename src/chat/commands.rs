//! Keyword command parsing for the chat REPL.
//!
//! Every non-empty line is classified into a [`Command`].  Keywords match
//! case-insensitively; `exit`, `help`, `settings` and `clear` must be the
//! whole line, while `save` and `load` take the rest of the line as a file
//! name.  Anything else is a prompt for the model.

/// Keywords offered for tab completion.
pub const COMMAND_WORDS: &[&str] = &["help", "exit", "settings", "clear", "save", "load"];

/// A classified line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the REPL.
    Exit,

    /// Display help information.
    Help,

    /// Edit the persisted settings interactively.
    Settings,

    /// Clear the terminal.
    Clear,

    /// Save the conversation to the named file.
    Save(String),

    /// Replace the conversation with the contents of the named file.
    Load(String),

    /// Send the line to the model.
    Chat(String),

    /// Report a usage error back to the caller.
    Invalid(String),
}

impl Command {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::Help => "help",
            Command::Settings => "settings",
            Command::Clear => "clear",
            Command::Save(_) => "save",
            Command::Load(_) => "load",
            Command::Chat(_) => "chat",
            Command::Invalid(_) => "invalid",
        }
    }
}

/// Classifies one line of input.
///
/// Returns `None` for blank input, which the REPL ignores.
///
/// # Examples
///
/// ```
/// # use aicli::chat::{Command, parse_command};
/// assert_eq!(parse_command("EXIT"), Some(Command::Exit));
/// assert_eq!(parse_command("save chat.json"), Some(Command::Save("chat.json".into())));
/// assert_eq!(parse_command("   "), None);
/// ```
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let keyword = parts.next()?.to_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let command = match (keyword.as_str(), argument) {
        ("exit", None) => Command::Exit,
        ("help", None) => Command::Help,
        ("settings", None) => Command::Settings,
        ("clear", None) => Command::Clear,
        ("save", Some(name)) => Command::Save(name.to_string()),
        ("save", None) => Command::Invalid("Usage: save <filename>".to_string()),
        ("load", Some(name)) => Command::Load(name.to_string()),
        ("load", None) => Command::Invalid("Usage: load <filename>".to_string()),
        _ => Command::Chat(input.to_string()),
    };
    Some(command)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  help                   Display this help message
  exit                   Exit the program
  settings               Modify tool settings
  clear                  Clear the screen
  save <filename>        Save the conversation
  load <filename>        Load a saved conversation

For any other input, I'll try to assist you using AI!"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_line_keywords() {
        assert_eq!(parse_command("exit"), Some(Command::Exit));
        assert_eq!(parse_command("  Exit  "), Some(Command::Exit));
        assert_eq!(parse_command("HELP"), Some(Command::Help));
        assert_eq!(parse_command("settings"), Some(Command::Settings));
        assert_eq!(parse_command("Clear"), Some(Command::Clear));
    }

    #[test]
    fn parse_save_and_load() {
        assert_eq!(
            parse_command("save session.json"),
            Some(Command::Save("session.json".to_string()))
        );
        assert_eq!(
            parse_command("LOAD   my chats/today.json  "),
            Some(Command::Load("my chats/today.json".to_string()))
        );
    }

    #[test]
    fn missing_filename_is_invalid() {
        assert!(matches!(
            parse_command("save"),
            Some(Command::Invalid(msg)) if msg.contains("save <filename>")
        ));
        assert!(matches!(
            parse_command("load   "),
            Some(Command::Invalid(msg)) if msg.contains("load <filename>")
        ));
    }

    #[test]
    fn keyword_with_trailing_text_is_chat() {
        assert_eq!(
            parse_command("help me write a haiku"),
            Some(Command::Chat("help me write a haiku".to_string()))
        );
        assert_eq!(
            parse_command("exiting vim?"),
            Some(Command::Chat("exiting vim?".to_string()))
        );
    }

    #[test]
    fn keywords_never_become_chat() {
        for word in COMMAND_WORDS {
            for variant in [word.to_string(), word.to_uppercase()] {
                assert!(
                    !matches!(parse_command(&variant), Some(Command::Chat(_))),
                    "{variant} was forwarded to the model"
                );
            }
        }
    }

    #[test]
    fn non_commands() {
        assert_eq!(
            parse_command("foo bar baz"),
            Some(Command::Chat("foo bar baz".to_string()))
        );
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command(" \t "), None);
    }

    #[test]
    fn help_text_lists_commands() {
        let help = help_text();
        for word in COMMAND_WORDS {
            assert!(help.contains(word), "help text is missing {word}");
        }
    }
}
