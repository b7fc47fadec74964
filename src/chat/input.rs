//! Line input for the chat REPL.
//!
//! The REPL reads through the [`LineReader`] trait.  The binary uses
//! [`EditorReader`], a rustyline editor with keyword completion; tests and
//! piped sessions use [`ScriptedInput`].

use std::collections::VecDeque;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::chat::commands::COMMAND_WORDS;

/// What a single read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of text, without the trailing newline.
    Line(String),
    /// The user pressed Ctrl+C.
    Interrupted,
    /// The input is exhausted (Ctrl+D).
    Eof,
    /// The terminal could not be read.
    Failed(String),
}

/// Source of input lines.
pub trait LineReader {
    /// Shows `prompt` and reads one line.
    fn read_line(&mut self, prompt: &str) -> ReadOutcome;
}

/// Tab completion for the command keywords.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandHelper;

impl CommandHelper {
    /// Returns the start offset of the word being completed and the keywords
    /// that extend it.  Only the first word of a line is completed.
    pub fn candidates(line: &str, pos: usize) -> (usize, Vec<&'static str>) {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        let word = &prefix[start..];
        if word.contains(char::is_whitespace) {
            return (pos, Vec::new());
        }
        let word = word.to_lowercase();
        let matches = COMMAND_WORDS
            .iter()
            .copied()
            .filter(|candidate| candidate.starts_with(&word))
            .collect();
        (start, matches)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = Self::candidates(line, pos);
        let pairs = matches
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}

/// Interactive terminal input backed by rustyline.
pub struct EditorReader {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl EditorReader {
    /// Creates an editor with keyword completion and in-memory history.
    pub fn new() -> Result<Self, ReadlineError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper));
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                ReadOutcome::Line(line)
            }
            Err(ReadlineError::Interrupted) => ReadOutcome::Interrupted,
            Err(ReadlineError::Eof) => ReadOutcome::Eof,
            Err(err) => ReadOutcome::Failed(err.to_string()),
        }
    }
}

/// Replays a fixed sequence of read outcomes, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pending: VecDeque<ReadOutcome>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    /// Creates input that yields each of `lines` in order.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: lines
                .into_iter()
                .map(|line| ReadOutcome::Line(line.into()))
                .collect(),
            prompts: Vec::new(),
        }
    }

    /// Creates input from raw outcomes, for interrupts and failures.
    pub fn from_outcomes(outcomes: Vec<ReadOutcome>) -> Self {
        Self {
            pending: outcomes.into(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Number of outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        self.prompts.push(prompt.to_string());
        self.pending.pop_front().unwrap_or(ReadOutcome::Eof)
    }
}
