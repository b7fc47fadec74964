//! Output rendering for the chat REPL.
//!
//! All terminal output of the REPL goes through the [`Renderer`] trait so the
//! dispatcher can be driven against an in-memory buffer.

use std::io::{self, Stdout, Write};

use crate::chat::Settings;

/// ANSI escape code for bold text (used for panel titles).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for line numbers).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for panel borders).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for warnings).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Erase the display and home the cursor.
const ANSI_CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Trait for rendering REPL output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Capturing output in tests
pub trait Renderer {
    /// Print a titled panel, used for the welcome banner.
    fn print_banner(&mut self, title: &str, text: &str);

    /// Print the help panel.
    fn print_help(&mut self, help: &str);

    /// Print a model response.
    fn print_response(&mut self, text: &str);

    /// Print the current settings, one per line.
    fn print_settings(&mut self, settings: &Settings);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a warning.
    fn print_warning(&mut self, warning: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Clear the terminal viewport.
    fn clear_screen(&mut self);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> PlainTextRenderer<W> {
    /// Creates a renderer over an arbitrary writer.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn panel(&mut self, title: &str, body: &str) {
        let lines: Vec<&str> = body.lines().collect();
        let title_len = title.chars().count();
        let inner = lines
            .iter()
            .map(|line| line.chars().count())
            .chain(std::iter::once(title_len + 2))
            .max()
            .unwrap_or(0);

        let top = format!(
            "╭─ {} {}╮",
            self.styled(ANSI_BOLD, title),
            "─".repeat(inner - title_len - 1)
        );
        let top = self.styled(ANSI_CYAN, &top);
        let bottom = self.styled(ANSI_CYAN, &format!("╰{}╯", "─".repeat(inner + 2)));
        let side = self.styled(ANSI_CYAN, "│");

        let _ = writeln!(self.out, "{top}");
        for line in lines {
            let pad = " ".repeat(inner - line.chars().count());
            let _ = writeln!(self.out, "{side} {line}{pad} {side}");
        }
        let _ = writeln!(self.out, "{bottom}");
        self.flush();
    }
}

impl<W: Write> Renderer for PlainTextRenderer<W> {
    fn print_banner(&mut self, title: &str, text: &str) {
        self.panel(title, text);
    }

    fn print_help(&mut self, help: &str) {
        self.panel("Help", help);
    }

    fn print_response(&mut self, text: &str) {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines.len().max(1).to_string().len();
        if lines.is_empty() {
            let _ = writeln!(self.out);
        }
        for (idx, line) in lines.iter().enumerate() {
            let number = self.styled(ANSI_DIM, &format!("{:>width$} │", idx + 1));
            let _ = writeln!(self.out, "{number} {line}");
        }
        self.flush();
    }

    fn print_settings(&mut self, settings: &Settings) {
        let _ = writeln!(self.out, "Current settings:");
        for key in settings.keys() {
            let value = settings.display_value(key).unwrap_or_default();
            let _ = writeln!(self.out, "{key}: {value}");
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        let _ = writeln!(self.out, "{info}");
        self.flush();
    }

    fn print_warning(&mut self, warning: &str) {
        let text = self.styled(ANSI_YELLOW, &format!("Warning: {warning}"));
        let _ = writeln!(self.out, "{text}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        let text = self.styled(ANSI_RED, &format!("Error: {error}"));
        let _ = writeln!(self.out, "{text}");
        self.flush();
    }

    fn clear_screen(&mut self) {
        let _ = write!(self.out, "{ANSI_CLEAR_SCREEN}");
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut PlainTextRenderer<Vec<u8>>)>(f: F) -> String {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        f(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn panel_is_boxed_and_aligned() {
        let out = render(|r| r.print_help("a\nlonger line"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("╭─ Help "));
        assert!(lines[3].starts_with("╰"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
    }

    #[test]
    fn response_has_line_numbers() {
        let out = render(|r| r.print_response("first\nsecond"));
        assert_eq!(out, "1 │ first\n2 │ second\n");
    }

    #[test]
    fn messages_without_color_are_plain() {
        let out = render(|r| {
            r.print_error("boom");
            r.print_warning("careful");
            r.clear_screen();
        });
        assert_eq!(out, "Error: boom\nWarning: careful\n\x1b[2J\x1b[H");
    }

    #[test]
    fn colored_error_is_wrapped() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), true);
        renderer.print_error("boom");
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, format!("{ANSI_RED}Error: boom{ANSI_RESET}\n"));
    }

    #[test]
    fn settings_listing_masks_key() {
        let mut settings = Settings::default();
        settings.set("api_key", "sk-secret-9999").unwrap();
        let out = render(|r| r.print_settings(&settings));
        assert!(out.starts_with("Current settings:\n"));
        assert!(out.contains("api_key: **********9999\n"));
        assert!(!out.contains("secret"));
        assert!(out.contains("model: gpt-3.5-turbo\n"));
    }
}
