//! Colored terminal output for componentize runs.
//!
//! Progress goes to stdout, warnings and errors to stderr. Quiet mode
//! keeps errors and summaries only. Styles are stripped when the stream
//! is not a terminal.

use anstyle::{AnsiColor, Style};
use std::io::{self, Write};

const PENDING: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Cyan)));
const DONE: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green))).bold();
const WARNING: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Yellow))).bold();
const FAILURE: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red))).bold();
const HEADER: Style = Style::new().bold();

/// Writes user-facing progress lines.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn out(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = anstream::stdout();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }

    fn err(&self, line: &str) -> io::Result<()> {
        let mut stderr = anstream::stderr();
        writeln!(stderr, "{line}")?;
        stderr.flush()
    }

    /// Section header with underline.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.out(&format!("{HEADER}{title}{HEADER:#}"))?;
        self.out(&"=".repeat(title.chars().count()))
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.out(&format!("{PENDING}[ ]{PENDING:#} {message}"))
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        self.out(&format!("{DONE}[x]{DONE:#} {message}"))
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.out(&format!("    {message}"))
    }

    /// Warnings are suppressed in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err(&format!("{WARNING}[!]{WARNING:#} {message}"))
    }

    /// Errors are always printed.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.err(&format!("{FAILURE}[-]{FAILURE:#} {message}"))
    }

    /// Summary lines are always printed.
    pub fn summary(&self, message: &str) -> io::Result<()> {
        let mut stdout = anstream::stdout();
        writeln!(stdout, "{HEADER}{message}{HEADER:#}")?;
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_render_plain_when_styles_are_stripped() {
        for (style, marker) in [(PENDING, "[ ]"), (DONE, "[x]"), (WARNING, "[!]"), (FAILURE, "[-]")] {
            let styled = format!("{style}{marker}{style:#} Add");
            assert_ne!(styled, format!("{marker} Add"));
            assert_eq!(anstream::adapter::strip_str(&styled).to_string(), format!("{marker} Add"));
        }
    }

    #[test]
    fn quiet_mode_skips_progress_but_not_errors() {
        let output = OutputManager::new(true);
        assert!(output.progress("Add").is_ok());
        assert!(output.warn("Add").is_ok());
        assert!(output.error("Add").is_ok());
    }
}
