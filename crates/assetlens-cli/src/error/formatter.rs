//! Error formatting for CLI output.

use std::error::Error;
use std::fmt::Write as _;

use crate::error::CliError;
use crate::output::style::{Color, Styled};

/// Error output formatter
pub struct ErrorFormatter {
    color: bool,
    verbose: bool,
}

impl ErrorFormatter {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Format and print an error to stderr
    pub fn print(&self, error: &CliError) {
        eprint!("{}", self.format(error));
    }

    /// Format an error to a string
    pub fn format(&self, error: &CliError) -> String {
        let mut output = String::new();

        let prefix = Styled::new(format!("error[{}]:", error.code()), self.color)
            .fg(Color::Red)
            .bold();
        let _ = writeln!(output, "{prefix} {error}");

        if self.verbose {
            self.format_source_chain(&mut output, error);
        }

        if let CliError::Io { path: Some(p), .. } = error {
            let label = Styled::new("path:", self.color).fg(Color::BrightBlack);
            let _ = writeln!(output, "  {label} {}", p.display());
        }

        if let Some(hint) = error.hint() {
            let label = Styled::new("hint:", self.color).fg(Color::Cyan).bold();
            let _ = writeln!(output, "{label} {hint}");
        }

        let suggestions = error.suggestions();
        if !suggestions.is_empty() {
            let label = Styled::new("did you mean:", self.color)
                .fg(Color::Yellow)
                .bold();
            let _ = writeln!(output, "{label}");
            for suggestion in suggestions {
                let _ = writeln!(output, "  - {suggestion}");
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(&self, error: &CliError) -> String {
        let json = serde_json::json!({
            "error": {
                "code": error.code(),
                "message": error.to_string(),
                "hint": error.hint(),
                "suggestions": error.suggestions(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| error.to_string())
    }

    fn format_source_chain(&self, output: &mut String, error: &CliError) {
        let mut current = error.source();
        if current.is_none() {
            return;
        }

        let label = Styled::new("caused by:", self.color).fg(Color::BrightBlack);
        let _ = writeln!(output, "{label}");
        let mut depth = 0;
        while let Some(src) = current {
            let _ = writeln!(output, "  {depth}: {src}");
            current = src.source();
            depth += 1;
        }
    }
}
