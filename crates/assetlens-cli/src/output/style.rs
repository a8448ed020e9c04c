//! ANSI styling for terminal output.

use std::fmt;

/// Foreground colors used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Cyan,
    Green,
    BrightBlack,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Cyan => "36",
            Self::BrightBlack => "90",
        }
    }
}

/// A piece of text with optional color and weight.
pub struct Styled<T> {
    text: T,
    enabled: bool,
    color: Option<Color>,
    bold: bool,
}

impl<T: fmt::Display> Styled<T> {
    pub fn new(text: T, enabled: bool) -> Self {
        Self {
            text,
            enabled,
            color: None,
            bold: false,
        }
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl<T: fmt::Display> fmt::Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled || (self.color.is_none() && !self.bold) {
            return write!(f, "{}", self.text);
        }

        let mut codes = Vec::with_capacity(2);
        if self.bold {
            codes.push("1");
        }
        if let Some(color) = self.color {
            codes.push(color.code());
        }
        write!(f, "\x1b[{}m{}\x1b[0m", codes.join(";"), self.text)
    }
}
