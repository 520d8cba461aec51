//! Terminal colors

use std::io::IsTerminal;

const RESET: &str = "\x1b[0m";
const BOLD_RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";

/// Wraps text in ANSI color codes when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    enabled: bool,
}

impl Style {
    /// Color only when stdout is a terminal, `--no-color` was not given and
    /// `NO_COLOR` is unset.
    pub fn detect(no_color: bool) -> Self {
        let enabled = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Self { enabled }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn error(self, text: &str) -> String {
        self.paint(BOLD_RED, text)
    }

    pub fn value(self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn prompt(self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    pub fn dim(self, text: &str) -> String {
        self.paint(DIM, text)
    }
}
